//! A `min` bound that is not an integer is rejected at the tag.

use pint::FormRecord;

#[derive(FormRecord)]
struct Signup {
    #[pint("age,min:young")]
    age: u8,
}

fn main() {}
