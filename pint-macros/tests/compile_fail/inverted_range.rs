//! `min` above `max` can never be satisfied.

use pint::FormRecord;

#[derive(FormRecord)]
struct Signup {
    #[pint("age,min:10,max:5")]
    age: u8,
}

fn main() {}
