//! Records need named fields.

use pint::FormRecord;

#[derive(FormRecord)]
struct Pair(String, u8);

fn main() {}
