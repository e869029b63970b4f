//! Generic records are rejected.

use pint::FormRecord;

#[derive(FormRecord)]
struct Wrapper<T> {
    value: T,
}

fn main() {}
