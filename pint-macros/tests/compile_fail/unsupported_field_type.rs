//! Every decoded field type needs a `FormValue` impl.

use pint::FormRecord;

#[derive(FormRecord)]
struct Upload {
    #[pint("tags")]
    tags: Vec<String>,
}

fn main() {}
