//! Conversion between object graphs and trees.

pub mod coerce;

mod de;
pub use de::{deserialize, deserialize_field};

mod format;
pub use format::DateFormat;

mod ser;
pub use ser::{serialize, MAX_ORDINAL_INDEX};
