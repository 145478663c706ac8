//! Native parameter and result value types, and their mapping to Arrow.

mod mapping;
mod value;

pub use mapping::{TypeMapper, TYPE_NAME_METADATA_KEY};
pub use value::{format_timestamp, Parameter, Value};
