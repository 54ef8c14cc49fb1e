mod catalog;
mod load;
mod record;
mod rows;

pub use catalog::Catalog;
pub use load::load_catalog;
pub use record::{ContentRecord, ContentType, Duration, RawRow};
pub use rows::parse_delimited;
