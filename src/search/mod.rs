mod engine;

pub use engine::{search, SearchField};
