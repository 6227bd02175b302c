// Functional operations over string-keyed mappings
pub mod mapping;
pub mod split;
pub mod filter;
pub mod transform;
pub mod merge;
pub mod document;

// Re-export core operations for convenience
pub use mapping::{Mapping, Nullable};
pub use split::{split, keys, values};
pub use filter::{select, reject, select_func, partition, collect};
pub use transform::{map_keys, map_values, map};
pub use merge::merge;
pub use document::{
    DocumentFormat, DocumentError, from_yaml, to_yaml, from_json, to_json,
    parse_document, render_document, render,
};
