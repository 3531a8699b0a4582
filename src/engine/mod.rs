pub mod registry;
pub mod search_index;

pub use registry::{IndexRegistry, SharedIndex};
pub use search_index::SearchIndex;
