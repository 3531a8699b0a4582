pub mod cache;
pub mod executor;
pub mod results;
