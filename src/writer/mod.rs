pub mod mutation;
pub(crate) mod worker;
