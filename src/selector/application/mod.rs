pub(crate) mod matcher;
pub mod parser;
pub mod service;
pub mod snapshot;
