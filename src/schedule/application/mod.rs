pub(crate) mod field_parser;
pub mod parser;
pub(crate) mod tokenizer;
