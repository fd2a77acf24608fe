pub mod tokenizer;
pub mod filters;
