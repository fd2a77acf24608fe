pub mod parser;
pub mod matcher;
