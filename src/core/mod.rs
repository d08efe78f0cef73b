pub mod client;
pub mod loader;
pub mod parser;
pub mod query;
