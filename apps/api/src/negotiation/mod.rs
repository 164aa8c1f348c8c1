pub mod analyzer;
pub mod handlers;
pub mod improver;
pub mod industry;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod scoring;
