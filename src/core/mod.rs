pub mod chain;
pub mod config;
pub mod generator;
pub mod pipeline;
pub mod render;
pub mod tokenizer;
