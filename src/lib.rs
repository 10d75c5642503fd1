pub use crate::errors::MosaicError;

pub mod cli;
pub mod config;
pub mod errors;
pub mod infer;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod segments;
