pub mod bedrock;
pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod model;
pub mod processor;
pub mod s3;
pub mod store;

pub use error::{Error, Result};
