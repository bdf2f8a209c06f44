extern crate core;

pub mod config;
pub mod parser;
pub mod source;

pub type Result<T> = core::result::Result<T, Error>;
pub type Error = Box<dyn std::error::Error>;
