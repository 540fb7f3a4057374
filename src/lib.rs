#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod config;
pub mod decoder;
pub mod domain;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod invocation;
pub mod pipeline;
pub mod port;
pub mod response;
pub mod simulator;
pub mod test_support;

pub use healthcheck::healthcheck_with_port;
pub use pipeline::IngestPipeline;
