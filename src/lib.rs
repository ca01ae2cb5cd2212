pub mod config;
pub mod output;
pub mod scoring;
pub mod sheet;
pub mod stderr_buffer;
