//! Document gateway implementations.

#[cfg(feature = "json-file")]
pub mod json_file;
pub mod memory;

#[cfg(feature = "json-file")]
pub use json_file::JsonFileGateway;
pub use memory::MemoryGateway;
