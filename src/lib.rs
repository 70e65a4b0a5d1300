pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod finalizer;
pub mod logger;
pub mod reporter;

// Re-export commonly used types
pub use error::{PostgenError, Result, Step};
