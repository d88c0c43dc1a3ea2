pub mod cli;
pub mod config;
pub mod fields;
pub mod license;
pub mod packages;
pub mod render;

// Re-export main types for easy access
pub use cli::{FromSource, Options, OrderBy, OutputFormat};
pub use fields::OutputField;
pub use packages::{PackageRecord, LICENSE_UNKNOWN};
