pub mod config;
pub mod context;
pub mod error;
pub mod settings;
pub mod validation;

// Re-export main types
pub use config::*;
pub use context::*;
pub use error::*;
pub use settings::*;

pub use validation::validate;
