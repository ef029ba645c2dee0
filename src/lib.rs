//! Pass Forge - password mutation and wordlist generation
//!
//! Expands a seed list of words into a filtered, deduplicated stream of
//! candidate passwords for security testing.

pub mod analysis;
pub mod error;
pub mod mutate;
pub mod pipeline;
pub mod score;
pub mod types;
#[cfg(feature = "update-check")]
pub mod update;
pub mod wordlist;

// Re-export commonly used types
pub use error::{PassForgeError, Result};
pub use types::{
    MetricsSnapshot, MutationConfig, MutationLevel, RecipeMode, RunMetrics, SortMode,
};

// Re-export main functionality
pub use analysis::WordlistStats;
pub use pipeline::{Pipeline, RunOutput};
pub use score::{efficacy, strength};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
