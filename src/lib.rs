//! Password generation and strength analysis.
//!
//! [`generate`] builds a random password from a [`GenerationConfig`] and
//! [`analyze`] scores any string. Both are pure and keep no state between
//! calls. The [`core`](crate::core) and [`exporters`] modules hold the pieces a front end
//! needs around them: configuration, the persisted history and CSV export.

pub mod core;
pub mod exporters;
pub mod generators;
pub mod models;
pub mod strength;
pub mod utils;

pub use generators::{generate_batch, GeneratorError, PasswordGenerator};
pub use models::{CharacterClass, GenerationConfig, StrengthLevel, StrengthReport};

/// Generate one password. See [`generators::password::generate_password_with_rng`].
pub fn generate(config: &GenerationConfig) -> Result<String, GeneratorError> {
    generators::generate_password(config)
}

/// Score a password. Never fails.
pub fn analyze(password: &str) -> StrengthReport {
    strength::analyze_password_strength(password)
}
