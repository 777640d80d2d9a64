//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! credit-claimer.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClaimerConfig (validated, immutable)
//!
//! keys.json / CLAIMER_PRIVATE_KEYS
//!     → keys.rs (parse, reject blanks)
//!     → Vec<Wallet> (ordered, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod keys;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::ApiConfig;
pub use schema::ChainConfig;
pub use schema::ClaimerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ScheduleConfig;
pub use schema::WalletsConfig;
