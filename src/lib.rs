//! Beta Toggles - persisted feature flags for web front-ends
//!
//! Core modules:
//! - `catalog`: static feature definitions (the read-only template)
//! - `store`: runtime toggle state, merged from storage on mount, persisted
//!   on every toggle
//! - `storage`: key-value storage boundary (LocalStorage on web, in-memory
//!   elsewhere)

pub mod catalog;
pub mod storage;
pub mod store;

pub use catalog::{FEATURES, FeatureDefinition, FeatureFlag};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use store::{FeatureState, FeatureToggleStore};
