//! Persisted feature toggle state
//!
//! Runtime toggle state for the feature catalog, persisted as a JSON snapshot
//! under a fixed key. Persistence is best-effort: storage and parse failures
//! are logged and the store falls back to the catalog defaults, so a broken
//! backend never takes the UI down with it.

use serde::{Deserialize, Serialize};

use crate::catalog::{FEATURES, FeatureDefinition};
use crate::storage::KeyValueStorage;

/// Runtime state of a single feature
///
/// A mutable copy of a [`FeatureDefinition`]; only `enabled` ever diverges
/// from the template. Doubles as the persisted wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureState {
    pub id: String,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    /// Shown only while engineering mode is on (absent on the wire means false)
    #[serde(rename = "isEngineering", default, skip_serializing_if = "is_false")]
    pub engineering: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FeatureState {
    /// Deep-copy a definition into its default runtime state
    pub fn from_definition(def: &FeatureDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            enabled: def.enabled,
            engineering: def.engineering,
        }
    }
}

/// A persisted entry as we are willing to read it back
///
/// Only `id` and `enabled` matter on load; everything else is re-copied from
/// the definitions. Both are lenient so entries written by other versions
/// decode instead of poisoning the whole snapshot.
#[derive(Debug, Deserialize)]
struct StoredToggle {
    #[serde(default)]
    id: String,
    #[serde(default)]
    enabled: Option<bool>,
}

/// Shared, persisted feature toggle state
///
/// One instance serves the whole session; the hosting UI owns it (typically
/// as `Rc<RefCell<FeatureToggleStore>>`) and hands it to every consumer.
pub struct FeatureToggleStore {
    definitions: &'static [FeatureDefinition],
    features: Vec<FeatureState>,
    storage: Box<dyn KeyValueStorage>,
    /// Reveals engineering-marked features in the UI. Never persisted, starts
    /// false each session, mutated only by the caller.
    pub engineering_mode: bool,
}

impl FeatureToggleStore {
    /// Fixed storage key for the persisted snapshot
    pub const STORAGE_KEY: &'static str = "featureToggleStates";

    /// Create a store over the shipped catalog
    ///
    /// State starts as the catalog defaults; call
    /// [`initialize_features`](Self::initialize_features) once the UI is
    /// mounted to merge in whatever was persisted.
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self::with_definitions(FEATURES, storage)
    }

    /// Create a store over a custom definition list
    pub fn with_definitions(
        definitions: &'static [FeatureDefinition],
        storage: impl KeyValueStorage + 'static,
    ) -> Self {
        Self {
            definitions,
            features: definitions
                .iter()
                .map(FeatureState::from_definition)
                .collect(),
            storage: Box::new(storage),
            engineering_mode: false,
        }
    }

    /// Current state of every feature, in definition order
    pub fn features(&self) -> &[FeatureState] {
        &self.features
    }

    /// Whether the feature with this id is currently enabled
    ///
    /// Unknown ids read as disabled; they are not an error.
    pub fn is_feature_enabled(&self, id: &str) -> bool {
        self.features
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.enabled)
            .unwrap_or(false)
    }

    /// Flip a feature and persist the full state
    ///
    /// Toggling an unknown id logs a diagnostic and changes nothing.
    pub fn toggle_feature(&mut self, id: &str) {
        match self.features.iter_mut().find(|f| f.id == id) {
            Some(feature) => {
                feature.enabled = !feature.enabled;
                self.save_features();
            }
            None => log::error!("Feature {} not found", id),
        }
    }

    /// Merge persisted state onto the defaults; invoked once on UI mount
    ///
    /// Rebuilds the collection in definition order, taking `enabled` from the
    /// snapshot where a matching id exists and from the definition otherwise;
    /// entries with unknown ids are dropped. Read or parse failures are
    /// logged and leave the current state in place. The result is always
    /// written back, which seeds storage on first run and repairs corrupt
    /// data. Safe to call again on remount: it simply re-merges from whatever
    /// was last persisted.
    pub fn initialize_features(&mut self) {
        match self.storage.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match parse_snapshot(&raw) {
                Ok(stored) => {
                    self.features = self
                        .definitions
                        .iter()
                        .map(|def| {
                            let mut state = FeatureState::from_definition(def);
                            state.enabled = stored
                                .iter()
                                .find(|t| t.id == def.id)
                                .and_then(|t| t.enabled)
                                .unwrap_or(def.enabled);
                            state
                        })
                        .collect();
                    log::info!("Loaded {} feature toggles", self.features.len());
                }
                Err(e) => log::warn!("Failed to parse feature toggles: {}", e),
            },
            Ok(None) => log::info!("No feature toggles stored, using defaults"),
            Err(e) => log::warn!("Failed to read feature toggles: {}", e),
        }
        self.save_features();
    }

    /// Serialize the collection and write it under the fixed key
    ///
    /// Write failures are logged and swallowed; in-memory state stays
    /// authoritative even when persistence lags.
    fn save_features(&self) {
        let json = match serde_json::to_string(&self.features) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize feature toggles: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(Self::STORAGE_KEY, &json) {
            log::error!("Failed to save feature toggles: {}", e);
        }
    }
}

/// Decode a persisted snapshot leniently
///
/// The top level must be a JSON array; elements that are not usable entries
/// are dropped rather than failing the whole snapshot.
fn parse_snapshot(raw: &str) -> Result<Vec<StoredToggle>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    Ok(values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}
