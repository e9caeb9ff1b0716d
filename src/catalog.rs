//! Static feature catalog
//!
//! The read-only template the runtime toggle state is copied from. Adding a
//! feature here is all it takes to surface it in the settings panel; persisted
//! state for ids that are no longer listed is dropped on the next load.

/// Identifier for a shipped feature flag
///
/// Call sites should use these instead of spelling raw id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFlag {
    InfiniteScrolling,
    CommandPalette,
    OfflineMode,
    Extensions,
}

impl FeatureFlag {
    /// Every shipped flag, in settings-panel display order
    pub const ALL: [FeatureFlag; 4] = [
        FeatureFlag::InfiniteScrolling,
        FeatureFlag::CommandPalette,
        FeatureFlag::OfflineMode,
        FeatureFlag::Extensions,
    ];

    /// Storage id for this flag (lowercase/underscore convention)
    pub const fn id(self) -> &'static str {
        match self {
            FeatureFlag::InfiniteScrolling => "infinite_scrolling",
            FeatureFlag::CommandPalette => "command_palette",
            FeatureFlag::OfflineMode => "offline_mode",
            FeatureFlag::Extensions => "extensions",
        }
    }

    /// Look up a flag by its storage id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.id() == id)
    }
}

/// An immutable feature template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDefinition {
    /// Unique id, lowercase/underscore
    pub id: &'static str,
    /// Short human-readable name
    pub title: &'static str,
    /// One-sentence explanation shown in the settings panel
    pub description: &'static str,
    /// Default enabled state
    pub enabled: bool,
    /// Shown only while engineering mode is on
    pub engineering: bool,
}

/// The shipped feature catalog, in display order
pub const FEATURES: &[FeatureDefinition] = &[
    FeatureDefinition {
        id: FeatureFlag::InfiniteScrolling.id(),
        title: "Infinite scrolling",
        description: "Load more rows automatically as you scroll through large views.",
        enabled: true,
        engineering: false,
    },
    FeatureDefinition {
        id: FeatureFlag::CommandPalette.id(),
        title: "Command palette",
        description: "Jump to any view or action from a keyboard-driven palette.",
        enabled: false,
        engineering: true,
    },
    FeatureDefinition {
        id: FeatureFlag::OfflineMode.id(),
        title: "Offline mode",
        description: "Keep working without a connection and sync changes when back online.",
        enabled: false,
        engineering: true,
    },
    FeatureDefinition {
        id: FeatureFlag::Extensions.id(),
        title: "Extensions",
        description: "Add new features and integrations to the app through extensions.",
        enabled: false,
        engineering: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in FEATURES.iter().enumerate() {
            for b in &FEATURES[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate feature id in catalog");
            }
        }
    }

    #[test]
    fn test_flag_id_roundtrip() {
        for flag in FeatureFlag::ALL {
            assert_eq!(FeatureFlag::from_id(flag.id()), Some(flag));
        }
        assert_eq!(FeatureFlag::from_id("ghost_feature"), None);
    }

    #[test]
    fn test_catalog_covers_all_flags() {
        assert_eq!(FEATURES.len(), FeatureFlag::ALL.len());
        for flag in FeatureFlag::ALL {
            assert!(FEATURES.iter().any(|def| def.id == flag.id()));
        }
    }

    #[test]
    fn test_engineering_flags_default_off() {
        // Engineering-only features must not be live for regular users out of
        // the box.
        for def in FEATURES {
            if def.engineering {
                assert!(!def.enabled, "{} is engineering but enabled by default", def.id);
            }
        }
    }
}
