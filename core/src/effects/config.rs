//! Catalog override configuration (TOML)
//!
//! Hosts ship a catalog file that disables combinations or overrides their
//! timing without recompiling. Applied to the [`RegistryBuilder`] during
//! the registration phase, before freeze.
//!
//! ```toml
//! [[combination]]
//! modifiers = ["area", "many"]
//! kinds = ["fire"]
//! cast_delay_ticks = 10
//!
//! [[combination]]
//! modifiers = ["move"]
//! kinds = ["earth"]
//! disabled = true
//! ```

use serde::{Deserialize, Serialize};

use sigil_types::{Kind, KindSet, Modifier, ModifierSet};

use super::definition::Timing;
use super::error::ConfigError;
use super::registry::RegistryBuilder;

/// Root structure of a catalog override file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Per-combination overrides
    #[serde(default, rename = "combination")]
    pub combinations: Vec<CombinationConfig>,
}

/// One override entry targeting a single tag combination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinationConfig {
    /// Modifier names (lowercase identity names)
    pub modifiers: Vec<String>,

    /// Kind names (lowercase identity names)
    pub kinds: Vec<String>,

    /// Drop this combination from the catalog entirely
    #[serde(default)]
    pub disabled: bool,

    /// Override the cast delay for this combination
    #[serde(default)]
    pub cast_delay_ticks: Option<u32>,

    /// Override the active duration for this combination
    #[serde(default)]
    pub duration_ticks: Option<u32>,
}

impl CatalogConfig {
    /// Parse a catalog override file.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply every entry to a builder: disabled combinations are removed,
    /// timing overrides replace the registered timing. Entries naming
    /// unregistered combinations are logged and skipped.
    pub fn apply<W, A>(&self, builder: &mut RegistryBuilder<W, A>) -> Result<(), ConfigError> {
        for entry in &self.combinations {
            let modifiers = entry.modifier_set()?;
            let kinds = entry.kind_set()?;

            if entry.disabled {
                if !builder.remove(&modifiers, &kinds) {
                    tracing::warn!(?modifiers, ?kinds, "catalog disable targets unknown combination");
                }
                continue;
            }

            if entry.cast_delay_ticks.is_some() || entry.duration_ticks.is_some() {
                let timing = Timing {
                    cast_delay_ticks: entry.cast_delay_ticks,
                    duration_ticks: entry.duration_ticks,
                };
                if !builder.set_timing(&modifiers, &kinds, timing) {
                    tracing::warn!(?modifiers, ?kinds, "catalog override targets unknown combination");
                }
            }
        }
        Ok(())
    }
}

impl CombinationConfig {
    fn modifier_set(&self) -> Result<ModifierSet, ConfigError> {
        self.modifiers
            .iter()
            .map(|name| {
                Modifier::from_name(name).ok_or_else(|| ConfigError::UnknownModifier {
                    name: name.clone(),
                })
            })
            .collect()
    }

    fn kind_set(&self) -> Result<KindSet, ConfigError> {
        self.kinds
            .iter()
            .map(|name| {
                Kind::from_name(name).ok_or_else(|| ConfigError::UnknownKind { name: name.clone() })
            })
            .collect()
    }
}
