//! Error types for effect registration and catalog construction

use thiserror::Error;

/// Errors raised while constructing effect definitions or registering them.
///
/// Any of these during startup registration is fatal: registration is
/// all-or-nothing, and the process must not proceed with an incompletely
/// built registry.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("effect definition has no modifiers")]
    EmptyModifiers,

    #[error("effect definition has no kinds")]
    EmptyKinds,

    #[error("effect name '{name}' is already registered")]
    DuplicateName { name: String },
}

/// Errors while reading a catalog override file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse catalog TOML")]
    ParseToml(#[from] toml::de::Error),

    #[error("unknown modifier '{name}' in catalog entry")]
    UnknownModifier { name: String },

    #[error("unknown kind '{name}' in catalog entry")]
    UnknownKind { name: String },
}

/// Errors during shipped-catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
