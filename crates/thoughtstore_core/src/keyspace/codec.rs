use crate::config::{ConfigError, StoreConfig};
use std::fmt::{Display, Formatter};

/// Lifecycle state of a stored thought, carried by its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Active,
    Archived,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps `(namespace, id)` pairs to storage keys and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    active_prefix: String,
    archived_prefix: String,
}

impl KeyCodec {
    /// Builds a codec from two prefixes.
    ///
    /// # Errors
    /// - Either prefix is empty.
    /// - One prefix starts with the other, which would make keys ambiguous.
    pub fn new(
        active_prefix: impl Into<String>,
        archived_prefix: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = StoreConfig {
            active_prefix: active_prefix.into(),
            archived_prefix: archived_prefix.into(),
            ..StoreConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            active_prefix: config.active_prefix.clone(),
            archived_prefix: config.archived_prefix.clone(),
        })
    }

    pub fn prefix(&self, namespace: Namespace) -> &str {
        match namespace {
            Namespace::Active => &self.active_prefix,
            Namespace::Archived => &self.archived_prefix,
        }
    }

    pub fn key_for(&self, namespace: Namespace, id: &str) -> String {
        format!("{}{id}", self.prefix(namespace))
    }

    /// Classifies a key, or `None` when it belongs to neither namespace.
    pub fn namespace_of(&self, key: &str) -> Option<Namespace> {
        if key.starts_with(self.active_prefix.as_str()) {
            Some(Namespace::Active)
        } else if key.starts_with(self.archived_prefix.as_str()) {
            Some(Namespace::Archived)
        } else {
            None
        }
    }

    /// Identifier suffix of a namespaced key.
    pub fn id_of<'k>(&self, key: &'k str) -> Option<&'k str> {
        let namespace = self.namespace_of(key)?;
        key.strip_prefix(self.prefix(namespace))
    }

    /// Moves a key into `namespace`, keeping its identifier suffix.
    pub fn rekey(&self, key: &str, namespace: Namespace) -> Option<String> {
        self.id_of(key).map(|id| self.key_for(namespace, id))
    }
}
