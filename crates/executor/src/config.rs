//! Registry configuration via `privreg.toml`
//!
//! A deployment manages one entity type over two collections. The config
//! file picks a built-in entity (`asset` or `car`) or spells out a full
//! `[schema]` table, and may override the collection names.

use std::path::Path;

use privreg_core::{EntitySchema, RecordCodec, FIXED_FIELDS};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "privreg.toml";

/// Registry configuration loaded from `privreg.toml`.
///
/// # Example
///
/// ```toml
/// entity = "car"
/// public_collection = "collectionCars"
/// private_collection = "collectionCarPrivateDetails"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Built-in entity: `"asset"` or `"car"`. Ignored when `schema` is set.
    #[serde(default = "default_entity")]
    pub entity: String,
    /// Collection holding public records and index entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_collection: Option<String>,
    /// Collection holding private-detail records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_collection: Option<String>,
    /// Custom entity schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<EntitySchema>,
}

fn default_entity() -> String {
    "asset".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::for_entity(default_entity())
    }
}

impl RegistryConfig {
    /// Config selecting a built-in entity with default collections.
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            public_collection: None,
            private_collection: None,
            schema: None,
        }
    }

    /// Resolve the schema: the `[schema]` table wins over `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an unknown built-in entity.
    pub fn entity_schema(&self) -> Result<EntitySchema, Error> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        EntitySchema::builtin(&self.entity).ok_or_else(|| Error::InvalidConfig {
            reason: format!(
                "unknown entity '{}', expected \"asset\" or \"car\" or a [schema] table",
                self.entity
            ),
        })
    }

    /// Resolve and validate the deployment this config describes.
    pub fn deployment(&self) -> Result<Deployment, Error> {
        let schema = self.entity_schema()?;
        let mut deployment = Deployment::new(schema);
        if let Some(public) = &self.public_collection {
            deployment.public_collection = public.clone();
        }
        if let Some(private) = &self.private_collection {
            deployment.private_collection = private.clone();
        }
        deployment.validate()?;
        Ok(deployment)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# privreg registry configuration
#
# Entity managed by this deployment: "asset" (default) or "car"
#   "asset" = size attribute, transient keys asset / asset_owner / asset_delete
#   "car"   = tiresize attribute, transient keys car / car_owner / car_delete
entity = "asset"

# Collection names (default: collection<Entity>s / collection<Entity>PrivateDetails)
# public_collection = "collectionAssets"
# private_collection = "collectionAssetPrivateDetails"

# Custom entity schema; replaces `entity` when present.
# [schema]
# entity = "bike"
# public_kind = "bike"
# private_kind = "bikePrivateDetails"
# quantity_field = "gears"
# index_name = "color~name"     # optional, default "color~name"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or resolved.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::InvalidConfig {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: RegistryConfig = toml::from_str(&content).map_err(|e| Error::InvalidConfig {
            reason: format!("Failed to parse config file '{}': {}", path.display(), e),
        })?;
        // Validate the entity and collections eagerly
        config.deployment()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), Error> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::InvalidConfig {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::InvalidConfig {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}

/// A resolved deployment: one schema over two named collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Entity schema
    pub schema: EntitySchema,
    /// Collection holding public records and index entries
    pub public_collection: String,
    /// Collection holding private-detail records
    pub private_collection: String,
}

impl Deployment {
    /// Deployment of `schema` over its default collections
    pub fn new(schema: EntitySchema) -> Self {
        let title = schema.title();
        Deployment {
            public_collection: format!("collection{}s", title),
            private_collection: format!("collection{}PrivateDetails", title),
            schema,
        }
    }

    /// Built-in asset deployment
    pub fn asset() -> Self {
        Self::new(EntitySchema::asset())
    }

    /// Built-in car deployment
    pub fn car() -> Self {
        Self::new(EntitySchema::car())
    }

    /// Override both collection names
    pub fn with_collections(
        mut self,
        public_collection: impl Into<String>,
        private_collection: impl Into<String>,
    ) -> Self {
        self.public_collection = public_collection.into();
        self.private_collection = private_collection.into();
        self
    }

    /// Record codec for this deployment's schema
    pub fn codec(&self) -> RecordCodec<'_> {
        RecordCodec::new(&self.schema)
    }

    /// Check that collections are named and distinct and the schema is usable
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: String| Err(Error::InvalidConfig { reason });
        if self.schema.entity.is_empty() {
            return invalid("schema entity must be a non-empty string".to_string());
        }
        if self.schema.quantity_field.is_empty() {
            return invalid("schema quantity_field must be a non-empty string".to_string());
        }
        if FIXED_FIELDS.contains(&self.schema.quantity_field.as_str()) {
            return invalid(format!(
                "schema quantity_field '{}' collides with a fixed record field",
                self.schema.quantity_field
            ));
        }
        if self.schema.index_name.is_empty() {
            return invalid("schema index_name must be a non-empty string".to_string());
        }
        if self.public_collection.is_empty() || self.private_collection.is_empty() {
            return invalid("collection names must be non-empty strings".to_string());
        }
        if self.public_collection == self.private_collection {
            return invalid(format!(
                "public and private collections must differ, both are '{}'",
                self.public_collection
            ));
        }
        Ok(())
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::asset()
    }
}
