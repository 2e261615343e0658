//! Entity schemas
//!
//! One registry deployment manages exactly one entity type. The schema names
//! that entity and the handful of strings that differ between deployments:
//! the `docType` tags written into stored records, the JSON field carrying
//! the positive-integer attribute, and the name of the secondary index.
//! Everything else about the protocol is shared.

use serde::{Deserialize, Serialize};

/// Index name used by the built-in schemas
pub const DEFAULT_INDEX_NAME: &str = "color~name";

/// Naming and field layout for one registry entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name, also the base of the transient-map keys (e.g. `asset`)
    pub entity: String,
    /// `docType` tag written into public records
    pub public_kind: String,
    /// `docType` tag written into private-detail records
    pub private_kind: String,
    /// JSON field name of the positive-integer attribute (`size`, `tiresize`)
    pub quantity_field: String,
    /// Name of the `(color, name)` composite index
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

impl EntitySchema {
    /// Build a schema with the conventional kind tags for `entity`
    pub fn new(entity: impl Into<String>, quantity_field: impl Into<String>) -> Self {
        let entity = entity.into();
        Self {
            public_kind: entity.clone(),
            private_kind: format!("{}PrivateDetails", entity),
            quantity_field: quantity_field.into(),
            index_name: default_index_name(),
            entity,
        }
    }

    /// Generic asset registry
    pub fn asset() -> Self {
        Self::new("asset", "size")
    }

    /// Car registry
    pub fn car() -> Self {
        Self::new("car", "tiresize")
    }

    /// Look up a built-in schema by entity name
    pub fn builtin(entity: &str) -> Option<Self> {
        match entity {
            "asset" => Some(Self::asset()),
            "car" => Some(Self::car()),
            _ => None,
        }
    }

    /// Transient key carrying a create payload
    pub fn create_key(&self) -> String {
        self.entity.clone()
    }

    /// Transient key carrying a transfer payload
    pub fn transfer_key(&self) -> String {
        format!("{}_owner", self.entity)
    }

    /// Transient key carrying a delete payload
    pub fn delete_key(&self) -> String {
        format!("{}_delete", self.entity)
    }

    /// Entity name with the first letter upper-cased (`Asset`, `Car`)
    pub fn title(&self) -> String {
        let mut chars = self.entity.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for EntitySchema {
    fn default() -> Self {
        Self::asset()
    }
}
