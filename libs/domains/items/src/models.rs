use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Size category of an item. Closed set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Item entity - the full, store-owned record.
///
/// Deliberately not `Serialize`: only [`ItemView`] crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned, write-once identifier
    pub id: i64,
    pub name: Option<String>,
    pub size: ItemSize,
    /// Server-internal value, never exposed
    pub secret: Option<String>,
}

/// External representation of an item.
///
/// Unknown fields (including `secret`) are rejected on input. `name` is free
/// text: any string, including an empty one, is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ItemView {
    /// Assigned by the server; ignored on create, must match the path on update
    #[serde(default)]
    pub id: i64,
    #[schema(example = "hex bolt")]
    pub name: Option<String>,
    pub size: ItemSize,
}
