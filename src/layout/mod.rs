//! Segment layouts: the field-name to index mapping and ordering weight
//! registered for one segment type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod registry;
pub mod standard;

pub use registry::LayoutRegistry;

/// Weight of segment types with no explicit ordering.
///
/// Sorts after every explicitly assigned weight.
pub const UNORDERED_WEIGHT: i32 = i32::MAX;

/// Type identifier carried by the generic fallback layout.
pub const GENERIC_TYPE_ID: &str = "*";

/// Field name that marks a layout as taking part in set-id sequencing.
pub const SET_ID_FIELD: &str = "set_id";

/// Only name exposed by the generic fallback layout.
pub const SEQUENCE_ID_FIELD: &str = "sequence_id";

/// Layout for one segment type.
///
/// Immutable once registered; segments hold it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentLayout {
    type_id: String,

    /// `None` ranks the type with unregistered ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<i32>,

    /// field name -> 0-based field index
    #[serde(default)]
    fields: IndexMap<String, usize>,
}

impl SegmentLayout {
    /// Create a layout from a type identifier, a weight and named field positions.
    ///
    /// # Example
    /// ```
    /// use hl7_message::SegmentLayout;
    ///
    /// let layout = SegmentLayout::new("ZPI", 40, [("set_id", 1), ("plan_code", 2)]);
    /// assert_eq!(layout.index_of("plan_code"), Some(2));
    /// ```
    pub fn new<I, S>(type_id: impl Into<String>, weight: i32, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            type_id: type_id.into(),
            weight: Some(weight),
            fields: fields
                .into_iter()
                .map(|(name, index)| (name.into(), index))
                .collect(),
        }
    }

    /// The layout bound to segments whose type is not registered.
    pub fn generic() -> Self {
        Self {
            type_id: GENERIC_TYPE_ID.to_string(),
            weight: None,
            fields: IndexMap::from([(SEQUENCE_ID_FIELD.to_string(), 1)]),
        }
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Ordering weight; layouts without one get [`UNORDERED_WEIGHT`].
    pub fn weight(&self) -> i32 {
        self.weight.unwrap_or(UNORDERED_WEIGHT)
    }

    /// The weight as declared, if one was.
    pub fn explicit_weight(&self) -> Option<i32> {
        self.weight
    }

    pub fn is_generic(&self) -> bool {
        self.type_id == GENERIC_TYPE_ID
    }

    /// Declared index of a field name, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.get(name).copied()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether segments of this type are numbered by [`crate::Message::resequence`].
    pub fn has_set_id(&self) -> bool {
        self.has_field(SET_ID_FIELD)
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Declared `(name, index)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, usize)> {
        self.fields.iter().map(|(name, index)| (name.as_str(), *index))
    }

    pub(crate) fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }
}
