//! A single HL7 segment: an ordered list of raw field values bound to a layout.
//!
//! Field values are kept as plain strings. Repetitions are split on demand
//! with [`Segment::repetitions`], never eagerly.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::delimiters::Delimiters;
use crate::error::{ParseError, ResolutionError};
use crate::layout::{LayoutRegistry, SegmentLayout, SET_ID_FIELD};

pub mod factory;
pub mod selector;

pub use factory::SegmentFactory;
pub use selector::{positional_index, FieldSelector};

/// Highest field position a write may target.
pub const MAX_FIELD_INDEX: usize = 9_999;

/// One record of a message.
///
/// Index 0 holds the type identifier. `fields` only ever grows: writes past
/// the end pad with empty strings, nothing is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    fields: Vec<String>,
    layout: Arc<SegmentLayout>,
    delimiters: Delimiters,
}

impl Segment {
    /// Split a raw segment on `element_delim` into a generic segment.
    ///
    /// Trailing empty fields are kept, so `"ZZZ|a|"` has three fields.
    /// Use [`SegmentFactory::build`] to bind the registered layout instead.
    pub fn parse(raw: &str, element_delim: char) -> Result<Self, ParseError> {
        let fields: Vec<String> = raw.split(element_delim).map(str::to_string).collect();
        if fields.is_empty() {
            return Err(ParseError::EmptySegment);
        }

        Ok(Self {
            fields,
            layout: LayoutRegistry::standard().generic(),
            delimiters: Delimiters {
                element: element_delim,
                ..Delimiters::default()
            },
        })
    }

    pub(crate) fn from_parts(
        fields: Vec<String>,
        layout: Arc<SegmentLayout>,
        delimiters: Delimiters,
    ) -> Self {
        Self {
            fields,
            layout,
            delimiters,
        }
    }

    pub(crate) fn rebind(mut self, layout: Arc<SegmentLayout>, delimiters: Delimiters) -> Self {
        self.layout = layout;
        self.delimiters = delimiters;
        self
    }

    /// Type identifier stored in field 0.
    pub fn type_id(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    pub fn layout(&self) -> &SegmentLayout {
        &self.layout
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Whether the segment fell back to the generic layout.
    pub fn is_generic(&self) -> bool {
        self.layout.is_generic()
    }

    pub fn weight(&self) -> i32 {
        self.layout.weight()
    }

    /// Names declared by the layout, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.layout.field_names()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve a selector to a field position.
    pub fn resolve<'a>(
        &self,
        selector: impl Into<FieldSelector<'a>>,
    ) -> Result<usize, ResolutionError> {
        selector::resolve(&self.layout, self.type_id(), selector.into())
    }

    /// Read a field by name or position.
    ///
    /// Positions past the end read as `None`. A value without item
    /// delimiters is a single repetition and comes back as-is; values with
    /// item delimiters are returned raw, unsplit.
    ///
    /// # Example
    /// ```
    /// use hl7_message::SegmentFactory;
    ///
    /// let pid = SegmentFactory::standard().build("PID|1||123||Doe^John").unwrap();
    /// assert_eq!(pid.read_field("patient_name").unwrap(), Some("Doe^John"));
    /// assert_eq!(pid.read_field("element 3").unwrap(), Some("123"));
    /// assert_eq!(pid.read_field(40).unwrap(), None);
    /// ```
    pub fn read_field<'a>(
        &self,
        selector: impl Into<FieldSelector<'a>>,
    ) -> Result<Option<&str>, ResolutionError> {
        let index = self.resolve(selector)?;
        Ok(self.fields.get(index).map(String::as_str))
    }

    /// Write a field by name or position, padding with empty fields as needed.
    ///
    /// Positions past [`MAX_FIELD_INDEX`] are rejected and leave the segment
    /// untouched.
    pub fn write_field<'a>(
        &mut self,
        selector: impl Into<FieldSelector<'a>>,
        value: impl ToString,
    ) -> Result<(), ResolutionError> {
        let index = self.resolve(selector)?;
        if index > MAX_FIELD_INDEX {
            return Err(ResolutionError::IndexOutOfRange {
                segment: self.type_id().to_string(),
                index,
            });
        }
        self.set_at(index, value.to_string());
        Ok(())
    }

    /// Overwrite the type identifier in field 0.
    pub(crate) fn retype(&mut self, type_id: &str) {
        self.set_at(0, type_id.to_string());
    }

    fn set_at(&mut self, index: usize, value: String) {
        if index >= self.fields.len() {
            self.fields.resize(index + 1, String::new());
        }
        self.fields[index] = value;
    }

    /// Split a field on the item delimiter.
    ///
    /// Absent fields yield an empty list.
    pub fn repetitions<'a>(
        &self,
        selector: impl Into<FieldSelector<'a>>,
    ) -> Result<Vec<&str>, ResolutionError> {
        let item = self.delimiters.item;
        Ok(self
            .read_field(selector)?
            .map(|value| value.split(item).collect())
            .unwrap_or_default())
    }

    pub fn has_set_id(&self) -> bool {
        self.layout.has_set_id()
    }

    /// Numeric set id, if the layout declares one and it holds a number.
    pub fn set_id(&self) -> Option<u32> {
        if !self.has_set_id() {
            return None;
        }
        self.read_field(SET_ID_FIELD)
            .ok()
            .flatten()
            .and_then(|value| value.trim().parse().ok())
    }

    pub(crate) fn assign_set_id(&mut self, set_id: u32) {
        if let Some(index) = self.layout.index_of(SET_ID_FIELD) {
            self.set_at(index, set_id.to_string());
        }
    }

    /// Join the fields with `element_delim`.
    pub fn to_raw(&self, element_delim: char) -> String {
        let mut out = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(element_delim);
            }
            out.push_str(field);
        }
        out
    }

    /// Compare by ordering weight only; equal weights compare equal.
    pub fn cmp_weight(&self, other: &Segment) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw(self.delimiters.element))
    }
}
