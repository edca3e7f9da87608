//! Delimiter configuration for the HL7 wire format.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ELEMENT_DELIM: char = '|';
pub const DEFAULT_ITEM_DELIM: char = '^';
pub const DEFAULT_SEGMENT_DELIM: char = '\r';

/// The three single-character delimiters of a message.
///
/// Fixed for the lifetime of a [`crate::Message`] once it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    /// Separates fields within a segment.
    pub element: char,
    /// Separates repetitions/components within a field.
    pub item: char,
    /// Separates segments within a message.
    pub segment: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            element: DEFAULT_ELEMENT_DELIM,
            item: DEFAULT_ITEM_DELIM,
            segment: DEFAULT_SEGMENT_DELIM,
        }
    }
}

impl Delimiters {
    pub fn new(element: char, item: char, segment: char) -> Self {
        Self {
            element,
            item,
            segment,
        }
    }

    /// Read element and item delimiters from a leading MSH header.
    ///
    /// The character right after `MSH` is the element delimiter and the first
    /// encoding character is the item delimiter. Input without an MSH header
    /// yields the defaults. The segment delimiter is never detected.
    ///
    /// # Example
    /// ```
    /// use hl7_message::Delimiters;
    ///
    /// let delims = Delimiters::detect("MSH#*~\\&#APP");
    /// assert_eq!(delims.element, '#');
    /// assert_eq!(delims.item, '*');
    /// ```
    pub fn detect(raw: &str) -> Self {
        let mut delims = Self::default();

        let Some(rest) = raw.strip_prefix("MSH") else {
            return delims;
        };
        let mut chars = rest.chars();
        let Some(element) = chars.next() else {
            return delims;
        };
        delims.element = element;

        if let Some(item) = chars.next() {
            if item != element && item != delims.segment {
                delims.item = item;
            }
        }

        delims
    }
}
