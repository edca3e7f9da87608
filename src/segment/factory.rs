//! Builds segments bound to their registered layout.

use crate::delimiters::Delimiters;
use crate::error::ParseError;
use crate::layout::LayoutRegistry;

use super::Segment;

/// Turns raw segment text into typed segments using a [`LayoutRegistry`].
///
/// Unknown type identifiers are never rejected; they get the generic layout.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFactory<'r> {
    registry: &'r LayoutRegistry,
    delimiters: Delimiters,
}

impl<'r> SegmentFactory<'r> {
    pub fn new(registry: &'r LayoutRegistry, delimiters: Delimiters) -> Self {
        Self {
            registry,
            delimiters,
        }
    }

    /// Factory over the standard layouts with default delimiters.
    pub fn standard() -> SegmentFactory<'static> {
        SegmentFactory::new(LayoutRegistry::standard(), Delimiters::default())
    }

    pub fn registry(&self) -> &'r LayoutRegistry {
        self.registry
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Build a segment from raw text split on the element delimiter.
    ///
    /// # Example
    /// ```
    /// use hl7_message::SegmentFactory;
    ///
    /// let factory = SegmentFactory::standard();
    /// let nte = factory.build("NTE|1||Fasting sample").unwrap();
    /// assert_eq!(nte.read_field("comment").unwrap(), Some("Fasting sample"));
    ///
    /// let custom = factory.build("ZZZ|foo|bar").unwrap();
    /// assert!(custom.is_generic());
    /// assert_eq!(custom.type_id(), "ZZZ");
    /// ```
    pub fn build(&self, raw: &str) -> Result<Segment, ParseError> {
        let segment = Segment::parse(raw, self.delimiters.element).map_err(|e| match e {
            ParseError::EmptySegment => ParseError::MalformedSegment(raw.to_string()),
            other => other,
        })?;

        let layout = match self.registry.lookup(segment.type_id()) {
            Some(layout) => layout,
            None => {
                tracing::debug!(
                    "No layout registered for segment type '{}', using generic layout",
                    segment.type_id()
                );
                self.registry.generic()
            }
        };

        tracing::trace!(
            "Built {} segment with {} fields",
            segment.type_id(),
            segment.len()
        );
        Ok(segment.rebind(layout, self.delimiters))
    }

    /// Create an empty segment of the given type, ready for `write_field`.
    pub fn create(&self, type_id: &str) -> Segment {
        Segment::from_parts(
            vec![type_id.to_string()],
            self.registry.resolve(type_id),
            self.delimiters,
        )
    }
}
