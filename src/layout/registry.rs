//! Registry mapping segment type identifiers to their layouts.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::{standard, SegmentLayout, UNORDERED_WEIGHT};

static STANDARD: LazyLock<LayoutRegistry> = LazyLock::new(LayoutRegistry::with_standard_layouts);

/// Registry of segment layouts keyed by type identifier.
///
/// Populated once, then shared read-only. Lookups of unregistered types
/// report "not found" and never fail.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: HashMap<String, Arc<SegmentLayout>>,
    generic: Arc<SegmentLayout>,
}

impl LayoutRegistry {
    /// Create an empty registry (only the generic fallback is available).
    pub fn new() -> Self {
        Self {
            layouts: HashMap::new(),
            generic: Arc::new(SegmentLayout::generic()),
        }
    }

    /// Create a registry holding the declared standard layouts.
    pub fn with_standard_layouts() -> Self {
        let mut registry = Self::new();
        for layout in standard::layouts() {
            registry.register_layout(layout);
        }
        registry
    }

    /// Process-wide registry of standard layouts.
    pub fn standard() -> &'static LayoutRegistry {
        &STANDARD
    }

    /// Register (or replace) a layout from its parts.
    ///
    /// # Example
    /// ```
    /// use hl7_message::LayoutRegistry;
    ///
    /// let mut registry = LayoutRegistry::new();
    /// registry.register("ZPI", 40, [("set_id", 1), ("plan_code", 2)]);
    /// assert_eq!(registry.weight_of("ZPI"), 40);
    /// ```
    pub fn register<I, S>(&mut self, type_id: impl Into<String>, weight: i32, fields: I)
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        self.register_layout(SegmentLayout::new(type_id, weight, fields));
    }

    /// Register (or replace) a layout. Last registration wins.
    pub fn register_layout(&mut self, layout: SegmentLayout) {
        let layout = if layout.explicit_weight() == Some(UNORDERED_WEIGHT) {
            // explicit weights must stay strictly ahead of unordered types
            tracing::warn!(
                "Clamping weight of layout '{}' below the unordered weight",
                layout.type_id()
            );
            layout.with_weight(UNORDERED_WEIGHT - 1)
        } else {
            layout
        };

        if self.layouts.contains_key(layout.type_id()) {
            tracing::debug!("Replacing layout for segment type '{}'", layout.type_id());
        }
        self.layouts
            .insert(layout.type_id().to_string(), Arc::new(layout));
    }

    /// Look up the layout registered for a type identifier.
    pub fn lookup(&self, type_id: &str) -> Option<Arc<SegmentLayout>> {
        self.layouts.get(type_id).cloned()
    }

    /// Layout for a type identifier, or the generic fallback.
    pub fn resolve(&self, type_id: &str) -> Arc<SegmentLayout> {
        self.lookup(type_id)
            .unwrap_or_else(|| Arc::clone(&self.generic))
    }

    /// Ordering weight of a type identifier.
    ///
    /// Unregistered types get [`UNORDERED_WEIGHT`].
    pub fn weight_of(&self, type_id: &str) -> i32 {
        self.layouts
            .get(type_id)
            .map(|layout| layout.weight())
            .unwrap_or(UNORDERED_WEIGHT)
    }

    /// The shared generic fallback layout.
    pub fn generic(&self) -> Arc<SegmentLayout> {
        Arc::clone(&self.generic)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.layouts.contains_key(type_id)
    }

    /// Registered type identifiers, sorted.
    pub fn type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.layouts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
