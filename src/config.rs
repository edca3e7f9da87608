//! Parser configuration loaded from YAML.
//!
//! A configuration file may set the delimiters and declare extra segment
//! layouts (site-specific Z-segments, or overrides of standard ones):
//!
//! ```yaml
//! delimiters:
//!   element: "|"
//!   item: "^"
//! layouts:
//!   - type_id: ZPI
//!     weight: 40
//!     fields:
//!       set_id: 1
//!       plan_code: 2
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::delimiters::Delimiters;
use crate::error::{ConfigError, ParseError};
use crate::layout::{LayoutRegistry, SegmentLayout};
use crate::message::{Message, RawInput};

/// Delimiters plus additional layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub delimiters: Delimiters,

    #[serde(default)]
    pub layouts: Vec<SegmentLayout>,
}

impl ParserConfig {
    /// Load parser configuration from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid YAML, or declares
    /// an invalid layout.
    ///
    /// # Example
    /// ```ignore
    /// use hl7_message::ParserConfig;
    ///
    /// let config = ParserConfig::load_from_file("config/layouts.yaml")?;
    /// let registry = config.build_registry();
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&contents)?;
        tracing::info!(
            "Loaded {} layouts from {}",
            config.layouts.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // an empty document means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Add the layouts of every `.yaml`/`.yml` file in a directory.
    ///
    /// Files that fail to load are skipped with a warning. Delimiters of the
    /// loaded files are ignored.
    ///
    /// # Returns
    /// Number of layouts added
    pub fn load_layouts_from_dir<P: AsRef<Path>>(&mut self, dir_path: P) -> Result<usize, ConfigError> {
        let dir_path = dir_path.as_ref();

        let entries = fs::read_dir(dir_path).map_err(|source| ConfigError::Io {
            path: dir_path.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::Io {
                path: dir_path.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            ) {
                paths.push(path);
            }
        }
        // deterministic "last registration wins" across files
        paths.sort();

        let mut count = 0;
        for path in paths {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    count += config.layouts.len();
                    self.layouts.extend(config.layouts);
                }
                Err(e) => {
                    tracing::warn!("Skipping layout file {}: {}", path.display(), e);
                }
            }
        }

        Ok(count)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for layout in &self.layouts {
            if layout.type_id().trim().is_empty() {
                return Err(ConfigError::InvalidLayout(
                    "type_id cannot be empty".to_string(),
                ));
            }
            if layout.field_names().any(|name| name.trim().is_empty()) {
                return Err(ConfigError::InvalidLayout(format!(
                    "layout '{}' has an empty field name",
                    layout.type_id()
                )));
            }
        }
        Ok(())
    }

    /// Standard layouts with the configured ones registered on top.
    pub fn build_registry(&self) -> LayoutRegistry {
        let mut registry = LayoutRegistry::with_standard_layouts();
        for layout in &self.layouts {
            registry.register_layout(layout.clone());
        }
        registry
    }

    /// Parse a message with this configuration's delimiters and layouts.
    pub fn parse<'a>(&self, input: impl Into<RawInput<'a>>) -> Result<Message, ParseError> {
        Message::parse_with(input, self.delimiters, &self.build_registry())
    }
}
