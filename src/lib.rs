//! # hl7-message: HL7 v2 Message Model
//!
//! Parses and serializes HL7 v2 messages: ordered segments, each a
//! delimiter-separated record of fields.
//!
//! ## Features
//!
//! - **Delimiter-based parsing**: segments split on `\r`, fields on `|`,
//!   trailing empty fields preserved so parsing and serialization round-trip
//! - **Layout registry**: segment type identifiers map to named field positions
//!   and an ordering weight; unknown types degrade to a generic layout
//! - **Field resolution**: read and write fields by declared name, by
//!   positional reference (`element 7`), or by raw index
//! - **Set-id sequencing**: consecutive runs of repeating segments (OBX, NTE, ...)
//!   are numbered automatically as they are appended
//! - **Configuration**: extra layouts and delimiters loaded from YAML
//!
//! ## Example
//!
//! ```
//! use hl7_message::{Message, SegmentFactory};
//!
//! let mut msg = Message::parse("MSH|^~\\&|LAB|HOSP\rPID|1||123||Doe^John").unwrap();
//! assert_eq!(msg[1].read_field("patient_name").unwrap(), Some("Doe^John"));
//!
//! let factory = SegmentFactory::standard();
//! for value in ["7.2", "5.1"] {
//!     let mut obx = factory.create("OBX");
//!     obx.write_field("observation_value", value).unwrap();
//!     msg.append(obx);
//! }
//! assert_eq!(msg[3].set_id(), Some(2));
//! assert_eq!(
//!     msg.to_hl7(),
//!     "MSH|^~\\&|LAB|HOSP\rPID|1||123||Doe^John\rOBX|1||||7.2\rOBX|2||||5.1"
//! );
//! ```

pub mod config;
pub mod delimiters;
pub mod error;
pub mod layout;
pub mod message;
pub mod segment;
pub mod serialization;

pub use config::ParserConfig;
pub use delimiters::Delimiters;
pub use error::{ConfigError, Error, ParseError, ResolutionError, Result};
pub use layout::{LayoutRegistry, SegmentLayout, UNORDERED_WEIGHT};
pub use message::{Message, RawInput, SegmentQuery};
pub use segment::{FieldSelector, Segment, SegmentFactory, MAX_FIELD_INDEX};
pub use serialization::{MessageSnapshot, NdjsonWriter, SegmentSnapshot};
