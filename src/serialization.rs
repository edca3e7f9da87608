//! JSON views of parsed messages.
//!
//! This module provides a serializable snapshot of a [`Message`] and an
//! NDJSON writer emitting one message per line.

use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

use crate::delimiters::Delimiters;
use crate::error::Result;
use crate::message::Message;
use crate::segment::Segment;

/// Serializable view of one segment.
#[derive(Debug, Serialize)]
pub struct SegmentSnapshot<'a> {
    pub type_id: &'a str,
    pub weight: i32,
    pub fields: &'a [String],
    /// Declared field names with a stored value, in layout order
    pub named: IndexMap<&'a str, &'a str>,
}

impl<'a> From<&'a Segment> for SegmentSnapshot<'a> {
    fn from(segment: &'a Segment) -> Self {
        let named = segment
            .layout()
            .fields()
            .filter_map(|(name, index)| {
                segment
                    .fields()
                    .get(index)
                    .map(|value| (name, value.as_str()))
            })
            .collect();

        Self {
            type_id: segment.type_id(),
            weight: segment.weight(),
            fields: segment.fields(),
            named,
        }
    }
}

/// Serializable view of a whole message.
#[derive(Debug, Serialize)]
pub struct MessageSnapshot<'a> {
    pub delimiters: Delimiters,
    pub segments: Vec<SegmentSnapshot<'a>>,
}

impl<'a> From<&'a Message> for MessageSnapshot<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            delimiters: message.delimiters(),
            segments: message.iter().map(SegmentSnapshot::from).collect(),
        }
    }
}

impl Message {
    /// Snapshot of this message for serialization.
    pub fn snapshot(&self) -> MessageSnapshot<'_> {
        MessageSnapshot::from(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.snapshot())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes one message snapshot per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single message as an NDJSON line
    pub fn write(&mut self, message: &Message) -> Result<()> {
        let json = serde_json::to_string(&message.snapshot())?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Write multiple messages
    pub fn write_all<'m>(&mut self, messages: impl IntoIterator<Item = &'m Message>) -> Result<()> {
        for message in messages {
            self.write(message)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
