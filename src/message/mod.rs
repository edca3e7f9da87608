//! HL7 message: ordered segments plus an index of segments by type.
//!
//! Parsing splits on the segment delimiter, routes every chunk through a
//! [`SegmentFactory`] and finally renumbers set ids of consecutive
//! same-type runs (see [`Message::resequence`]).

use std::fmt;
use std::ops::{Index, Range, RangeBounds};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::delimiters::Delimiters;
use crate::error::ParseError;
use crate::layout::LayoutRegistry;
use crate::segment::{Segment, SegmentFactory};

pub mod input;
pub mod query;

pub use input::RawInput;
pub use query::SegmentQuery;

/// An ordered sequence of segments.
///
/// `segments_by_type` maps a type identifier to positions in `segments`,
/// in document order. Every indexed position refers to a segment of that
/// type and every segment is indexed exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    segments: Vec<Segment>,
    segments_by_type: IndexMap<String, Vec<usize>>,
    delimiters: Delimiters,
}

impl Message {
    /// Create an empty message with the given delimiters.
    pub fn new(delimiters: Delimiters) -> Self {
        Self {
            segments: Vec::new(),
            segments_by_type: IndexMap::new(),
            delimiters,
        }
    }

    /// Parse a document (or list of documents) with default delimiters and
    /// the standard layouts.
    ///
    /// # Example
    /// ```
    /// use hl7_message::Message;
    ///
    /// let msg = Message::parse("MSH|^~\\&|A|B|C|D\rPID|1||123||Doe^John").unwrap();
    /// assert_eq!(msg.len(), 2);
    /// assert_eq!(msg[0].read_field("sending_app").unwrap(), Some("A"));
    /// ```
    pub fn parse<'a>(input: impl Into<RawInput<'a>>) -> Result<Self, ParseError> {
        Self::parse_with(input, Delimiters::default(), LayoutRegistry::standard())
    }

    /// Parse with explicit delimiters and layout registry.
    pub fn parse_with<'a>(
        input: impl Into<RawInput<'a>>,
        delimiters: Delimiters,
        registry: &LayoutRegistry,
    ) -> Result<Self, ParseError> {
        let input = input.into();
        let chunks: Vec<&str> = input
            .documents()
            .into_iter()
            .flat_map(|doc| doc.split(delimiters.segment))
            .collect();

        if chunks.is_empty() {
            return Err(ParseError::NoSegments);
        }

        let factory = SegmentFactory::new(registry, delimiters);
        let mut message = Self::new(delimiters);
        for chunk in chunks {
            message.push_indexed(factory.build(chunk)?);
        }
        message.resequence();

        tracing::debug!(
            "Parsed message with {} segments ({} types)",
            message.len(),
            message.segments_by_type.len()
        );
        Ok(message)
    }

    /// Parse a single document, taking element and item delimiters from its
    /// MSH header.
    pub fn parse_detecting(text: &str) -> Result<Self, ParseError> {
        let delimiters = Delimiters::detect(text);
        Self::parse_with(text, delimiters, LayoutRegistry::standard())
    }

    /// Parse a JSON string or array of strings.
    pub fn parse_value(value: &JsonValue) -> Result<Self, ParseError> {
        Self::parse(RawInput::try_from(value)?)
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Add a segment at the end and renumber set ids.
    pub fn append(&mut self, segment: Segment) {
        self.push_indexed(segment);
        self.resequence();
    }

    fn push_indexed(&mut self, segment: Segment) {
        let position = self.segments.len();
        self.segments_by_type
            .entry(segment.type_id().to_string())
            .or_default()
            .push(position);
        self.segments.push(segment);
    }

    fn reindex(&mut self) {
        self.segments_by_type.clear();
        for (position, segment) in self.segments.iter().enumerate() {
            self.segments_by_type
                .entry(segment.type_id().to_string())
                .or_default()
                .push(position);
        }
    }

    /// Edit the segment at `index` in place.
    ///
    /// The type index is rebuilt if the edit changes the segment type.
    pub fn edit<R>(&mut self, index: usize, f: impl FnOnce(&mut Segment) -> R) -> Option<R> {
        let segment = self.segments.get_mut(index)?;
        let before = segment.type_id().to_string();
        let result = f(segment);
        if segment.type_id() != before {
            self.reindex();
        }
        Some(result)
    }

    /// Replace the segment at `index`, returning the old one.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, segment: Segment) -> Segment {
        let old = std::mem::replace(&mut self.segments[index], segment);
        self.reindex();
        old
    }

    /// Replace a range of segments in place, returning the removed ones.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn splice<R, I>(&mut self, range: R, replacement: I) -> Vec<Segment>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = Segment>,
    {
        let removed = self.segments.splice(range, replacement).collect();
        self.reindex();
        removed
    }

    /// Segments of one type, collapsed to a single segment when only one exists.
    ///
    /// # Example
    /// ```
    /// use hl7_message::{Message, SegmentQuery};
    ///
    /// let msg = Message::parse("MSH|^~\\&\rNTE|1||a\rNTE|2||b").unwrap();
    /// assert!(matches!(msg.by_type("MSH"), Some(SegmentQuery::One(_))));
    /// assert_eq!(msg.by_type("NTE").map(|q| q.len()), Some(2));
    /// assert!(msg.by_type("OBX").is_none());
    /// ```
    pub fn by_type(&self, type_id: &str) -> Option<SegmentQuery<'_>> {
        let positions = self.segments_by_type.get(type_id)?;
        SegmentQuery::from_matches(positions.iter().map(|&i| &self.segments[i]).collect())
    }

    /// Add a segment to the group of `type_id`.
    ///
    /// The segment is placed after all existing segments; nothing already in
    /// the message is replaced and set ids are left untouched. A segment of a
    /// different type is retyped to `type_id` so the index stays consistent.
    pub fn insert_by_type(&mut self, type_id: &str, mut segment: Segment) {
        if segment.type_id() != type_id {
            tracing::debug!(
                "Retyping {} segment as {} for group insert",
                segment.type_id(),
                type_id
            );
            segment.retype(type_id);
        }
        self.push_indexed(segment);
    }

    /// Type identifiers present, in order of first appearance.
    pub fn segment_types(&self) -> Vec<&str> {
        self.segments_by_type.keys().map(String::as_str).collect()
    }

    /// Renumber set ids of consecutive same-type segments.
    ///
    /// For each adjacent pair of the same type whose layout declares a set id,
    /// the earlier one is given set id 1 if it has none, and the later one gets
    /// the earlier set id plus one. A different type in between restarts the run.
    /// A later segment following a set id of `u32::MAX` is left as it is.
    pub fn resequence(&mut self) {
        for i in 1..self.segments.len() {
            let (head, tail) = self.segments.split_at_mut(i);
            let last = &mut head[i - 1];
            let current = &mut tail[0];

            if last.type_id() != current.type_id() || !current.has_set_id() {
                continue;
            }

            let base = match last.set_id() {
                Some(set_id) if set_id > 0 => set_id,
                _ => {
                    last.assign_set_id(1);
                    1
                }
            };
            match base.checked_add(1) {
                Some(next) => current.assign_set_id(next),
                None => tracing::warn!(
                    "Set id of {} segment at {} is at its maximum, leaving segment {} unnumbered",
                    last.type_id(),
                    i - 1,
                    i
                ),
            }
        }
    }

    /// Stable sort by layout weight. Only applied when asked for.
    pub fn sort_by_weight(&mut self) {
        self.segments.sort_by(|a, b| a.cmp_weight(b));
        self.reindex();
    }

    /// The first MSH segment.
    pub fn header(&self) -> Option<&Segment> {
        self.segments_by_type
            .get("MSH")
            .and_then(|positions| positions.first())
            .map(|&i| &self.segments[i])
    }

    /// MSH message type, e.g. `ADT^A01`.
    pub fn message_type(&self) -> Option<&str> {
        self.header_field("message_type")
    }

    /// MSH message control id.
    pub fn control_id(&self) -> Option<&str> {
        self.header_field("message_control_id")
    }

    fn header_field(&self, name: &str) -> Option<&str> {
        self.header()
            .and_then(|msh| msh.read_field(name).ok().flatten())
    }

    /// Wire form: segments joined with the segment delimiter.
    pub fn to_hl7(&self) -> String {
        let element = self.delimiters.element;
        self.segments
            .iter()
            .map(|segment| segment.to_raw(element))
            .collect::<Vec<_>>()
            .join(&self.delimiters.segment.to_string())
    }
}

/// Debug rendering, one segment per line. Not wire format.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&segment.to_raw(self.delimiters.element))?;
        }
        Ok(())
    }
}

impl Index<usize> for Message {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

impl Index<Range<usize>> for Message {
    type Output = [Segment];

    fn index(&self, range: Range<usize>) -> &[Segment] {
        &self.segments[range]
    }
}

impl<'m> IntoIterator for &'m Message {
    type Item = &'m Segment;
    type IntoIter = std::slice::Iter<'m, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = "MSH|^~\\&|A|B|C|D\rPID|1||123||Doe^John";

    fn obx(value: &str) -> Segment {
        let mut seg = SegmentFactory::standard().create("OBX");
        seg.write_field("observation_value", value).unwrap();
        seg
    }

    fn set_ids(msg: &Message) -> Vec<Option<u32>> {
        msg.iter().map(Segment::set_id).collect()
    }

    #[test]
    fn test_parse_sample() {
        let msg = Message::parse(SAMPLE).unwrap();

        assert_eq!(msg.len(), 2);
        assert_eq!(msg[0].type_id(), "MSH");
        assert_eq!(msg[0].read_field("sending_app").unwrap(), Some("A"));
        assert_eq!(msg[1].type_id(), "PID");
        assert_eq!(msg[1].read_field("patient_id").unwrap(), Some(""));
        assert_eq!(msg[1].read_field("patient_name").unwrap(), Some("Doe^John"));
    }

    #[test]
    fn test_parse_document_list_concatenates() {
        let msg = Message::parse(vec!["MSH|^~\\&\rPID|1", "NTE|1||x"]).unwrap();
        assert_eq!(msg.segment_types(), vec!["MSH", "PID", "NTE"]);
    }

    #[test]
    fn test_parse_empty_list_has_no_segments() {
        let docs: Vec<&str> = vec![];
        assert_eq!(Message::parse(docs), Err(ParseError::NoSegments));
    }

    #[test]
    fn test_parse_keeps_trailing_empty_chunk() {
        let msg = Message::parse("MSH|^~\\&\r").unwrap();
        assert_eq!(msg.len(), 2);
        assert!(msg[1].is_generic());
        assert_eq!(msg.to_hl7(), "MSH|^~\\&\r");
    }

    #[test]
    fn test_parse_value_rejects_non_strings() {
        assert!(matches!(
            Message::parse_value(&json!(7)),
            Err(ParseError::InvalidInput(_))
        ));
        let msg = Message::parse_value(&json!([SAMPLE])).unwrap();
        assert_eq!(msg.len(), 2);
    }

    #[test]
    fn test_parse_detecting_custom_delimiters() {
        let msg = Message::parse_detecting("MSH#*~\\&#APP\rPID#1##7##Roe*Ann").unwrap();
        assert_eq!(msg.delimiters().element, '#');
        assert_eq!(msg[0].read_field("sending_app").unwrap(), Some("APP"));
        assert_eq!(msg[1].repetitions("patient_name").unwrap(), vec!["Roe", "Ann"]);
    }

    #[test]
    fn test_append_numbers_consecutive_runs() {
        let mut msg = Message::default();
        msg.append(obx("a"));
        msg.append(obx("b"));
        msg.append(obx("c"));

        assert_eq!(set_ids(&msg), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_different_type_restarts_run() {
        let mut msg = Message::default();
        msg.append(obx("a"));
        msg.append(obx("b"));
        msg.append(SegmentFactory::standard().create("NTE"));
        msg.append(obx("c"));
        msg.append(obx("d"));

        assert_eq!(
            set_ids(&msg),
            vec![Some(1), Some(2), None, Some(1), Some(2)]
        );
    }

    #[test]
    fn test_resequence_keeps_existing_start() {
        let msg = Message::parse("OBX|5|ST\rOBX||ST\rOBX|1|ST").unwrap();
        assert_eq!(set_ids(&msg), vec![Some(5), Some(6), Some(7)]);
    }

    #[test]
    fn test_resequence_is_idempotent() {
        let mut msg = Message::parse("OBX||ST\rOBX||ST\rNTE\rOBX|0|ST\rOBX|9|ST").unwrap();
        let once = msg.clone();
        msg.resequence();
        assert_eq!(msg, once);
    }

    #[test]
    fn test_generic_segments_are_not_numbered() {
        let msg = Message::parse("ZZZ|\rZZZ|").unwrap();
        assert_eq!(msg.to_hl7(), "ZZZ|\rZZZ|");
    }

    #[test]
    fn test_by_type_singleton_collapse() {
        let mut msg = Message::parse(SAMPLE).unwrap();
        assert!(matches!(msg.by_type("PID"), Some(SegmentQuery::One(_))));

        msg.append(SegmentFactory::standard().create("PID"));
        match msg.by_type("PID") {
            Some(SegmentQuery::Many(pids)) => assert_eq!(pids.len(), 2),
            other => panic!("expected many PID segments, got {:?}", other),
        }
    }

    #[test]
    fn test_index_and_range() {
        let msg = Message::parse("MSH|^~\\&\rPID|1\rNTE|1").unwrap();
        let tail = &msg[1..3];
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].type_id(), "PID");
    }

    #[test]
    fn test_set_replaces_and_reindexes() {
        let mut msg = Message::parse("MSH|^~\\&\rPID|1\rNTE|1").unwrap();
        let old = msg.set(1, SegmentFactory::standard().create("NTE"));

        assert_eq!(old.type_id(), "PID");
        assert!(msg.by_type("PID").is_none());
        assert_eq!(msg.by_type("NTE").map(|q| q.len()), Some(2));
    }

    #[test]
    fn test_splice_range() {
        let mut msg = Message::parse("MSH|^~\\&\rPID|1\rNTE|1\rNTE|2").unwrap();
        let factory = SegmentFactory::standard();
        let removed = msg.splice(2..4, vec![factory.create("OBX")]);

        assert_eq!(removed.len(), 2);
        assert_eq!(msg.segment_types(), vec!["MSH", "PID", "OBX"]);
    }

    #[test]
    fn test_insert_by_type_appends_to_group() {
        let mut msg = Message::parse(SAMPLE).unwrap();
        msg.insert_by_type("NTE", SegmentFactory::standard().create("NTE"));

        assert_eq!(msg.len(), 3);
        assert_eq!(msg[1].type_id(), "PID");
        assert!(matches!(msg.by_type("NTE"), Some(SegmentQuery::One(_))));
    }

    #[test]
    fn test_insert_by_type_retypes_foreign_segment() {
        let mut msg = Message::default();
        msg.insert_by_type("ZPI", Segment::parse("ZZZ|1||x", '|').unwrap());
        assert_eq!(msg[0].type_id(), "ZPI");
        assert_eq!(msg[0].fields(), &["ZPI", "1", "", "x"]);
        assert!(msg.by_type("ZZZ").is_none());
        assert!(msg.by_type("ZPI").is_some());
    }

    #[test]
    fn test_resequence_stops_at_max_set_id() {
        let msg = Message::parse("OBX|4294967295|NM\rOBX||NM").unwrap();
        assert_eq!(msg[0].set_id(), Some(u32::MAX));
        assert_eq!(msg[1].set_id(), None);
        assert_eq!(msg.to_hl7(), "OBX|4294967295|NM\rOBX||NM");
    }

    #[test]
    fn test_edit_reindexes_on_type_change() {
        let mut msg = Message::parse(SAMPLE).unwrap();
        msg.edit(1, |pid| pid.write_field(0, "ZPD")).unwrap().unwrap();
        assert!(msg.by_type("PID").is_none());
        assert!(msg.by_type("ZPD").is_some());
        assert!(msg.edit(9, |_| ()).is_none());
    }

    #[test]
    fn test_sort_by_weight_is_stable() {
        let mut msg = Message::parse("ZZZ|1\rNTE|1\rPID|1\rMSH|^~\\&\rERR|x").unwrap();
        msg.sort_by_weight();
        assert_eq!(msg.segment_types(), vec!["MSH", "PID", "ERR", "NTE", "ZZZ"]);
    }

    #[test]
    fn test_header_accessors() {
        let msg = Message::parse(
            "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20240101||ORU^R01|MSG0001|P|2.5\rPID|1",
        )
        .unwrap();
        assert_eq!(msg.message_type(), Some("ORU^R01"));
        assert_eq!(msg.control_id(), Some("MSG0001"));
        assert!(Message::parse("PID|1").unwrap().header().is_none());
    }

    #[test]
    fn test_display_is_line_based() {
        let msg = Message::parse(SAMPLE).unwrap();
        assert_eq!(msg.to_string(), "MSH|^~\\&|A|B|C|D\nPID|1||123||Doe^John");
    }
}
