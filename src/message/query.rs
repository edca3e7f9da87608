//! Result of looking segments up by type identifier.

use crate::segment::Segment;

/// Segments of one type. A single match collapses to [`SegmentQuery::One`].
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentQuery<'m> {
    One(&'m Segment),
    Many(Vec<&'m Segment>),
}

impl<'m> SegmentQuery<'m> {
    pub(crate) fn from_matches(mut matches: Vec<&'m Segment>) -> Option<Self> {
        match matches.len() {
            0 => None,
            1 => matches.pop().map(SegmentQuery::One),
            _ => Some(SegmentQuery::Many(matches)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SegmentQuery::One(_) => 1,
            SegmentQuery::Many(segments) => segments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The segment, if exactly one matched.
    pub fn as_one(&self) -> Option<&'m Segment> {
        match self {
            SegmentQuery::One(segment) => Some(segment),
            SegmentQuery::Many(_) => None,
        }
    }

    pub fn first(&self) -> Option<&'m Segment> {
        match self {
            SegmentQuery::One(segment) => Some(segment),
            SegmentQuery::Many(segments) => segments.first().copied(),
        }
    }

    /// All matches in document order.
    pub fn into_vec(self) -> Vec<&'m Segment> {
        match self {
            SegmentQuery::One(segment) => vec![segment],
            SegmentQuery::Many(segments) => segments,
        }
    }
}
