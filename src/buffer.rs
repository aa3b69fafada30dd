//! Deferred-concatenation input buffer.
//!
//! Incoming chunks are queued as immutable [`Bytes`] segments and only copied
//! into one contiguous buffer when the decoder knows it can make progress.
//! Frames are then split off the contiguous buffer without further copies and
//! the unconsumed tail is queued again as a single segment. A materialisation
//! only happens once the in-progress length field or payload is complete, so
//! each input byte is copied at most twice and total copy work stays linear in
//! the stream length.

use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

/// Queue of pending input segments with a running byte count.
#[derive(Debug, Default)]
pub(crate) struct SegmentBuffer {
    segments: VecDeque<Bytes>,
    len: usize,
}

impl SegmentBuffer {
    pub(crate) fn new() -> Self { Self::default() }

    /// Total number of buffered bytes.
    pub(crate) fn len(&self) -> usize { self.len }

    /// Append a segment. Empty segments are ignored.
    pub(crate) fn push(&mut self, segment: Bytes) {
        if segment.is_empty() {
            return;
        }
        self.len += segment.len();
        self.segments.push_back(segment);
    }

    /// Take every buffered segment as one contiguous buffer, leaving `self`
    /// empty.
    ///
    /// A single segment is returned as-is without copying.
    pub(crate) fn take_contiguous(&mut self) -> Bytes {
        let len = std::mem::take(&mut self.len);
        match self.segments.len() {
            0 => Bytes::new(),
            1 => self.segments.pop_front().unwrap_or_default(),
            _ => {
                let mut joined = BytesMut::with_capacity(len);
                for segment in self.segments.drain(..) {
                    joined.extend_from_slice(&segment);
                }
                joined.freeze()
            }
        }
    }

    /// Drop all buffered bytes.
    pub(crate) fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }
}
