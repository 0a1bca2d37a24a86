//! Frame alignment recovery for an unstructured byte stream.
//!
//! The wire has no start delimiter; the only frame marker is the CRC
//! itself. The resynchronizer buffers incoming bytes and CRC-checks the
//! oldest 8-byte window, sliding forward one byte at a time past noise,
//! partial frames, and mid-frame stream starts.

use bytes::{Buf, BytesMut};

use crate::codec::{Frame, FRAME_LEN};

/// Incremental frame extractor over a noisy byte stream.
///
/// Feed bytes as they arrive; a [`Frame`] comes out as soon as a CRC-valid
/// window is complete. Work per new byte is O(1) amortized — the scan only
/// re-examines bytes that a previous scan already rejected once.
#[derive(Debug, Default)]
pub struct Resynchronizer {
    buf: BytesMut,
}

impl Resynchronizer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(2 * FRAME_LEN),
        }
    }

    /// Append one received byte and return a frame if one just completed.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        self.buf.extend_from_slice(&[byte]);
        self.next_frame()
    }

    /// Append several received bytes and return the first frame found.
    ///
    /// Bytes past the extracted frame stay buffered for later calls.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Option<Frame> {
        self.buf.extend_from_slice(bytes);
        self.next_frame()
    }

    /// Scan the buffered bytes for the oldest CRC-valid window.
    ///
    /// On a match, exactly 8 bytes are consumed and the frame returned;
    /// otherwise single leading bytes are dropped until fewer than 8
    /// remain. At most one frame is extracted per call.
    pub fn next_frame(&mut self) -> Option<Frame> {
        while self.buf.len() >= FRAME_LEN {
            match Frame::from_wire(&self.buf[..FRAME_LEN]) {
                Ok(frame) => {
                    tracing::debug!(frame = ?frame.as_bytes(), "frame extracted");
                    self.buf.advance(FRAME_LEN);
                    return Some(frame);
                }
                Err(_) => {
                    tracing::trace!(byte = self.buf[0], "dropping unaligned byte");
                    self.buf.advance(1);
                }
            }
        }
        None
    }

    /// Number of bytes waiting for a valid window.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Discard all buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
