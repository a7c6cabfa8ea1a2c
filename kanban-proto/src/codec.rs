//! Postcard encoding for board commands, drag events and snapshots.
//!
//! Every message crossing a process boundary is wrapped in a [`Frame`] so a
//! single decode call handles all three kinds. The framed variants add a
//! 4-byte little-endian length prefix for stream transports.

use serde::{Deserialize, Serialize};

use crate::board::BoardSnapshot;
use crate::command::{BoardCommand, DragEvent};

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Frame is incomplete or has an invalid length prefix.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

/// Anything exchanged between a board and its presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// An explicit board edit.
    Command(BoardCommand),
    /// A drag-gesture callback.
    Drag(DragEvent),
    /// Board state after a mutation.
    Snapshot(BoardSnapshot),
}

/// Encodes a [`Frame`] using postcard.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the frame cannot be serialized.
pub fn encode(frame: &Frame) -> Result<Vec<u8>, CodecError> {
    postcard::to_allocvec(frame).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a [`Frame`] from a byte slice.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes cannot be deserialized.
pub fn decode(bytes: &[u8]) -> Result<Frame, CodecError> {
    postcard::from_bytes(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Encodes a [`Frame`] with a 4-byte little-endian length prefix.
///
/// Wire format: `[u32 length (LE)][payload bytes]`
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the frame cannot be serialized,
/// or `CodecError::InvalidFrame` if the payload exceeds `u32::MAX` bytes.
pub fn encode_framed(frame: &Frame) -> Result<Vec<u8>, CodecError> {
    let payload = encode(frame)?;
    let len = u32::try_from(payload.len()).map_err(|_| {
        CodecError::InvalidFrame(format!(
            "payload too large for framing: {} bytes",
            payload.len()
        ))
    })?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decodes a length-prefixed frame.
///
/// Returns the frame and the number of bytes consumed, including the
/// 4-byte prefix, so callers can advance through a buffer of several frames.
///
/// # Errors
///
/// Returns `CodecError::InvalidFrame` if the input is shorter than the
/// prefix announces, or `CodecError::Serialization` if the payload is bad.
pub fn decode_framed(bytes: &[u8]) -> Result<(Frame, usize), CodecError> {
    let Some((prefix, rest)) = bytes.split_first_chunk::<4>() else {
        return Err(CodecError::InvalidFrame(format!(
            "need at least 4 bytes for length prefix, got {}",
            bytes.len()
        )));
    };
    let payload_len = u32::from_le_bytes(*prefix) as usize;
    let Some(payload) = rest.get(..payload_len) else {
        return Err(CodecError::InvalidFrame(format!(
            "frame indicates {payload_len} bytes but only {} available",
            rest.len()
        )));
    };
    let frame = decode(payload)?;
    Ok((frame, 4 + payload_len))
}
