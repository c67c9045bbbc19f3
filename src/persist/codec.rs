//! Encoding of the persisted record.
//!
//! Two encodings share one envelope `{ state, version }`:
//!
//! - `Json`: the envelope as UTF-8 JSON text, the layout the mobile client's
//!   storage middleware writes.
//! - `MessagePack`: a framed binary record
//!   `magic | version u8 | len u64 LE | crc32 u32 LE | payload`.
//!
//! [`decode`] detects the encoding from the leading bytes, so switching the
//! configured encoding still reads records written with the other one.

use crate::error::{Result, StoreError};
use crate::state::PersistedState;
use serde::{Deserialize, Serialize};

/// Magic bytes for the binary frame.
const FRAME_MAGIC: &[u8; 4] = b"VAS\0";

/// Current binary frame version.
const FRAME_VERSION: u8 = 1;

/// magic + version + len + crc
const FRAME_HEADER_SIZE: usize = 4 + 1 + 8 + 4;

/// Schema version stamped into the envelope.
pub const STATE_VERSION: u32 = 0;

/// On-disk encoding of the persisted record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEncoding {
    #[default]
    Json,
    MessagePack,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a PersistedState,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// Encode the persisted subset.
pub fn encode(state: &PersistedState, encoding: StorageEncoding) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        state,
        version: STATE_VERSION,
    };

    match encoding {
        StorageEncoding::Json => Ok(serde_json::to_vec(&envelope)?),
        StorageEncoding::MessagePack => {
            // Named fields: optional fields are skipped when absent.
            let payload = rmp_serde::to_vec_named(&envelope)?;
            let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
            out.extend_from_slice(FRAME_MAGIC);
            out.push(FRAME_VERSION);
            out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
            out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
            out.extend_from_slice(&payload);
            Ok(out)
        }
    }
}

/// Detect the encoding of a stored record.
pub fn detect(bytes: &[u8]) -> StorageEncoding {
    if bytes.starts_with(FRAME_MAGIC) {
        StorageEncoding::MessagePack
    } else {
        StorageEncoding::Json
    }
}

/// Decode a stored record.
pub fn decode(bytes: &[u8]) -> Result<PersistedState> {
    let envelope: Envelope = match detect(bytes) {
        StorageEncoding::Json => serde_json::from_slice(bytes)?,
        StorageEncoding::MessagePack => rmp_serde::from_slice(read_frame(bytes)?)?,
    };

    if envelope.version > STATE_VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "Unsupported state version: {}",
            envelope.version
        )));
    }

    Ok(envelope.state)
}

/// Validate a binary frame and return its payload.
fn read_frame(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < FRAME_HEADER_SIZE {
        return Err(StoreError::InvalidFormat("Truncated frame header".into()));
    }

    if bytes[4] != FRAME_VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "Unsupported frame version: {}",
            bytes[4]
        )));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&bytes[5..13]);
    let len = u64::from_le_bytes(len_bytes) as usize;

    let mut crc_bytes = [0u8; 4];
    crc_bytes.copy_from_slice(&bytes[13..17]);
    let expected = u32::from_le_bytes(crc_bytes);

    let payload = &bytes[FRAME_HEADER_SIZE..];
    if payload.len() != len {
        return Err(StoreError::InvalidFormat(format!(
            "Frame length mismatch: header says {}, found {}",
            len,
            payload.len()
        )));
    }

    let got = crc32fast::hash(payload);
    if got != expected {
        return Err(StoreError::ChecksumMismatch { expected, got });
    }

    Ok(payload)
}
