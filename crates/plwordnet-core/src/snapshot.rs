//! Binary snapshot codec
//!
//! A snapshot stores a whole [`Wordnet`] (entities, relation tables and
//! their indices) so it can be reopened without re-parsing and re-linking
//! the XML dump.
//!
//! Layout:
//!
//! | bytes  | content                              |
//! |--------|--------------------------------------|
//! | 0..8   | magic `PLWNSNAP`                     |
//! | 8..12  | format version, little-endian `u32`  |
//! | 12..44 | SHA-256 of the payload               |
//! | 44..   | bincode payload                      |

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::wordnet::Wordnet;

/// Leading bytes of every snapshot.
pub const MAGIC: &[u8; 8] = b"PLWNSNAP";

/// Current payload layout version.
pub const FORMAT_VERSION: u32 = 1;

const VERSION_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + VERSION_LEN + CHECKSUM_LEN;

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is {len} bytes, shorter than its header")]
    Truncated { len: usize },

    #[error("not a wordnet snapshot (bad magic)")]
    BadMagic,

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    #[error("snapshot payload error: {0}")]
    Payload(#[from] bincode::Error),
}

/// Encode a wordnet into snapshot bytes.
pub fn serialize(wordnet: &Wordnet) -> Result<Vec<u8>, SnapshotError> {
    let payload = bincode::serialize(wordnet)?;
    let checksum = Sha256::digest(&payload);

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&checksum);
    bytes.extend_from_slice(&payload);

    debug!("Encoded snapshot: {} bytes", bytes.len());
    Ok(bytes)
}

/// Decode snapshot bytes back into a wordnet.
pub fn deserialize(bytes: &[u8]) -> Result<Wordnet, SnapshotError> {
    if bytes.len() < HEADER_LEN {
        return Err(SnapshotError::Truncated { len: bytes.len() });
    }
    let (magic, rest) = bytes.split_at(MAGIC.len());
    let (version, rest) = rest.split_at(VERSION_LEN);
    let (checksum, payload) = rest.split_at(CHECKSUM_LEN);

    if magic != MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let mut version_bytes = [0u8; VERSION_LEN];
    version_bytes.copy_from_slice(version);
    let found = u32::from_le_bytes(version_bytes);
    if found != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found,
            expected: FORMAT_VERSION,
        });
    }
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let wordnet: Wordnet = bincode::deserialize(payload)?;
    debug!("Decoded snapshot: {} bytes", bytes.len());
    Ok(wordnet)
}
