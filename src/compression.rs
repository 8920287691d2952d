//! Per-layer tile compression.
//!
//! A layer picks one [`Compression`] when it is created and every tile of the
//! layer is encoded with it. The on-disk size of a compressed tile is only
//! known after encoding, so readers always take it from the layer's tile
//! table.

use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};

use crate::error::PixiError;

/// Compression applied to every tile of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Tiles are stored as-is
    #[default]
    None,
    /// Tiles are zlib-wrapped deflate streams
    Deflate,
}

impl Compression {
    /// Code stored in the layer header
    pub fn code(self) -> u32 {
        match self {
            Compression::None => 0,
            Compression::Deflate => 1,
        }
    }

    /// Decode a compression from its header code
    pub fn from_code(code: u32) -> Result<Self, PixiError> {
        match code {
            0 => Ok(Compression::None),
            1 => Ok(Compression::Deflate),
            other => Err(PixiError::UnknownCompression(other)),
        }
    }

    /// Encode one uncompressed tile.
    ///
    /// `level` is the deflate level (0-9) and is ignored for [`Compression::None`].
    pub fn encode(self, data: &[u8], level: u32) -> io::Result<Vec<u8>> {
        match self {
            Compression::None => Ok(data.to_vec()),
            Compression::Deflate => {
                let mut encoder =
                    ZlibEncoder::new(Vec::with_capacity(data.len() / 2), flate2::Compression::new(level.min(9)));
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }

    /// Decode one stored tile, producing at most `expected_len` bytes.
    ///
    /// A result shorter than `expected_len` means the stored stream was
    /// truncated; the caller decides how to report it. An uncompressed tile
    /// longer than `expected_len` is an `InvalidData` error.
    ///
    /// `expected_len` comes from the file, so the output buffer grows with
    /// the decoded data instead of being reserved up front.
    pub fn decode(self, raw: &[u8], expected_len: usize) -> io::Result<Vec<u8>> {
        match self {
            Compression::None => {
                if raw.len() > expected_len {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "uncompressed tile holds {} bytes, expected {}",
                            raw.len(),
                            expected_len
                        ),
                    ));
                }
                Ok(raw.to_vec())
            }
            Compression::Deflate => {
                let mut decoded = Vec::with_capacity(expected_len.min(raw.len().saturating_mul(8)));
                ZlibDecoder::new(raw)
                    .take(expected_len as u64)
                    .read_to_end(&mut decoded)?;
                Ok(decoded)
            }
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => f.write_str("none"),
            Compression::Deflate => f.write_str("deflate"),
        }
    }
}
