//! Writer configuration.

use serde::Deserialize;

use crate::field::ByteOrder;

/// Default deflate level, a balance between speed and size
pub const DEFAULT_DEFLATE_LEVEL: u32 = 6;

/// Configuration shared by every pixi write path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Byte order for headers and tile contents
    pub byte_order: ByteOrder,

    /// Deflate level (0-9) for layers using deflate compression
    pub deflate_level: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Big,
            deflate_level: DEFAULT_DEFLATE_LEVEL,
        }
    }
}

impl WriterConfig {
    /// Fastest deflate setting (larger files)
    pub fn fast() -> Self {
        Self {
            deflate_level: 1,
            ..Self::default()
        }
    }

    /// Smallest output (slower writes)
    pub fn max_compression() -> Self {
        Self {
            deflate_level: 9,
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Same configuration with a different byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }
}
