use std::collections::BTreeMap;
use std::io::{Read, Seek, Write};

use crate::error::PixiError;
use crate::field::ByteOrder;

/// Upper bound on tag key/value lengths accepted when reading
const MAX_TAG_LEN: u32 = 1 << 24;

/// Key/value metadata section preceding the layers.
///
/// Wire format: `u32` pair count, then `(u32 len, bytes)` for each key and
/// value, then `u64` offset of the next tag section (0 for the last).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSection {
    /// Tags, written sorted by key
    pub tags: BTreeMap<String, String>,
    /// Offset of the following tag section, 0 for the last
    pub next_tags_start: u64,
}

impl TagSection {
    /// Create an empty tag section
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a tag
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Write the section at the writer's current position.
    ///
    /// Returns the offset immediately following the section.
    pub fn write<W: Write + Seek>(&self, writer: &mut W, order: ByteOrder) -> Result<u64, PixiError> {
        order.write_u32(writer, len_u32(self.tags.len())?)?;
        for (key, value) in &self.tags {
            write_tag_string(writer, order, key)?;
            write_tag_string(writer, order, value)?;
        }
        order.write_u64(writer, self.next_tags_start)?;
        Ok(writer.stream_position()?)
    }

    /// Read a section from the reader's current position
    pub fn read<R: Read>(reader: &mut R, order: ByteOrder) -> Result<Self, PixiError> {
        let count = order.read_u32(reader)?;
        let mut tags = BTreeMap::new();
        for _ in 0..count {
            let key = read_tag_string(reader, order)?;
            let value = read_tag_string(reader, order)?;
            tags.insert(key, value);
        }
        let next_tags_start = order.read_u64(reader)?;
        Ok(Self {
            tags,
            next_tags_start,
        })
    }
}

fn len_u32(len: usize) -> Result<u32, PixiError> {
    u32::try_from(len).map_err(|_| PixiError::Format(format!("length {} exceeds u32", len)))
}

fn write_tag_string<W: Write>(writer: &mut W, order: ByteOrder, value: &str) -> Result<(), PixiError> {
    order.write_u32(writer, len_u32(value.len())?)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_tag_string<R: Read>(reader: &mut R, order: ByteOrder) -> Result<String, PixiError> {
    let len = order.read_u32(reader)?;
    if len > MAX_TAG_LEN {
        return Err(PixiError::Format(format!("tag length {} too large", len)));
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| PixiError::Format(format!("invalid UTF-8 tag: {}", e)))
}
