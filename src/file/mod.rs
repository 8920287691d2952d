//! # File Header and Layer Chain
//!
//! A pixi file is laid out as:
//!
//! ```text
//! [header][tag section]...[layer 0 header][layer 0 tiles][layer 1 header]...
//! ```
//!
//! The 24-byte [`PixiHeader`] holds the magic bytes, a two-digit ASCII format
//! version, the byte order used everywhere else in the file, and the offsets
//! of the first tag section and the first layer. Each layer header links to
//! the next through `next_layer_start`; a value of 0 ends the chain.

mod tags;


use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info};

pub use tags::TagSection;

use crate::error::PixiError;
use crate::field::ByteOrder;
use crate::layer::Layer;

/// Magic bytes at the start of every pixi file
pub const PIXI_MAGIC: &[u8; 4] = b"pixi";

/// Newest format version this crate reads and the one it writes
pub const PIXI_FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes
pub const PIXI_HEADER_SIZE: u64 = 24;

/// File-level descriptor, read once when a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixiHeader {
    /// Format version
    pub version: u16,
    /// Byte order of every header integer and field value
    pub byte_order: ByteOrder,
    /// Offset of the first tag section, 0 when there are no tags
    pub first_tags_offset: u64,
    /// Offset of the first layer header, 0 when there are no layers
    pub first_layer_offset: u64,
}

impl PixiHeader {
    /// Header for a new file in the current format version
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            version: PIXI_FORMAT_VERSION,
            byte_order,
            first_tags_offset: 0,
            first_layer_offset: 0,
        }
    }

    /// Write the header at the writer's current position
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), PixiError> {
        if self.version > 99 {
            return Err(PixiError::UnsupportedVersion(self.version));
        }
        writer.write_all(PIXI_MAGIC)?;
        writer.write_all(format!("{:02}", self.version).as_bytes())?;
        writer.write_all(&[self.byte_order.code(), 0])?;
        self.byte_order.write_u64(writer, self.first_tags_offset)?;
        self.byte_order.write_u64(writer, self.first_layer_offset)?;
        Ok(())
    }

    /// Read a header from the reader's current position
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, PixiError> {
        let mut prefix = [0u8; 8];
        reader.read_exact(&mut prefix)?;
        if &prefix[0..4] != PIXI_MAGIC {
            return Err(PixiError::InvalidMagic);
        }

        let digits = &prefix[4..6];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(PixiError::Format("version is not two ASCII digits".to_string()));
        }
        let version = u16::from(digits[0] - b'0') * 10 + u16::from(digits[1] - b'0');
        if version == 0 || version > PIXI_FORMAT_VERSION {
            return Err(PixiError::UnsupportedVersion(version));
        }

        let byte_order = ByteOrder::from_code(prefix[6])?;
        if prefix[7] != 0 {
            return Err(PixiError::Format(format!(
                "reserved header byte set: {:#x}",
                prefix[7]
            )));
        }
        let first_tags_offset = byte_order.read_u64(reader)?;
        let first_layer_offset = byte_order.read_u64(reader)?;

        Ok(Self {
            version,
            byte_order,
            first_tags_offset,
            first_layer_offset,
        })
    }
}

/// Write the file header and tag section at the start of `writer`.
///
/// `header` is updated with the tag and first-layer offsets. The returned
/// offset is where the first layer must be written.
pub fn create_pixi<W: Write + Seek>(
    writer: &mut W,
    header: &mut PixiHeader,
    tags: &TagSection,
) -> Result<u64, PixiError> {
    header.first_tags_offset = PIXI_HEADER_SIZE;
    header.first_layer_offset = 0;

    writer.seek(SeekFrom::Start(0))?;
    header.write(writer)?;
    let layers_start = tags.write(writer, header.byte_order)?;

    header.first_layer_offset = layers_start;
    writer.seek(SeekFrom::Start(0))?;
    header.write(writer)?;
    writer.seek(SeekFrom::Start(layers_start))?;

    debug!(
        "Created pixi file with {} tags, layers start at {}",
        tags.tags.len(),
        layers_start
    );
    Ok(layers_start)
}

/// Read every tag section reachable from `first_offset`, merged in chain order
pub fn read_tags<R: Read + Seek>(
    reader: &mut R,
    first_offset: u64,
    order: ByteOrder,
) -> Result<BTreeMap<String, String>, PixiError> {
    let mut tags = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut offset = first_offset;
    while offset != 0 {
        if !seen.insert(offset) {
            return Err(PixiError::Format(format!("tag chain loops at offset {}", offset)));
        }
        reader.seek(SeekFrom::Start(offset))?;
        let section = TagSection::read(reader, order)?;
        tags.extend(section.tags);
        offset = section.next_tags_start;
    }
    Ok(tags)
}

/// Read every layer header reachable from `first_offset`
pub fn read_layers<R: Read + Seek>(
    reader: &mut R,
    first_offset: u64,
    order: ByteOrder,
) -> Result<Vec<Layer>, PixiError> {
    let mut layers = Vec::new();
    let mut seen = HashSet::new();
    let mut offset = first_offset;
    while offset != 0 {
        if !seen.insert(offset) {
            return Err(PixiError::Format(format!(
                "layer chain loops at offset {}",
                offset
            )));
        }
        reader.seek(SeekFrom::Start(offset))?;
        let layer = Layer::read_header(reader, order)?;
        debug!(
            "Read layer '{}' at {} (next at {})",
            layer.name, offset, layer.next_layer_start
        );
        offset = layer.next_layer_start;
        layers.push(layer);
    }
    Ok(layers)
}

/// An opened pixi file: header, tags and every layer descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Pixi {
    /// File header
    pub header: PixiHeader,
    /// Merged tags from every tag section
    pub tags: BTreeMap<String, String>,
    /// Layer descriptors in chain order
    pub layers: Vec<Layer>,
}

impl Pixi {
    /// Read the header, tags and layer chain from the start of `reader`
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self, PixiError> {
        reader.seek(SeekFrom::Start(0))?;
        let header = PixiHeader::read(reader)?;
        let tags = read_tags(reader, header.first_tags_offset, header.byte_order)?;
        let layers = read_layers(reader, header.first_layer_offset, header.byte_order)?;

        info!(
            "Opened pixi v{} file: {} tags, {} layers",
            header.version,
            tags.len(),
            layers.len()
        );
        Ok(Self {
            header,
            tags,
            layers,
        })
    }

    /// Find a layer by name
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }
}
