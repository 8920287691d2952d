//! # Layers
//!
//! A [`Layer`] is one named N-dimensional array: its geometry, its fields,
//! the physical field layout, its compression and the table locating every
//! disk tile in the file.
//!
//! ## Disk tiles
//!
//! With interleaved fields every geometric tile is one disk tile holding
//! whole samples back to back. With separated fields each (tile, field) pair
//! is its own disk tile; all tiles of field 0 come first, then all tiles of
//! field 1, and so on:
//!
//! ```text
//! interleaved:  [t0: s0f0 s0f1 s1f0 s1f1 ...] [t1: ...] ...
//! separated:    [t0f0] [t1f0] ... [tNf0] [t0f1] [t1f1] ... [tNf1]
//! ```
//!
//! The layer descriptor is the single source of truth for the tile table:
//! every path that writes a tile records the resulting offset and length here.

mod codec;
mod disk;


pub use disk::{add_blank_layer, TileWriter};

use crate::compression::Compression;
use crate::error::PixiError;
use crate::field::Field;
use crate::geometry::{self, Dimension, TileSelector};

/// Descriptor of one layer and its disk tile table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Grid axes, dimension 0 varying fastest
    pub dimensions: Vec<Dimension>,
    /// Fields of every sample, in storage order
    pub fields: Vec<Field>,
    /// Whether each field is stored in its own run of disk tiles
    pub separated: bool,
    /// Compression applied to every disk tile
    pub compression: Compression,
    /// Stored (possibly compressed) length of each disk tile
    pub tile_bytes: Vec<u64>,
    /// Absolute file offset of each disk tile
    pub tile_offsets: Vec<u64>,
    /// Offset of the following layer's header, 0 for the last layer
    pub next_layer_start: u64,
}

impl Layer {
    /// Create a layer descriptor with a zeroed tile table of the right length
    pub fn new(
        name: impl Into<String>,
        dimensions: Vec<Dimension>,
        fields: Vec<Field>,
        separated: bool,
        compression: Compression,
    ) -> Self {
        let mut layer = Self {
            name: name.into(),
            dimensions,
            fields,
            separated,
            compression,
            tile_bytes: Vec::new(),
            tile_offsets: Vec::new(),
            next_layer_start: 0,
        };
        layer.reset_tables();
        layer
    }

    /// Total number of samples in the layer
    pub fn samples(&self) -> usize {
        geometry::samples(&self.dimensions)
    }

    /// Number of sample slots in one tile
    pub fn tile_samples(&self) -> usize {
        geometry::tile_samples(&self.dimensions)
    }

    /// Number of geometric tiles
    pub fn tiles(&self) -> usize {
        geometry::tiles(&self.dimensions)
    }

    /// Bytes of one interleaved sample
    pub fn sample_size(&self) -> usize {
        geometry::sample_size(&self.fields)
    }

    /// Number of entries in the disk tile table
    pub fn disk_tile_count(&self) -> usize {
        if self.separated {
            self.tiles() * self.fields.len()
        } else {
            self.tiles()
        }
    }

    /// Uncompressed byte length of disk tile `tile`
    pub fn disk_tile_size(&self, tile: usize) -> usize {
        if self.separated {
            let tiles = self.tiles().max(1);
            self.fields
                .get(tile / tiles)
                .map(|field| self.tile_samples() * field.size())
                .unwrap_or(0)
        } else {
            self.tile_samples() * self.sample_size()
        }
    }

    /// Sum of the stored tile lengths
    pub fn data_size(&self) -> u64 {
        self.tile_bytes.iter().sum()
    }

    /// Index of the field called `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Byte offset of field `field_index` within an interleaved sample
    pub fn field_offset(&self, field_index: usize) -> usize {
        geometry::sample_size(&self.fields[..field_index])
    }

    /// Locate field `field_index` of the sample at `selector`.
    ///
    /// Returns the disk tile index and the byte offset of the value within
    /// the uncompressed tile.
    pub fn field_location(
        &self,
        selector: TileSelector,
        field_index: usize,
    ) -> Result<(usize, usize), PixiError> {
        let field = self
            .fields
            .get(field_index)
            .ok_or(PixiError::FieldIndexOutOfBounds {
                index: field_index,
                count: self.fields.len(),
            })?;

        if self.separated {
            let tile = selector.tile + self.tiles() * field_index;
            Ok((tile, selector.in_tile * field.size()))
        } else {
            let offset = selector.in_tile * self.sample_size() + self.field_offset(field_index);
            Ok((selector.tile, offset))
        }
    }

    /// Check geometry and tile table consistency
    pub fn validate(&self) -> Result<(), PixiError> {
        for (index, dim) in self.dimensions.iter().enumerate() {
            if dim.size > 0 && dim.tile_size == 0 {
                return Err(PixiError::Format(format!(
                    "dimension {} of layer '{}' has size {} but tile size 0",
                    index, self.name, dim.size
                )));
            }
        }

        let expected = self.disk_tile_count();
        if self.tile_bytes.len() != expected {
            return Err(PixiError::Format(format!(
                "layer '{}' has {} tile byte entries, expected {}",
                self.name,
                self.tile_bytes.len(),
                expected
            )));
        }
        if self.tile_offsets.len() != expected {
            return Err(PixiError::Format(format!(
                "layer '{}' has {} tile offset entries, expected {}",
                self.name,
                self.tile_offsets.len(),
                expected
            )));
        }
        Ok(())
    }

    /// Zero the tile table, sized for the current geometry
    pub fn reset_tables(&mut self) {
        let count = self.disk_tile_count();
        self.tile_bytes = vec![0; count];
        self.tile_offsets = vec![0; count];
    }
}
