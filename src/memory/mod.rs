//! # In-Memory Datasets
//!
//! [`InMemoryDataset`] materializes every disk tile of a layer as an
//! uncompressed buffer and serves per-sample reads and writes without any
//! I/O. Buffers keep the layer's physical layout (interleaved or separated),
//! so a dataset can be written back tile by tile with
//! [`InMemoryDataset::write_layer`].
//!
//! ```rust
//! use pixi::prelude::*;
//!
//! let layer = Layer::new(
//!     "height",
//!     vec![Dimension::new(100, 16), Dimension::new(50, 16)],
//!     vec![Field::new("h", FieldType::Float32)],
//!     false,
//!     Compression::Deflate,
//! );
//! let mut dataset = InMemoryDataset::new(layer, ByteOrder::Big);
//! dataset.set_sample(&[10, 20], &[Value::Float32(12.5)])?;
//! assert_eq!(dataset.get_sample_field(&[10, 20], 0)?, Value::Float32(12.5));
//! # Ok::<(), pixi::PixiError>(())
//! ```

#[cfg(test)]
mod tests;

use std::io::{Read, Seek, SeekFrom, Write};

use log::debug;

use crate::config::WriterConfig;
use crate::error::PixiError;
use crate::field::{ByteOrder, Value};
use crate::geometry::{self, TileSelector};
use crate::layer::{Layer, TileWriter};

/// A layer with every tile decompressed into memory
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    layer: Layer,
    byte_order: ByteOrder,
    tiles: Vec<Vec<u8>>,
}

impl InMemoryDataset {
    /// Create a dataset with zero-filled tiles
    pub fn new(layer: Layer, byte_order: ByteOrder) -> Self {
        let tiles = (0..layer.disk_tile_count())
            .map(|tile| vec![0u8; layer.disk_tile_size(tile)])
            .collect();
        Self {
            layer,
            byte_order,
            tiles,
        }
    }

    /// Load every tile of an existing layer from `reader`
    pub fn load<R: Read + Seek>(
        reader: &mut R,
        layer: Layer,
        byte_order: ByteOrder,
    ) -> Result<Self, PixiError> {
        layer.validate()?;
        let tiles = (0..layer.disk_tile_count())
            .map(|tile| layer.read_tile(reader, tile))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Loaded layer '{}' into memory ({} disk tiles)",
            layer.name,
            tiles.len()
        );
        Ok(Self {
            layer,
            byte_order,
            tiles,
        })
    }

    /// The layer descriptor
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Byte order of the values in the tile buffers
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Uncompressed bytes of disk tile `tile`
    pub fn tile(&self, tile: usize) -> Option<&[u8]> {
        self.tiles.get(tile).map(Vec::as_slice)
    }

    /// Consume the dataset, returning its layer descriptor
    pub fn into_layer(self) -> Layer {
        self.layer
    }

    /// Every field value of the sample at `coord`
    pub fn get_sample(&self, coord: &[usize]) -> Result<Vec<Value>, PixiError> {
        let selector = geometry::to_tile_selector(&self.layer.dimensions, coord)?;
        (0..self.layer.fields.len())
            .map(|field| self.read_field(selector, field))
            .collect()
    }

    /// One field value of the sample at `coord`
    pub fn get_sample_field(&self, coord: &[usize], field_index: usize) -> Result<Value, PixiError> {
        let selector = geometry::to_tile_selector(&self.layer.dimensions, coord)?;
        self.read_field(selector, field_index)
    }

    /// One field value of the sample at `coord`, by field name
    pub fn get_sample_field_by_name(&self, coord: &[usize], name: &str) -> Result<Value, PixiError> {
        let field_index = self
            .layer
            .field_index(name)
            .ok_or_else(|| PixiError::MissingField(name.to_string()))?;
        self.get_sample_field(coord, field_index)
    }

    /// Overwrite every field of the sample at `coord`.
    ///
    /// Values are cast to each field's type.
    pub fn set_sample(&mut self, coord: &[usize], values: &[Value]) -> Result<(), PixiError> {
        let selector = geometry::to_tile_selector(&self.layer.dimensions, coord)?;
        if values.len() != self.layer.fields.len() {
            return Err(PixiError::FieldCountMismatch {
                expected: self.layer.fields.len(),
                actual: values.len(),
            });
        }
        for (field, &value) in values.iter().enumerate() {
            self.write_field(selector, field, value)?;
        }
        Ok(())
    }

    /// Overwrite one field of the sample at `coord`
    pub fn set_sample_field(
        &mut self,
        coord: &[usize],
        field_index: usize,
        value: Value,
    ) -> Result<(), PixiError> {
        let selector = geometry::to_tile_selector(&self.layer.dimensions, coord)?;
        self.write_field(selector, field_index, value)
    }

    /// Write the dataset as a complete layer starting at `start`.
    ///
    /// Every tile is recompressed with the layer's compression and the layer
    /// descriptor's tile table is updated to match. The layer's
    /// `next_layer_start` is written as-is. Returns the offset just past the
    /// layer's data.
    pub fn write_layer<W: Write + Seek>(
        &mut self,
        writer: &mut W,
        start: u64,
        config: &WriterConfig,
    ) -> Result<u64, PixiError> {
        if config.byte_order != self.byte_order {
            return Err(PixiError::Format(format!(
                "dataset values are {:?}-endian but the writer is configured for {:?}-endian",
                self.byte_order, config.byte_order
            )));
        }

        self.layer.reset_tables();
        writer.seek(SeekFrom::Start(start))?;
        self.layer.write_header(writer, self.byte_order)?;

        let end = {
            let mut tiles = TileWriter::new(writer, start + self.layer.header_size(), config.deflate_level);
            for (tile, data) in self.tiles.iter().enumerate() {
                tiles.write_tile(&mut self.layer, tile, data)?;
            }
            tiles.position()
        };

        writer.seek(SeekFrom::Start(start))?;
        self.layer.write_header(writer, self.byte_order)?;
        writer.seek(SeekFrom::Start(end))?;

        debug!(
            "Wrote in-memory layer '{}' at {} ({} data bytes)",
            self.layer.name,
            start,
            self.layer.data_size()
        );
        Ok(end)
    }

    fn read_field(&self, selector: TileSelector, field_index: usize) -> Result<Value, PixiError> {
        let (tile, offset) = self.layer.field_location(selector, field_index)?;
        let field = &self.layer.fields[field_index];
        let buf = &self.tiles[tile][offset..offset + field.size()];
        Ok(field.read_value(buf, self.byte_order))
    }

    fn write_field(
        &mut self,
        selector: TileSelector,
        field_index: usize,
        value: Value,
    ) -> Result<(), PixiError> {
        let (tile, offset) = self.layer.field_location(selector, field_index)?;
        let field = &self.layer.fields[field_index];
        let buf = &mut self.tiles[tile][offset..offset + field.size()];
        field.write_value(buf, value, self.byte_order);
        Ok(())
    }
}
