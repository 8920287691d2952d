//! Tile-level disk access.
//!
//! Reads go straight to a tile's recorded offset. Writes are append-only:
//! a [`TileWriter`] owns the end-of-data position for the layer being built
//! and records every tile it writes into the layer's table.

use std::collections::HashMap;
use std::io::{self, Read, Seek, SeekFrom, Write};

use log::{debug, trace};

use super::Layer;
use crate::compression::Compression;
use crate::config::WriterConfig;
use crate::error::PixiError;

impl Layer {
    /// Read and decompress disk tile `tile`.
    ///
    /// The returned buffer is exactly [`disk_tile_size`](Self::disk_tile_size)
    /// bytes long.
    pub fn read_tile<R: Read + Seek>(&self, reader: &mut R, tile: usize) -> Result<Vec<u8>, PixiError> {
        self.check_tile_index(tile)?;

        let offset = self.tile_offsets[tile];
        let stored = self.tile_bytes[tile];
        let expected = self.disk_tile_size(tile);
        if self.compression == Compression::None && stored > expected as u64 {
            return Err(PixiError::Format(format!(
                "uncompressed tile {} of layer '{}' is stored as {} bytes, expected {}",
                tile, self.name, stored, expected
            )));
        }

        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| PixiError::tile_io(&self.name, tile, e))?;

        let mut raw = Vec::new();
        reader
            .by_ref()
            .take(stored)
            .read_to_end(&mut raw)
            .map_err(|e| PixiError::tile_io(&self.name, tile, e))?;
        if (raw.len() as u64) < stored {
            let err = io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} stored bytes, found {}", stored, raw.len()),
            );
            return Err(PixiError::tile_io(&self.name, tile, err));
        }

        let data = self
            .compression
            .decode(&raw, expected)
            .map_err(|e| PixiError::tile_io(&self.name, tile, e))?;
        if data.len() != expected {
            return Err(PixiError::TruncatedTile {
                layer: self.name.clone(),
                tile,
                expected,
                actual: data.len(),
            });
        }

        trace!(
            "Read tile {} of layer '{}' ({} stored bytes at {})",
            tile,
            self.name,
            stored,
            offset
        );
        Ok(data)
    }

    fn check_tile_index(&self, tile: usize) -> Result<(), PixiError> {
        let count = self.disk_tile_count();
        if tile >= count || tile >= self.tile_offsets.len() || tile >= self.tile_bytes.len() {
            return Err(PixiError::Format(format!(
                "tile {} out of range for layer '{}' with {} disk tiles",
                tile, self.name, count
            )));
        }
        Ok(())
    }
}

/// Appends compressed tiles for one layer and records their placement
pub struct TileWriter<'w, W: Write + Seek> {
    writer: &'w mut W,
    position: u64,
    deflate_level: u32,
}

impl<'w, W: Write + Seek> TileWriter<'w, W> {
    /// Start appending tile data at `position`
    pub fn new(writer: &'w mut W, position: u64, deflate_level: u32) -> Self {
        Self {
            writer,
            position,
            deflate_level,
        }
    }

    /// Offset at which the next tile will be written
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Compress `data` and append it as disk tile `tile` of `layer`.
    ///
    /// `data` must be exactly the tile's uncompressed size. On success the
    /// layer's offset and length entries for `tile` are updated and the
    /// stored length is returned.
    pub fn write_tile(&mut self, layer: &mut Layer, tile: usize, data: &[u8]) -> Result<u64, PixiError> {
        layer.check_tile_index(tile)?;

        let expected = layer.disk_tile_size(tile);
        if data.len() != expected {
            return Err(PixiError::TileDataSize {
                tile,
                expected,
                actual: data.len(),
            });
        }

        let encoded = layer
            .compression
            .encode(data, self.deflate_level)
            .map_err(|e| PixiError::tile_io(&layer.name, tile, e))?;

        self.writer
            .seek(SeekFrom::Start(self.position))
            .and_then(|_| self.writer.write_all(&encoded))
            .map_err(|e| PixiError::tile_io(&layer.name, tile, e))?;

        let stored = encoded.len() as u64;
        layer.tile_offsets[tile] = self.position;
        layer.tile_bytes[tile] = stored;
        self.position += stored;

        trace!(
            "Wrote tile {} of layer '{}' ({} -> {} bytes)",
            tile,
            layer.name,
            expected,
            stored
        );
        Ok(stored)
    }
}

/// Write `layer` at `start` with every tile zero-filled.
///
/// Blank tiles of equal size encode to identical bytes, so the complete tile
/// table is computed before anything is written and the header is written
/// exactly once, for compressed layers too. Returns the offset just past the
/// layer's data.
pub fn add_blank_layer<W: Write + Seek>(
    writer: &mut W,
    layer: &mut Layer,
    start: u64,
    config: &WriterConfig,
) -> Result<u64, PixiError> {
    layer.reset_tables();

    let mut encoded: HashMap<usize, Vec<u8>> = HashMap::new();
    let mut position = start + layer.header_size();
    for tile in 0..layer.disk_tile_count() {
        let size = layer.disk_tile_size(tile);
        if !encoded.contains_key(&size) {
            let bytes = layer
                .compression
                .encode(&vec![0u8; size], config.deflate_level)
                .map_err(|e| PixiError::tile_io(&layer.name, tile, e))?;
            encoded.insert(size, bytes);
        }
        let stored = encoded[&size].len() as u64;
        layer.tile_offsets[tile] = position;
        layer.tile_bytes[tile] = stored;
        position += stored;
    }

    writer.seek(SeekFrom::Start(start))?;
    layer.write_header(writer, config.byte_order)?;
    for tile in 0..layer.disk_tile_count() {
        let bytes = &encoded[&layer.disk_tile_size(tile)];
        writer
            .write_all(bytes)
            .map_err(|e| PixiError::tile_io(&layer.name, tile, e))?;
    }

    debug!(
        "Added blank layer '{}' at {} ({} disk tiles, {} data bytes)",
        layer.name,
        start,
        layer.disk_tile_count(),
        layer.data_size()
    );
    Ok(position)
}
