use std::collections::HashMap;
use std::fmt;
use std::io::{Seek, SeekFrom, Write};

use log::{debug, info};

use crate::config::WriterConfig;
use crate::error::PixiError;
use crate::field::{Field, Value};
use crate::geometry::{self, TileSelector};
use crate::layer::{Layer, TileWriter};

type PositionalFn<'a> = Box<dyn FnMut(&[usize]) -> Vec<Value> + 'a>;
type NamedFn<'a> = Box<dyn FnMut(&[usize]) -> HashMap<String, Value> + 'a>;

/// Produces the field values of a sample from its coordinate.
///
/// The source may be asked for the same coordinate more than once (once per
/// field for separated layers) and must return the same values each time.
pub enum SampleSource<'a> {
    /// Values in field order
    Positional(PositionalFn<'a>),
    /// Values keyed by field name
    Named(NamedFn<'a>),
}

impl<'a> SampleSource<'a> {
    /// Source returning values in field order
    pub fn positional(f: impl FnMut(&[usize]) -> Vec<Value> + 'a) -> Self {
        SampleSource::Positional(Box::new(f))
    }

    /// Source returning values keyed by field name
    pub fn named(f: impl FnMut(&[usize]) -> HashMap<String, Value> + 'a) -> Self {
        SampleSource::Named(Box::new(f))
    }

    fn sample(&mut self, coord: &[usize], fields: &[Field]) -> Result<Vec<Value>, PixiError> {
        match self {
            SampleSource::Positional(f) => {
                let values = f(coord);
                if values.len() != fields.len() {
                    return Err(PixiError::FieldCountMismatch {
                        expected: fields.len(),
                        actual: values.len(),
                    });
                }
                Ok(values)
            }
            SampleSource::Named(f) => {
                let mut named = f(coord);
                fields
                    .iter()
                    .map(|field| {
                        named
                            .remove(&field.name)
                            .ok_or_else(|| PixiError::MissingField(field.name.clone()))
                    })
                    .collect()
            }
        }
    }
}

/// A layer to write together with the source of its samples
pub struct LayerSource<'a> {
    /// Layer descriptor; its tile table is filled in by the writer
    pub layer: Layer,
    /// Sample values for every coordinate of the layer
    pub source: SampleSource<'a>,
}

impl<'a> LayerSource<'a> {
    /// Pair a layer with its sample source
    pub fn new(layer: Layer, source: SampleSource<'a>) -> Self {
        Self { layer, source }
    }
}

/// Statistics from a completed streaming write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamWriteStats {
    /// Number of layers written
    pub layers_written: usize,
    /// Number of disk tiles written
    pub tiles_written: usize,
    /// Number of samples requested from the sources
    pub samples_written: usize,
    /// Bytes written from the first layer header to the end of the last layer
    pub bytes_written: u64,
}

impl fmt::Display for StreamWriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} layers ({} samples) in {} tiles, {} bytes",
            self.layers_written, self.samples_written, self.tiles_written, self.bytes_written
        )
    }
}

/// Write `layers` back to back starting at `start`, each in tile-major order.
///
/// For every layer the header is written provisionally, then each disk tile
/// is built sample by sample and appended, then the header is rewritten with
/// the final tile table and, for every layer but the last, the offset of the
/// next layer. The last layer's `next_layer_start` is 0.
///
/// Each entry's `layer` is updated in place with its final tile table.
pub fn write_contiguous_tile_order<W: Write + Seek>(
    writer: &mut W,
    start: u64,
    layers: &mut [LayerSource<'_>],
    config: &WriterConfig,
) -> Result<StreamWriteStats, PixiError> {
    let mut stats = StreamWriteStats::default();
    let mut layer_start = start;
    let layer_count = layers.len();

    for (index, entry) in layers.iter_mut().enumerate() {
        let layer = &mut entry.layer;
        layer.reset_tables();
        layer.next_layer_start = 0;

        writer.seek(SeekFrom::Start(layer_start))?;
        layer.write_header(writer, config.byte_order)?;

        let end = {
            let mut tiles = TileWriter::new(writer, layer_start + layer.header_size(), config.deflate_level);
            for disk_tile in 0..layer.disk_tile_count() {
                let (data, samples) = build_tile(layer, &mut entry.source, disk_tile, config)?;
                tiles.write_tile(layer, disk_tile, &data)?;
                stats.tiles_written += 1;
                stats.samples_written += samples;
            }
            tiles.position()
        };

        if index + 1 < layer_count {
            layer.next_layer_start = end;
        }
        writer.seek(SeekFrom::Start(layer_start))?;
        layer.write_header(writer, config.byte_order)?;

        debug!(
            "Streamed layer '{}' at {} ({} disk tiles, {} data bytes)",
            layer.name,
            layer_start,
            layer.disk_tile_count(),
            layer.data_size()
        );
        stats.layers_written += 1;
        layer_start = end;
    }

    writer.seek(SeekFrom::Start(layer_start))?;
    stats.bytes_written = layer_start - start;
    info!("{}", stats);
    Ok(stats)
}

// Builds one uncompressed disk tile. Returns the buffer and the number of
// distinct samples it holds.
fn build_tile(
    layer: &Layer,
    source: &mut SampleSource<'_>,
    disk_tile: usize,
    config: &WriterConfig,
) -> Result<(Vec<u8>, usize), PixiError> {
    let tiles = layer.tiles();
    let (tile, only_field) = if layer.separated {
        (disk_tile % tiles, Some(disk_tile / tiles))
    } else {
        (disk_tile, None)
    };

    let mut data = vec![0u8; layer.disk_tile_size(disk_tile)];
    let mut samples = 0;
    for in_tile in 0..layer.tile_samples() {
        let selector = TileSelector { tile, in_tile };
        let coord = geometry::to_coordinate(&layer.dimensions, selector);
        if !geometry::contains(&layer.dimensions, &coord) {
            continue;
        }

        let values = source.sample(&coord, &layer.fields)?;
        match only_field {
            Some(field_index) => {
                let field = &layer.fields[field_index];
                let offset = in_tile * field.size();
                field.write_value(
                    &mut data[offset..offset + field.size()],
                    values[field_index],
                    config.byte_order,
                );
                if field_index == 0 {
                    samples += 1;
                }
            }
            None => {
                let mut offset = in_tile * layer.sample_size();
                for (field, &value) in layer.fields.iter().zip(&values) {
                    field.write_value(&mut data[offset..offset + field.size()], value, config.byte_order);
                    offset += field.size();
                }
                samples += 1;
            }
        }
    }
    Ok((data, samples))
}
