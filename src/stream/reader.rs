use std::io::{Read, Seek};
use std::iter::FusedIterator;

use crate::error::PixiError;
use crate::field::{ByteOrder, Value};
use crate::geometry::{self, SampleCoordinate, TileSelector};
use crate::layer::Layer;

/// Forward-only iterator over every sample of a layer in tile-major order.
///
/// Created by [`read_contiguous_tile_order`]. Yields `Err` at most once; the
/// iterator is exhausted after an error, so `None` always means every sample
/// was visited.
pub struct TileOrderReader<'a, R: Read + Seek> {
    reader: &'a mut R,
    layer: &'a Layer,
    byte_order: ByteOrder,
    tile: usize,
    in_tile: usize,
    buffers: Option<Vec<Vec<u8>>>,
    finished: bool,
}

/// Iterate every sample of `layer` in ascending tile order.
///
/// Each geometric tile is read and decompressed once (one disk tile per
/// field for separated layers) and then scanned in ascending in-tile order.
/// Padding positions in edge tiles are skipped.
pub fn read_contiguous_tile_order<'a, R: Read + Seek>(
    reader: &'a mut R,
    layer: &'a Layer,
    byte_order: ByteOrder,
) -> TileOrderReader<'a, R> {
    TileOrderReader {
        reader,
        layer,
        byte_order,
        tile: 0,
        in_tile: 0,
        buffers: None,
        finished: false,
    }
}

impl<'a, R: Read + Seek> TileOrderReader<'a, R> {
    fn load_tile(&mut self) -> Result<Vec<Vec<u8>>, PixiError> {
        self.layer.validate()?;
        if self.layer.separated {
            let tiles = self.layer.tiles();
            (0..self.layer.fields.len())
                .map(|field| self.layer.read_tile(&mut *self.reader, self.tile + tiles * field))
                .collect()
        } else {
            Ok(vec![self.layer.read_tile(&mut *self.reader, self.tile)?])
        }
    }

    fn decode_sample(&self, buffers: &[Vec<u8>], in_tile: usize) -> Vec<Value> {
        let layer = self.layer;
        if layer.separated {
            layer
                .fields
                .iter()
                .zip(buffers)
                .map(|(field, buf)| {
                    let offset = in_tile * field.size();
                    field.read_value(&buf[offset..offset + field.size()], self.byte_order)
                })
                .collect()
        } else {
            let mut offset = in_tile * layer.sample_size();
            let mut values = Vec::with_capacity(layer.fields.len());
            for field in &layer.fields {
                values.push(field.read_value(&buffers[0][offset..offset + field.size()], self.byte_order));
                offset += field.size();
            }
            values
        }
    }
}

impl<'a, R: Read + Seek> Iterator for TileOrderReader<'a, R> {
    type Item = Result<(SampleCoordinate, Vec<Value>), PixiError>;

    fn next(&mut self) -> Option<Self::Item> {
        let tiles = self.layer.tiles();
        let tile_samples = self.layer.tile_samples();

        loop {
            if self.finished || self.tile >= tiles {
                self.finished = true;
                return None;
            }

            if self.in_tile >= tile_samples {
                self.tile += 1;
                self.in_tile = 0;
                self.buffers = None;
                continue;
            }

            let buffers = match self.buffers.take() {
                Some(buffers) => buffers,
                None => match self.load_tile() {
                    Ok(buffers) => buffers,
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(e));
                    }
                },
            };

            let selector = TileSelector {
                tile: self.tile,
                in_tile: self.in_tile,
            };
            self.in_tile += 1;

            let coord = geometry::to_coordinate(&self.layer.dimensions, selector);
            let sample = if geometry::contains(&self.layer.dimensions, &coord) {
                Some(self.decode_sample(&buffers, selector.in_tile))
            } else {
                None
            };
            self.buffers = Some(buffers);

            if let Some(values) = sample {
                return Some(Ok((coord, values)));
            }
        }
    }
}

impl<'a, R: Read + Seek> FusedIterator for TileOrderReader<'a, R> {}
