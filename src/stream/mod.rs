//! # Streaming Tile-Order Access
//!
//! Reads and writes whole layers one tile at a time, so datasets far larger
//! than memory can be transformed with at most one tile per field resident.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use pixi::prelude::*;
//!
//! let layer = Layer::new(
//!     "ramp",
//!     vec![Dimension::new(8, 4), Dimension::new(6, 4)],
//!     vec![Field::new("v", FieldType::Int32)],
//!     false,
//!     Compression::Deflate,
//! );
//! let source = SampleSource::positional(|c: &[usize]| vec![Value::Int32((c[0] * 10 + c[1]) as i32)]);
//! let mut layers = vec![LayerSource::new(layer, source)];
//!
//! let mut stream = Cursor::new(Vec::new());
//! write_contiguous_tile_order(&mut stream, 0, &mut layers, &WriterConfig::default())?;
//!
//! let layer = &layers[0].layer;
//! for sample in read_contiguous_tile_order(&mut stream, layer, ByteOrder::Big) {
//!     let (coord, values) = sample?;
//!     assert_eq!(values[0], Value::Int32((coord[0] * 10 + coord[1]) as i32));
//! }
//! # Ok::<(), pixi::PixiError>(())
//! ```

mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use reader::{read_contiguous_tile_order, TileOrderReader};
pub use writer::{write_contiguous_tile_order, LayerSource, SampleSource, StreamWriteStats};
