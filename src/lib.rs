//! # pixi - Tiled Multi-Dimensional Array Storage
//!
//! `pixi` stores one or more named **layers** in a single file. Each layer is
//! an N-dimensional grid of typed, multi-field samples, partitioned into
//! rectangular **tiles** that are individually compressed and located through
//! a per-layer offset/length table.
//!
//! ## Key Features
//!
//! - **Random Access**: Any tile can be read on its own by seeking to its
//!   recorded offset; no other tile needs to be decompressed.
//!
//! - **Streaming**: Whole layers are written and read in tile-major order with
//!   at most one tile (per field) in memory.
//!
//! - **In-Memory Editing**: Small layers can be fully materialized and edited
//!   sample by sample, then written back.
//!
//! - **Two Layouts**: Fields are either interleaved per sample or separated
//!   into one run of tiles per field.
//!
//! - **Per-Layer Compression**: None or deflate, chosen per layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use pixi::prelude::*;
//!
//! let config = WriterConfig::default();
//! let mut stream = Cursor::new(Vec::new());
//!
//! let mut header = PixiHeader::new(config.byte_order);
//! let mut tags = TagSection::new();
//! tags.insert("crs", "EPSG:4326");
//! let first_layer = create_pixi(&mut stream, &mut header, &tags)?;
//!
//! let layer = Layer::new(
//!     "elevation",
//!     vec![Dimension::new(256, 64), Dimension::new(128, 64)],
//!     vec![Field::new("height", FieldType::Float32)],
//!     false,
//!     Compression::Deflate,
//! );
//! let source = SampleSource::positional(|c: &[usize]| vec![Value::Float32((c[0] + c[1]) as f32)]);
//! write_contiguous_tile_order(
//!     &mut stream,
//!     first_layer,
//!     &mut [LayerSource::new(layer, source)],
//!     &config,
//! )?;
//!
//! let pixi = Pixi::read(&mut stream)?;
//! let layer = pixi.layer("elevation").unwrap().clone();
//! let dataset = InMemoryDataset::load(&mut stream, layer, pixi.header.byte_order)?;
//! assert_eq!(dataset.get_sample(&[10, 5])?, vec![Value::Float32(15.0)]);
//! # Ok::<(), pixi::PixiError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`geometry`]: Tile counts, sizes and the coordinate/tile mapping
//! - [`field`]: Field types, scalar values and byte order
//! - [`compression`]: Per-tile compression
//! - [`layer`]: Layer descriptor, header codec and tile-level disk access
//! - [`file`]: File header, tag sections and the layer chain
//! - [`memory`]: Fully materialized layers with per-sample get/set
//! - [`stream`]: Tile-order streaming read and write
//!
//! ## File Layout
//!
//! ```text
//! [header 24B][tag section][layer 0 header][layer 0 tiles][layer 1 header]...
//! ```
//!
//! Every multi-byte integer and field value uses the byte order declared in
//! the header (big-endian by default).

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod compression;
pub mod config;
pub mod error;
pub mod field;
pub mod file;
pub mod geometry;
pub mod layer;
pub mod memory;
pub mod stream;

pub use error::PixiError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compression::Compression;
    pub use crate::config::WriterConfig;
    pub use crate::error::PixiError;
    pub use crate::field::{ByteOrder, Field, FieldType, Value};
    pub use crate::file::{
        create_pixi, read_layers, read_tags, Pixi, PixiHeader, TagSection, PIXI_FORMAT_VERSION,
        PIXI_HEADER_SIZE,
    };
    pub use crate::geometry::{Dimension, SampleCoordinate, TileSelector};
    pub use crate::layer::{add_blank_layer, Layer, TileWriter};
    pub use crate::memory::InMemoryDataset;
    pub use crate::stream::{
        read_contiguous_tile_order, write_contiguous_tile_order, LayerSource, SampleSource,
        StreamWriteStats, TileOrderReader,
    };
}
