//! Error type shared by every pixi read and write path.

/// Errors that can occur while reading, writing or addressing pixi data
#[derive(Debug, thiserror::Error)]
pub enum PixiError {
    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// I/O error while accessing a specific tile of a layer
    #[error("I/O error on tile {tile} of layer '{layer}': {source}")]
    TileIo {
        /// Name of the layer being accessed
        layer: String,
        /// Disk tile index being accessed
        tile: usize,
        /// Underlying stream error
        #[source]
        source: std::io::Error,
    },

    /// A compressed tile decoded to fewer bytes than its uncompressed size
    #[error("Truncated tile {tile} of layer '{layer}': expected {expected} bytes, got {actual}")]
    TruncatedTile {
        /// Name of the layer being read
        layer: String,
        /// Disk tile index being read
        tile: usize,
        /// Uncompressed tile size computed from the layer geometry
        expected: usize,
        /// Number of bytes the decoder actually produced
        actual: usize,
    },

    /// Coordinate length does not match the layer's dimension count
    #[error("Dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch {
        /// Number of dimensions in the layer
        expected: usize,
        /// Number of coordinates supplied
        actual: usize,
    },

    /// Coordinate lies outside a dimension
    #[error("Coordinate {index} out of bounds for dimension {dimension} of size {size}")]
    CoordinateOutOfBounds {
        /// Dimension index
        dimension: usize,
        /// Offending coordinate
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Field index does not exist in the layer
    #[error("Field index {index} out of bounds for {count} fields")]
    FieldIndexOutOfBounds {
        /// Requested field index
        index: usize,
        /// Number of fields in the layer
        count: usize,
    },

    /// Number of values supplied for a sample does not match the field count
    #[error("Field count mismatch: expected {expected} values, got {actual}")]
    FieldCountMismatch {
        /// Number of fields in the layer
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// A named sample source did not provide a value for a field
    #[error("Missing value for field '{0}'")]
    MissingField(String),

    /// Tile data handed to the writer has the wrong uncompressed length
    #[error("Tile {tile} data size mismatch: expected {expected} bytes, got {actual}")]
    TileDataSize {
        /// Disk tile index
        tile: usize,
        /// Uncompressed size computed from the layer geometry
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Structural inconsistency in a header or tile table
    #[error("Invalid format: {0}")]
    Format(String),

    /// Unrecognized field type code
    #[error("Unknown field type code: {0}")]
    UnknownFieldType(u32),

    /// Unrecognized compression code
    #[error("Unknown compression code: {0}")]
    UnknownCompression(u32),

    /// File does not start with the pixi magic bytes
    #[error("Not a pixi file: bad magic bytes")]
    InvalidMagic,

    /// File was written by a newer, unsupported format version
    #[error("Unsupported pixi format version: {0}")]
    UnsupportedVersion(u16),
}

impl PixiError {
    pub(crate) fn tile_io(layer: &str, tile: usize, source: std::io::Error) -> Self {
        PixiError::TileIo {
            layer: layer.to_string(),
            tile,
            source,
        }
    }
}
