//! # Tiling Geometry
//!
//! Pure functions over dimension and field lists: sample counts, tile counts
//! and the mixed-radix mapping between a [`SampleCoordinate`] and a
//! [`TileSelector`].
//!
//! Dimension 0 is the fastest-varying axis both for the tile index and for the
//! index within a tile:
//!
//! ```text
//! tile    = Σ (coord[d] / tile_size[d]) * Π_{k<d} tiles[k]
//! in_tile = Σ (coord[d] % tile_size[d]) * Π_{k<d} tile_size[k]
//! ```
//!
//! Edge tiles are always stored at full size. Positions inside an edge tile
//! that fall outside the dimension are padding and carry no sample.


use crate::error::PixiError;
use crate::field::Field;

/// Ordered per-dimension indices addressing one sample
pub type SampleCoordinate = Vec<usize>;

/// One axis of a layer's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Number of samples along this axis
    pub size: usize,
    /// Number of samples along this axis in one tile
    pub tile_size: usize,
}

impl Dimension {
    /// Create a new dimension
    pub fn new(size: usize, tile_size: usize) -> Self {
        Self { size, tile_size }
    }

    /// Number of tiles needed to cover this dimension
    pub fn tiles(&self) -> usize {
        if self.size == 0 || self.tile_size == 0 {
            return 0;
        }
        self.size.div_ceil(self.tile_size)
    }
}

/// Tile-relative address of a sample.
///
/// `tile` indexes the geometric tile and `in_tile` the sample position inside
/// it; neither accounts for field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSelector {
    /// Geometric tile index
    pub tile: usize,
    /// Sample index within the tile
    pub in_tile: usize,
}

/// Bytes occupied by one sample with all fields interleaved
pub fn sample_size(fields: &[Field]) -> usize {
    fields.iter().map(Field::size).sum()
}

/// Total number of samples in the grid, 0 when there are no dimensions
pub fn samples(dims: &[Dimension]) -> usize {
    if dims.is_empty() {
        return 0;
    }
    dims.iter().map(|d| d.size).product()
}

/// Number of sample slots in one tile, padding included
pub fn tile_samples(dims: &[Dimension]) -> usize {
    dims.iter().map(|d| d.tile_size).product()
}

/// Number of geometric tiles covering the grid, 0 when there are no dimensions
pub fn tiles(dims: &[Dimension]) -> usize {
    if dims.is_empty() {
        return 0;
    }
    dims.iter().map(Dimension::tiles).product()
}

/// Check that `coord` has one in-bounds index per dimension
pub fn check_coordinate(dims: &[Dimension], coord: &[usize]) -> Result<(), PixiError> {
    if coord.len() != dims.len() {
        return Err(PixiError::DimensionMismatch {
            expected: dims.len(),
            actual: coord.len(),
        });
    }
    for (dimension, (dim, &index)) in dims.iter().zip(coord).enumerate() {
        if index >= dim.size {
            return Err(PixiError::CoordinateOutOfBounds {
                dimension,
                index,
                size: dim.size,
            });
        }
    }
    Ok(())
}

/// Whether `coord` addresses a real sample rather than edge-tile padding
pub fn contains(dims: &[Dimension], coord: &[usize]) -> bool {
    coord.len() == dims.len() && dims.iter().zip(coord).all(|(d, &i)| i < d.size)
}

/// Map a sample coordinate to its tile and in-tile index
pub fn to_tile_selector(dims: &[Dimension], coord: &[usize]) -> Result<TileSelector, PixiError> {
    check_coordinate(dims, coord)?;

    let mut tile = 0;
    let mut in_tile = 0;
    let mut tile_mul = 1;
    let mut in_tile_mul = 1;
    for (dim, &index) in dims.iter().zip(coord) {
        if dim.tile_size == 0 {
            return Err(PixiError::Format("dimension has zero tile size".to_string()));
        }
        tile += (index / dim.tile_size) * tile_mul;
        in_tile += (index % dim.tile_size) * in_tile_mul;
        tile_mul *= dim.tiles();
        in_tile_mul *= dim.tile_size;
    }

    Ok(TileSelector { tile, in_tile })
}

/// Map a tile selector back to the coordinate it addresses.
///
/// The result may lie outside the grid when the selector points at padding
/// in an edge tile; see [`contains`].
pub fn to_coordinate(dims: &[Dimension], selector: TileSelector) -> SampleCoordinate {
    let mut tile = selector.tile;
    let mut in_tile = selector.in_tile;
    let mut coord = Vec::with_capacity(dims.len());
    for dim in dims {
        let tiles = dim.tiles().max(1);
        let tile_size = dim.tile_size.max(1);
        let tile_index = tile % tiles;
        let in_index = in_tile % tile_size;
        tile /= tiles;
        in_tile /= tile_size;
        coord.push(tile_index * tile_size + in_index);
    }
    coord
}
