//! Layer header wire format.
//!
//! All integers use the file's byte order:
//!
//! ```text
//! u32 dimension count
//! u32 field count
//! u32 config flags (bit 0 = separated)
//! u32 compression code
//! u32 name length, name bytes
//! i64 x dims   dimension sizes
//! i64 x dims   tile sizes
//! u32 x fields field type codes
//! (u32 length, bytes) x fields  field names
//! u64 x disk tiles  tile byte lengths
//! u64 x disk tiles  tile offsets
//! u64 next layer start
//! ```

use std::io::{Read, Write};

use log::trace;

use super::Layer;
use crate::compression::Compression;
use crate::error::PixiError;
use crate::field::{ByteOrder, Field, FieldType};
use crate::geometry::Dimension;

const FLAG_SEPARATED: u32 = 1;

/// Upper bound on name lengths accepted when reading
const MAX_NAME_LEN: u32 = 1 << 16;

impl Layer {
    /// Exact size of this layer's header in bytes
    pub fn header_size(&self) -> u64 {
        let fixed = 5 * 4 + self.name.len();
        let dims = self.dimensions.len() * 16;
        let fields: usize = self.fields.iter().map(|f| 4 + 4 + f.name.len()).sum();
        let table = self.disk_tile_count() * 16;
        (fixed + dims + fields + table + 8) as u64
    }

    /// Write the header at the writer's current position.
    ///
    /// Fails with [`PixiError::Format`] when the tile table does not match the
    /// layer geometry; nothing is written in that case.
    pub fn write_header<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        order: ByteOrder,
    ) -> Result<(), PixiError> {
        self.validate()?;

        let flags = if self.separated { FLAG_SEPARATED } else { 0 };
        order.write_u32(writer, len_u32(self.dimensions.len())?)?;
        order.write_u32(writer, len_u32(self.fields.len())?)?;
        order.write_u32(writer, flags)?;
        order.write_u32(writer, self.compression.code())?;
        write_string(writer, order, &self.name)?;

        for dim in &self.dimensions {
            order.write_i64(writer, dim_i64(dim.size)?)?;
        }
        for dim in &self.dimensions {
            order.write_i64(writer, dim_i64(dim.tile_size)?)?;
        }

        for field in &self.fields {
            order.write_u32(writer, field.field_type.code())?;
        }
        for field in &self.fields {
            write_string(writer, order, &field.name)?;
        }

        for &bytes in &self.tile_bytes {
            order.write_u64(writer, bytes)?;
        }
        for &offset in &self.tile_offsets {
            order.write_u64(writer, offset)?;
        }
        order.write_u64(writer, self.next_layer_start)?;

        trace!(
            "Wrote header for layer '{}' ({} disk tiles, next layer at {})",
            self.name,
            self.tile_bytes.len(),
            self.next_layer_start
        );
        Ok(())
    }

    /// Read a header from the reader's current position
    pub fn read_header<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> Result<Self, PixiError> {
        let dim_count = order.read_u32(reader)? as usize;
        let field_count = order.read_u32(reader)? as usize;
        let flags = order.read_u32(reader)?;
        if flags & !FLAG_SEPARATED != 0 {
            return Err(PixiError::Format(format!(
                "reserved layer config bits set: {:#x}",
                flags
            )));
        }
        let compression = Compression::from_code(order.read_u32(reader)?)?;
        let name = read_string(reader, order)?;

        let mut sizes = Vec::new();
        for _ in 0..dim_count {
            sizes.push(read_dim(reader, order)?);
        }
        let mut dimensions = Vec::with_capacity(sizes.len());
        for size in sizes {
            dimensions.push(Dimension::new(size, read_dim(reader, order)?));
        }

        check_geometry(&dimensions, field_count)?;

        let mut field_types = Vec::new();
        for _ in 0..field_count {
            field_types.push(FieldType::from_code(order.read_u32(reader)?)?);
        }
        let mut fields = Vec::with_capacity(field_types.len());
        for field_type in field_types {
            fields.push(Field::new(read_string(reader, order)?, field_type));
        }

        let mut layer = Layer {
            name,
            dimensions,
            fields,
            separated: flags & FLAG_SEPARATED != 0,
            compression,
            tile_bytes: Vec::new(),
            tile_offsets: Vec::new(),
            next_layer_start: 0,
        };

        // Tables grow as entries arrive so a corrupt count fails at EOF
        // instead of allocating up front.
        let count = layer.disk_tile_count();
        for _ in 0..count {
            layer.tile_bytes.push(order.read_u64(reader)?);
        }
        for _ in 0..count {
            layer.tile_offsets.push(order.read_u64(reader)?);
        }
        layer.next_layer_start = order.read_u64(reader)?;
        layer.validate()?;

        Ok(layer)
    }
}

fn len_u32(len: usize) -> Result<u32, PixiError> {
    u32::try_from(len).map_err(|_| PixiError::Format(format!("length {} exceeds u32", len)))
}

fn dim_i64(value: usize) -> Result<i64, PixiError> {
    i64::try_from(value).map_err(|_| PixiError::Format(format!("dimension {} exceeds i64", value)))
}

// Rejects geometry whose tile table or tile size would overflow.
fn check_geometry(dimensions: &[Dimension], field_count: usize) -> Result<(), PixiError> {
    let table = dimensions
        .iter()
        .try_fold(field_count.max(1), |acc, d| acc.checked_mul(d.tiles()))
        .and_then(|n| n.checked_mul(16));
    let tile = dimensions
        .iter()
        .try_fold(8usize, |acc, d| acc.checked_mul(d.tile_size));
    let grid = dimensions
        .iter()
        .try_fold(1usize, |acc, d| acc.checked_mul(d.size));
    if table.is_none() || tile.is_none() || grid.is_none() {
        return Err(PixiError::Format("layer geometry overflows".to_string()));
    }
    Ok(())
}

fn read_dim<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> Result<usize, PixiError> {
    let value = order.read_i64(reader)?;
    usize::try_from(value)
        .map_err(|_| PixiError::Format(format!("invalid dimension value {}", value)))
}

fn write_string<W: Write + ?Sized>(
    writer: &mut W,
    order: ByteOrder,
    value: &str,
) -> Result<(), PixiError> {
    order.write_u32(writer, len_u32(value.len())?)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> Result<String, PixiError> {
    let len = order.read_u32(reader)?;
    if len > MAX_NAME_LEN {
        return Err(PixiError::Format(format!("string length {} too large", len)));
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| PixiError::Format(format!("invalid UTF-8 string: {}", e)))
}
