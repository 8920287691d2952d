//! # Fields and Scalar Values
//!
//! A layer's sample is a fixed sequence of typed fields. Every field type has
//! a fixed byte width and a total encoding to and from a byte buffer in the
//! file's [`ByteOrder`].
//!
//! | Code | Type    | Bytes |
//! |------|---------|-------|
//! | 1    | Int8    | 1     |
//! | 2    | UInt8   | 1     |
//! | 3    | Int16   | 2     |
//! | 4    | UInt16  | 2     |
//! | 5    | Int32   | 4     |
//! | 6    | UInt32  | 4     |
//! | 7    | Int64   | 8     |
//! | 8    | UInt64  | 8     |
//! | 9    | Float32 | 4     |
//! | 10   | Float64 | 8     |

mod byte_order;
mod value;

#[cfg(test)]
mod tests;

use std::fmt;

pub use byte_order::ByteOrder;
pub use value::Value;

use crate::error::PixiError;

/// Scalar type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
}

impl FieldType {
    /// All supported field types, in code order
    pub const ALL: [FieldType; 10] = [
        FieldType::Int8,
        FieldType::UInt8,
        FieldType::Int16,
        FieldType::UInt16,
        FieldType::Int32,
        FieldType::UInt32,
        FieldType::Int64,
        FieldType::UInt64,
        FieldType::Float32,
        FieldType::Float64,
    ];

    /// Type code stored in the layer header
    pub fn code(self) -> u32 {
        match self {
            FieldType::Int8 => 1,
            FieldType::UInt8 => 2,
            FieldType::Int16 => 3,
            FieldType::UInt16 => 4,
            FieldType::Int32 => 5,
            FieldType::UInt32 => 6,
            FieldType::Int64 => 7,
            FieldType::UInt64 => 8,
            FieldType::Float32 => 9,
            FieldType::Float64 => 10,
        }
    }

    /// Decode a field type from its header code
    pub fn from_code(code: u32) -> Result<Self, PixiError> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(PixiError::UnknownFieldType(code))
    }

    /// Width of one value in bytes
    pub fn size(self) -> usize {
        match self {
            FieldType::Int8 | FieldType::UInt8 => 1,
            FieldType::Int16 | FieldType::UInt16 => 2,
            FieldType::Int32 | FieldType::UInt32 | FieldType::Float32 => 4,
            FieldType::Int64 | FieldType::UInt64 | FieldType::Float64 => 8,
        }
    }

    /// Decode one value from the front of `buf`.
    ///
    /// `buf` must hold at least [`size`](Self::size) bytes.
    pub fn read_value(self, buf: &[u8], order: ByteOrder) -> Value {
        match self {
            FieldType::Int8 => Value::Int8(buf[0] as i8),
            FieldType::UInt8 => Value::UInt8(buf[0]),
            FieldType::Int16 => Value::Int16(order.decode_i16(buf)),
            FieldType::UInt16 => Value::UInt16(order.decode_u16(buf)),
            FieldType::Int32 => Value::Int32(order.decode_i32(buf)),
            FieldType::UInt32 => Value::UInt32(order.decode_u32(buf)),
            FieldType::Int64 => Value::Int64(order.decode_i64(buf)),
            FieldType::UInt64 => Value::UInt64(order.decode_u64(buf)),
            FieldType::Float32 => Value::Float32(order.decode_f32(buf)),
            FieldType::Float64 => Value::Float64(order.decode_f64(buf)),
        }
    }

    /// Encode `value` into the front of `buf`, casting it to this type first.
    ///
    /// `buf` must hold at least [`size`](Self::size) bytes.
    pub fn write_value(self, buf: &mut [u8], value: Value, order: ByteOrder) {
        match value.cast(self) {
            Value::Int8(v) => buf[0] = v as u8,
            Value::UInt8(v) => buf[0] = v,
            Value::Int16(v) => order.encode_i16(buf, v),
            Value::UInt16(v) => order.encode_u16(buf, v),
            Value::Int32(v) => order.encode_i32(buf, v),
            Value::UInt32(v) => order.encode_u32(buf, v),
            Value::Int64(v) => order.encode_i64(buf, v),
            Value::UInt64(v) => order.encode_u64(buf, v),
            Value::Float32(v) => order.encode_f32(buf, v),
            Value::Float64(v) => order.encode_f64(buf, v),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Int8 => "int8",
            FieldType::UInt8 => "uint8",
            FieldType::Int16 => "int16",
            FieldType::UInt16 => "uint16",
            FieldType::Int32 => "int32",
            FieldType::UInt32 => "uint32",
            FieldType::Int64 => "int64",
            FieldType::UInt64 => "uint64",
            FieldType::Float32 => "float32",
            FieldType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

/// A named, typed component of every sample in a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, unique within its layer
    pub name: String,
    /// Scalar type of the field
    pub field_type: FieldType,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Width of one value of this field in bytes
    pub fn size(&self) -> usize {
        self.field_type.size()
    }

    /// Decode this field's value from the front of `buf`
    pub fn read_value(&self, buf: &[u8], order: ByteOrder) -> Value {
        self.field_type.read_value(buf, order)
    }

    /// Encode `value` for this field into the front of `buf`
    pub fn write_value(&self, buf: &mut [u8], value: Value, order: ByteOrder) {
        self.field_type.write_value(buf, value, order)
    }
}
