use std::fmt;

use super::FieldType;

/// A single scalar field value.
///
/// Each [`FieldType`] maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Signed 8-bit integer
    Int8(i8),
    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// 32-bit IEEE float
    Float32(f32),
    /// 64-bit IEEE float
    Float64(f64),
}

impl Value {
    /// The field type this value naturally belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Int8(_) => FieldType::Int8,
            Value::UInt8(_) => FieldType::UInt8,
            Value::Int16(_) => FieldType::Int16,
            Value::UInt16(_) => FieldType::UInt16,
            Value::Int32(_) => FieldType::Int32,
            Value::UInt32(_) => FieldType::UInt32,
            Value::Int64(_) => FieldType::Int64,
            Value::UInt64(_) => FieldType::UInt64,
            Value::Float32(_) => FieldType::Float32,
            Value::Float64(_) => FieldType::Float64,
        }
    }

    /// Widen to `f64` (lossy for 64-bit integers beyond 2^53)
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int8(v) => v as f64,
            Value::UInt8(v) => v as f64,
            Value::Int16(v) => v as f64,
            Value::UInt16(v) => v as f64,
            Value::Int32(v) => v as f64,
            Value::UInt32(v) => v as f64,
            Value::Int64(v) => v as f64,
            Value::UInt64(v) => v as f64,
            Value::Float32(v) => v as f64,
            Value::Float64(v) => v,
        }
    }

    // Every integer variant fits in i128; floats saturate.
    fn as_i128(&self) -> i128 {
        match *self {
            Value::Int8(v) => v as i128,
            Value::UInt8(v) => v as i128,
            Value::Int16(v) => v as i128,
            Value::UInt16(v) => v as i128,
            Value::Int32(v) => v as i128,
            Value::UInt32(v) => v as i128,
            Value::Int64(v) => v as i128,
            Value::UInt64(v) => v as i128,
            Value::Float32(v) => v as i128,
            Value::Float64(v) => v as i128,
        }
    }

    /// Convert into the variant for `target`.
    ///
    /// Integer targets wrap on overflow when the source is an integer and
    /// saturate when the source is a float, following `as` casts.
    pub fn cast(self, target: FieldType) -> Value {
        if self.field_type() == target {
            return self;
        }
        match target {
            FieldType::Int8 => Value::Int8(self.as_i128() as i8),
            FieldType::UInt8 => Value::UInt8(self.as_i128() as u8),
            FieldType::Int16 => Value::Int16(self.as_i128() as i16),
            FieldType::UInt16 => Value::UInt16(self.as_i128() as u16),
            FieldType::Int32 => Value::Int32(self.as_i128() as i32),
            FieldType::UInt32 => Value::UInt32(self.as_i128() as u32),
            FieldType::Int64 => Value::Int64(self.as_i128() as i64),
            FieldType::UInt64 => Value::UInt64(self.as_i128() as u64),
            FieldType::Float32 => Value::Float32(self.as_f64() as f32),
            FieldType::Float64 => Value::Float64(self.as_f64()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}
