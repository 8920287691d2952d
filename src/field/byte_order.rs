use std::io::{self, Read, Write};

use byteorder::ByteOrder as _;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::PixiError;

/// Byte order declared by the file header.
///
/// Applies to every multi-byte integer in headers and to every field value
/// stored in tile buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Most significant byte first (format default)
    #[default]
    Big,
    /// Least significant byte first
    Little,
}

impl ByteOrder {
    /// Code stored in the file header
    pub fn code(self) -> u8 {
        match self {
            ByteOrder::Big => 0,
            ByteOrder::Little => 1,
        }
    }

    /// Decode a byte order from its header code
    pub fn from_code(code: u8) -> Result<Self, PixiError> {
        match code {
            0 => Ok(ByteOrder::Big),
            1 => Ok(ByteOrder::Little),
            other => Err(PixiError::Format(format!("unknown byte order code {}", other))),
        }
    }
}

macro_rules! stream_codec {
    ($($read:ident, $write:ident, $ty:ty);* $(;)?) => {
        impl ByteOrder {
            $(
                #[doc = concat!("Read one `", stringify!($ty), "` from a stream in this byte order")]
                pub fn $read<R: Read + ?Sized>(self, reader: &mut R) -> io::Result<$ty> {
                    match self {
                        ByteOrder::Big => reader.$read::<BigEndian>(),
                        ByteOrder::Little => reader.$read::<LittleEndian>(),
                    }
                }

                #[doc = concat!("Write one `", stringify!($ty), "` to a stream in this byte order")]
                pub fn $write<W: Write + ?Sized>(self, writer: &mut W, value: $ty) -> io::Result<()> {
                    match self {
                        ByteOrder::Big => writer.$write::<BigEndian>(value),
                        ByteOrder::Little => writer.$write::<LittleEndian>(value),
                    }
                }
            )*
        }
    };
}

stream_codec! {
    read_u32, write_u32, u32;
    read_u64, write_u64, u64;
    read_i64, write_i64, i64;
}

macro_rules! slice_codec {
    ($($decode:ident, $encode:ident, $read:ident, $write:ident, $ty:ty);* $(;)?) => {
        impl ByteOrder {
            $(
                #[doc = concat!("Decode one `", stringify!($ty), "` from the front of `buf`")]
                pub fn $decode(self, buf: &[u8]) -> $ty {
                    match self {
                        ByteOrder::Big => BigEndian::$read(buf),
                        ByteOrder::Little => LittleEndian::$read(buf),
                    }
                }

                #[doc = concat!("Encode one `", stringify!($ty), "` into the front of `buf`")]
                pub fn $encode(self, buf: &mut [u8], value: $ty) {
                    match self {
                        ByteOrder::Big => BigEndian::$write(buf, value),
                        ByteOrder::Little => LittleEndian::$write(buf, value),
                    }
                }
            )*
        }
    };
}

slice_codec! {
    decode_i16, encode_i16, read_i16, write_i16, i16;
    decode_u16, encode_u16, read_u16, write_u16, u16;
    decode_i32, encode_i32, read_i32, write_i32, i32;
    decode_u32, encode_u32, read_u32, write_u32, u32;
    decode_i64, encode_i64, read_i64, write_i64, i64;
    decode_u64, encode_u64, read_u64, write_u64, u64;
    decode_f32, encode_f32, read_f32, write_f32, f32;
    decode_f64, encode_f64, read_f64, write_f64, f64;
}
