use super::*;

#[test]
fn test_field_type_codes() {
    for field_type in FieldType::ALL {
        assert_eq!(FieldType::from_code(field_type.code()).unwrap(), field_type);
    }
    assert!(matches!(
        FieldType::from_code(0),
        Err(PixiError::UnknownFieldType(0))
    ));
    assert!(matches!(
        FieldType::from_code(11),
        Err(PixiError::UnknownFieldType(11))
    ));
}

#[test]
fn test_field_type_sizes() {
    assert_eq!(FieldType::Int8.size(), 1);
    assert_eq!(FieldType::UInt16.size(), 2);
    assert_eq!(FieldType::Float32.size(), 4);
    assert_eq!(FieldType::Int32.size(), 4);
    assert_eq!(FieldType::UInt64.size(), 8);
    assert_eq!(FieldType::Float64.size(), 8);
}

#[test]
fn test_value_roundtrip_all_types() {
    let values = [
        Value::Int8(-5),
        Value::UInt8(250),
        Value::Int16(-12_345),
        Value::UInt16(54_321),
        Value::Int32(-1_000_000),
        Value::UInt32(4_000_000_000),
        Value::Int64(-9_000_000_000_000),
        Value::UInt64(18_000_000_000_000_000_000),
        Value::Float32(3.5),
        Value::Float64(-2.25e100),
    ];

    for order in [ByteOrder::Big, ByteOrder::Little] {
        for value in values {
            let field_type = value.field_type();
            let mut buf = vec![0u8; field_type.size()];
            field_type.write_value(&mut buf, value, order);
            assert_eq!(field_type.read_value(&buf, order), value);
        }
    }
}

#[test]
fn test_big_endian_layout() {
    let mut buf = [0u8; 4];
    FieldType::Int32.write_value(&mut buf, Value::Int32(0x0102_0304), ByteOrder::Big);
    assert_eq!(buf, [1, 2, 3, 4]);

    FieldType::Int32.write_value(&mut buf, Value::Int32(0x0102_0304), ByteOrder::Little);
    assert_eq!(buf, [4, 3, 2, 1]);
}

#[test]
fn test_write_casts_to_field_type() {
    let mut buf = [0u8; 2];
    FieldType::Int16.write_value(&mut buf, Value::Float64(42.9), ByteOrder::Big);
    assert_eq!(
        FieldType::Int16.read_value(&buf, ByteOrder::Big),
        Value::Int16(42)
    );

    let mut byte = [0u8; 1];
    FieldType::UInt8.write_value(&mut byte, Value::Int32(257), ByteOrder::Big);
    assert_eq!(byte[0], 1);
}

#[test]
fn test_value_cast_identity() {
    let value = Value::Float32(1.25);
    assert_eq!(value.cast(FieldType::Float32), value);
    assert_eq!(value.cast(FieldType::Float64), Value::Float64(1.25));
    assert_eq!(Value::from(7u16), Value::UInt16(7));
}

#[test]
fn test_byte_order_codes() {
    assert_eq!(ByteOrder::from_code(0).unwrap(), ByteOrder::Big);
    assert_eq!(ByteOrder::from_code(1).unwrap(), ByteOrder::Little);
    assert!(ByteOrder::from_code(2).is_err());
    assert_eq!(ByteOrder::default(), ByteOrder::Big);
}

#[test]
fn test_stream_integers() {
    let mut out = Vec::new();
    ByteOrder::Big.write_u32(&mut out, 7).unwrap();
    ByteOrder::Little.write_i64(&mut out, -2).unwrap();
    assert_eq!(&out[..4], &[0, 0, 0, 7]);

    let mut cursor = std::io::Cursor::new(out);
    assert_eq!(ByteOrder::Big.read_u32(&mut cursor).unwrap(), 7);
    assert_eq!(ByteOrder::Little.read_i64(&mut cursor).unwrap(), -2);
}
