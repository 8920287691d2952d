use std::io::{Cursor, Seek, SeekFrom};

use proptest::prelude::*;

use super::*;
use crate::compression::Compression;
use crate::field::{Field, FieldType};
use crate::geometry::Dimension;

fn layer(separated: bool, compression: Compression) -> Layer {
    Layer::new(
        "grid",
        vec![Dimension::new(7, 3), Dimension::new(5, 2), Dimension::new(2, 2)],
        vec![
            Field::new("temperature", FieldType::Float32),
            Field::new("count", FieldType::Int16),
            Field::new("id", FieldType::UInt64),
        ],
        separated,
        compression,
    )
}

fn sample_at(coord: &[usize]) -> Vec<Value> {
    let linear = coord[0] + 7 * coord[1] + 35 * coord[2];
    vec![
        Value::Float32(linear as f32 * 0.5),
        Value::Int16(-(linear as i16)),
        Value::UInt64(linear as u64 * 1_000_003),
    ]
}

fn all_coords() -> Vec<Vec<usize>> {
    let mut coords = Vec::new();
    for z in 0..2 {
        for y in 0..5 {
            for x in 0..7 {
                coords.push(vec![x, y, z]);
            }
        }
    }
    coords
}

#[test]
fn test_new_dataset_is_zeroed() {
    let dataset = InMemoryDataset::new(layer(false, Compression::None), ByteOrder::Big);
    assert_eq!(
        dataset.get_sample(&[6, 4, 1]).unwrap(),
        vec![Value::Float32(0.0), Value::Int16(0), Value::UInt64(0)]
    );
    // 3x2x2 tile, 14-byte samples.
    assert_eq!(dataset.tile(0).unwrap().len(), 12 * 14);
}

#[test]
fn test_set_get_every_sample() {
    for separated in [false, true] {
        let mut dataset = InMemoryDataset::new(layer(separated, Compression::None), ByteOrder::Little);
        for coord in all_coords() {
            dataset.set_sample(&coord, &sample_at(&coord)).unwrap();
        }
        for coord in all_coords() {
            assert_eq!(dataset.get_sample(&coord).unwrap(), sample_at(&coord));
        }
    }
}

#[test]
fn test_field_access() {
    let mut dataset = InMemoryDataset::new(layer(true, Compression::None), ByteOrder::Big);
    dataset.set_sample_field(&[2, 3, 1], 1, Value::Int16(77)).unwrap();

    assert_eq!(dataset.get_sample_field(&[2, 3, 1], 1).unwrap(), Value::Int16(77));
    assert_eq!(
        dataset.get_sample_field_by_name(&[2, 3, 1], "count").unwrap(),
        Value::Int16(77)
    );
    assert_eq!(
        dataset.get_sample_field(&[2, 3, 1], 0).unwrap(),
        Value::Float32(0.0)
    );
    assert!(matches!(
        dataset.get_sample_field_by_name(&[2, 3, 1], "missing"),
        Err(PixiError::MissingField(_))
    ));
    assert!(matches!(
        dataset.get_sample_field(&[2, 3, 1], 3),
        Err(PixiError::FieldIndexOutOfBounds { index: 3, count: 3 })
    ));
}

#[test]
fn test_values_are_cast_to_field_type() {
    let mut dataset = InMemoryDataset::new(layer(false, Compression::None), ByteOrder::Big);
    dataset
        .set_sample(&[0, 0, 0], &[Value::Int32(3), Value::Float64(12.7), Value::UInt8(9)])
        .unwrap();
    assert_eq!(
        dataset.get_sample(&[0, 0, 0]).unwrap(),
        vec![Value::Float32(3.0), Value::Int16(12), Value::UInt64(9)]
    );
}

#[test]
fn test_coordinate_errors() {
    let mut dataset = InMemoryDataset::new(layer(false, Compression::None), ByteOrder::Big);
    assert!(matches!(
        dataset.get_sample(&[1, 1]),
        Err(PixiError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
    assert!(matches!(
        dataset.set_sample_field(&[1, 1, 1, 1], 0, Value::Int8(1)),
        Err(PixiError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        dataset.get_sample(&[7, 0, 0]),
        Err(PixiError::CoordinateOutOfBounds { dimension: 0, .. })
    ));
    assert!(matches!(
        dataset.set_sample(&[0, 0, 0], &[Value::Int8(1)]),
        Err(PixiError::FieldCountMismatch {
            expected: 3,
            actual: 1
        })
    ));
}

#[test]
fn test_write_layer_then_load_matches() {
    for separated in [false, true] {
        for compression in [Compression::None, Compression::Deflate] {
            let mut dataset = InMemoryDataset::new(layer(separated, compression), ByteOrder::Big);
            for coord in all_coords() {
                dataset.set_sample(&coord, &sample_at(&coord)).unwrap();
            }

            let mut stream = Cursor::new(Vec::new());
            let end = dataset
                .write_layer(&mut stream, 16, &WriterConfig::default())
                .unwrap();
            assert_eq!(stream.get_ref().len() as u64, end);

            stream.seek(SeekFrom::Start(16)).unwrap();
            let header = Layer::read_header(&mut stream, ByteOrder::Big).unwrap();
            assert_eq!(&header, dataset.layer());

            let loaded = InMemoryDataset::load(&mut stream, header, ByteOrder::Big).unwrap();
            for coord in all_coords() {
                assert_eq!(loaded.get_sample(&coord).unwrap(), sample_at(&coord));
            }
        }
    }
}

#[test]
fn test_write_layer_rejects_byte_order_mismatch() {
    let mut dataset = InMemoryDataset::new(layer(false, Compression::None), ByteOrder::Little);
    let mut stream = Cursor::new(Vec::new());
    assert!(matches!(
        dataset.write_layer(&mut stream, 0, &WriterConfig::default()),
        Err(PixiError::Format(_))
    ));
}

proptest! {
    #[test]
    fn test_set_get_roundtrip(
        x in 0usize..7,
        y in 0usize..5,
        z in 0usize..2,
        temperature in any::<f32>().prop_filter("finite", |v| v.is_finite()),
        count in any::<i16>(),
        id in any::<u64>(),
        separated in any::<bool>(),
    ) {
        let mut dataset = InMemoryDataset::new(layer(separated, Compression::None), ByteOrder::Big);
        let values = vec![Value::Float32(temperature), Value::Int16(count), Value::UInt64(id)];
        dataset.set_sample(&[x, y, z], &values).unwrap();
        prop_assert_eq!(dataset.get_sample(&[x, y, z]).unwrap(), values);
    }
}
