use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use super::*;
use crate::compression::Compression;
use crate::config::WriterConfig;
use crate::error::PixiError;
use crate::field::{ByteOrder, Field, FieldType, Value};
use crate::geometry::{self, Dimension};
use crate::layer::Layer;

fn two_field_layer(name: &str, separated: bool, compression: Compression) -> Layer {
    Layer::new(
        name,
        vec![Dimension::new(4, 2), Dimension::new(4, 2)],
        vec![
            Field::new("a", FieldType::Float32),
            Field::new("b", FieldType::Int16),
        ],
        separated,
        compression,
    )
}

fn values_for(coord: &[usize], salt: usize) -> Vec<Value> {
    vec![
        Value::Float32((coord[0] * 4 + coord[1] + salt) as f32 + 0.25),
        Value::Int16((coord[0] as i16 - coord[1] as i16) * (salt as i16 + 1)),
    ]
}

#[test]
fn test_two_layer_scenario_offsets() {
    let mut layers = vec![
        LayerSource::new(
            two_field_layer("first", false, Compression::None),
            SampleSource::positional(|c: &[usize]| values_for(c, 0)),
        ),
        LayerSource::new(
            two_field_layer("second", false, Compression::None),
            SampleSource::positional(|c: &[usize]| values_for(c, 1)),
        ),
    ];

    let start = 24;
    let mut stream = Cursor::new(Vec::new());
    let stats =
        write_contiguous_tile_order(&mut stream, start, &mut layers, &WriterConfig::default()).unwrap();
    assert_eq!(stats.layers_written, 2);
    assert_eq!(stats.tiles_written, 8);
    assert_eq!(stats.samples_written, 32);

    let first = &layers[0].layer;
    let second = &layers[1].layer;
    assert_eq!(first.tile_bytes, vec![24; 4]);
    let first_data = start + first.header_size();
    assert_eq!(
        first.tile_offsets,
        vec![first_data, first_data + 24, first_data + 48, first_data + 72]
    );

    let second_start = first_data + 96;
    assert_eq!(first.next_layer_start, second_start);
    assert_eq!(second.next_layer_start, 0);
    let second_data = second_start + second.header_size();
    assert_eq!(second.tile_offsets[0], second_data);
    assert_eq!(stats.bytes_written, second_data + 96 - start);

    let chain = crate::file::read_layers(&mut stream, start, ByteOrder::Big).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(&chain[0], first);
    assert_eq!(&chain[1], second);
}

#[test]
fn test_read_visits_every_coordinate_in_tile_order() {
    for separated in [false, true] {
        for compression in [Compression::None, Compression::Deflate] {
            // 5x3 grid with 2x2 tiles: padding in the last tile of each axis.
            let layer = Layer::new(
                "padded",
                vec![Dimension::new(5, 2), Dimension::new(3, 2)],
                vec![
                    Field::new("a", FieldType::Float64),
                    Field::new("b", FieldType::UInt8),
                ],
                separated,
                compression,
            );
            let source = SampleSource::positional(|c: &[usize]| {
                vec![Value::Float64(c[0] as f64 * 1.5), Value::UInt8((c[1] * 10) as u8)]
            });
            let mut layers = vec![LayerSource::new(layer, source)];
            let mut stream = Cursor::new(Vec::new());
            write_contiguous_tile_order(&mut stream, 0, &mut layers, &WriterConfig::fast()).unwrap();

            let layer = &layers[0].layer;
            let mut seen = HashSet::new();
            let mut last_selector = None;
            for sample in read_contiguous_tile_order(&mut stream, layer, ByteOrder::Big) {
                let (coord, values) = sample.unwrap();
                assert_eq!(
                    values,
                    vec![Value::Float64(coord[0] as f64 * 1.5), Value::UInt8((coord[1] * 10) as u8)]
                );

                let selector = geometry::to_tile_selector(&layer.dimensions, &coord).unwrap();
                let key = (selector.tile, selector.in_tile);
                if let Some(previous) = last_selector {
                    assert!(key > previous);
                }
                last_selector = Some(key);
                assert!(seen.insert(coord));
            }
            assert_eq!(seen.len(), 15);
        }
    }
}

#[test]
fn test_named_source() {
    let layer = two_field_layer("named", true, Compression::Deflate);
    let source = SampleSource::named(|c: &[usize]| {
        let mut values = HashMap::new();
        values.insert("b".to_string(), Value::Int16(c[1] as i16));
        values.insert("a".to_string(), Value::Float32(c[0] as f32));
        values.insert("unused".to_string(), Value::Int8(0));
        values
    });
    let mut layers = vec![LayerSource::new(layer, source)];
    let mut stream = Cursor::new(Vec::new());
    let config = WriterConfig::default().with_byte_order(ByteOrder::Little);
    write_contiguous_tile_order(&mut stream, 0, &mut layers, &config).unwrap();

    let count = read_contiguous_tile_order(&mut stream, &layers[0].layer, ByteOrder::Little)
        .map(|sample| {
            let (coord, values) = sample.unwrap();
            assert_eq!(values, vec![Value::Float32(coord[0] as f32), Value::Int16(coord[1] as i16)]);
        })
        .count();
    assert_eq!(count, 16);
}

#[test]
fn test_source_errors() {
    let mut stream = Cursor::new(Vec::new());

    let mut missing = vec![LayerSource::new(
        two_field_layer("missing", false, Compression::None),
        SampleSource::named(|_: &[usize]| HashMap::new()),
    )];
    assert!(matches!(
        write_contiguous_tile_order(&mut stream, 0, &mut missing, &WriterConfig::default()),
        Err(PixiError::MissingField(name)) if name == "a"
    ));

    let mut short = vec![LayerSource::new(
        two_field_layer("short", false, Compression::None),
        SampleSource::positional(|_: &[usize]| vec![Value::Int8(1)]),
    )];
    assert!(matches!(
        write_contiguous_tile_order(&mut stream, 0, &mut short, &WriterConfig::default()),
        Err(PixiError::FieldCountMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_reader_stops_after_error() {
    let mut layers = vec![LayerSource::new(
        two_field_layer("broken", false, Compression::Deflate),
        SampleSource::positional(|c: &[usize]| values_for(c, 0)),
    )];
    let mut stream = Cursor::new(Vec::new());
    write_contiguous_tile_order(&mut stream, 0, &mut layers, &WriterConfig::default()).unwrap();

    // Point the second tile past the end of the stream.
    let mut layer = layers[0].layer.clone();
    layer.tile_offsets[1] = 1 << 20;

    let results: Vec<_> = read_contiguous_tile_order(&mut stream, &layer, ByteOrder::Big).collect();
    assert_eq!(results.len(), 5);
    assert!(results[..4].iter().all(Result::is_ok));
    assert!(matches!(results[4], Err(PixiError::TileIo { tile: 1, .. })));
}
