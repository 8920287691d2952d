use anyhow::{Context, Result};
use log::info;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::PathBuf;

use pixi::compression::Compression;
use pixi::field::{Field, FieldType, Value};
use pixi::file::{create_pixi, PixiHeader, TagSection};
use pixi::geometry::Dimension;
use pixi::layer::Layer;
use pixi::stream::{write_contiguous_tile_order, LayerSource, SampleSource};

use super::config::Config;

/// Generate a demo file with a terrain layer and a land-cover layer
pub fn run(
    output: PathBuf,
    compression: Compression,
    separated: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(&path)?.writer,
        None => Default::default(),
    };

    info!("pixi Demo Generator");
    info!("===================");
    info!("Output: {}", output.display());
    info!("Compression: {}", compression);
    info!("Separated fields: {}", separated);
    info!("Byte order: {:?}", config.byte_order);

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut header = PixiHeader::new(config.byte_order);
    let mut tags = TagSection::new();
    tags.insert("generator", concat!("pixi ", env!("CARGO_PKG_VERSION")))
        .insert("description", "synthetic terrain demo");
    let first_layer = create_pixi(&mut writer, &mut header, &tags).context("Failed to write file header")?;

    let dims = vec![Dimension::new(512, 128), Dimension::new(256, 128)];
    let terrain = Layer::new(
        "terrain",
        dims.clone(),
        vec![
            Field::new("elevation", FieldType::Float32),
            Field::new("slope", FieldType::Int16),
        ],
        separated,
        compression,
    );
    let cover = Layer::new(
        "land_cover",
        dims,
        vec![Field::new("class", FieldType::UInt8)],
        separated,
        compression,
    );

    let mut layers = vec![
        LayerSource::new(terrain, SampleSource::positional(terrain_sample)),
        LayerSource::new(
            cover,
            SampleSource::positional(|c: &[usize]| {
                vec![Value::UInt8(((c[0] / 64 + c[1] / 32) % 7) as u8)]
            }),
        ),
    ];

    let stats = write_contiguous_tile_order(&mut writer, first_layer, &mut layers, &config)
        .context("Failed to write demo layers")?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush output")?;

    info!("Demo complete!");
    info!("  {}", stats);
    for entry in &layers {
        info!(
            "  Layer '{}': {} disk tiles, {} data bytes",
            entry.layer.name,
            entry.layer.disk_tile_count(),
            entry.layer.data_size()
        );
    }

    Ok(())
}

fn terrain_sample(coord: &[usize]) -> Vec<Value> {
    let x = coord[0] as f32 / 512.0;
    let y = coord[1] as f32 / 256.0;
    let elevation = 1200.0 * (x * std::f32::consts::PI).sin() * (y * std::f32::consts::PI).cos();
    let slope = ((x - 0.5).abs() * 90.0) as i16;
    vec![Value::Float32(elevation), Value::Int16(slope)]
}
