use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use pixi::file::Pixi;
use pixi::layer::Layer;

/// Display information about a pixi file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let handle = File::open(&file).context("Failed to open file")?;
    let mut reader = BufReader::new(handle);
    let pixi = Pixi::read(&mut reader).context("Failed to read pixi file")?;

    println!("{}", heading("pixi File Information"));
    println!("=====================");
    println!("File: {}", file.display());
    println!("Format version: {}", pixi.header.version);
    println!("Byte order: {:?}", pixi.header.byte_order);
    println!("First layer offset: {}", pixi.header.first_layer_offset);
    println!();

    if !pixi.tags.is_empty() {
        println!("{}", heading("Tags:"));
        for (key, value) in &pixi.tags {
            let preview = if value.len() > 100 {
                let head: String = value.chars().take(100).collect();
                format!("{}... ({} bytes)", head, value.len())
            } else {
                value.clone()
            };
            println!("  {}: {}", key, preview);
        }
        println!();
    }

    println!("{}", heading(&format!("Layers ({}):", pixi.layers.len())));
    for (index, layer) in pixi.layers.iter().enumerate() {
        print_layer(index, layer);
    }

    Ok(())
}

fn print_layer(index: usize, layer: &Layer) {
    let shape: Vec<String> = layer
        .dimensions
        .iter()
        .map(|d| format!("{}/{}", d.size, d.tile_size))
        .collect();

    println!("  {:3}. {}", index + 1, layer.name);
    println!("       Shape (size/tile): [{}]", shape.join(", "));
    println!(
        "       Layout: {}, compression: {}",
        if layer.separated { "separated" } else { "interleaved" },
        layer.compression
    );
    for field in &layer.fields {
        println!("       - {} ({})", field.name, field.field_type);
    }

    let uncompressed: u64 = (0..layer.disk_tile_count())
        .map(|tile| layer.disk_tile_size(tile) as u64)
        .sum();
    let stored = layer.data_size();
    println!(
        "       Disk tiles: {}, stored {} bytes ({} uncompressed)",
        layer.disk_tile_count(),
        stored,
        uncompressed
    );
    if stored > 0 {
        println!(
            "       Compression ratio: {:.2}x",
            uncompressed as f64 / stored as f64
        );
    }
}

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    console::style(text).bold().cyan().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}
