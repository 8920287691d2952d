#![no_main]

use libfuzzer_sys::fuzz_target;
use pixi::file::Pixi;
use pixi::memory::InMemoryDataset;
use pixi::stream::read_contiguous_tile_order;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected with an error, never a panic.
    let mut cursor = Cursor::new(data);
    let Ok(pixi) = Pixi::read(&mut cursor) else {
        return;
    };

    for layer in &pixi.layers {
        // Bound the sample walk; huge declared tiles are still decoded.
        if layer.samples() > 1 << 16 {
            continue;
        }
        let _ = InMemoryDataset::load(&mut cursor, layer.clone(), pixi.header.byte_order);
        for sample in read_contiguous_tile_order(&mut cursor, layer, pixi.header.byte_order).take(4096) {
            if sample.is_err() {
                break;
            }
        }
    }
});
