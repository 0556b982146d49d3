// Common test utilities for asset-based integration tests
//
// Builds cursor sheets, palette files and archives on the fly so the
// integration tests do not depend on original game data.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use ufo_frontend::archive::MemoryArchive;
use ufo_frontend::display::{FrameLayout, Palette, Rgba, CURSOR_LAYOUT};

/// Logical path of the cursor sheet
pub const CURSOR_PATH: &str = "UFOGRAPH/CURSOR.DAT";

/// Logical path of the palette file
pub const PALETTE_PATH: &str = "GEODATA/PALETTES.DAT";

/// Bytes per cursor frame
pub const CURSOR_RECORD: usize = 24 * 24;

/// Cursor sheet with `frames` frames, frame `n` filled with index `n + 1`
pub fn cursor_sheet(frames: usize) -> Vec<u8> {
    sheet(CURSOR_LAYOUT, frames)
}

/// Sheet of `frames` records of `layout`, record `n` filled with index `n + 1`
pub fn sheet(layout: FrameLayout, frames: usize) -> Vec<u8> {
    (0..frames)
        .flat_map(|n| std::iter::repeat((n + 1) as u8).take(layout.record_size()))
        .collect()
}

/// Palette mapping index 0 to black and index 1 to white
pub fn black_white_palette() -> Palette {
    Palette::new(vec![Rgba::BLACK, Rgba::WHITE])
}

/// Legacy palette file holding `palettes` blocks
///
/// In block `p`, entry `i` has every component set to `(i + p) % 64`.
pub fn vga_palette_file(palettes: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    for p in 0..palettes {
        for i in 0..256 {
            let v = ((i + p) % 64) as u8;
            bytes.extend_from_slice(&[v, v, v]);
        }
        bytes.extend_from_slice(&[0; 6]);
    }
    bytes
}

/// In-memory archive with a cursor sheet and a palette file
pub fn memory_archive(frames: usize) -> MemoryArchive {
    MemoryArchive::new()
        .with_entry(CURSOR_PATH, cursor_sheet(frames))
        .with_entry(PALETTE_PATH, vga_palette_file(1))
}

/// Write `entries` below `root` as loose files, creating directories
pub fn write_directory(root: &Path, entries: &[(&str, &[u8])]) {
    for (name, bytes) in entries {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }
}

/// Write `entries` into a new zip file at `path`
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, bytes) in entries {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
    path.to_path_buf()
}
