//! Build script to generate the map manifest for WASM builds
//!
//! Scans assets/maps/ and writes a manifest listing every map file,
//! since WASM can't enumerate directories at runtime.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/maps");

    let maps_dir = Path::new("assets/maps");
    if !maps_dir.exists() {
        return;
    }

    let mut maps: Vec<_> = match fs::read_dir(maps_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext.to_ascii_lowercase() == "ron")
                    .unwrap_or(false)
            })
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => return,
    };

    maps.sort();

    let mut manifest = String::new();
    for name in maps {
        manifest.push_str(&name);
        manifest.push('\n');
    }

    let manifest_path = maps_dir.join("manifest.txt");
    if let Err(e) = fs::write(&manifest_path, manifest) {
        println!("cargo:warning=could not write {}: {}", manifest_path.display(), e);
    }
}
