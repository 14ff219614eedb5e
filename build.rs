use std::fs;
use std::path::{Path, PathBuf};

fn add_watch_path(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());
}

fn main() {
    // The viewport glue is pulled in with include_str!; watch it and the
    // stylesheet explicitly so asset edits trigger a rebuild.
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        return;
    };

    add_watch_path(&manifest_dir.join("src/viewport.js"));

    let assets = manifest_dir.join("assets");
    add_watch_path(&assets);
    let Ok(entries) = fs::read_dir(&assets) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "css") {
            add_watch_path(&path);
        }
    }
}
