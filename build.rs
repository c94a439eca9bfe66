use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    // `sqlx::migrate!` embeds the SQL files at compile time; without explicit
    // cargo hints a new migration does not trigger a rebuild.
    rerun_if_changed_dir("migrations");
}

fn rerun_if_changed_dir(dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    if !dir.exists() {
        return;
    }
    println!("cargo:rerun-if-changed={}", dir.display());
    let mut stack: Vec<PathBuf> = vec![dir.to_path_buf()];
    while let Some(path) = stack.pop() {
        let Ok(entries) = fs::read_dir(&path) else {
            continue;
        };
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                stack.push(p);
                continue;
            }
            if p.extension().and_then(|s| s.to_str()) == Some("sql") {
                println!("cargo:rerun-if-changed={}", p.display());
            }
        }
    }
}
