//! Build script: validates profiles.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "profiles.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", config_path.display());
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. profiles.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct ProfileEntry {
        id: String,
        title: String,
        subtitle: String,
        welcome_heading: String,
        welcome_text: String,
        placeholder: String,
        loading_text: String,
        questions: Vec<String>,
    }
    let entries: Vec<ProfileEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "profiles.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    for id in ["financial", "news"] {
        if !entries.iter().any(|e| e.id == id) {
            panic!("profiles.json is missing the \"{}\" profile", id);
        }
    }
}
