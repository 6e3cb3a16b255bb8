use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// The part of the build manifest written by `matsu::build_site()` that the CLI cares about.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub base: Option<String>,
}

impl Manifest {
    pub fn read(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(io::Error::other)
    }
}

pub fn default_manifest_path() -> PathBuf {
    let target_dir = env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".to_string());
    PathBuf::from(target_dir).join("matsu/manifest.json")
}

/// Where the site to preview lives: the `--dist` flag first, then the last build's manifest, then `dist`.
pub fn resolve_dist_dir(flag: Option<PathBuf>, manifest: Option<&Manifest>) -> PathBuf {
    flag.or_else(|| manifest.map(|manifest| manifest.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("dist"))
}
