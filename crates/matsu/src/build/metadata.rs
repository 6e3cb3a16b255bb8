use std::{
    fs, io,
    path::Path,
    process::Termination,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

/// Metadata returned by [`build_site()`](crate::build_site) for a single page after a successful build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageOutput {
    pub route: String,
    pub file_path: String,
    pub title: Option<String>,
}

/// A file copied from the static directory without any processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticAssetOutput {
    pub file_path: String,
    pub original_path: String,
}

/// Metadata returned by [`build_site()`](crate::build_site) after a successful build.
///
/// Also written as JSON to [`BuildOptions::manifest_path`](crate::BuildOptions::manifest_path), where `matsu preview`
/// picks it up to find the output directory.
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    #[serde(skip)]
    pub start_time: Instant,
    pub output_dir: String,
    pub base: Option<String>,
    pub pages: Vec<PageOutput>,
    pub not_found_page: Option<String>,
    pub static_files: Vec<StaticAssetOutput>,
    pub duration_ms: u128,
}

impl BuildOutput {
    pub fn new(start_time: Instant, output_dir: &Path, base: Option<&str>) -> Self {
        Self {
            start_time,
            output_dir: output_dir.to_string_lossy().to_string(),
            base: base.map(str::to_string),
            pages: Vec::new(),
            not_found_page: None,
            static_files: Vec::new(),
            duration_ms: 0,
        }
    }

    pub(crate) fn add_page(&mut self, route: &str, file_path: &Path, title: Option<&str>) {
        self.pages.push(PageOutput {
            route: route.to_string(),
            file_path: file_path.to_string_lossy().to_string(),
            title: title.map(str::to_string),
        });
    }

    pub(crate) fn add_static_file(&mut self, file_path: &Path, original_path: &Path) {
        self.static_files.push(StaticAssetOutput {
            file_path: file_path.to_string_lossy().to_string(),
            original_path: original_path.to_string_lossy().to_string(),
        });
    }

    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.duration_ms = elapsed.as_millis();
    }

    /// Writes the manifest as pretty-printed JSON, creating parent directories as needed.
    pub fn write_manifest(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
