// Image manifests for the static site
// The gallery and partner strip load `<dir>/manifest.json` instead of listing directories.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "svg"];
pub const MANIFEST_FILE: &str = "manifest.json";

static CUSTOMER_PHOTO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)vinvel_cus_(\d+)").expect("customer photo regex should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    // `vinvel_cus_<n>` files first by n, everything else after, alphabetically
    CustomerPhotos,
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub base_path: String,
    pub files: Vec<String>,
}

// One directory the site reads a manifest from
#[derive(Debug, Clone)]
pub struct ManifestTarget {
    pub dir: PathBuf,
    pub base_path: String,
    pub order: SortOrder,
}

impl ManifestTarget {
    // The two image folders of the site, relative to its root
    pub fn site_defaults(root: &Path) -> Vec<ManifestTarget> {
        vec![
            ManifestTarget {
                dir: root.join("img").join("customer_photos"),
                base_path: "img/customer_photos/".to_string(),
                order: SortOrder::CustomerPhotos,
            },
            ManifestTarget {
                dir: root.join("img").join("partners"),
                base_path: "img/partners/".to_string(),
                order: SortOrder::Alphabetical,
            },
        ]
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Numbered(u64),
    Named(String),
}

fn sort_key(name: &str, order: SortOrder) -> SortKey {
    if order == SortOrder::CustomerPhotos {
        if let Some(n) = CUSTOMER_PHOTO
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return SortKey::Numbered(n);
        }
    }
    SortKey::Named(name.to_lowercase())
}

pub fn compare_names(a: &str, b: &str, order: SortOrder) -> Ordering {
    sort_key(a, order)
        .cmp(&sort_key(b, order))
        .then_with(|| a.cmp(b))
}

fn is_listed(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
}

// Non-recursive scan of `dir`
pub fn build_manifest(dir: &Path, base_path: &str, order: SortOrder) -> Result<Manifest> {
    if !dir.is_dir() {
        bail!("Missing folder: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_listed(&name) {
            continue;
        }
        // Follows symlinks, so linked photos are listed too
        let path = entry.path();
        let info = fs::metadata(&path).with_context(|| format!("Failed to stat {}", path.display()))?;
        if !info.is_file() {
            continue;
        }
        files.push(name);
    }

    files.sort_by(|a, b| compare_names(a, b, order));

    Ok(Manifest {
        base_path: base_path.to_string(),
        files,
    })
}

// Pretty JSON with a trailing newline, written to `<dir>/manifest.json`
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let out = dir.join(MANIFEST_FILE);
    let mut json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    json.push('\n');
    fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(out)
}

pub fn generate(target: &ManifestTarget) -> Result<(PathBuf, Manifest)> {
    let manifest = build_manifest(&target.dir, &target.base_path, target.order)?;
    let out = write_manifest(&target.dir, &manifest)?;
    tracing::info!("Wrote {} with {} files", out.display(), manifest.files.len());
    Ok((out, manifest))
}
