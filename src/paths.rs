use std::path::{Path, PathBuf};

/// Last path segment of a URL, used as the canonical local filename.
pub fn remote_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Whether a source URL carries a gzip payload that should be normalized.
/// Tarballs are left alone; only bare `.gz` single files are decompressed.
pub fn is_gzip_url(url: &str) -> bool {
    url.ends_with(".gz") && !url.ends_with(".tar.gz")
}

/// Strips a trailing `.gz` from a path, yielding the canonical decompressed
/// artifact path. Paths without the suffix are returned unchanged.
pub fn strip_gz(path: &Path) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_suffix(".gz")) {
        Some(stripped) => PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}

pub fn placed_def(output_dir: impl AsRef<Path>, id: &str) -> PathBuf {
    PathBuf::from(output_dir.as_ref()).join(format!("{id}_placed.def"))
}
