use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use reqwest::blocking::Client;

use crate::error::FetchError;
use crate::paths::{is_gzip_url, strip_gz};

/// Files below this size are treated as corrupt (truncated downloads and
/// mirror error pages are far smaller than any real benchmark artifact).
pub const MIN_PLAUSIBLE_SIZE: u64 = 1000;

/// Some mirrors reject requests carrying the default client identifier.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Fetches `url` to `dest`, returning the path of the canonical local
/// artifact (the `.gz`-stripped sibling when the source is compressed).
///
/// Present-valid destinations short-circuit without network I/O, so
/// re-running a completed pipeline performs no redundant transfers. On any
/// failure no partial or corrupt file is left behind.
pub fn fetch(client: &Client, url: &str, dest: &Path) -> Result<PathBuf, FetchError> {
    let compressed = is_gzip_url(url);
    let target = if compressed {
        strip_gz(dest)
    } else {
        dest.to_path_buf()
    };

    match fs::metadata(&target) {
        Ok(meta) if meta.len() >= MIN_PLAUSIBLE_SIZE => {
            log::info!("Found {}", target.display());
            return Ok(target);
        }
        Ok(meta) => {
            log::warn!(
                "{} looks invalid ({} bytes, too small). Deleting.",
                target.display(),
                meta.len()
            );
            fs::remove_file(&target).map_err(|e| FetchError::Io {
                path: target.clone(),
                source: e,
            })?;
        }
        Err(_) => {}
    }

    log::info!("Downloading {url}...");
    if let Err(e) = download(client, url, dest) {
        let _ = fs::remove_file(dest);
        return Err(e);
    }

    if compressed {
        log::info!("Decompressing {}...", dest.display());
        if let Err(e) = decompress_gz(dest, &target) {
            let _ = fs::remove_file(&target);
            let _ = fs::remove_file(dest);
            return Err(FetchError::Decompression {
                path: dest.to_path_buf(),
                source: e,
            });
        }
        fs::remove_file(dest).map_err(|e| FetchError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
    }

    let len = fs::metadata(&target)
        .map_err(|e| FetchError::Io {
            path: target.clone(),
            source: e,
        })?
        .len();
    if len < MIN_PLAUSIBLE_SIZE {
        let _ = fs::remove_file(&target);
        return Err(FetchError::Corrupt { path: target, len });
    }

    Ok(target)
}

fn download(client: &Client, url: &str, dest: &Path) -> Result<(), FetchError> {
    let mut response = client.get(url).send().map_err(|e| FetchError::Transfer {
        url: url.to_string(),
        source: e,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::BadStatus {
            url: url.to_string(),
            status,
        });
    }

    let mut out = fs::File::create(dest).map_err(|e| FetchError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    // The response body streams straight to disk; payloads are never
    // buffered whole in memory.
    io::copy(&mut response, &mut out).map_err(|e| FetchError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn decompress_gz(src: &Path, dst: &Path) -> io::Result<()> {
    let file = fs::File::open(src)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut out = fs::File::create(dst)?;
    io::copy(&mut decoder, &mut out)?;
    Ok(())
}
