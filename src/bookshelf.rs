use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::error::FetchError;
use crate::fetch::fetch;

/// Design type named in the manifest's single line.
pub const MANIFEST_KIND: &str = "RowBasedPlacement";

/// A Bookshelf design is always four co-dependent files.
pub const BOOKSHELF_FILE_COUNT: usize = 4;

/// Renders the one-line `.aux` manifest for the four canonical constituent
/// files, given in the fixed order topology, connectivity, placement, rows.
pub fn manifest_line(files: [&str; 4]) -> String {
    format!(
        "{MANIFEST_KIND} : {} {} {} {}\n",
        files[0], files[1], files[2], files[3]
    )
}

/// Assembles a multi-file Bookshelf design under `<input_dir>/<id>_raw`.
///
/// Every constituent is attempted even when an earlier one fails, so a rerun
/// only has to recover the missing pieces. The `.aux` manifest is written
/// only once all constituents are present-valid, and never rewritten; a
/// manifest on disk therefore always references existing files.
pub fn assemble(
    client: &Client,
    id: &str,
    base_url: &str,
    files: &[(String, String)],
    input_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let [(_, topology), (_, connectivity), (_, placement), (_, rows)] = files else {
        return Err(FetchError::PartialAssembly {
            design: id.to_string(),
            missing: BOOKSHELF_FILE_COUNT.abs_diff(files.len()),
            total: BOOKSHELF_FILE_COUNT,
        });
    };

    let extract_dir = input_dir.join(format!("{id}_raw"));
    fs::create_dir_all(&extract_dir).map_err(|e| FetchError::Io {
        path: extract_dir.clone(),
        source: e,
    })?;

    let mut missing = 0;
    for (remote_name, local_name) in files {
        let url = format!("{base_url}/{remote_name}");
        let local_path = extract_dir.join(local_name);
        if let Err(e) = fetch(client, &url, &local_path) {
            log::warn!("{id}: failed to fetch {url}: {e}");
            missing += 1;
        }
    }
    if missing > 0 {
        return Err(FetchError::PartialAssembly {
            design: id.to_string(),
            missing,
            total: files.len(),
        });
    }

    let aux_path = extract_dir.join(format!("{id}.aux"));
    if !aux_path.exists() {
        log::info!("Generating {}...", aux_path.display());
        let line = manifest_line([
            topology.as_str(),
            connectivity.as_str(),
            placement.as_str(),
            rows.as_str(),
        ]);
        fs::write(&aux_path, line).map_err(|e| FetchError::Io {
            path: aux_path.clone(),
            source: e,
        })?;
    }

    Ok(aux_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{MIN_PLAUSIBLE_SIZE, USER_AGENT};

    fn client() -> Client {
        Client::builder().user_agent(USER_AGENT).build().unwrap()
    }

    fn ibm_files() -> Vec<(String, String)> {
        vec![
            ("a.nodes".to_string(), "a.nodes".to_string()),
            ("a.nets".to_string(), "a.nets".to_string()),
            ("a-cu85.pl".to_string(), "a.pl".to_string()),
            ("a-cu85.scl".to_string(), "a.scl".to_string()),
        ]
    }

    fn populate(extract_dir: &Path, names: &[&str]) {
        fs::create_dir_all(extract_dir).unwrap();
        for name in names {
            fs::write(
                extract_dir.join(name),
                vec![b'#'; MIN_PLAUSIBLE_SIZE as usize],
            )
            .unwrap();
        }
    }

    #[test]
    fn manifest_line_matches_bookshelf_format() {
        assert_eq!(
            manifest_line(["a.nodes", "a.nets", "a.pl", "a.scl"]),
            "RowBasedPlacement : a.nodes a.nets a.pl a.scl\n"
        );
    }

    #[test]
    fn assemble_writes_manifest_when_all_constituents_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let extract_dir = dir.path().join("a_raw");
        // All four already present-valid: no fetch touches the network.
        populate(&extract_dir, &["a.nodes", "a.nets", "a.pl", "a.scl"]);

        let aux = assemble(
            &client(),
            "a",
            "http://127.0.0.1:1",
            &ibm_files(),
            dir.path(),
        )
        .unwrap();

        assert_eq!(aux, extract_dir.join("a.aux"));
        assert_eq!(
            fs::read_to_string(&aux).unwrap(),
            "RowBasedPlacement : a.nodes a.nets a.pl a.scl\n"
        );
    }

    #[test]
    fn missing_constituent_means_no_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let extract_dir = dir.path().join("a_raw");
        // Three of four present; the fourth points at an unreachable mirror.
        populate(&extract_dir, &["a.nodes", "a.nets", "a.pl"]);

        let err = assemble(
            &client(),
            "a",
            "http://127.0.0.1:1",
            &ibm_files(),
            dir.path(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FetchError::PartialAssembly {
                missing: 1,
                total: 4,
                ..
            }
        ));
        assert!(!extract_dir.join("a.aux").exists());
    }

    #[test]
    fn short_file_mapping_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<(String, String)> = ibm_files().into_iter().take(3).collect();

        let err = assemble(&client(), "a", "http://127.0.0.1:1", &files, dir.path()).unwrap_err();

        assert!(matches!(
            err,
            FetchError::PartialAssembly {
                missing: 1,
                total: 4,
                ..
            }
        ));
        // Rejected before any filesystem or network work.
        assert!(!dir.path().join("a_raw").exists());
    }

    #[test]
    fn existing_manifest_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let extract_dir = dir.path().join("a_raw");
        populate(&extract_dir, &["a.nodes", "a.nets", "a.pl", "a.scl"]);
        let aux = extract_dir.join("a.aux");
        fs::write(&aux, "sentinel").unwrap();

        assemble(
            &client(),
            "a",
            "http://127.0.0.1:1",
            &ibm_files(),
            dir.path(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&aux).unwrap(), "sentinel");
    }
}
