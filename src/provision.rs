use std::fs;
use std::path::Path;

use crate::error::ProvisionError;

/// Creates every directory in `paths` that does not already exist.
/// Re-running against an existing layout is a no-op.
pub fn provision(paths: &[&Path]) -> Result<(), ProvisionError> {
    for path in paths {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ProvisionError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created directory: {}", path.display());
        }
    }
    Ok(())
}
