use std::collections::HashSet;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::Result;

/// GitHub mirror for the raw ISPD98/ICCAD04 benchmark files.
const IBM_GITHUB_BASE: &str =
    "https://raw.githubusercontent.com/ckmarkoh/101_2_pdpa2/master/benchmark/ibm01";

/// Standard-cell library shared by all non-IBM designs.
const LEF_URL: &str =
    "https://raw.githubusercontent.com/The-OpenROAD-Project/OpenROAD/master/test/Nangate45/Nangate45.lef";

const GCD_DEF_URL: &str =
    "https://raw.githubusercontent.com/The-OpenROAD-Project/OpenROAD/master/src/grt/test/gcd.def";

/// Where a design's primary artifact comes from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DesignSource {
    /// One self-contained file (DEF).
    SingleFile { url: String },
    /// A Bookshelf design split across several co-dependent files.
    /// `files` maps remote filenames to canonical local filenames, in
    /// manifest order: topology, connectivity, placement, rows.
    MultiFile {
        base_url: String,
        files: Vec<(String, String)>,
    },
}

/// Values substituted into the engine config template. Opaque to the fetch
/// layer; designs without parameters get no rendered config.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParams {
    pub bin_dimension: usize,
}

/// One benchmark design under management.
#[derive(Debug, Clone)]
pub struct BenchmarkDescriptor {
    pub id: String,
    pub description: String,
    pub source: DesignSource,
    pub library_url: Option<String>,
    pub synthesis: Option<SynthesisParams>,
    pub config_filename: String,
}

/// The static benchmark catalog, in the order designs are processed.
pub fn default_registry() -> Vec<BenchmarkDescriptor> {
    vec![
        BenchmarkDescriptor {
            id: "gcd".to_string(),
            description: "Tiny (~1k cells, sanity check)".to_string(),
            source: DesignSource::SingleFile {
                url: GCD_DEF_URL.to_string(),
            },
            library_url: Some(LEF_URL.to_string()),
            synthesis: Some(SynthesisParams { bin_dimension: 64 }),
            config_filename: "config_gcd.toml".to_string(),
        },
        BenchmarkDescriptor {
            id: "ibm01".to_string(),
            description: "Classic ISPD98 mixed-size benchmark (~12k cells)".to_string(),
            source: DesignSource::MultiFile {
                base_url: IBM_GITHUB_BASE.to_string(),
                files: vec![
                    ("ibm01.nodes".to_string(), "ibm01.nodes".to_string()),
                    ("ibm01.nets".to_string(), "ibm01.nets".to_string()),
                    ("ibm01-cu85.pl".to_string(), "ibm01.pl".to_string()),
                    ("ibm01-cu85.scl".to_string(), "ibm01.scl".to_string()),
                ],
            },
            library_url: None,
            synthesis: None,
            config_filename: "config_ibm01.toml".to_string(),
        },
    ]
}

/// Rejects registries where two designs would collide on identity or
/// overwrite each other's config, or where a multi-file design does not
/// carry the four Bookshelf constituents.
pub fn validate_registry(registry: &[BenchmarkDescriptor]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut configs = HashSet::new();
    for desc in registry {
        if !ids.insert(desc.id.as_str()) {
            bail!("duplicate design id `{}` in registry", desc.id);
        }
        if !configs.insert(desc.config_filename.as_str()) {
            bail!(
                "duplicate config filename `{}` in registry",
                desc.config_filename
            );
        }
        if let DesignSource::MultiFile { files, .. } = &desc.source {
            if files.len() != crate::bookshelf::BOOKSHELF_FILE_COUNT {
                bail!(
                    "multi-file design `{}` must list exactly {} constituent files \
                     (topology, connectivity, placement, rows), got {}",
                    desc.id,
                    crate::bookshelf::BOOKSHELF_FILE_COUNT,
                    files.len()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_valid() {
        let registry = default_registry();
        validate_registry(&registry).unwrap();
        assert_eq!(registry[0].id, "gcd");
        assert_eq!(registry[1].id, "ibm01");
    }

    #[test]
    fn ibm01_files_are_in_manifest_order() {
        let registry = default_registry();
        let DesignSource::MultiFile { files, .. } = &registry[1].source else {
            panic!("ibm01 must be a multi-file design");
        };
        let locals: Vec<&str> = files.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(locals, ["ibm01.nodes", "ibm01.nets", "ibm01.pl", "ibm01.scl"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = default_registry();
        let mut dup = registry[0].clone();
        dup.config_filename = "config_other.toml".to_string();
        registry.push(dup);
        assert!(validate_registry(&registry).is_err());
    }

    #[test]
    fn multi_file_design_must_list_four_constituents() {
        let mut registry = default_registry();
        let DesignSource::MultiFile { files, .. } = &mut registry[1].source else {
            panic!("ibm01 must be a multi-file design");
        };
        files.pop();
        assert!(validate_registry(&registry).is_err());
    }

    #[test]
    fn duplicate_config_filenames_are_rejected() {
        let mut registry = default_registry();
        let mut dup = registry[0].clone();
        dup.id = "gcd2".to_string();
        registry.push(dup);
        assert!(validate_registry(&registry).is_err());
    }
}
