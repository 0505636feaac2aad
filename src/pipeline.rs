use std::path::PathBuf;

use colored::Colorize;
use reqwest::blocking::Client;

use crate::bookshelf;
use crate::fetch::{fetch, USER_AGENT};
use crate::paths::{placed_def, remote_filename};
use crate::provision::provision;
use crate::registry::{validate_registry, BenchmarkDescriptor, DesignSource};
use crate::synthesize::{save_config, EngineConfigParams};
use crate::Result;

/// The fixed local layout the pipeline provisions and populates.
#[derive(Debug, Clone)]
pub struct BenchmarkDirs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl Default for BenchmarkDirs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inputs/benchmarks"),
            output_dir: PathBuf::from("output"),
            config_dir: PathBuf::from("configs"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DesignStatus {
    /// Artifacts resolved and a config was written.
    ConfigGenerated(PathBuf),
    /// Artifacts resolved; the design has no synthesis parameters, so no
    /// config is rendered.
    Assembled,
    /// Artifacts could not be resolved; no config exists for this design.
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub id: String,
    pub status: DesignStatus,
}

/// Aggregated per-design outcomes of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<DesignOutcome>,
}

impl RunReport {
    pub fn generated(&self) -> impl Iterator<Item = (&str, &PathBuf)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            DesignStatus::ConfigGenerated(path) => Some((o.id.as_str(), path)),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            DesignStatus::Skipped(reason) => Some((o.id.as_str(), reason.as_str())),
            _ => None,
        })
    }

    pub fn print_summary(&self) {
        println!("\nBenchmark setup complete.");
        for outcome in &self.outcomes {
            match &outcome.status {
                DesignStatus::ConfigGenerated(path) => {
                    println!("  {} {} -> {}", "ok".green(), outcome.id, path.display());
                }
                DesignStatus::Assembled => {
                    println!("  {} {} (artifacts only)", "ok".green(), outcome.id);
                }
                DesignStatus::Skipped(reason) => {
                    println!("  {} {}: {}", "skipped".yellow(), outcome.id, reason);
                }
            }
        }

        let configs: Vec<_> = self.generated().collect();
        if !configs.is_empty() {
            println!("\nYou can now run the flow:");
            println!("{}", "-".repeat(50));
            for (i, (_, path)) in configs.iter().enumerate() {
                println!(
                    "{}. cargo run --release -- --config {} flow",
                    i + 1,
                    path.display()
                );
            }
            println!("{}", "-".repeat(50));
        }
    }
}

/// Runs the fetch-validate-transform pipeline over `registry`.
///
/// Best-effort over the full registry: a design whose artifacts fail to
/// resolve is recorded as skipped and processing continues. Only provisioning
/// failures (and an unusable HTTP client) abort the run.
pub fn run(registry: &[BenchmarkDescriptor], dirs: &BenchmarkDirs) -> Result<RunReport> {
    validate_registry(registry)?;
    provision(&[&dirs.input_dir, &dirs.output_dir, &dirs.config_dir])?;

    let client = Client::builder().user_agent(USER_AGENT).build()?;

    let mut outcomes = Vec::with_capacity(registry.len());
    for desc in registry {
        log::info!("Processing {} ({})", desc.id, desc.description);
        let status = process_design(&client, desc, dirs);
        if let DesignStatus::Skipped(reason) = &status {
            log::warn!("{}: skipped: {reason}", desc.id);
        }
        outcomes.push(DesignOutcome {
            id: desc.id.clone(),
            status,
        });
    }

    Ok(RunReport { outcomes })
}

fn process_design(
    client: &Client,
    desc: &BenchmarkDescriptor,
    dirs: &BenchmarkDirs,
) -> DesignStatus {
    let lef_path = match &desc.library_url {
        Some(url) => {
            let dest = dirs.input_dir.join(remote_filename(url));
            match fetch(client, url, &dest) {
                Ok(path) => Some(path),
                Err(e) => return DesignStatus::Skipped(format!("library fetch failed: {e}")),
            }
        }
        None => None,
    };

    let input_path = match &desc.source {
        DesignSource::SingleFile { url } => {
            let dest = dirs.input_dir.join(remote_filename(url));
            match fetch(client, url, &dest) {
                Ok(path) => path,
                Err(e) => return DesignStatus::Skipped(format!("fetch failed: {e}")),
            }
        }
        DesignSource::MultiFile { base_url, files } => {
            match bookshelf::assemble(client, &desc.id, base_url, files, &dirs.input_dir) {
                Ok(aux_path) => aux_path,
                Err(e) => return DesignStatus::Skipped(format!("assembly failed: {e}")),
            }
        }
    };

    match (&desc.synthesis, &lef_path) {
        (Some(synthesis), Some(lef_path)) => {
            let config_path = dirs.config_dir.join(&desc.config_filename);
            let params = EngineConfigParams {
                design_id: desc.id.clone(),
                bin_dimension: synthesis.bin_dimension,
                lef_file: lef_path.display().to_string(),
                def_file: input_path.display().to_string(),
                output_def: placed_def(&dirs.output_dir, &desc.id).display().to_string(),
            };
            match save_config(&config_path, &params) {
                Ok(()) => DesignStatus::ConfigGenerated(config_path),
                Err(e) => DesignStatus::Skipped(format!("config synthesis failed: {e}")),
            }
        }
        (Some(_), None) => {
            log::info!(
                "{}: no library binding, skipping config generation",
                desc.id
            );
            DesignStatus::Assembled
        }
        (None, _) => {
            log::info!(
                "{}: no synthesis parameters, skipping config generation",
                desc.id
            );
            DesignStatus::Assembled
        }
    }
}
