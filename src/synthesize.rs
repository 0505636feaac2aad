use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tera::Context;

use crate::{Result, TEMPLATES};

const CONFIG_TEMPLATE: &str = "engine_config.toml";

/// Resolved bindings substituted into the engine config template. Everything
/// else in the template is a fixed structural default of the engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineConfigParams {
    pub design_id: String,
    pub bin_dimension: usize,
    pub lef_file: String,
    pub def_file: String,
    pub output_def: String,
}

pub fn render_config(params: &EngineConfigParams) -> Result<String> {
    Ok(TEMPLATES.render(CONFIG_TEMPLATE, &Context::from_serialize(params)?)?)
}

/// Renders and writes the config, overwriting any prior version. Unlike
/// artifact fetching, config generation always re-renders.
pub fn save_config(path: impl AsRef<Path>, params: &EngineConfigParams) -> Result<()> {
    let config = render_config(params)?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, config)?;

    Ok(())
}
