pub use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use tera::Tera;

pub mod bookshelf;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod paths;
pub mod pipeline;
pub mod provision;
pub mod registry;
pub mod synthesize;

lazy_static! {
    pub static ref TEMPLATES: Tera =
        match Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/*")) {
            Ok(t) => t,
            Err(e) => panic!("Error parsing templates: {e}"),
        };
}
