use std::path::Path;

use crate::manifest::{ExternalsManifest, ManifestError};

mod json;
mod module;

pub use json::{from_json, to_json};
pub use module::{from_module, to_module};

pub(crate) const JSON_EXTENSIONS: &[&str] = &["json"];
pub(crate) const MODULE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

/// Reads the `external` list of a bundler config file.
///
/// `.json` files hold `{ "external": [...] }`. Script configs (`esbuild.config.mjs`,
/// `tsup.config.ts`, ...) are parsed and their default export is inspected.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExternalsManifest, ManifestError> {
  let path = path.as_ref();
  let filename = path.to_string_lossy().to_string();
  let ext = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or_default();

  log::debug!("load externals from {}", filename);

  if JSON_EXTENSIONS.contains(&ext) {
    let source = std::fs::read_to_string(path)?;
    json::parse_json(&source, &filename)
  } else if MODULE_EXTENSIONS.contains(&ext) {
    let source = std::fs::read_to_string(path)?;
    module::parse_module(source, &filename)
  } else {
    Err(ManifestError::UnsupportedConfig(filename))
  }
}
