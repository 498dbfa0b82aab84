use std::path::Path;

use once_cell::sync::OnceCell;
use smol_str::SmolStr;

use crate::config::load_config;
use crate::manifest::{ExternalsManifest, ManifestError};
use crate::types::IsExternal;

/// Packages the server bundle keeps as runtime `import`s.
pub const DEFAULT_EXTERNALS: &[&str] = &[
  "@modelcontextprotocol/sdk",
  "@modelcontextprotocol/sdk/server/mcp.js",
  "@modelcontextprotocol/sdk/server/stdio.js",
  "@smithery/sdk",
  "@smithery/sdk/server/stateful.js",
  "@smithery/sdk/server/stateless.js",
  "chalk",
  "cors",
  "dotenv",
  "dotenv/config",
  "express",
  "googleapis",
  "mongodb",
  "youtube-caption-extractor",
  "zod",
];

static EXTERNALS: OnceCell<ExternalsManifest> = OnceCell::new();

pub fn default_externals() -> ExternalsManifest {
  ExternalsManifest::new(DEFAULT_EXTERNALS.iter().copied())
    .expect("built-in externals contain an empty entry")
}

/// The manifest of this process. The first read fixes it: an installed manifest if
/// [`install_externals`] ran before, the built-in one otherwise.
pub fn externals() -> &'static ExternalsManifest {
  EXTERNALS.get_or_init(default_externals)
}

#[inline]
pub fn get_externals() -> &'static [SmolStr] {
  externals().entries()
}

/// The process manifest as a rollup style `external` callback.
pub fn is_external() -> IsExternal {
  Box::new(|source: &str, importer: Option<&str>, is_resolved: bool| {
    externals().is_external(source, importer, is_resolved)
  })
}

pub fn install_externals(
  manifest: ExternalsManifest,
) -> Result<&'static ExternalsManifest, ManifestError> {
  EXTERNALS
    .set(manifest)
    .map_err(|_| ManifestError::AlreadyInstalled)?;
  log::debug!("installed externals manifest");
  Ok(externals())
}

/// Loads `path` and installs it as the process manifest. Nothing is installed when
/// the config is malformed.
pub fn load_externals<P: AsRef<Path>>(
  path: P,
) -> Result<&'static ExternalsManifest, ManifestError> {
  let manifest = load_config(path)?;
  install_externals(manifest)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn built_in_entries_are_valid() {
    let manifest = default_externals();
    assert_eq!(manifest.len(), DEFAULT_EXTERNALS.len());
    assert!(manifest.iter().all(|entry| !entry.is_empty()));
    assert!(manifest.contains("dotenv"));
    assert!(manifest.contains("dotenv/config"));
    assert!(!manifest.contains("react"));
  }
}
