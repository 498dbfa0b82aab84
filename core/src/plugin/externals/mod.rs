use std::borrow::Cow;

use crate::externals::externals;
use crate::manifest::ExternalsManifest;
use crate::plugin_driver::Plugin;
use crate::types::{ResolveIdResult, ResolvedId};

pub struct Externals {
  manifest: Cow<'static, ExternalsManifest>,
}

/// Marks every import listed in `manifest` as external.
///
/// # Example
/// ```no_run
/// use rolldown_externals::{plugin, ExternalsManifest, PluginDriver};
///
/// let manifest = ExternalsManifest::new(["zod", "express"]).unwrap();
/// let mut driver = PluginDriver::new();
/// driver.push(plugin::externals::new(manifest));
/// assert!(driver.resolve_id("zod", Some("/src/index.ts")).unwrap().external);
/// ```
pub fn new(manifest: ExternalsManifest) -> Externals {
  Externals {
    manifest: Cow::Owned(manifest),
  }
}

impl Externals {
  /// Uses the process manifest, see [`crate::externals()`].
  pub fn from_process() -> Self {
    Externals {
      manifest: Cow::Borrowed(externals()),
    }
  }

  pub fn manifest(&self) -> &ExternalsManifest {
    &self.manifest
  }
}

impl Plugin for Externals {
  fn get_name(&self) -> &'static str {
    "rolldown:externals"
  }

  fn resolve_id(&self, source: &str, _importer: Option<&str>) -> ResolveIdResult {
    self
      .manifest
      .contains(source)
      .then(|| ResolvedId::new(source, true))
  }
}
