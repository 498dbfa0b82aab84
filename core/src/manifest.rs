use std::collections::HashSet;
use std::fmt;
use std::io;

use ahash::RandomState;
use rayon::prelude::*;
use smol_str::SmolStr;
use thiserror::Error;

use crate::types::IsExternal;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("Invalid manifest entry at index {index}: {reason}")]
  InvalidManifestEntry { index: usize, reason: String },
  #[error("Config [{0}] doesn't declare an `external` array")]
  MissingExternalField(String),
  #[error("Parse config [{0}] failed")]
  ParseConfigError(String),
  #[error("Unsupported config file [{0}], expected .json, .js, .mjs, .cjs, .ts, .mts or .cts")]
  UnsupportedConfig(String),
  #[error("Externals manifest is already installed for this process")]
  AlreadyInstalled,
  #[error("{0}")]
  IoError(io::Error),
  #[error("{0}")]
  JsonError(serde_json::Error),
}

impl From<io::Error> for ManifestError {
  fn from(err: io::Error) -> Self {
    Self::IoError(err)
  }
}

impl From<serde_json::Error> for ManifestError {
  fn from(err: serde_json::Error) -> Self {
    Self::JsonError(err)
  }
}

impl ManifestError {
  pub(crate) fn invalid_entry(index: usize, reason: impl Into<String>) -> Self {
    Self::InvalidManifestEntry {
      index,
      reason: reason.into(),
    }
  }
}

/// Module names a bundler must leave as runtime imports.
///
/// Entries keep their declaration order and multiplicity. Lookups are exact
/// string matches: `dotenv` does not cover `dotenv/config`, and `node:fs` is a
/// different name from `fs`.
#[derive(Clone)]
pub struct ExternalsManifest {
  entries: Vec<SmolStr>,
  members: HashSet<SmolStr, RandomState>,
}

impl ExternalsManifest {
  pub fn new<I, S>(entries: I) -> Result<Self, ManifestError>
  where
    I: IntoIterator<Item = S>,
    S: Into<SmolStr>,
  {
    let entries = entries.into_iter().map(Into::into).collect::<Vec<SmolStr>>();
    let mut members = HashSet::with_capacity_and_hasher(entries.len(), RandomState::new());

    for (index, entry) in entries.iter().enumerate() {
      if entry.is_empty() {
        return Err(ManifestError::invalid_entry(index, "empty module name"));
      }
      if !members.insert(entry.clone()) {
        log::warn!("duplicated external {:?} at index {}", entry, index);
      }
    }

    log::debug!("externals manifest with {} entries", entries.len());
    Ok(Self { entries, members })
  }

  #[inline]
  pub fn entries(&self) -> &[SmolStr] {
    &self.entries
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(SmolStr::as_str)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[inline]
  pub fn contains(&self, source: &str) -> bool {
    self.members.contains(source)
  }

  pub fn count(&self, source: &str) -> usize {
    self.entries.iter().filter(|entry| entry.as_str() == source).count()
  }

  /// Same shape as rollup's `external` callback: `(source, importer, is_resolved)`.
  /// Only `source` takes part in the decision.
  #[inline]
  pub fn is_external(&self, source: &str, _importer: Option<&str>, _is_resolved: bool) -> bool {
    self.contains(source)
  }

  pub fn into_is_external(self) -> IsExternal {
    Box::new(move |source: &str, importer: Option<&str>, is_resolved: bool| {
      self.is_external(source, importer, is_resolved)
    })
  }

  /// Splits import specifiers into `(external, bundled)`, both in input order.
  pub fn partition<'a, S>(&self, sources: &'a [S]) -> (Vec<&'a str>, Vec<&'a str>)
  where
    S: AsRef<str> + Sync,
  {
    let marked = sources
      .par_iter()
      .map(|source| (source.as_ref(), self.contains(source.as_ref())))
      .collect::<Vec<_>>();

    let mut external = vec![];
    let mut bundled = vec![];
    marked.into_iter().for_each(|(source, is_external)| {
      if is_external {
        external.push(source);
      } else {
        bundled.push(source);
      }
    });
    (external, bundled)
  }
}

impl PartialEq for ExternalsManifest {
  fn eq(&self, other: &Self) -> bool {
    self.entries == other.entries
  }
}

impl Eq for ExternalsManifest {}

impl fmt::Debug for ExternalsManifest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl fmt::Display for ExternalsManifest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.entries.iter().try_for_each(|entry| writeln!(f, "{}", entry))
  }
}

impl<'a> IntoIterator for &'a ExternalsManifest {
  type Item = &'a SmolStr;
  type IntoIter = std::slice::Iter<'a, SmolStr>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}
