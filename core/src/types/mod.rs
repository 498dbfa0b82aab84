use smol_str::SmolStr;

// (source: &str, importer: Option<&str>, is_resolved: bool)
pub type IsExternal = Box<dyn Fn(&str, Option<&str>, bool) -> bool + Send + Sync>;

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResolvedId {
  pub id: SmolStr,
  pub external: bool,
}

impl ResolvedId {
  pub fn new(id: impl Into<SmolStr>, external: bool) -> Self {
    Self {
      id: id.into(),
      external,
    }
  }
}

pub type ResolveIdResult = Option<ResolvedId>;
