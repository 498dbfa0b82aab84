use crate::types::ResolveIdResult;

#[derive(Default)]
pub struct PluginDriver {
  pub plugins: Vec<Box<dyn Plugin + Send + Sync>>,
}

impl PluginDriver {
  pub fn new() -> Self {
    Self {
      plugins: Default::default(),
    }
  }

  pub fn from_plugins(plugins: Vec<Box<dyn Plugin + Send + Sync>>) -> Self {
    Self { plugins }
  }

  pub fn push<P: Plugin + Send + Sync + 'static>(&mut self, plugin: P) -> &mut Self {
    self.plugins.push(Box::new(plugin));
    self
  }
}

// Align to https://rollupjs.org/guide/en/#build-hooks

impl PluginDriver {
  /// First plugin returning `Some` wins.
  #[inline]
  pub fn resolve_id(&self, source: &str, importer: Option<&str>) -> ResolveIdResult {
    self.plugins.iter().find_map(|plugin| {
      let result = plugin.resolve_id(source, importer);
      if let Some(resolved) = &result {
        log::debug!(
          "[{}] resolved {} to {:?}",
          plugin.get_name(),
          source,
          resolved
        );
      }
      result
    })
  }
}

pub trait Plugin {
  fn get_name(&self) -> &'static str;

  #[inline]
  fn resolve_id(&self, _source: &str, _importer: Option<&str>) -> ResolveIdResult {
    //  async, first
    None
  }
}
