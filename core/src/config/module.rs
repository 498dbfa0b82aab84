use serde_json::Value;
use swc_common::{sync::Lrc, SourceMap};
use swc_ecma_ast::{
  ArrayLit, Decl, Expr, ExprOrSpread, Lit, Module, ModuleDecl, ModuleItem, ObjectLit, Pat, Prop,
  PropName, PropOrSpread, Stmt,
};

use crate::manifest::{ExternalsManifest, ManifestError};
use crate::utils::parse_file;

// `const a = b; const b = a;` must not loop.
const MAX_BINDING_DEPTH: usize = 8;

pub(crate) fn parse_module(
  source: String,
  filename: &str,
) -> Result<ExternalsManifest, ManifestError> {
  let src_map: Lrc<SourceMap> = Default::default();
  let module = parse_file(source, filename, &src_map)
    .map_err(|_| ManifestError::ParseConfigError(filename.to_owned()))?;

  let finder = ConfigFinder { module: &module };
  let external = module
    .body
    .iter()
    .filter_map(|item| finder.config_object(item))
    .find_map(external_array)
    .ok_or_else(|| ManifestError::MissingExternalField(filename.to_owned()))?;

  let entries = external
    .elems
    .iter()
    .enumerate()
    .map(|(index, elem)| entry(index, elem.as_ref()))
    .collect::<Result<Vec<_>, _>>()?;

  log::debug!("{} declares {} externals", filename, entries.len());
  ExternalsManifest::new(entries)
}

struct ConfigFinder<'a> {
  module: &'a Module,
}

impl<'a> ConfigFinder<'a> {
  /// `export default {..}` or an assignment such as `module.exports = {..}`.
  fn config_object(&self, item: &'a ModuleItem) -> Option<&'a ObjectLit> {
    match item {
      ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
        self.as_object(&export.expr, 0)
      }
      ModuleItem::Stmt(Stmt::Expr(stmt)) => match stmt.expr.as_ref() {
        Expr::Assign(assign) => self.as_object(&assign.right, 0),
        _ => None,
      },
      _ => None,
    }
  }

  fn as_object(&self, expr: &'a Expr, depth: usize) -> Option<&'a ObjectLit> {
    if depth > MAX_BINDING_DEPTH {
      return None;
    }
    match expr {
      Expr::Object(object) => Some(object),
      Expr::Paren(paren) => self.as_object(&paren.expr, depth),
      Expr::TsAs(ts_as) => self.as_object(&ts_as.expr, depth),
      // defineConfig({ .. })
      Expr::Call(call) => call
        .args
        .first()
        .filter(|arg| arg.spread.is_none())
        .and_then(|arg| self.as_object(&arg.expr, depth)),
      Expr::Ident(ident) => self
        .binding(&ident.sym)
        .and_then(|init| self.as_object(init, depth + 1)),
      _ => None,
    }
  }

  /// Initializer of a top level `const|let|var <name> = ..`.
  fn binding(&self, name: &str) -> Option<&'a Expr> {
    self.module.body.iter().find_map(|item| {
      let var = match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
          Decl::Var(var) => var,
          _ => return None,
        },
        _ => return None,
      };
      var.decls.iter().find_map(|decl| match &decl.name {
        Pat::Ident(binding) if &*binding.id.sym == name => decl.init.as_deref(),
        _ => None,
      })
    })
  }
}

fn external_array(config: &ObjectLit) -> Option<&ArrayLit> {
  config.props.iter().find_map(|prop| match prop {
    PropOrSpread::Prop(prop) => match prop.as_ref() {
      Prop::KeyValue(kv) if is_external_key(&kv.key) => as_array(&kv.value),
      _ => None,
    },
    PropOrSpread::Spread(_) => None,
  })
}

fn is_external_key(key: &PropName) -> bool {
  match key {
    PropName::Ident(ident) => &*ident.sym == "external",
    PropName::Str(s) => &*s.value == "external",
    _ => false,
  }
}

fn as_array(expr: &Expr) -> Option<&ArrayLit> {
  match expr {
    Expr::Array(array) => Some(array),
    Expr::Paren(paren) => as_array(&paren.expr),
    // `[..] as const`
    Expr::TsConstAssertion(assertion) => as_array(&assertion.expr),
    Expr::TsAs(ts_as) => as_array(&ts_as.expr),
    _ => None,
  }
}

fn entry(index: usize, elem: Option<&ExprOrSpread>) -> Result<String, ManifestError> {
  let elem = elem.ok_or_else(|| ManifestError::invalid_entry(index, "array hole"))?;
  if elem.spread.is_some() {
    return Err(ManifestError::invalid_entry(index, "spread element"));
  }
  match elem.expr.as_ref() {
    Expr::Lit(Lit::Str(s)) if s.value.is_empty() => {
      Err(ManifestError::invalid_entry(index, "empty module name"))
    }
    Expr::Lit(Lit::Str(s)) => Ok(s.value.to_string()),
    Expr::Tpl(_) => Err(ManifestError::invalid_entry(
      index,
      "template literal, expected a string literal",
    )),
    _ => Err(ManifestError::invalid_entry(
      index,
      "expected a string literal",
    )),
  }
}

pub fn from_module(source: &str, filename: &str) -> Result<ExternalsManifest, ManifestError> {
  parse_module(source.to_owned(), filename)
}

/// Renders `export default { external: [..] }`. Entries are written as JSON strings,
/// which are valid JS string literals.
pub fn to_module(manifest: &ExternalsManifest) -> String {
  let mut code = String::from("export default {\n  external: [\n");
  manifest.iter().for_each(|entry| {
    code.push_str("    ");
    code.push_str(&Value::from(entry).to_string());
    code.push_str(",\n");
  });
  code.push_str("  ],\n};\n");
  code
}
