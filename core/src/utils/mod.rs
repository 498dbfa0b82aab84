use std::path::Path;

use swc_common::sync::Lrc;
use swc_common::{
  errors::{ColorConfig, Handler},
  FileName, SourceMap,
};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{lexer::Lexer, EsConfig, Parser, StringInput, Syntax, TsConfig};

pub fn is_typescript(filename: &str) -> bool {
  matches!(
    Path::new(filename).extension().and_then(|ext| ext.to_str()),
    Some("ts" | "mts" | "cts")
  )
}

/// Parses a config module. Diagnostics go to the terminal, the caller only learns
/// that parsing failed.
pub fn parse_file(
  source_code: String,
  filename: &str,
  src_map: &Lrc<SourceMap>,
) -> Result<swc_ecma_ast::Module, ()> {
  let handler = Handler::with_tty_emitter(ColorConfig::Auto, true, false, Some(src_map.clone()));
  let fm = src_map.new_source_file(FileName::Custom(filename.to_owned()), source_code);
  let syntax = if is_typescript(filename) {
    Syntax::Typescript(TsConfig {
      decorators: true,
      // import assertions are always enabled for TypeScript in swc_ecma_parser 0.93
      ..Default::default()
    })
  } else {
    Syntax::Es(EsConfig {
      decorators: true,
      import_assertions: true,
      ..Default::default()
    })
  };

  let lexer = Lexer::new(
    syntax,
    EsVersion::latest(),
    StringInput::from(&*fm),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let module = parser.parse_module();

  parser.take_errors().into_iter().for_each(|e| {
    e.into_diagnostic(&handler).emit();
  });
  module.map_err(|e| e.into_diagnostic(&handler).emit())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_typescript_configs() {
    assert!(is_typescript("tsup.config.ts"));
    assert!(is_typescript("esbuild.config.mts"));
    assert!(!is_typescript("esbuild.config.mjs"));
    assert!(!is_typescript("externals.json"));
  }
}
