use serde::Deserialize;
use serde_json::{json, Value};

use crate::manifest::{ExternalsManifest, ManifestError};

#[derive(Debug, Deserialize)]
struct RawConfig {
  // Untyped so a bad entry can be reported with its index.
  external: Option<Value>,
}

pub(crate) fn parse_json(source: &str, filename: &str) -> Result<ExternalsManifest, ManifestError> {
  let config: RawConfig = serde_json::from_str(source)?;
  let entries = match config.external {
    Some(Value::Array(entries)) => entries,
    _ => return Err(ManifestError::MissingExternalField(filename.to_owned())),
  };

  let entries = entries
    .into_iter()
    .enumerate()
    .map(|(index, value)| match value {
      Value::String(entry) if !entry.is_empty() => Ok(entry),
      Value::String(_) => Err(ManifestError::invalid_entry(index, "empty module name")),
      other => Err(ManifestError::invalid_entry(
        index,
        format!("expected a string, found {}", type_name(&other)),
      )),
    })
    .collect::<Result<Vec<_>, _>>()?;

  ExternalsManifest::new(entries)
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

pub fn from_json(source: &str) -> Result<ExternalsManifest, ManifestError> {
  parse_json(source, "<json>")
}

pub fn to_json(manifest: &ExternalsManifest) -> String {
  let config = json!({ "external": manifest.iter().collect::<Vec<_>>() });
  format!("{:#}\n", config)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ignores_other_options() {
    let manifest = from_json(
      r#"{ "entryPoints": ["src/index.ts"], "bundle": true, "external": ["zod", "cors"] }"#,
    )
    .unwrap();
    assert_eq!(manifest.iter().collect::<Vec<_>>(), vec!["zod", "cors"]);
  }

  #[test]
  fn reports_non_string_entry() {
    let err = from_json(r#"{ "external": ["zod", 42] }"#).unwrap_err();
    match err {
      ManifestError::InvalidManifestEntry { index, reason } => {
        assert_eq!(index, 1);
        assert_eq!(reason, "expected a string, found number");
      }
      other => panic!("unexpected error {:?}", other),
    }
  }

  #[test]
  fn reports_empty_entry() {
    let err = from_json(r#"{ "external": ["", "zod"] }"#).unwrap_err();
    assert!(matches!(
      err,
      ManifestError::InvalidManifestEntry { index: 0, .. }
    ));
  }

  #[test]
  fn requires_external_field() {
    let err = from_json(r#"{ "bundle": true }"#).unwrap_err();
    assert!(matches!(err, ManifestError::MissingExternalField(_)));

    let err = from_json(r#"{ "external": "zod" }"#).unwrap_err();
    assert!(matches!(err, ManifestError::MissingExternalField(_)));

    let err = from_json(r#"{ "external": null }"#).unwrap_err();
    assert!(matches!(err, ManifestError::MissingExternalField(_)));
  }

  #[test]
  fn rejects_malformed_json() {
    let err = from_json(r#"{ "external": ["zod" "#).unwrap_err();
    assert!(matches!(err, ManifestError::JsonError(_)));
  }

  #[test]
  fn renders_pretty_json() {
    let manifest = ExternalsManifest::new(["zod", "dotenv/config"]).unwrap();
    insta::assert_snapshot!(to_json(&manifest).trim_end(), @r###"
    {
      "external": [
        "zod",
        "dotenv/config"
      ]
    }
    "###);
  }
}
