use std::fs;

use rolldown_externals::{
  get_externals, install_externals, load_externals, ExternalsManifest, ManifestError,
};

// One test: the process manifest can be fixed once only.
#[test]
fn installs_once() {
  let dir = tempfile::tempdir().unwrap();

  let broken = dir.path().join("broken.json");
  fs::write(&broken, r#"{ "external": ["zod", ""] }"#).unwrap();
  let err = load_externals(&broken).unwrap_err();
  assert!(matches!(
    err,
    ManifestError::InvalidManifestEntry { index: 1, .. }
  ));

  let config = dir.path().join("esbuild.config.mjs");
  fs::write(
    &config,
    "export default {\n  external: ['@modelcontextprotocol/sdk', 'zod', 'zod'],\n};\n",
  )
  .unwrap();
  let installed = load_externals(&config).unwrap();
  assert_eq!(installed.count("zod"), 2);
  assert_eq!(
    get_externals()
      .iter()
      .map(|entry| entry.as_str())
      .collect::<Vec<_>>(),
    vec!["@modelcontextprotocol/sdk", "zod", "zod"]
  );
  assert!(!installed.contains("dotenv"));

  let again = install_externals(ExternalsManifest::new(["react"]).unwrap());
  assert!(matches!(again, Err(ManifestError::AlreadyInstalled)));
  assert!(!get_externals().iter().any(|entry| entry.as_str() == "react"));
}
