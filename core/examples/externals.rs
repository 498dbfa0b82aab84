use std::env;

use rolldown_externals::{get_externals, load_externals, plugin, PluginDriver};

fn main() -> anyhow::Result<()> {
  env_logger::init();

  if let Some(config) = env::args().nth(1) {
    let manifest = load_externals(&config)?;
    log::info!("loaded {} externals from {}", manifest.len(), config);
  }

  println!("external:");
  get_externals()
    .iter()
    .for_each(|entry| println!("  {}", entry));

  let mut driver = PluginDriver::new();
  driver.push(plugin::externals::Externals::from_process());
  for source in env::args().skip(2) {
    match driver.resolve_id(&source, None) {
      Some(resolved) => println!("{} -> external", resolved.id),
      None => println!("{} -> bundled", source),
    }
  }
  Ok(())
}
