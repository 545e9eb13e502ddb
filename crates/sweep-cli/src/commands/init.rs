//! Scaffold a starter sweep.toml.

use std::path::Path;

use sweep_engine::SweepConfig;

pub fn init(path: &str, base_name: &str) -> anyhow::Result<()> {
    let target = Path::new(path).join("sweep.toml");
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }
    let config = SweepConfig::scaffold(base_name);
    std::fs::write(&target, config.to_toml_string()?)?;
    println!("wrote {}", target.display());
    Ok(())
}
