use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use wordtape_config::Config;
use wordtape_print::PrintTemplate;

/// Load the JSON profile at `path`, defaults when it doesn't exist
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::info!("No profile at {}, using defaults", path.display());
        return Ok(Config::new());
    }

    tracing::info!("Loading profile {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut config: Config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    config.apply_env();
    Ok(config)
}

/// Write the default profile and print template if they are missing
pub fn init_profile(path: &Path) -> anyhow::Result<Config> {
    let config = if path.exists() {
        tracing::info!("Profile {} already exists", path.display());
        load_profile(path)?
    } else {
        let config = Config::new();
        write_parent(path)?;
        fs::write(path, serde_json::to_string_pretty(&config)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created profile {}", path.display());
        config
    };

    let template = &config.paths.template;
    if !template.exists() {
        write_parent(template)?;
        fs::write(template, format!("{}\n", PrintTemplate::default_tape().row))
            .with_context(|| format!("Failed to write {}", template.display()))?;
        tracing::info!("Created print template {}", template.display());
    }

    Ok(config)
}

fn write_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
