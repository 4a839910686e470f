use anyhow::Result;
use cleanse_config::{PROJECT_FILE, ProjectConfig};
use tracing::debug;

pub fn handle() -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config_path = current_dir.join(PROJECT_FILE);

    if config_path.exists() {
        anyhow::bail!("{} already exists in current directory", PROJECT_FILE);
    }

    let project_config = ProjectConfig::default();
    project_config.save(&current_dir)?;
    debug!(path = %config_path.display(), "Wrote project config");

    println!("✓ Created {}", PROJECT_FILE);
    println!(
        "  {} target(s) under {}/",
        project_config.targets.len(),
        project_config.config.root
    );

    Ok(())
}
