pub mod completions;
pub mod init;
pub mod list;
pub mod run;

use anyhow::Result;
use cleanse_config::{Config, ProjectConfig, Settings, resolve_targets};
use std::path::{Path, PathBuf};

use crate::cli::TargetArgs;

/// Load settings and resolve the target list for a command
pub fn load_targets(args: &TargetArgs) -> Result<(Settings, Vec<PathBuf>)> {
    let global = Config::load()?;
    let project = ProjectConfig::find_and_load()?;
    let settings = Settings::resolve(&global, project.as_ref().map(|(_, p)| p))?;
    let current = std::env::current_dir()?;

    let targets = select_targets(args, project, &current)?;
    Ok((settings, targets))
}

/// Explicit FILES win over configured targets; configured targets are joined
/// onto the project's target directory.
fn select_targets(
    args: &TargetArgs,
    project: Option<(PathBuf, ProjectConfig)>,
    current: &Path,
) -> Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        let dir = args.root.clone().unwrap_or_default();
        return resolve_targets(&dir, &args.files);
    }

    let (base, project) = match project {
        Some((root, project)) => (display_base(&root, current), project),
        None => (PathBuf::new(), ProjectConfig::default()),
    };
    let dir = args
        .root
        .clone()
        .unwrap_or_else(|| project.target_dir(&base));

    resolve_targets(&dir, &project.targets)
}

/// Keep paths relative when the project root is the working directory
fn display_base(project_root: &Path, current: &Path) -> PathBuf {
    if current == project_root {
        PathBuf::new()
    } else {
        project_root.to_path_buf()
    }
}
