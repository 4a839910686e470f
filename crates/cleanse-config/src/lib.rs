use anyhow::Context;
use cleanse_core::{Banner, DEFAULT_PLACEHOLDER, MissingPolicy, Redactor, Runner};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const PROJECT_FILE: &str = "cleanse.toml";

// ============================================================================
// Global Config (~/.config/cleanse/config.toml)
// ============================================================================

/// User-wide defaults for cleanse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub banner: Banner,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default)]
    pub missing: MissingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            banner: Banner::default(),
            placeholder: default_placeholder(),
            missing: MissingPolicy::default(),
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_root() -> String {
    "src".to_string()
}

fn default_targets() -> Vec<String> {
    vec![
        "anti_raid.ts".to_string(),
        "anti_scambot.ts".to_string(),
        "config.ts".to_string(),
        "hic_sunt_dracones.ts".to_string(),
        "link_blacklist.ts".to_string(),
        "message_purge.ts".to_string(),
        "pasta.ts".to_string(),
        "raidpurge.ts".to_string(),
        "test_module.ts".to_string(),
    ]
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing the defaults there if it is missing
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "cleanse", "cleanse") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.cleanse/config.toml")
        }
    }
}

// ============================================================================
// Project Config (cleanse.toml)
// ============================================================================

/// Project-level configuration (cleanse.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Files to redact, relative to `config.root`. Glob patterns are expanded.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// Overrides the global banner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,

    /// Overrides the global placeholder marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Overrides the global missing-file policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<MissingPolicy>,

    /// Project-level settings
    #[serde(default)]
    pub config: ProjectSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Directory the targets live in, relative to the project root
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            banner: None,
            placeholder: None,
            missing: None,
            config: ProjectSettings::default(),
        }
    }
}

impl ProjectConfig {
    /// Find and load cleanse.toml from current or parent directories
    pub fn find_and_load() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let current = std::env::current_dir()?;
        match Self::find_project_root_from(&current) {
            Some(path) => {
                let config = Self::load(&path)?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }

    /// Find cleanse.toml by walking up from given directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_FILE).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load cleanse.toml from project root
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let path = project_root.join(PROJECT_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save cleanse.toml to project root
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let path = project_root.join(PROJECT_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Directory the targets are joined onto
    pub fn target_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.config.root)
    }
}

// ============================================================================
// Resolved settings
// ============================================================================

/// Global config with project overrides applied
#[derive(Debug, Clone)]
pub struct Settings {
    pub banner: Banner,
    pub placeholder: String,
    pub missing: MissingPolicy,
}

impl Settings {
    pub fn resolve(global: &Config, project: Option<&ProjectConfig>) -> anyhow::Result<Self> {
        let settings = Self {
            banner: project
                .and_then(|p| p.banner.clone())
                .unwrap_or_else(|| global.banner.clone()),
            placeholder: project
                .and_then(|p| p.placeholder.clone())
                .unwrap_or_else(|| global.placeholder.clone()),
            missing: project.and_then(|p| p.missing).unwrap_or(global.missing),
        };

        if settings.placeholder.is_empty() {
            anyhow::bail!("placeholder marker must not be empty");
        }
        if settings.placeholder.contains('\n') {
            anyhow::bail!("placeholder marker must be a single line");
        }

        Ok(settings)
    }

    pub fn redactor(&self, dry_run: bool) -> Redactor {
        Redactor::new(self.banner.clone())
            .with_placeholder(self.placeholder.clone())
            .with_dry_run(dry_run)
    }

    pub fn runner(&self, dry_run: bool, policy: Option<MissingPolicy>) -> Runner {
        Runner::new(self.redactor(dry_run), policy.unwrap_or(self.missing))
    }
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Join each entry onto `dir`, expanding glob patterns in sorted order.
///
/// Literal entries are kept even when missing so the batch can report them.
pub fn resolve_targets(dir: &Path, entries: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut targets = Vec::new();

    for entry in entries {
        let joined = dir.join(entry);

        if !is_glob(entry) {
            targets.push(joined);
            continue;
        }

        let pattern = joined.to_string_lossy();
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid glob pattern: {}", entry))?
            .filter_map(|m| m.ok())
            .filter(|p| p.is_file())
            .collect();
        matches.sort();

        if matches.is_empty() {
            warn!(pattern = %pattern, "glob matched no files");
        }
        targets.extend(matches);
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.banner, Banner::default());
        assert_eq!(config.placeholder, "/**/");
        assert_eq!(config.missing, MissingPolicy::Skip);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.banner, config.banner);
        assert_eq!(parsed.missing, config.missing);
    }

    #[test]
    fn test_load_from_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.placeholder, "/**/");
    }

    #[test]
    fn test_empty_banner_rejected() {
        let result: Result<Config, _> = toml::from_str("banner = []");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_targets() {
        let project = ProjectConfig::default();
        assert_eq!(project.targets.len(), 9);
        assert!(project.targets.contains(&"message_purge.ts".to_string()));
        assert!(project.targets.contains(&"pasta.ts".to_string()));
        assert_eq!(project.config.root, "src");
    }

    #[test]
    fn test_project_config_parse() {
        let toml_str = r#"
targets = ["anti_raid.ts", "modules/*.ts"]
placeholder = "//"
missing = "fail-fast"
banner = ["// removed from the public mirror"]

[config]
root = "lib"
"#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.targets, vec!["anti_raid.ts", "modules/*.ts"]);
        assert_eq!(config.placeholder.as_deref(), Some("//"));
        assert_eq!(config.missing, Some(MissingPolicy::FailFast));
        assert_eq!(config.banner.as_ref().map(Banner::len), Some(1));
        assert_eq!(config.config.root, "lib");
    }

    #[test]
    fn test_project_save_and_find() {
        let dir = tempfile::tempdir().unwrap();
        ProjectConfig::default().save(dir.path()).unwrap();

        let nested = dir.path().join("src").join("components");
        std::fs::create_dir_all(&nested).unwrap();

        let root = ProjectConfig::find_project_root_from(&nested).unwrap();
        assert_eq!(root, dir.path());

        let loaded = ProjectConfig::load(&root).unwrap();
        assert_eq!(loaded.targets, ProjectConfig::default().targets);
    }

    #[test]
    fn test_settings_overrides() {
        let global = Config::default();
        let project = ProjectConfig {
            placeholder: Some("#".to_string()),
            missing: Some(MissingPolicy::FailFast),
            ..ProjectConfig::default()
        };

        let settings = Settings::resolve(&global, Some(&project)).unwrap();
        assert_eq!(settings.placeholder, "#");
        assert_eq!(settings.missing, MissingPolicy::FailFast);
        assert_eq!(settings.banner, global.banner);

        let runner = settings.runner(false, Some(MissingPolicy::Skip));
        assert_eq!(runner.policy(), MissingPolicy::Skip);
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let global = Config {
            placeholder: String::new(),
            ..Config::default()
        };
        assert!(Settings::resolve(&global, None).is_err());
    }

    #[test]
    fn test_resolve_targets() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("modules")).unwrap();
        std::fs::write(src.join("modules").join("b.ts"), "b\n").unwrap();
        std::fs::write(src.join("modules").join("a.ts"), "a\n").unwrap();
        std::fs::write(src.join("modules").join("notes.md"), "n\n").unwrap();

        let entries = vec![
            "anti_raid.ts".to_string(),
            "modules/*.ts".to_string(),
            "gone/*.ts".to_string(),
        ];
        let targets = resolve_targets(&src, &entries).unwrap();

        assert_eq!(
            targets,
            vec![
                src.join("anti_raid.ts"),
                src.join("modules").join("a.ts"),
                src.join("modules").join("b.ts"),
            ]
        );
    }

    #[test]
    fn test_relative_target_dir() {
        let project = ProjectConfig::default();
        assert_eq!(
            project.target_dir(Path::new("")).join("pasta.ts"),
            PathBuf::from("src/pasta.ts")
        );
    }
}
