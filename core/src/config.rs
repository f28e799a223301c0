use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::testing::runner::RunnerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub toolchain: Toolchain,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    pub problems_dir: PathBuf,
    pub submissions_dir: PathBuf,
    pub workspace_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub compile_timeout_ms: u64,
    pub run_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            compile_timeout_ms: RunnerConfig::DEFAULT_COMPILE_TIME_LIMIT.as_millis() as u64,
            run_timeout_ms: RunnerConfig::DEFAULT_EXEC_TIME_LIMIT.as_millis() as u64,
        }
    }
}

/// Host programs used to build and launch submissions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub cxx: PathBuf,
    pub cxx_std: String,
    pub python: PathBuf,
    pub javac: PathBuf,
    pub java: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cxx: "g++".into(),
            cxx_std: "c++17".to_owned(),
            python: "python3".into(),
            javac: "javac".into(),
            java: "java".into(),
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "grader.toml";

    pub fn example_toml() -> anyhow::Result<String> {
        let file = Asset::get(Self::FILENAME).context("Example config is not embedded")?;
        let s = std::str::from_utf8(file.data.as_ref()).context("Example config is not UTF-8")?;
        Ok(s.to_owned())
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        if let Some(dir) = filepath.parent() {
            cfg.storage = cfg.storage.relative_to(dir);
        }
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| {
                format!(
                    "Not in a grader directory: Cannot find '{}'",
                    Self::FILENAME
                )
            })
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            workspace_root: self.storage.workspace_root.clone(),
            compile_timeout: Duration::from_millis(self.limits.compile_timeout_ms),
            run_timeout: Duration::from_millis(self.limits.run_timeout_ms),
            toolchain: self.toolchain.clone(),
        }
    }
}

fn strip_prefix_dot(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

impl StorageConfig {
    fn relative_to(self, base_dir: &Path) -> Self {
        let with_base = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(strip_prefix_dot(&path))
            }
        };
        Self {
            problems_dir: with_base(self.problems_dir),
            submissions_dir: with_base(self.submissions_dir),
            workspace_root: with_base(self.workspace_root),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml().unwrap();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            storage,
            limits,
            toolchain,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(storage.problems_dir, Path::new("./problems"));
        assert_eq!(storage.submissions_dir, Path::new("./submissions"));
        assert_eq!(storage.workspace_root, Path::new("./.grader-tmp"));

        assert_eq!(limits.compile_timeout_ms, 10_000);
        assert_eq!(limits.run_timeout_ms, 5_000);

        assert_eq!(toolchain, Toolchain::default());
    }

    #[test]
    fn limits_and_toolchain_are_optional() {
        let cfg = Config::from_toml(
            r#"
            [storage]
            problems_dir = "p"
            submissions_dir = "s"
            workspace_root = "/tmp/ws"

            [toolchain]
            python = "/usr/bin/pypy3"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.limits, LimitsConfig::default());
        assert_eq!(cfg.toolchain.python, Path::new("/usr/bin/pypy3"));
        assert_eq!(cfg.toolchain.cxx, Path::new("g++"));

        let runner = cfg.runner_config();
        assert_eq!(runner.compile_timeout, Duration::from_secs(10));
        assert_eq!(runner.run_timeout, Duration::from_secs(5));
    }

    #[test]
    fn relative_storage_paths_are_resolved_against_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILENAME);
        fsutil::write(&path, Config::example_toml().unwrap()).unwrap();

        let cfg = Config::from_toml_file(path.clone()).unwrap();
        assert_eq!(cfg.source_config_file, Some(path));
        assert_eq!(cfg.storage.problems_dir, tmp.path().join("problems"));
        assert_eq!(cfg.storage.workspace_root, tmp.path().join(".grader-tmp"));
    }
}
