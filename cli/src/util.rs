use std::{
    path::{Path, PathBuf},
    process::exit,
    time::Duration,
};

use grader_core::Config;
use indicatif::{ProgressBar, ProgressStyle};

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn load_config() -> anyhow::Result<Config> {
    let cfg = Config::from_file_finding_in_ancestors(self::current_dir())?;
    log::debug!("Loaded config: {:?}", cfg.source_config_file);
    Ok(cfg)
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// A ticking spinner on stderr. Call `finish_and_clear` when done.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(msg.into());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn homedir_becomes_tilde() {
        let Some(home) = ::dirs::home_dir() else {
            return
        };
        assert_eq!(
            replace_homedir_to_tilde(home.join("work/grader.toml")),
            Path::new("~/work/grader.toml")
        );
        assert_eq!(
            replace_homedir_to_tilde("/elsewhere/x"),
            Path::new("/elsewhere/x")
        );
    }
}
