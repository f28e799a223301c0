//! Per-language build/run policy.

pub mod cpp;
pub mod java;
pub mod python;

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr as _;

use serde::{Deserialize, Serialize};

use crate::config::Toolchain;
use crate::workspace::Workspace;

pub use self::{cpp::CppAdapter, java::JavaAdapter, python::PythonAdapter};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[strum(to_string = "cpp", serialize = "c++", serialize = "cxx", serialize = "cc")]
    Cpp,

    #[strum(to_string = "python", serialize = "py", serialize = "python3")]
    Python,

    #[strum(to_string = "java")]
    Java,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub fn parse(tag: &str) -> Result<Self, UnsupportedLanguage> {
        Self::from_str(&tag.trim().to_ascii_lowercase())
            .map_err(|_| UnsupportedLanguage(tag.to_owned()))
    }

    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    pub fn adapter(self) -> &'static dyn LanguageAdapter {
        use Language::*;
        match self {
            Cpp => &CppAdapter,
            Python => &PythonAdapter,
            Java => &JavaAdapter,
        }
    }
}

/// An argv to be spawned directly, without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Language-specific part of a compile/run attempt.
///
/// Every attempt owns a fresh [`Workspace`], so adapters can use fixed file
/// names inside it without racing concurrent attempts.
pub trait LanguageAdapter: Send + Sync {
    fn language(&self) -> Language;

    fn source_filename(&self) -> &'static str;

    /// Rewrites the submitted code before it is written. Defaults to verbatim.
    fn preprocess<'c>(&self, code: &'c str) -> Cow<'c, str> {
        Cow::Borrowed(code)
    }

    fn compile_command(&self, ws: &Workspace, toolchain: &Toolchain) -> Option<CommandLine>;

    fn run_command(&self, ws: &Workspace, toolchain: &Toolchain) -> CommandLine;

    fn materialize(&self, ws: &Workspace, code: &str) -> fsutil::Result<PathBuf> {
        let path = ws.file(self.source_filename());
        fsutil::write(&path, self.preprocess(code).as_bytes())?;
        Ok(path)
    }
}
