pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;

use error::*;
use serde::Serialize;

use crate::config::Config;
use crate::judge::{Judge, SubmissionReport};
use crate::lang::Language;
use crate::storage::{Problem, ProblemId, ProblemStore};
use crate::testing::{ExecutionOutcome, Executor, ProcessRunner};

/// Writes the example `grader.toml` into `dir` and creates the storage dirs it names.
pub fn init_repository(dir: impl AsRef<Path>) -> Result<Config> {
    let dir = dir.as_ref();
    let config_file = dir.join(Config::FILENAME);
    ensure!(
        !config_file.exists(),
        "Already initialized: '{}' exists",
        config_file.to_string_lossy()
    );

    let toml = Config::example_toml()?;
    fsutil::write_with_mkdir(&config_file, toml).context("Failed to write config file")?;

    let cfg = Config::from_toml_file(config_file)?;
    fsutil::mkdir_all(&cfg.storage.problems_dir)?;
    fsutil::mkdir_all(&cfg.storage.submissions_dir)?;
    Ok(cfg)
}

/// The explicit tag if given, otherwise the language implied by the file extension.
pub fn resolve_language_tag(file: impl AsRef<Path>, explicit: Option<&str>) -> Result<String> {
    if let Some(tag) = explicit {
        return Ok(tag.to_owned());
    }
    let file = file.as_ref();
    Language::from_extension(file)
        .map(|lang| lang.to_string())
        .with_context(|| {
            format!(
                "Cannot infer language from '{}'. Specify it with --lang",
                file.to_string_lossy()
            )
        })
}

fn read_source(file: &Path) -> Result<String> {
    fsutil::read_to_string(file)
        .with_context(|| format!("Failed to read source file '{}'", file.to_string_lossy()))
}

pub async fn grade_file<E: Executor>(
    judge: &Judge<E>,
    problem_id: &str,
    file: impl AsRef<Path>,
    language: Option<&str>,
) -> Result<SubmissionReport> {
    let file = file.as_ref();
    let tag = resolve_language_tag(file, language)?;
    let code = read_source(file)?;
    judge
        .grade(problem_id, &tag, &code)
        .await
        .with_context(|| format!("Failed to grade {}", file.to_string_lossy()))
}

/// Runs a source file once against custom stdin, without grading.
pub async fn run_file(
    runner: &ProcessRunner,
    file: impl AsRef<Path>,
    language: Option<&str>,
    stdin_file: Option<&Path>,
) -> Result<ExecutionOutcome> {
    let file = file.as_ref();
    let tag = resolve_language_tag(file, language)?;
    let code = read_source(file)?;
    let stdin = match stdin_file {
        Some(path) => fsutil::read_to_string(path).context("Failed to read input file")?,
        None => String::new(),
    };
    Ok(runner.execute_tag(&tag, &code, &stdin).await)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSummary {
    pub id: ProblemId,
    pub group: String,
    pub title: String,
    pub solved: bool,
}

pub fn list_problems<E: Executor>(judge: &Judge<E>) -> Result<Vec<ProblemSummary>> {
    let entries = judge
        .problems()
        .list()
        .context("Failed to list problems")?;

    entries
        .into_iter()
        .map(|entry| {
            let solved = judge
                .submissions()
                .has_accepted(&entry.id)
                .with_context(|| format!("Failed to read submissions of {}", entry.id))?;
            Ok(ProblemSummary {
                group: entry.id.group().to_owned(),
                id: entry.id,
                title: entry.title,
                solved,
            })
        })
        .collect()
}

pub fn show_problem(store: &ProblemStore, problem_id: &str) -> Result<Problem> {
    Ok(store.get(problem_id)?)
}

pub fn list_submissions<E: Executor>(
    judge: &Judge<E>,
    problem_id: &str,
) -> Result<Vec<SubmissionReport>> {
    let id: ProblemId = problem_id.parse()?;
    judge
        .submissions()
        .list(&id)
        .with_context(|| format!("Failed to list submissions of {}", id))
}
