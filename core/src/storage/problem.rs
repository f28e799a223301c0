use std::path::{Path, PathBuf};

use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::Serialize;

use super::ProblemId;
use crate::error::{GradeError, Result};
use crate::testing::{parse_corpus, TestCase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    pub editorial: String,
    #[serde(skip)]
    pub raw_input: String,
    #[serde(skip)]
    pub raw_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemEntry {
    pub id: ProblemId,
    pub title: String,
}

/// Flat-file problem collection rooted at `home`.
#[derive(Debug, Clone)]
pub struct ProblemStore {
    home: PathBuf,
}

static RE_EDITORIAL_SEPARATOR: Lazy<Regex> = lazy_regex!(r"(?i)---\s*##\s*Editorial");

impl Problem {
    pub const NO_EDITORIAL: &str = "No editorial provided.";

    pub fn testcases(&self) -> Vec<TestCase> {
        parse_corpus(&self.raw_input, &self.raw_output)
    }

    /// The first test case, shown as the example in the statement.
    pub fn sample(&self) -> Option<TestCase> {
        self.testcases().into_iter().next()
    }

    fn from_parts(id: ProblemId, statement: &str, raw_input: String, raw_output: String) -> Self {
        let mut parts = RE_EDITORIAL_SEPARATOR.splitn(statement, 2);
        let description = parts.next().unwrap_or_default().trim().to_owned();
        let editorial = parts
            .next()
            .map(|s| s.trim().to_owned())
            .unwrap_or_else(|| Self::NO_EDITORIAL.to_owned());
        Self {
            title: title_from_dirname(id.name()),
            id,
            description,
            editorial,
            raw_input,
            raw_output,
        }
    }
}

/// `two_sum_ii` => `Two Sum Ii`
pub fn title_from_dirname(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if at_word_start {
                title.extend(c.to_uppercase());
            } else {
                title.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            title.push(c);
            at_word_start = true;
        }
    }
    title
}

impl ProblemStore {
    pub const STATEMENT_FILENAME: &str = "statement.md";
    pub const INPUT_FILENAME: &str = "input.txt";
    pub const OUTPUT_FILENAME: &str = "output.txt";
    pub const GROUP_DOCS_FILENAME: &str = "docs.md";

    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn problem_dir(&self, id: &ProblemId) -> PathBuf {
        self.home.join(id.group()).join(id.name())
    }

    pub fn get(&self, id: &str) -> Result<Problem> {
        let not_found = || GradeError::ProblemNotFound(id.to_owned());

        let problem_id: ProblemId = id.parse().map_err(|_| not_found())?;
        let dir = self.problem_dir(&problem_id);
        if !dir.is_dir() {
            return Err(not_found());
        }

        let read = |filename: &str| {
            fsutil::read_to_string(dir.join(filename)).map_err(|e| {
                if e.is_not_found() {
                    not_found()
                } else {
                    GradeError::Storage(e)
                }
            })
        };
        let statement = read(Self::STATEMENT_FILENAME)?;
        let raw_input = read(Self::INPUT_FILENAME)?;
        let raw_output = read(Self::OUTPUT_FILENAME)?;

        Ok(Problem::from_parts(
            problem_id,
            &statement,
            raw_input,
            raw_output,
        ))
    }

    /// Every `<group>/<problem>` directory, sorted by id.
    pub fn list(&self) -> Result<Vec<ProblemEntry>> {
        if !self.home.is_dir() {
            return Ok(Vec::new());
        }

        let mut res = Vec::new();
        for group in subdirs(&self.home)? {
            for name in subdirs(self.home.join(&group))? {
                let Ok(id) = ProblemId::new(group.as_str(), name.as_str()) else {
                    log::debug!("Skip unaddressable problem dir {}/{}", group, name);
                    continue
                };
                res.push(ProblemEntry {
                    title: title_from_dirname(&name),
                    id,
                });
            }
        }
        res.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(res)
    }

    /// Contents of `<group>/docs.md`, if the group has one.
    pub fn group_docs(&self, group: &str) -> Option<String> {
        fsutil::read_to_string(self.home.join(group).join(Self::GROUP_DOCS_FILENAME)).ok()
    }
}

fn subdirs(dir: impl AsRef<Path>) -> fsutil::Result<Vec<String>> {
    let mut names: Vec<String> = fsutil::read_dir(&dir)?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    Ok(names)
}
