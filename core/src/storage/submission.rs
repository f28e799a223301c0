use std::path::{Path, PathBuf};

use super::ProblemId;
use crate::judge::SubmissionReport;
use crate::testing::JudgeCode;

/// One JSON file per submission: `<home>/<problem_id>/<submission_id>.json`.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    home: PathBuf,
}

impl SubmissionStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn problem_dir(&self, problem_id: &ProblemId) -> PathBuf {
        self.home.join(problem_id.to_string())
    }

    pub fn save(&self, report: &SubmissionReport) -> fsutil::Result<PathBuf> {
        let filepath = self
            .problem_dir(&report.problem_id)
            .join(format!("{}.json", report.id));
        fsutil::write_json_with_mkdir(&filepath, report)?;
        log::debug!("Saved submission to {}", filepath.to_string_lossy());
        Ok(filepath)
    }

    /// Stored submissions of a problem, most recent first.
    pub fn list(&self, problem_id: &ProblemId) -> fsutil::Result<Vec<SubmissionReport>> {
        let dir = self.problem_dir(problem_id);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut res: Vec<SubmissionReport> = fsutil::read_dir(&dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
            .filter_map(|path| {
                fsutil::read_json_with_deserialize(&path)
                    .map_err(|e| log::warn!("Skip unreadable submission: {:#}", e))
                    .ok()
            })
            .collect();
        res.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(res)
    }

    pub fn has_accepted(&self, problem_id: &ProblemId) -> fsutil::Result<bool> {
        let subs = self.list(problem_id)?;
        Ok(subs.iter().any(|s| s.final_status == JudgeCode::Accepted))
    }
}
