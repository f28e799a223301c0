use serde::{Deserialize, Serialize};

/// How a single compile+run attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum OutcomeKind {
    Success,
    #[strum(to_string = "Compilation Error")]
    CompilationError,
    #[strum(to_string = "Runtime Error")]
    RuntimeError,
    #[strum(to_string = "Time Limit Exceeded")]
    TimeLimitExceeded,
    #[strum(to_string = "System Error")]
    SystemError,
    #[strum(to_string = "Unsupported Language")]
    UnsupportedLanguage,
}

impl OutcomeKind {
    /// The judge code a failed attempt is reported as, or `None` on success.
    pub fn failure_code(self) -> Option<JudgeCode> {
        use OutcomeKind::*;
        match self {
            Success => None,
            CompilationError => Some(JudgeCode::CompilationError),
            RuntimeError => Some(JudgeCode::RuntimeError),
            TimeLimitExceeded => Some(JudgeCode::TimeLimitExceeded),
            SystemError => Some(JudgeCode::SystemError),
            UnsupportedLanguage => Some(JudgeCode::UnsupportedLanguage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub kind: OutcomeKind,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutcome {
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Success,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn failure(kind: OutcomeKind, diagnostic: impl Into<String>) -> Self {
        Self {
            kind,
            stdout: String::new(),
            stderr: diagnostic.into(),
        }
    }

    pub fn time_limit_exceeded() -> Self {
        Self::failure(OutcomeKind::TimeLimitExceeded, "")
    }

    /// Diagnostic text shown for a failed attempt.
    pub fn diagnostic(&self) -> &str {
        &self.stderr
    }
}

/// Status of one test case, or of a whole submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, Serialize, Deserialize,
)]
pub enum JudgeCode {
    Accepted,
    Passed,
    #[strum(to_string = "Wrong Answer")]
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    #[strum(to_string = "Compilation Error")]
    #[serde(rename = "Compilation Error")]
    CompilationError,
    #[strum(to_string = "Runtime Error")]
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    #[strum(to_string = "Time Limit Exceeded")]
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    #[strum(to_string = "System Error")]
    #[serde(rename = "System Error")]
    SystemError,
    #[strum(to_string = "Unsupported Language")]
    #[serde(rename = "Unsupported Language")]
    UnsupportedLanguage,
}

impl JudgeCode {
    pub fn abbr(self) -> &'static str {
        use JudgeCode::*;
        match self {
            Accepted => "AC",
            Passed => "OK",
            WrongAnswer => "WA",
            CompilationError => "CE",
            RuntimeError => "RE",
            TimeLimitExceeded => "TLE",
            SystemError => "SE",
            UnsupportedLanguage => "UL",
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, JudgeCode::Accepted | JudgeCode::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// 1-based position of the test case in the corpus.
    #[serde(rename = "id")]
    pub ordinal: usize,
    pub status: JudgeCode,
    pub input: String,
    #[serde(rename = "expected")]
    pub expected_output: String,
    #[serde(rename = "actual")]
    pub actual_output: String,
    #[serde(rename = "error")]
    pub error_text: String,
}

/// Verdict of grading one piece of code against a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSummary {
    pub final_status: JudgeCode,
    pub final_message: String,
    pub passed_count: usize,
    pub total_count: usize,
    pub details: Vec<CaseResult>,
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_failure_kind_has_a_judge_code_with_the_same_name() {
        for kind in OutcomeKind::iter() {
            match kind.failure_code() {
                None => assert_eq!(kind, OutcomeKind::Success),
                Some(code) => assert_eq!(code.to_string(), kind.to_string()),
            }
        }
    }

    #[test]
    fn judge_code_serializes_as_display_string() {
        for code in JudgeCode::iter() {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
            let back: JudgeCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }

    #[test]
    fn case_result_uses_record_field_names() {
        let r = CaseResult {
            ordinal: 2,
            status: JudgeCode::WrongAnswer,
            input: "1 2".to_owned(),
            expected_output: "3".to_owned(),
            actual_output: "4".to_owned(),
            error_text: String::new(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["id"], 2);
        assert_eq!(v["status"], "Wrong Answer");
        assert_eq!(v["expected"], "3");
        assert_eq!(v["actual"], "4");
        assert_eq!(v["error"], "");
    }
}
