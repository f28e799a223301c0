//! Grading a piece of code against a problem's ordered test cases.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{GradeError, Result};
use crate::lang::Language;
use crate::storage::{ProblemId, ProblemStore, SubmissionStore};
use crate::testing::{
    CaseResult, Executor, GradeSummary, JudgeCode, ProcessRunner, TestCase,
};

/// A graded submission, in the shape it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub id: i64,
    pub problem_id: ProblemId,
    pub language: String,
    pub code: String,
    #[serde(rename = "status")]
    pub final_status: JudgeCode,
    #[serde(rename = "output")]
    pub final_message: String,
    pub passed_count: usize,
    pub total_count: usize,
    pub details: Vec<CaseResult>,
    pub timestamp: i64,
}

impl SubmissionReport {
    /// `id` doubles as the creation time in epoch milliseconds.
    pub fn new(
        problem_id: ProblemId,
        language: impl Into<String>,
        code: impl Into<String>,
        summary: GradeSummary,
        id: i64,
    ) -> Self {
        let GradeSummary {
            final_status,
            final_message,
            passed_count,
            total_count,
            details,
        } = summary;
        Self {
            id,
            problem_id,
            language: language.into(),
            code: code.into(),
            final_status,
            final_message,
            passed_count,
            total_count,
            details,
            timestamp: id,
        }
    }
}

static LAST_SUBMISSION_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond-epoch id, strictly increasing within this process.
pub fn next_submission_id(now_millis: i64) -> i64 {
    let prev = LAST_SUBMISSION_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now_millis.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now_millis.max(prev + 1)
}

/// Runs `code` against each test case in order and aggregates the verdict.
///
/// - An execution failure (compile error, crash, timeout, ...) becomes the
///   verdict and stops grading; later cases are not run.
/// - A wrong answer does not stop grading. The first one becomes the verdict
///   and later cases are still run and counted.
pub async fn grade_testcases<E>(
    executor: &E,
    language: &str,
    code: &str,
    testcases: &[TestCase],
) -> GradeSummary
where
    E: Executor + ?Sized,
{
    let mut summary = GradeSummary {
        final_status: JudgeCode::Accepted,
        final_message: String::new(),
        passed_count: 0,
        total_count: testcases.len(),
        details: Vec::with_capacity(testcases.len()),
    };

    let lang = match Language::parse(language) {
        Ok(lang) => lang,
        Err(e) => {
            summary.final_status = JudgeCode::UnsupportedLanguage;
            summary.final_message = e.to_string();
            return summary;
        }
    };

    for (i, t) in testcases.iter().enumerate() {
        let ordinal = i + 1;
        let outcome = executor.execute(lang, code, &t.input).await;
        let expected = t.expected_output.trim();

        let mut case = CaseResult {
            ordinal,
            status: JudgeCode::Passed,
            input: t.input.clone(),
            expected_output: expected.to_owned(),
            actual_output: String::new(),
            error_text: String::new(),
        };

        if let Some(failure) = outcome.kind.failure_code() {
            log::info!("Test case {} ... {}", ordinal, failure);
            case.status = failure;
            case.error_text = outcome.diagnostic().to_owned();
            summary.final_status = failure;
            summary.final_message = case.error_text.clone();
            summary.details.push(case);
            break;
        }

        let actual = outcome.stdout.trim();
        case.actual_output = actual.to_owned();

        if actual == expected {
            summary.passed_count += 1;
        } else {
            case.status = JudgeCode::WrongAnswer;
            if summary.final_status == JudgeCode::Accepted {
                summary.final_status = JudgeCode::WrongAnswer;
                summary.final_message = format!("Test Case {} Failed", ordinal);
            }
        }
        log::info!("Test case {} ... {}", ordinal, case.status);
        summary.details.push(case);
    }

    summary
}

/// Looks problems up, grades submissions against them, and records the result.
#[derive(Debug, Clone)]
pub struct Judge<E = ProcessRunner> {
    problems: ProblemStore,
    submissions: SubmissionStore,
    executor: E,
}

impl Judge<ProcessRunner> {
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            ProblemStore::new(&cfg.storage.problems_dir),
            SubmissionStore::new(&cfg.storage.submissions_dir),
            ProcessRunner::new(cfg.runner_config()),
        )
    }
}

impl<E: Executor> Judge<E> {
    pub fn new(problems: ProblemStore, submissions: SubmissionStore, executor: E) -> Self {
        Self {
            problems,
            submissions,
            executor,
        }
    }

    pub fn problems(&self) -> &ProblemStore {
        &self.problems
    }

    pub fn submissions(&self) -> &SubmissionStore {
        &self.submissions
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Grades `code` against every test case of the problem and stores the report.
    ///
    /// The only error is [`GradeError::ProblemNotFound`]; everything that goes
    /// wrong while compiling or running is part of the returned report.
    pub async fn grade(
        &self,
        problem_id: &str,
        language: &str,
        code: &str,
    ) -> Result<SubmissionReport> {
        let problem = self.problems.get(problem_id).map_err(|e| match e {
            GradeError::ProblemNotFound(_) => e,
            GradeError::Storage(e) => {
                log::warn!("Cannot load problem '{}': {:#}", problem_id, e);
                GradeError::ProblemNotFound(problem_id.to_owned())
            }
        })?;

        let testcases = problem.testcases();
        log::info!(
            "Grading {} ({}) with {} test case(s)",
            problem.id,
            language,
            testcases.len()
        );
        let summary = grade_testcases(&self.executor, language, code, &testcases).await;

        let id = next_submission_id(chrono::Utc::now().timestamp_millis());
        let report = SubmissionReport::new(problem.id, language, code, summary, id);

        if let Err(e) = self.submissions.save(&report) {
            log::error!("Failed to save submission {}: {:#}", report.id, e);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::testing::{ExecutionOutcome, OutcomeKind};

    /// Answers each `execute` call with the next scripted outcome.
    struct Scripted {
        outcomes: Mutex<VecDeque<ExecutionOutcome>>,
        calls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(outcomes: impl IntoIterator<Item = ExecutionOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Executor for Scripted {
        async fn execute(&self, _: Language, _: &str, stdin: &str) -> ExecutionOutcome {
            self.calls.lock().unwrap().push(stdin.to_owned());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("executor called more often than scripted")
        }
    }

    fn ok(stdout: &str) -> ExecutionOutcome {
        ExecutionOutcome::success(stdout, "")
    }

    fn cases(pairs: &[(&str, &str)]) -> Vec<TestCase> {
        pairs.iter().map(|&(i, o)| TestCase::new(i, o)).collect()
    }

    fn statuses(s: &GradeSummary) -> Vec<JudgeCode> {
        s.details.iter().map(|d| d.status).collect()
    }

    #[tokio::test]
    async fn all_match_is_accepted() {
        let exec = Scripted::new([ok("1\n"), ok("  2  \n\n")]);
        let s = grade_testcases(&exec, "python", "", &cases(&[("a", "1"), ("b", "2\n")])).await;

        assert_eq!(s.final_status, JudgeCode::Accepted);
        assert_eq!(s.final_message, "");
        assert_eq!((s.passed_count, s.total_count), (2, 2));
        assert_eq!(statuses(&s), [JudgeCode::Passed, JudgeCode::Passed]);
        assert_eq!(s.details[1].actual_output, "2");
        assert_eq!(s.details[1].expected_output, "2");
        assert_eq!(exec.calls(), ["a", "b"]);
    }

    #[tokio::test]
    async fn wrong_answer_keeps_grading() {
        let exec = Scripted::new([ok("x"), ok("2"), ok("y")]);
        let s = grade_testcases(
            &exec,
            "python",
            "",
            &cases(&[("a", "1"), ("b", "2"), ("c", "3")]),
        )
        .await;

        assert_eq!(s.final_status, JudgeCode::WrongAnswer);
        assert_eq!(s.final_message, "Test Case 1 Failed");
        assert_eq!((s.passed_count, s.total_count), (1, 3));
        assert_eq!(
            statuses(&s),
            [JudgeCode::WrongAnswer, JudgeCode::Passed, JudgeCode::WrongAnswer]
        );
        assert_eq!(
            s.details.iter().map(|d| d.ordinal).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[tokio::test]
    async fn comparison_is_exact_inside_the_text() {
        let exec = Scripted::new([ok("1  2\n"), ok("1.0")]);
        let s = grade_testcases(&exec, "python", "", &cases(&[("a", "1 2"), ("b", "1")])).await;
        assert_eq!(statuses(&s), [JudgeCode::WrongAnswer, JudgeCode::WrongAnswer]);
        assert_eq!(s.passed_count, 0);
    }

    #[tokio::test]
    async fn execution_failure_short_circuits() {
        let exec = Scripted::new([
            ok("1"),
            ExecutionOutcome::failure(OutcomeKind::RuntimeError, "Segmentation fault"),
        ]);
        let s = grade_testcases(
            &exec,
            "cpp",
            "",
            &cases(&[("a", "1"), ("b", "2"), ("c", "3")]),
        )
        .await;

        assert_eq!(s.final_status, JudgeCode::RuntimeError);
        assert_eq!(s.final_message, "Segmentation fault");
        assert_eq!((s.passed_count, s.total_count), (1, 3));
        assert_eq!(statuses(&s), [JudgeCode::Passed, JudgeCode::RuntimeError]);
        assert_eq!(s.details[1].error_text, "Segmentation fault");
        assert_eq!(s.details[1].actual_output, "");
        assert_eq!(exec.calls(), ["a", "b"]);
    }

    #[tokio::test]
    async fn execution_failure_after_wrong_answer_becomes_the_verdict() {
        let exec = Scripted::new([ok("nope"), ExecutionOutcome::time_limit_exceeded()]);
        let s = grade_testcases(
            &exec,
            "python",
            "",
            &cases(&[("a", "1"), ("b", "2"), ("c", "3")]),
        )
        .await;

        assert_eq!(s.final_status, JudgeCode::TimeLimitExceeded);
        assert_eq!(s.final_message, "");
        assert_eq!(
            statuses(&s),
            [JudgeCode::WrongAnswer, JudgeCode::TimeLimitExceeded]
        );
    }

    #[tokio::test]
    async fn compilation_error_on_first_case() {
        let exec = Scripted::new([ExecutionOutcome::failure(
            OutcomeKind::CompilationError,
            "main.cpp:1:1: error",
        )]);
        let s = grade_testcases(&exec, "cpp", "", &cases(&[("a", "1"), ("b", "2")])).await;

        assert_eq!(s.final_status, JudgeCode::CompilationError);
        assert_eq!(s.details.len(), 1);
        assert_eq!(s.passed_count, 0);
    }

    #[tokio::test]
    async fn unsupported_language_runs_nothing() {
        let exec = Scripted::new([]);
        let s = grade_testcases(&exec, "ruby", "puts 1", &cases(&[("a", "1")])).await;

        assert_eq!(s.final_status, JudgeCode::UnsupportedLanguage);
        assert!(s.final_message.contains("ruby"));
        assert!(s.details.is_empty());
        assert_eq!((s.passed_count, s.total_count), (0, 1));
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_corpus_is_vacuously_accepted() {
        let exec = Scripted::new([]);
        let s = grade_testcases(&exec, "python", "", &[]).await;
        assert_eq!(s.final_status, JudgeCode::Accepted);
        assert_eq!((s.passed_count, s.total_count), (0, 0));
    }

    #[test]
    fn submission_ids_strictly_increase() {
        let a = next_submission_id(5_000);
        let b = next_submission_id(5_000);
        let c = next_submission_id(1);
        assert!(a < b && b < c, "{} {} {}", a, b, c);
        assert!(a >= 5_000);
    }
}
