use std::path::Path;
use std::time::Duration;

use grader_core::error::GradeError;
use grader_core::judge::Judge;
use grader_core::storage::{ProblemStore, SubmissionStore};
use grader_core::testing::{JudgeCode, ProcessRunner, RunnerConfig};

struct Fixture {
    _tmp: tempfile::TempDir,
    judge: Judge,
}

fn put_problem(home: &Path, group: &str, name: &str, input: &str, output: &str) {
    let dir = home.join(group).join(name);
    fsutil::write_with_mkdir(
        dir.join(ProblemStore::STATEMENT_FILENAME),
        "Double the number.\n\n---\n## Editorial\nMultiply by two.\n",
    )
    .unwrap();
    fsutil::write(dir.join(ProblemStore::INPUT_FILENAME), input).unwrap();
    fsutil::write(dir.join(ProblemStore::OUTPUT_FILENAME), output).unwrap();
}

fn setup() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let problems = tmp.path().join("problems");
    put_problem(&problems, "basics", "double", "1\n---\n2\n---\n3\n", "2\n---\n4\n---\n6\n");

    let runner = ProcessRunner::new(RunnerConfig::new(tmp.path().join("tmp")))
        .execution_time_limit(Duration::from_millis(1000));
    let judge = Judge::new(
        ProblemStore::new(problems),
        SubmissionStore::new(tmp.path().join("submissions")),
        runner,
    );
    Fixture { _tmp: tmp, judge }
}

fn workspace_root_is_empty(f: &Fixture) -> bool {
    let root = &f.judge.executor().config().workspace_root;
    !root.exists() || fsutil::read_dir(root).unwrap().next().is_none()
}

#[tokio::test]
async fn correct_solution_is_accepted_and_stored() {
    let f = setup();
    let report = f
        .judge
        .grade("basics-double", "python", "print(int(input()) * 2)")
        .await
        .unwrap();

    assert_eq!(report.final_status, JudgeCode::Accepted);
    assert_eq!((report.passed_count, report.total_count), (3, 3));
    assert!(report
        .details
        .iter()
        .all(|d| d.status == JudgeCode::Passed));
    assert_eq!(report.timestamp, report.id);

    let stored = f.judge.submissions().list(&report.problem_id).unwrap();
    assert_eq!(stored, vec![report.clone()]);
    assert!(f.judge.submissions().has_accepted(&report.problem_id).unwrap());
    assert!(workspace_root_is_empty(&f));
}

#[tokio::test]
async fn wrong_answer_still_runs_every_case() {
    let f = setup();
    let code = "n = int(input())\nprint(4 if n == 2 else 0)";
    let report = f.judge.grade("basics-double", "py", code).await.unwrap();

    assert_eq!(report.final_status, JudgeCode::WrongAnswer);
    assert_eq!(report.final_message, "Test Case 1 Failed");
    assert_eq!(report.passed_count, 1);
    assert_eq!(
        report.details.iter().map(|d| d.status).collect::<Vec<_>>(),
        [JudgeCode::WrongAnswer, JudgeCode::Passed, JudgeCode::WrongAnswer]
    );
}

#[tokio::test]
async fn crash_stops_grading() {
    let f = setup();
    let code = "n = int(input())\nassert n < 2, 'too big'\nprint(n * 2)";
    let report = f.judge.grade("basics-double", "python", code).await.unwrap();

    assert_eq!(report.final_status, JudgeCode::RuntimeError);
    assert_eq!(report.details.len(), 2);
    assert!(report.final_message.contains("too big"), "{}", report.final_message);
    assert!(workspace_root_is_empty(&f));
}

#[tokio::test]
async fn unknown_language_yields_a_report() {
    let f = setup();
    let report = f
        .judge
        .grade("basics-double", "brainfuck", "+.")
        .await
        .unwrap();

    assert_eq!(report.final_status, JudgeCode::UnsupportedLanguage);
    assert!(report.details.is_empty());
    assert_eq!(report.total_count, 3);
    assert!(!f.judge.executor().config().workspace_root.exists());
}

#[tokio::test]
async fn unknown_problem_is_an_error() {
    let f = setup();
    let err = f
        .judge
        .grade("basics-triple", "python", "print(1)")
        .await
        .unwrap_err();
    assert!(matches!(err, GradeError::ProblemNotFound(id) if id == "basics-triple"));
    assert!(f.judge.submissions().list(&"basics-triple".parse().unwrap()).unwrap().is_empty());
}
