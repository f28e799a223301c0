use std::collections::HashMap;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::judge::SubmissionReport;
use crate::testing::{CaseResult, ExecutionOutcome, JudgeCode, OutcomeKind};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for JudgeCode {
    fn color(&self) -> Color {
        use JudgeCode::*;
        if !self::is_truecolor_supported() {
            return match self {
                Accepted | Passed => Color::Green,
                WrongAnswer => Color::Yellow,
                TimeLimitExceeded => Color::Red,
                RuntimeError => Color::Magenta,
                CompilationError => Color::Blue,
                SystemError | UnsupportedLanguage => Color::BrightBlack,
            };
        }

        let (r, g, b) = match self {
            Accepted | Passed => (30, 180, 40),
            WrongAnswer => (210, 138, 4),
            TimeLimitExceeded => (220, 42, 42),
            RuntimeError => (171, 40, 200),
            CompilationError => (40, 110, 210),
            SystemError | UnsupportedLanguage => (110, 110, 110),
        };
        Color::TrueColor { r, g, b }
    }
}

pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", judge.abbr())
        .on_color(judge.color())
        .bold()
        .color(fg)
}

pub fn outcome_icon(kind: OutcomeKind) -> ColoredString {
    match kind.failure_code() {
        Some(code) => judge_icon(code),
        None => judge_icon(JudgeCode::Passed),
    }
}

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

fn term_cols() -> usize {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    cols as usize
}

fn print_sub_title(s: &str, cols: usize) {
    println!(
        "{}{}",
        s.cyan().bold(),
        THIN_LINE
            .repeat(cols.saturating_sub(s.len() + 1))
            .bright_black(),
    )
}

fn print_text(s: &str) {
    if s.trim().is_empty() {
        println!("{}", "<EMPTY>".magenta().dimmed());
        return;
    }
    for line in s.lines() {
        println!("{}", line);
    }
}

/// One line per test case, e.g. `Test case 2 ...  WA `.
pub fn print_case_line(case: &CaseResult) {
    println!(
        "{}",
        format!("Test case {} ... {}", case.ordinal, judge_icon(case.status)).cyan()
    );
}

/// Expected vs actual, plus whatever the program wrote to stderr.
pub fn print_case_detail(case: &CaseResult) {
    let cols = term_cols();
    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    println!(
        "\n{}: {}\n{}",
        format!("Test case {}", case.ordinal)
            .color(Color::BrightYellow)
            .bold(),
        judge_icon(case.status),
        bold_bar,
    );

    print_sub_title("[input]", cols);
    print_text(&case.input);

    print_sub_title("[expected]", cols);
    print_text(&case.expected_output);

    if case.status == JudgeCode::WrongAnswer || !case.actual_output.is_empty() {
        print_sub_title("[actual]", cols);
        print_text(&case.actual_output);
    }

    if !case.error_text.is_empty() {
        print_sub_title("[stderr]", cols);
        print!("{}", case.error_text);
        if !case.error_text.ends_with('\n') {
            println!();
        }
    }

    println!("{}", bold_bar);
}

pub fn print_report_summary(report: &SubmissionReport) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let count: HashMap<JudgeCode, usize> =
        report
            .details
            .iter()
            .fold(HashMap::new(), |mut count, case| {
                *count.entry(case.status).or_default() += 1;
                count
            });

    if report.final_status == JudgeCode::Accepted {
        let msg = format!(
            "{} ({}/{} passed) ✨",
            report.final_status, report.passed_count, report.total_count
        );
        print!("{}", msg.green());
    } else {
        let detail_msg = count
            .iter()
            .filter(|(judge, _)| !judge.is_ok())
            .map(|(&judge, &cnt)| {
                format!(
                    "{}{}{}",
                    self::judge_icon(judge),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        let msg = format!(
            "{} ({}/{} passed)",
            report.final_status, report.passed_count, report.total_count
        );
        if detail_msg.is_empty() {
            print!("{}", msg.bright_red());
        } else {
            print!("{} {}", msg.bright_red(), detail_msg);
        }
    }

    println!(" {}", bar);
}

/// Full rendering of a graded submission: failing cases in detail, then the verdict.
pub fn print_report(report: &SubmissionReport) {
    report
        .details
        .iter()
        .filter(|case| !case.status.is_ok())
        .for_each(print_case_detail);

    if !report.final_message.is_empty() {
        println!("{}", report.final_message.bright_red());
    }
    print_report_summary(report);
}

/// Rendering of a single custom-input run.
pub fn print_outcome(outcome: &ExecutionOutcome) {
    let cols = term_cols();
    println!("{} {}", outcome_icon(outcome.kind), outcome.kind.to_string().bold());

    print_sub_title("[stdout]", cols);
    print_text(&outcome.stdout);

    if !outcome.stderr.is_empty() {
        print_sub_title("[stderr]", cols);
        print!("{}", outcome.stderr);
        if !outcome.stderr.ends_with('\n') {
            println!();
        }
    }
}
