use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// A line made only of a run of (at least three) hyphens, surrounding blanks allowed.
static RE_CASE_DELIMITER: Lazy<Regex> = lazy_regex!(r"(?m)^[ \t]*-{3,}[ \t]*\r?$");

/// Splits a raw corpus document into trimmed, non-empty segments.
pub fn split_corpus(raw: &str) -> Vec<String> {
    RE_CASE_DELIMITER
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pairs the segments of a problem's input and output documents by position.
///
/// When the two documents hold a different number of segments, the extra
/// segments of the longer one are dropped.
pub fn parse_corpus(raw_input: &str, raw_output: &str) -> Vec<TestCase> {
    let inputs = split_corpus(raw_input);
    let outputs = split_corpus(raw_output);

    if inputs.len() != outputs.len() {
        log::warn!(
            "Test case count mismatch: {} input(s) vs {} output(s); only the first {} are used",
            inputs.len(),
            outputs.len(),
            inputs.len().min(outputs.len()),
        );
    }

    inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, expected_output)| TestCase {
            input,
            expected_output,
        })
        .collect()
}
