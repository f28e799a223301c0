pub mod problem;
pub mod submission;

pub use problem::*;
pub use submission::*;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// `<group>-<problem>`, naming the directory `<problems_dir>/<group>/<problem>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemId {
    group: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid problem id '{0}' (expected '<group>-<problem>')")]
pub struct InvalidProblemId(pub String);

impl ProblemId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Result<Self, InvalidProblemId> {
        let (group, name) = (group.into(), name.into());
        if is_valid_segment(&group) && is_valid_segment(&name) {
            Ok(Self { group, name })
        } else {
            Err(InvalidProblemId(format!("{}-{}", group, name)))
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// Each segment becomes a single path component.
fn is_valid_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

impl FromStr for ProblemId {
    type Err = InvalidProblemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, name) = s
            .split_once('-')
            .ok_or_else(|| InvalidProblemId(s.to_owned()))?;
        Self::new(group, name).map_err(|_| InvalidProblemId(s.to_owned()))
    }
}

impl TryFrom<String> for ProblemId {
    type Error = InvalidProblemId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProblemId> for String {
    fn from(id: ProblemId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.group, self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_on_first_hyphen() {
        let id: ProblemId = "arrays-two-sum".parse().unwrap();
        assert_eq!(id.group(), "arrays");
        assert_eq!(id.name(), "two-sum");
        assert_eq!(id.to_string(), "arrays-two-sum");
    }

    #[test]
    fn reject_malformed_ids() {
        for s in ["", "nohyphen", "-x", "x-", "../etc-passwd", "a-b/c", "..-x", "a-.."] {
            assert_eq!(
                s.parse::<ProblemId>(),
                Err(InvalidProblemId(s.to_owned())),
                "{:?}",
                s
            );
        }
    }

    #[test]
    fn serde_as_plain_string() {
        let id: ProblemId = "basics-hello_world".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""basics-hello_world""#);
        let back: ProblemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ProblemId>(r#""bad""#).is_err());
    }
}
