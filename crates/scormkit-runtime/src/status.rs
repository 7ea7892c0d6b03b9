use serde::{Deserialize, Serialize};

/// Normalized completion status.
///
/// The 1.2 dialect's combined `lesson_status` vocabulary is folded in here,
/// which is why `Passed`/`Failed`/`Browsed` appear alongside the 2004
/// completion values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    #[serde(rename = "not attempted")]
    NotAttempted,
    Incomplete,
    Completed,
    Browsed,
    Failed,
    Passed,
}

impl CompletionStatus {
    /// Parse an exact SCORM token. Anything outside the vocabulary is
    /// `None`; callers ignore such values rather than erroring.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "not attempted" => Some(CompletionStatus::NotAttempted),
            "incomplete" => Some(CompletionStatus::Incomplete),
            "completed" => Some(CompletionStatus::Completed),
            "browsed" => Some(CompletionStatus::Browsed),
            "failed" => Some(CompletionStatus::Failed),
            "passed" => Some(CompletionStatus::Passed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::NotAttempted => "not attempted",
            CompletionStatus::Incomplete => "incomplete",
            CompletionStatus::Completed => "completed",
            CompletionStatus::Browsed => "browsed",
            CompletionStatus::Failed => "failed",
            CompletionStatus::Passed => "passed",
        }
    }
}

/// Normalized success status, orthogonal to completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessStatus {
    #[default]
    Unknown,
    Passed,
    Failed,
}

impl SuccessStatus {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "unknown" => Some(SuccessStatus::Unknown),
            "passed" => Some(SuccessStatus::Passed),
            "failed" => Some(SuccessStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessStatus::Unknown => "unknown",
            SuccessStatus::Passed => "passed",
            SuccessStatus::Failed => "failed",
        }
    }
}
