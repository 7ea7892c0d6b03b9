use serde::{Deserialize, Serialize};

/// The two mutually incompatible versions of the runtime vocabulary a
/// package may speak.
///
/// 1.2 conflates completion and success into one `lesson_status` field and
/// spells the raw score `cmi.core.score.raw`; 2004 splits the status into
/// `completion_status`/`success_status` and drops the `core.` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScormDialect {
    #[serde(rename = "SCORM_12")]
    Scorm12,
    #[serde(rename = "SCORM_2004")]
    Scorm2004,
}

impl ScormDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScormDialect::Scorm12 => "SCORM_12",
            ScormDialect::Scorm2004 => "SCORM_2004",
        }
    }

    /// Classify from the manifest's `schemaversion` element text.
    ///
    /// Only the literal `1.2` token (after trimming) selects the 1.2
    /// dialect; any other text, such as "2004 3rd Edition", selects 2004.
    /// An absent element defaults to 1.2.
    pub fn from_schema_version(text: Option<&str>) -> Self {
        match text {
            Some(version) if version.trim() != "1.2" => ScormDialect::Scorm2004,
            _ => ScormDialect::Scorm12,
        }
    }
}
