use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::{CompletionStatus, SuccessStatus};

/// Per-learner, per-package runtime record.
///
/// Created on first access with everything at its starting value; mutated
/// only by the tracker; never deleted here (the host owns its lifecycle and
/// is responsible for loading it before and saving it after each call).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    pub completion: CompletionStatus,
    pub success: SuccessStatus,
    /// Normalized score, 0.0 to 1.0.
    pub score: f64,
    /// Vendor-specific fields that map onto no normalized field, stored
    /// verbatim.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}
