use mahlzeit_common::types::duration_secs;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::db::StepRecord;

/// Step header as returned by the step endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResponse {
    pub id: i64,
    pub recipe_id: i64,
    pub instruction: String,
    /// Seconds
    #[serde(with = "duration_secs")]
    pub time: Duration,
}

impl From<StepRecord> for StepResponse {
    fn from(step: StepRecord) -> Self {
        Self {
            id: step.id,
            recipe_id: step.recipe_id,
            instruction: step.instruction,
            time: step.time,
        }
    }
}
