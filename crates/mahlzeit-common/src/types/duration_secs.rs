//! Serde adapter that encodes a [`Duration`] as whole seconds.
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct Step {
//!     #[serde(with = "mahlzeit_common::types::duration_secs")]
//!     time: Duration,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}
