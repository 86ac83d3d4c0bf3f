use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded fallback from a preferred path to a degraded one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}
