//! Kill records

use crate::core::{EntityId, PlayerId, Weapon};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Typed id for kill records.
pub type KillId = EntityId<Kill>;

/// Reason attached to a confirmed kill when the reporter gives none.
pub const DEFAULT_VALID_REASON: &str = "Killed in game!";

/// Reason attached to a disputed kill when the reporter gives none.
pub const DEFAULT_INVALID_REASON: &str = "No reason provided.";

/// Immutable record of one elimination report, valid or not.
///
/// A kill always references the assignment that was `Ongoing` at the moment
/// of the report; `time_since_assigned` is measured against that
/// assignment's creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kill {
    pub id: KillId,
    pub killer: PlayerId,
    pub victim: PlayerId,
    pub moment: DateTime<Utc>,
    pub weapon: Option<Weapon>,
    pub reason: String,
    /// False for disputed reports that did not change the cycle.
    pub is_valid: bool,
    /// How long the hunter had held the assignment when the report came in.
    pub time_since_assigned: Duration,
}

impl Kill {
    /// Record for a confirmed elimination.
    pub fn confirmed(
        id: KillId,
        killer: PlayerId,
        victim: PlayerId,
        moment: DateTime<Utc>,
        weapon: Option<Weapon>,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Kill {
            id,
            killer,
            victim,
            moment,
            weapon,
            reason: DEFAULT_VALID_REASON.to_string(),
            is_valid: true,
            time_since_assigned: elapsed(assigned_at, moment),
        }
    }

    /// Record for a disputed elimination attempt.
    pub fn disputed(
        id: KillId,
        killer: PlayerId,
        victim: PlayerId,
        moment: DateTime<Utc>,
        weapon: Option<Weapon>,
        reason: Option<String>,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Kill {
            id,
            killer,
            victim,
            moment,
            weapon,
            reason: reason.unwrap_or_else(|| DEFAULT_INVALID_REASON.to_string()),
            is_valid: false,
            time_since_assigned: elapsed(assigned_at, moment),
        }
    }
}

fn elapsed(assigned_at: DateTime<Utc>, moment: DateTime<Utc>) -> Duration {
    // Clock skew in restored state could make this negative; clamp to zero.
    (moment - assigned_at).to_std().unwrap_or(Duration::ZERO)
}
