//! Target assignments: the edges of the hunt cycle

use crate::core::kill::KillId;
use crate::core::{EntityId, PlayerId, Weapon};
use crate::error::GotchaError;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed id for target assignments.
pub type AssignmentId = EntityId<TargetAssignment>;

/// Lifecycle of a single hunting edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// Hunter and target are both alive and the edge is live.
    Ongoing,
    /// The target was killed through this edge.
    Killed,
    /// The edge was rewired away (its hunter or target left the cycle).
    Cancelled,
    /// A disputed kill report closed this edge.
    Failed,
    /// An admin removed the edge.
    Revoked,
}

impl AssignmentStatus {
    /// Terminal statuses are frozen; only `Ongoing` edges can change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssignmentStatus::Ongoing)
    }
}

/// One hunter→target edge.
///
/// Immutable once resolved: the only mutation path is [`resolve`], which
/// moves an `Ongoing` edge to exactly one terminal status.
///
/// [`resolve`]: TargetAssignment::resolve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetAssignment {
    pub id: AssignmentId,
    pub hunter: PlayerId,
    pub target: PlayerId,
    pub assigned_at: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub weapon: Option<Weapon>,
    /// The kill that consumed this edge, if any.
    pub kill: Option<KillId>,
}

impl TargetAssignment {
    pub fn new(
        id: AssignmentId,
        hunter: PlayerId,
        target: PlayerId,
        assigned_at: DateTime<Utc>,
        weapon: Option<Weapon>,
    ) -> Self {
        TargetAssignment {
            id,
            hunter,
            target,
            assigned_at,
            status: AssignmentStatus::Ongoing,
            weapon,
            kill: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == AssignmentStatus::Ongoing
    }

    /// Close this edge with a terminal status, optionally linking the kill
    /// that caused it.
    pub fn resolve(&mut self, status: AssignmentStatus, kill: Option<KillId>) -> Result<()> {
        if self.status.is_terminal() {
            return Err(GotchaError::state(format!(
                "assignment {} is already resolved as {:?}",
                self.id, self.status
            )));
        }
        if !status.is_terminal() {
            return Err(GotchaError::state(format!(
                "assignment {} cannot be resolved back to {:?}",
                self.id, status
            )));
        }
        self.status = status;
        self.kill = kill;
        Ok(())
    }
}
