//! Models for housekeeping tasks.

use crate::db::handlers::repository::{Entity, UpdateContext};
use crate::string_enum;
use crate::types::{RoomId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum TaskStatus {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

string_enum! {
    pub enum TaskPriority {
        Medium => "medium",
        Low => "low",
        High => "high",
    }
}

/// What happens to `completedAt` when a task leaves the completed state.
///
/// Completing a task always stamps `completedAt` unless the caller supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// `completedAt` is left exactly as the caller specifies: untouched when the patch omits it,
    /// cleared when the patch sets it to null.
    #[default]
    Preserve,
    /// Moving a task back to pending or in-progress clears `completedAt` unless the patch
    /// sets it explicitly.
    ClearOnRegression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousekeepingTask {
    pub id: TaskId,
    /// Weak reference; the room may no longer exist
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub room_id: Option<Option<RoomId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// `Some(None)` clears the timestamp, `None` leaves it alone
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Entity for HousekeepingTask {
    type CreateRequest = TaskCreate;
    type UpdateRequest = TaskUpdate;

    const KIND: &'static str = "HousekeepingTask";
    const COLLECTION: &'static str = "housekeeping_tasks";
    const FIELDS: &'static [&'static str] = &["id", "room_id", "assigned_to", "status", "priority", "completed_at"];

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(id: String, request: &TaskCreate) -> Self {
        Self {
            id,
            room_id: request.room_id.clone(),
            assigned_to: request.assigned_to.clone().unwrap_or_default(),
            status: request.status.unwrap_or(TaskStatus::Pending),
            priority: request.priority.unwrap_or(TaskPriority::Medium),
            // Always null on creation, whatever the requested status
            completed_at: None,
        }
    }

    fn merge(&mut self, patch: &TaskUpdate) {
        if let Some(room_id) = &patch.room_id {
            self.room_id = room_id.clone();
        }
        if let Some(assigned_to) = &patch.assigned_to {
            self.assigned_to = assigned_to.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
    }

    fn prepare_update(patch: &mut TaskUpdate, context: &UpdateContext) {
        if patch.completed_at.is_some() {
            return;
        }
        match (patch.status, context.completion_policy) {
            (Some(TaskStatus::Completed), _) => patch.completed_at = Some(Some(context.now)),
            (Some(_), CompletionPolicy::ClearOnRegression) => patch.completed_at = Some(None),
            _ => {}
        }
    }
}
