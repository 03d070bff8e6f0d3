//! Group, permission and audit records used by rank synchronization.

use crate::ids::{GroupId, PermissionId, PermissionLogId, UserId};
use crate::ranks::Rank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named, shared bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// A permission record, addressed by its stable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub id: PermissionId,
    pub codename: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Permission {
    pub fn new(codename: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PermissionId::new(),
            codename: codename.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    Granted,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::Granted => "granted",
        }
    }
}

/// Audit trail of capabilities handed out to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PermissionLogEntry {
    pub id: PermissionLogId,
    pub user_id: UserId,
    pub action: String,
    pub permission: String,
    pub created_at: DateTime<Utc>,
}

impl PermissionLogEntry {
    pub fn new(user_id: UserId, action: PermissionAction, permission: impl Into<String>) -> Self {
        Self {
            id: PermissionLogId::new(),
            user_id,
            action: action.as_str().to_string(),
            permission: permission.into(),
            created_at: Utc::now(),
        }
    }
}

/// Outcome of one rank synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub user_id: UserId,
    pub rank: Rank,
    pub group: Group,
    /// Capability codes attached to the group during this run.
    pub granted: Vec<String>,
    /// Capability codes with no permission record in the store.
    pub missing: Vec<String>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_action() {
        let user_id = UserId::new();
        let entry = PermissionLogEntry::new(user_id, PermissionAction::Granted, "can_x");
        assert_eq!(entry.action, "granted");
        assert_eq!(entry.permission, "can_x");
        assert_eq!(entry.user_id, user_id);
    }

    #[test]
    fn test_sync_report_completeness() {
        let mut report = SyncReport {
            user_id: UserId::new(),
            rank: Rank::Lecturer,
            group: Group::new(Rank::Lecturer.group_name()),
            granted: vec!["can_view_all_students".into()],
            missing: vec![],
        };
        assert!(report.is_complete());

        report.missing.push("can_edit_student_grades".into());
        assert!(!report.is_complete());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rank"], "lecturer");
        assert_eq!(json["missing"][0], "can_edit_student_grades");
    }
}
