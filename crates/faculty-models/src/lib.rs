//! # Faculty Models
//!
//! Domain models shared across Faculty crates.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID identifiers
//! - [`ranks`]: Academic ranks, their groups and capability sets
//! - [`authorization`]: Groups, permissions, audit entries and sync reports
//! - [`text_entries`]: Reversed text entries
//!
//! # Example
//!
//! ```ignore
//! use faculty_models::{Rank, UserId};
//!
//! let rank: Rank = "associate_professor".parse()?;
//! assert!(rank.capabilities().contains(&"can_manage_department"));
//! ```

pub mod authorization;
pub mod ids;
pub mod ranks;
pub mod text_entries;

pub use authorization::{Group, Permission, PermissionAction, PermissionLogEntry, SyncReport};
pub use ids::{GroupId, PermissionId, PermissionLogId, TextEntryId, UserId};
pub use ranks::{Rank, RankParseError};
pub use text_entries::{CreateTextEntryDto, DEFAULT_RECENT_LIMIT, TextEntry};
