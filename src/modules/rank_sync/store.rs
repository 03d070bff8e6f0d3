use faculty_core::AppError;
use faculty_models::{Group, Permission, PermissionLogEntry, UserId};
use std::future::Future;

/// The mutable boundary the rank synchronizer works against.
///
/// Implementations must treat every write as an idempotent "ensure present"
/// operation: attaching an already attached permission, or adding a member
/// who is already in the group, is a no-op rather than an error.
///
/// Stores are `Send + Sync` and return `Send` futures, so a synchronization
/// can run on a spawned task.
pub trait AuthorizationStore: Send + Sync {
    /// Returns the group with this name, creating it when absent.
    fn find_or_create_group(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Group, AppError>> + Send;

    fn find_permission(
        &self,
        codename: &str,
    ) -> impl Future<Output = Result<Option<Permission>, AppError>> + Send;

    /// Creates the permission, or renames it when the code already exists.
    fn register_permission(
        &self,
        codename: &str,
        name: &str,
    ) -> impl Future<Output = Result<Permission, AppError>> + Send;

    fn ensure_group_permission(
        &self,
        group: &Group,
        permission: &Permission,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Removes every group membership the user holds.
    fn clear_user_groups(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn add_user_to_group(
        &self,
        user_id: UserId,
        group: &Group,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Groups the user belongs to, ordered by name.
    fn user_groups(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, AppError>> + Send;

    /// Permission codes attached to the group, sorted.
    fn group_permission_codes(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<String>, AppError>> + Send;

    /// Distinct permission codes granted to the user through any group, sorted.
    fn user_permission_codes(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<String>, AppError>> + Send;

    fn record_permission_log(
        &self,
        entry: &PermissionLogEntry,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Audit entries for the user, newest first.
    fn permission_logs(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<PermissionLogEntry>, AppError>> + Send;
}
