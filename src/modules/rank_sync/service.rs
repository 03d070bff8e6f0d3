use anyhow::anyhow;
use faculty_config::SyncConfig;
use faculty_core::{AppError, capabilities};
use faculty_models::{
    Permission, PermissionAction, PermissionLogEntry, Rank, SyncReport, UserId,
};
use faculty_observability::{track_missing_permission, track_rank_synchronized};
use tracing::{info, instrument, warn};

use super::store::AuthorizationStore;

/// Reconciles the store so `user_id` belongs to exactly the group for `rank`
/// and that group carries the rank's capabilities.
///
/// Call it after a rank record is created or its rank changes. Repeated calls
/// with the same rank leave the store unchanged apart from new audit entries.
///
/// Permission lookups run before anything is written: under the strict
/// policy a missing code fails the call with a configuration error and the
/// user's previous membership is left as it was. Under the skip policy the
/// code is logged, counted and listed in [`SyncReport::missing`].
///
/// The rank group is shared by every holder of the rank, so attaching a
/// permission here changes it for all of them.
#[instrument(skip(store, config, rank), fields(rank = %rank, policy = %config.missing_permission_policy))]
pub async fn synchronize<S>(
    store: &S,
    config: &SyncConfig,
    user_id: UserId,
    rank: Rank,
) -> Result<SyncReport, AppError>
where
    S: AuthorizationStore,
{
    let (resolved, missing) = resolve_capabilities(store, rank).await?;

    if !missing.is_empty() {
        if config.missing_permission_policy.is_strict() {
            return Err(AppError::configuration(anyhow!(
                "Permissions not defined for rank {}: {}. Run seed-permissions first",
                rank,
                missing.join(", ")
            )));
        }

        for codename in &missing {
            warn!(user_id = %user_id, codename = %codename, "Permission not defined, skipping");
            track_missing_permission(codename);
        }
    }

    store.clear_user_groups(user_id).await?;
    let group = store.find_or_create_group(rank.group_name()).await?;

    let mut granted = Vec::with_capacity(resolved.len());
    for permission in &resolved {
        store.ensure_group_permission(&group, permission).await?;
        store
            .record_permission_log(&PermissionLogEntry::new(
                user_id,
                PermissionAction::Granted,
                &permission.codename,
            ))
            .await?;
        granted.push(permission.codename.clone());
    }

    store.add_user_to_group(user_id, &group).await?;
    track_rank_synchronized(rank.as_str());

    info!(
        user_id = %user_id,
        group = %group.name,
        granted = granted.len(),
        missing = missing.len(),
        "Rank synchronized"
    );

    Ok(SyncReport {
        user_id,
        rank,
        group,
        granted,
        missing,
    })
}

/// Looks up every capability of `rank`, splitting them into defined
/// permissions and missing codes.
async fn resolve_capabilities<S>(
    store: &S,
    rank: Rank,
) -> Result<(Vec<Permission>, Vec<String>), AppError>
where
    S: AuthorizationStore,
{
    let mut resolved = Vec::new();
    let mut missing = Vec::new();

    for codename in rank.capabilities() {
        match store.find_permission(codename).await? {
            Some(permission) => resolved.push(permission),
            None => missing.push((*codename).to_string()),
        }
    }

    Ok((resolved, missing))
}

/// Defines every capability permission in the store. Safe to run repeatedly.
#[instrument(skip(store))]
pub async fn seed_permissions<S>(store: &S) -> Result<Vec<Permission>, AppError>
where
    S: AuthorizationStore,
{
    let mut permissions = Vec::with_capacity(capabilities::ALL.len());
    for (codename, name) in capabilities::ALL {
        permissions.push(store.register_permission(codename, name).await?);
    }

    info!(count = permissions.len(), "Capability permissions seeded");
    Ok(permissions)
}

/// The rank implied by the user's current rank group, if any.
pub async fn current_rank<S>(store: &S, user_id: UserId) -> Result<Option<Rank>, AppError>
where
    S: AuthorizationStore,
{
    let groups = store.user_groups(user_id).await?;
    Ok(groups
        .iter()
        .find_map(|group| Rank::from_group_name(&group.name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::rank_sync::memory::InMemoryAuthorizationStore;

    #[tokio::test]
    async fn test_synchronize_lecturer() {
        let store = InMemoryAuthorizationStore::seeded();
        let user = UserId::new();

        let report = synchronize(&store, &SyncConfig::default(), user, Rank::Lecturer)
            .await
            .unwrap();

        assert_eq!(report.group.name, "محاضرون");
        assert_eq!(
            report.granted,
            vec![
                capabilities::VIEW_ALL_STUDENTS.to_string(),
                capabilities::EDIT_STUDENT_GRADES.to_string()
            ]
        );
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_seed_permissions_then_strict_sync() {
        let store = InMemoryAuthorizationStore::new();
        let user = UserId::new();

        let err = synchronize(&store, &SyncConfig::strict(), user, Rank::Professor)
            .await
            .unwrap_err();
        assert_eq!(err.kind, faculty_core::ErrorKind::Configuration);

        seed_permissions(&store).await.unwrap();
        seed_permissions(&store).await.unwrap();

        let report = synchronize(&store, &SyncConfig::strict(), user, Rank::Professor)
            .await
            .unwrap();
        assert_eq!(report.granted.len(), 5);
    }

    #[tokio::test]
    async fn test_current_rank() {
        let store = InMemoryAuthorizationStore::seeded();
        let user = UserId::new();
        assert_eq!(current_rank(&store, user).await.unwrap(), None);

        synchronize(&store, &SyncConfig::default(), user, Rank::AssociateProfessor)
            .await
            .unwrap();
        assert_eq!(
            current_rank(&store, user).await.unwrap(),
            Some(Rank::AssociateProfessor)
        );
    }
}
