//! Process-local authorization store.
//!
//! Backs dry runs of the CLI and the test suite. State lives behind a mutex
//! that is never held across an await point.

use anyhow::anyhow;
use faculty_core::{AppError, capabilities};
use faculty_models::{Group, GroupId, Permission, PermissionId, PermissionLogEntry, UserId};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use super::store::AuthorizationStore;

#[derive(Debug, Default)]
struct State {
    groups: Vec<Group>,
    permissions: Vec<Permission>,
    group_permissions: BTreeSet<(GroupId, PermissionId)>,
    memberships: BTreeSet<(UserId, GroupId)>,
    logs: Vec<PermissionLogEntry>,
}

impl State {
    fn codes_for_groups(&self, group_ids: &BTreeSet<GroupId>) -> Vec<String> {
        let codes: BTreeSet<&str> = self
            .group_permissions
            .iter()
            .filter(|(group_id, _)| group_ids.contains(group_id))
            .filter_map(|(_, permission_id)| {
                self.permissions
                    .iter()
                    .find(|p| p.id == *permission_id)
                    .map(|p| p.codename.as_str())
            })
            .collect();

        codes.into_iter().map(str::to_string).collect()
    }

    fn group_ids_of(&self, user_id: UserId) -> BTreeSet<GroupId> {
        self.memberships
            .iter()
            .filter(|(member, _)| *member == user_id)
            .map(|(_, group_id)| *group_id)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAuthorizationStore {
    state: Mutex<State>,
}

impl InMemoryAuthorizationStore {
    /// An empty store with no permissions defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with every capability permission already defined.
    pub fn seeded() -> Self {
        let codes: Vec<&str> = capabilities::ALL.iter().map(|(code, _)| *code).collect();
        Self::with_permissions(&codes)
    }

    /// A store with only the given permission codes defined.
    pub fn with_permissions(codenames: &[&str]) -> Self {
        let permissions = codenames
            .iter()
            .map(|&code| {
                let name = capabilities::display_name(code).unwrap_or(code);
                Permission::new(code, name)
            })
            .collect();

        Self {
            state: Mutex::new(State {
                permissions,
                ..State::default()
            }),
        }
    }

    /// Every group in the store, in creation order.
    pub fn groups(&self) -> Result<Vec<Group>, AppError> {
        Ok(self.lock()?.groups.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::internal(anyhow!("Authorization store lock poisoned")))
    }
}

impl AuthorizationStore for InMemoryAuthorizationStore {
    async fn find_or_create_group(&self, name: &str) -> Result<Group, AppError> {
        let mut state = self.lock()?;
        if let Some(group) = state.groups.iter().find(|g| g.name == name) {
            return Ok(group.clone());
        }

        let group = Group::new(name);
        state.groups.push(group.clone());
        Ok(group)
    }

    async fn find_permission(&self, codename: &str) -> Result<Option<Permission>, AppError> {
        let state = self.lock()?;
        Ok(state
            .permissions
            .iter()
            .find(|p| p.codename == codename)
            .cloned())
    }

    async fn register_permission(
        &self,
        codename: &str,
        name: &str,
    ) -> Result<Permission, AppError> {
        let mut state = self.lock()?;
        if let Some(existing) = state.permissions.iter_mut().find(|p| p.codename == codename) {
            existing.name = name.to_string();
            return Ok(existing.clone());
        }

        let permission = Permission::new(codename, name);
        state.permissions.push(permission.clone());
        Ok(permission)
    }

    async fn ensure_group_permission(
        &self,
        group: &Group,
        permission: &Permission,
    ) -> Result<(), AppError> {
        self.lock()?
            .group_permissions
            .insert((group.id, permission.id));
        Ok(())
    }

    async fn clear_user_groups(&self, user_id: UserId) -> Result<(), AppError> {
        self.lock()?
            .memberships
            .retain(|(member, _)| *member != user_id);
        Ok(())
    }

    async fn add_user_to_group(&self, user_id: UserId, group: &Group) -> Result<(), AppError> {
        self.lock()?.memberships.insert((user_id, group.id));
        Ok(())
    }

    async fn user_groups(&self, user_id: UserId) -> Result<Vec<Group>, AppError> {
        let state = self.lock()?;
        let group_ids = state.group_ids_of(user_id);
        let mut groups: Vec<Group> = state
            .groups
            .iter()
            .filter(|g| group_ids.contains(&g.id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn group_permission_codes(&self, group: &Group) -> Result<Vec<String>, AppError> {
        let state = self.lock()?;
        Ok(state.codes_for_groups(&BTreeSet::from([group.id])))
    }

    async fn user_permission_codes(&self, user_id: UserId) -> Result<Vec<String>, AppError> {
        let state = self.lock()?;
        let group_ids = state.group_ids_of(user_id);
        Ok(state.codes_for_groups(&group_ids))
    }

    async fn record_permission_log(&self, entry: &PermissionLogEntry) -> Result<(), AppError> {
        self.lock()?.logs.push(entry.clone());
        Ok(())
    }

    async fn permission_logs(&self, user_id: UserId) -> Result<Vec<PermissionLogEntry>, AppError> {
        let state = self.lock()?;
        Ok(state
            .logs
            .iter()
            .rev()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}
