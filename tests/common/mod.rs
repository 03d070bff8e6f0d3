#[allow(unused_imports)]
use faculty::modules::rank_sync::{AuthorizationStore, InMemoryAuthorizationStore};
use faculty_models::UserId;
use sqlx::PgPool;

/// Fixed user ids so failures are easy to read.
#[allow(dead_code)]
pub mod users {
    use faculty_models::UserId;
    pub const ALICE: UserId = UserId::from_u128(0x00000000_0000_0000_0000_00000000a11c);
    pub const BOB: UserId = UserId::from_u128(0x00000000_0000_0000_0000_000000000b0b);
}

#[allow(dead_code)]
pub fn unique_user() -> UserId {
    UserId::new()
}

/// Group names the user belongs to, sorted.
#[allow(dead_code)]
pub async fn group_names<S: AuthorizationStore>(store: &S, user_id: UserId) -> Vec<String> {
    store
        .user_groups(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect()
}

#[allow(dead_code)]
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
