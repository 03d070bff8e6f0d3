//! Command handlers behind `faculty-cli`.
//!
//! Database commands take a [`PgPool`]; the formatting commands are pure and
//! return the text to print so they run without any configuration.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use faculty_config::{DatabaseConfig, SyncConfig};
use faculty_core::{AppError, capabilities};
use faculty_db::{init_db_pool, run_migrations};
use faculty_models::{CreateTextEntryDto, PermissionLogEntry, Rank, SyncReport, TextEntry, UserId};
use faculty_observability::track_keywords_highlighted;

use crate::modules::formatting::{highlight, relative, relative_or_passthrough};
use crate::modules::rank_sync::{
    AuthorizationStore, InMemoryAuthorizationStore, PgAuthorizationStore, current_rank,
    seed_permissions, synchronize,
};
use crate::modules::reverser::TextEntryService;

/// What the binary prints and how it exits once a command has run.
///
/// Rendered metrics go to stdout on success and on failure, so a failed
/// strict synchronization still shows its `missing_permissions_total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub stdout: Vec<String>,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CommandOutcome {
    pub fn new(result: Result<String, AppError>, metrics: Option<String>) -> Self {
        let (mut stdout, stderr, exit_code) = match result {
            Ok(output) => (vec![output], None, 0),
            Err(e) => (Vec::new(), Some(format!("❌ {}", e)), e.kind.exit_code()),
        };
        stdout.extend(metrics);

        Self {
            stdout,
            stderr,
            exit_code,
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Connects using `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
pub async fn connect() -> Result<PgPool, AppError> {
    let config = DatabaseConfig::from_env().map_err(AppError::configuration)?;
    init_db_pool(&config).await.map_err(AppError::database)
}

pub async fn handle_migrate(pool: &PgPool) -> Result<String, AppError> {
    run_migrations(pool).await.map_err(AppError::database)?;
    Ok("✅ Migrations applied".to_string())
}

pub async fn handle_seed_permissions(pool: &PgPool, json: bool) -> Result<String, AppError> {
    let store = PgAuthorizationStore::new(pool.clone());
    let permissions = seed_permissions(&store).await?;

    if json {
        return to_json(&permissions);
    }

    let mut out = format!("✅ {} permissions defined", permissions.len());
    for permission in &permissions {
        out.push_str(&format!("\n   {} ({})", permission.codename, permission.name));
    }
    Ok(out)
}

/// Synchronizes against `store`; pass an [`InMemoryAuthorizationStore`] for a
/// dry run.
pub async fn handle_sync_rank<S>(
    store: &S,
    config: &SyncConfig,
    user_id: UserId,
    rank: Rank,
    json: bool,
) -> Result<String, AppError>
where
    S: AuthorizationStore,
{
    let report = synchronize(store, config, user_id, rank).await?;

    if json {
        return to_json(&report);
    }
    Ok(render_sync_report(&report))
}

/// Dry run against a fresh store holding every capability permission.
pub async fn handle_sync_rank_dry_run(
    config: &SyncConfig,
    user_id: UserId,
    rank: Rank,
    json: bool,
) -> Result<String, AppError> {
    let store = InMemoryAuthorizationStore::seeded();
    handle_sync_rank(&store, config, user_id, rank, json).await
}

pub fn render_sync_report(report: &SyncReport) -> String {
    let mut out = format!(
        "✅ {} synchronized as {} ({})",
        report.user_id,
        report.rank.display_name(),
        report.group.name
    );
    for codename in &report.granted {
        out.push_str(&format!("\n   + {codename}"));
    }
    for codename in &report.missing {
        out.push_str(&format!("\n   ! {codename} (not defined, skipped)"));
    }
    out
}

#[derive(Debug, Serialize)]
struct UserPermissionsView {
    user_id: UserId,
    rank: Option<Rank>,
    groups: Vec<String>,
    permissions: Vec<String>,
}

pub async fn handle_user_permissions(
    pool: &PgPool,
    user_id: UserId,
    json: bool,
) -> Result<String, AppError> {
    let store = PgAuthorizationStore::new(pool.clone());
    let view = UserPermissionsView {
        user_id,
        rank: current_rank(&store, user_id).await?,
        groups: store
            .user_groups(user_id)
            .await?
            .into_iter()
            .map(|group| group.name)
            .collect(),
        permissions: store.user_permission_codes(user_id).await?,
    };

    if json {
        return to_json(&view);
    }

    let rank = view
        .rank
        .map(|rank| rank.display_name().to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut out = format!("User: {}\nRank: {}\nGroups: {}", user_id, rank, view.groups.join(", "));
    for codename in &view.permissions {
        out.push_str(&format!("\n   {codename}"));
    }
    Ok(out)
}

pub async fn handle_permission_log(
    pool: &PgPool,
    user_id: UserId,
    json: bool,
) -> Result<String, AppError> {
    let store = PgAuthorizationStore::new(pool.clone());
    let entries = store.permission_logs(user_id).await?;

    if json {
        return to_json(&entries);
    }
    Ok(render_permission_log(&entries))
}

fn render_permission_log(entries: &[PermissionLogEntry]) -> String {
    if entries.is_empty() {
        return "No permission changes recorded".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}  {}  {}",
                entry.created_at.to_rfc3339(),
                entry.action,
                entry.permission
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct CapabilityRow {
    pub rank: Rank,
    pub group: &'static str,
    pub capabilities: Vec<&'static str>,
}

pub fn capability_rows(rank: Option<Rank>) -> Vec<CapabilityRow> {
    let ranks: Vec<Rank> = match rank {
        Some(rank) => vec![rank],
        None => Rank::ALL.to_vec(),
    };

    ranks
        .into_iter()
        .map(|rank| CapabilityRow {
            rank,
            group: rank.group_name(),
            capabilities: rank.capabilities().to_vec(),
        })
        .collect()
}

pub fn handle_capabilities(rank: Option<Rank>, json: bool) -> Result<String, AppError> {
    let rows = capability_rows(rank);
    if json {
        return to_json(&rows);
    }

    let mut out = String::new();
    for row in &rows {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})", row.rank.display_name(), row.group));
        for code in &row.capabilities {
            let name = capabilities::display_name(code).unwrap_or(*code);
            out.push_str(&format!("\n   {code}  {name}"));
        }
    }
    Ok(out)
}

pub fn handle_highlight(text: &str, keywords: &[String], json: bool) -> Result<String, AppError> {
    let highlighted = highlight(text, keywords);
    track_keywords_highlighted(highlighted.total_matches());

    if json {
        return to_json(&highlighted);
    }
    Ok(highlighted.render())
}

/// Humanizes `value` against `now` (RFC 3339, defaults to the current time).
/// Values that are not timestamps are echoed back.
pub fn handle_relative(value: &str, now: Option<&str>) -> Result<String, AppError> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|now| now.with_timezone(&Utc))
            .map_err(|e| AppError::bad_request(anyhow!("Invalid --now timestamp: {e}")))?,
        None => Utc::now(),
    };

    Ok(relative_or_passthrough(value, now))
}

pub async fn handle_reverse(pool: &PgPool, text: &str, json: bool) -> Result<String, AppError> {
    let entry = TextEntryService::create_entry(pool, CreateTextEntryDto::new(text)).await?;

    if json {
        return to_json(&entry);
    }
    Ok(format!("{}\n{}", entry.original_text, entry.reversed_text))
}

pub async fn handle_history(
    pool: &PgPool,
    limit: Option<i64>,
    all: bool,
    json: bool,
) -> Result<String, AppError> {
    let entries = if all {
        TextEntryService::all_entries(pool).await?
    } else {
        TextEntryService::recent_entries(pool, limit).await?
    };

    if json {
        return to_json(&entries);
    }
    Ok(render_history(&entries, Utc::now()))
}

pub fn render_history(entries: &[TextEntry], now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No text entries yet".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}  {} → {}",
                relative(entry.created_at, now),
                entry.preview(),
                entry.reversed_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_capability_rows_for_all_ranks() {
        let rows = capability_rows(None);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].capabilities.len(), 2);
        assert_eq!(rows[3].capabilities.len(), 5);
    }

    #[test]
    fn test_handle_relative_with_fixed_now() {
        let out = handle_relative("2025-03-01T11:00:00Z", Some("2025-03-01T12:00:00Z")).unwrap();
        assert_eq!(out, "منذ 1 ساعة");
    }

    #[test]
    fn test_handle_relative_rejects_bad_now() {
        let err = handle_relative("2025-03-01T11:00:00Z", Some("noon")).unwrap_err();
        assert_eq!(err.kind, faculty_core::ErrorKind::BadRequest);
    }

    #[test]
    fn test_render_history_uses_relative_time() {
        let now = Utc::now();
        let mut entry = TextEntry::new("abc");
        entry.created_at = now - Duration::minutes(3);

        let out = render_history(&[entry], now);
        assert_eq!(out, "منذ 3 دقيقةات  abc → cba");
    }

    #[test]
    fn test_outcome_success_prints_output_then_metrics() {
        let outcome = CommandOutcome::new(Ok("done".to_string()), Some("metrics".to_string()));
        assert_eq!(outcome.stdout, vec!["done".to_string(), "metrics".to_string()]);
        assert_eq!(outcome.stderr, None);
        assert_eq!(outcome.exit_code, 0);
    }

    #[tokio::test]
    async fn test_outcome_failure_still_prints_metrics() {
        let store = InMemoryAuthorizationStore::new();
        let result =
            handle_sync_rank(&store, &SyncConfig::strict(), UserId::new(), Rank::Lecturer, false)
                .await;

        let outcome = CommandOutcome::new(
            result,
            Some("missing_permissions_total 0".to_string()),
        );
        assert_eq!(outcome.stdout, vec!["missing_permissions_total 0".to_string()]);
        assert!(outcome.stderr.unwrap().starts_with("❌ configuration: "));
        assert_eq!(outcome.exit_code, 78);
    }

    #[tokio::test]
    async fn test_dry_run_sync_reports_every_capability() {
        let out = handle_sync_rank_dry_run(&SyncConfig::default(), UserId::new(), Rank::Professor, false)
            .await
            .unwrap();
        assert!(out.contains("أساتذة"));
        assert_eq!(out.matches("\n   + ").count(), 5);
    }
}
