use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use faculty::cli::{
    CommandOutcome, connect, handle_capabilities, handle_highlight, handle_history, handle_migrate,
    handle_permission_log, handle_relative, handle_reverse, handle_seed_permissions,
    handle_sync_rank, handle_sync_rank_dry_run, handle_user_permissions,
};
use faculty::modules::rank_sync::PgAuthorizationStore;
use faculty_config::SyncConfig;
use faculty_core::AppError;
use faculty_models::{Rank, UserId};
use faculty_observability::{init_console_logging, init_metrics};

#[derive(Parser)]
#[command(name = "faculty-cli")]
#[command(about = "Faculty CLI - Rank permissions and text formatting tools", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Define every capability permission (safe to rerun)
    SeedPermissions,
    /// Move a user into the group for their rank and grant its capabilities
    SyncRank {
        /// User UUID
        #[arg(short = 'u', long)]
        user_id: UserId,

        /// lecturer, assistant_professor, associate_professor or professor
        #[arg(short = 'r', long)]
        rank: Rank,

        /// Fail when a capability permission is not defined
        #[arg(long)]
        strict: bool,

        /// Run against an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Show a user's rank group and effective permissions
    UserPermissions {
        #[arg(short = 'u', long)]
        user_id: UserId,
    },
    /// Show the permission audit log for a user, newest first
    PermissionLog {
        #[arg(short = 'u', long)]
        user_id: UserId,
    },
    /// List the capabilities of each rank
    Capabilities {
        #[arg(short = 'r', long)]
        rank: Option<Rank>,
    },
    /// Highlight keywords in text and count their occurrences
    Highlight {
        #[arg(short = 't', long)]
        text: String,

        /// Comma-separated keywords
        #[arg(short = 'k', long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
    /// Describe an RFC 3339 timestamp relative to now, in Arabic
    Relative {
        value: String,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Reverse text and store the entry
    Reverse {
        #[arg(short = 't', long)]
        text: String,
    },
    /// List stored text entries
    History {
        /// Number of recent entries (1 to 100)
        #[arg(short = 'l', long)]
        limit: Option<i64>,

        /// List every entry
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_console_logging();

    let cli = Cli::parse();
    let metrics = if cli.print_metrics { init_metrics() } else { None };

    let result = run(cli.command, cli.json).await;
    let outcome = CommandOutcome::new(result, metrics.map(|handle| handle.render()));

    for line in &outcome.stdout {
        println!("{line}");
    }
    if let Some(error) = &outcome.stderr {
        eprintln!("{error}");
    }
    if outcome.exit_code != 0 {
        std::process::exit(outcome.exit_code);
    }
}

async fn run(command: Commands, json: bool) -> Result<String, AppError> {
    match command {
        Commands::Capabilities { rank } => handle_capabilities(rank, json),
        Commands::Highlight { text, keywords } => handle_highlight(&text, &keywords, json),
        Commands::Relative { value, now } => handle_relative(&value, now.as_deref()),
        Commands::SyncRank {
            user_id,
            rank,
            strict,
            dry_run,
        } => {
            let config = if strict {
                SyncConfig::strict()
            } else {
                SyncConfig::from_env().map_err(AppError::configuration)?
            };

            if dry_run {
                return handle_sync_rank_dry_run(&config, user_id, rank, json).await;
            }

            let pool = connect().await?;
            let store = PgAuthorizationStore::new(pool);
            handle_sync_rank(&store, &config, user_id, rank, json).await
        }
        Commands::Migrate => handle_migrate(&connect().await?).await,
        Commands::SeedPermissions => handle_seed_permissions(&connect().await?, json).await,
        Commands::UserPermissions { user_id } => {
            handle_user_permissions(&connect().await?, user_id, json).await
        }
        Commands::PermissionLog { user_id } => {
            handle_permission_log(&connect().await?, user_id, json).await
        }
        Commands::Reverse { text } => handle_reverse(&connect().await?, &text, json).await,
        Commands::History { limit, all } => {
            handle_history(&connect().await?, limit, all, json).await
        }
    }
}
