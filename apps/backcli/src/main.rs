// apps/backcli/src/main.rs

use clap::{Arg, ArgAction, ArgMatches, Command};
use sqlx::{migrate::Migrator, MySqlPool};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use user_lib::repository::UserRepository;
use user_lib::seed::{parse_seed_document, seed_users};
use user_lib::user_service::UserService;
use user_lib::util::connect_with_retry;

const MIGRATIONS_PATH: &str = "./libs/user-lib/migrations";

fn cli() -> Command {
    Command::new("backcli")
        .about("Users service maintenance utility")
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Apply the users table migrations"),
        )
        .arg(
            Arg::new("clear")
                .long("clear")
                .action(ArgAction::SetTrue)
                .help("Delete every stored user"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("PATH")
                .help("Create the users listed in a JSON array file, skipping existing usernames"),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u32))
                .default_value("10")
                .help("Database connection attempts before giving up"),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = cli().get_matches();

    if let Err(e) = run(&matches).await {
        tracing::error!(error = %e, "backcli failed");
        process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let migrations = matches.get_flag("migrations");
    let clear = matches.get_flag("clear");
    let seed_path = matches.get_one::<String>("seed");

    if !migrations && !clear && seed_path.is_none() {
        cli().print_help()?;
        return Ok(());
    }

    let db_url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let retries = matches.get_one::<u32>("retries").copied().unwrap_or(10);
    let pool = connect_with_retry(&db_url, retries).await?;

    if migrations {
        run_user_lib_migrations(&pool).await?;
    }

    let service = UserService::new(UserRepository::new(pool));

    if clear {
        let removed = service.clear_users().await?;
        tracing::info!(removed, "users cleared");
    }

    if let Some(path) = seed_path {
        let document = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read seed file {}: {}", path, e))?;
        let payloads = parse_seed_document(&document)?;
        let report = seed_users(&service, &payloads).await?;
        tracing::info!(created = ?report.created, skipped = ?report.skipped, "seed applied");
    }

    Ok(())
}

async fn run_user_lib_migrations(pool: &MySqlPool) -> Result<(), Box<dyn std::error::Error>> {
    let migrator = Migrator::new(Path::new(MIGRATIONS_PATH)).await?;

    tracing::info!(path = MIGRATIONS_PATH, "running user-lib migrations");
    migrator.run(pool).await?;
    tracing::info!("migrations applied successfully");

    Ok(())
}
