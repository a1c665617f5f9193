use migration::Migrator;
use std::{env, fs, path::Path, process::ExitCode};
use util::config;

mod runner;

#[tokio::main]
async fn main() -> ExitCode {
    let db_path = config::database_path();
    let url = database_url(&db_path);
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(|s| s.as_str()) {
        Some("clean") => clean(&db_path, &url).await,
        Some("fresh") => match clean(&db_path, &url)
            .await
            .and_then(|_| create_db_dir(&db_path))
        {
            Ok(()) => migrate(&url).await,
            Err(err) => Err(err),
        },
        _ => match create_db_dir(&db_path) {
            Ok(()) => migrate(&url).await,
            Err(err) => Err(err),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn is_dsn(value: &str) -> bool {
    value.starts_with("sqlite:") || value.contains("://")
}

/// `DATABASE_PATH` may be a bare SQLite file path or a full DSN.
fn database_url(path_or_url: &str) -> String {
    if is_dsn(path_or_url) {
        path_or_url.to_string()
    } else {
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

/// Deletes the SQLite file, or rolls back every migration when given a DSN.
async fn clean(db_path: &str, url: &str) -> Result<(), String> {
    if is_dsn(db_path) {
        runner::reset_database(url)
            .await
            .map_err(|e| format!("Failed to reset database: {e}"))
    } else {
        remove_db_file(db_path)
    }
}

async fn migrate(url: &str) -> Result<(), String> {
    runner::run_all_migrations(url)
        .await
        .map_err(|e| format!("Migration failed: {e}"))
}

fn remove_db_file(path: &str) -> Result<(), String> {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).map_err(|e| format!("Failed to delete DB file: {e}"))?;
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
    Ok(())
}

fn create_db_dir(path: &str) -> Result<(), String> {
    if is_dsn(path) {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create DB directory: {e}"))?;
    }
    Ok(())
}
