pub mod documents;
pub mod filters;
pub mod models;
pub mod repositories;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Turns a bare SQLite path into a DSN; anything that already looks like a DSN is kept.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_string()
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

/// Opens the relational store named by `DATABASE_PATH`.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = database_url(&config::database_path());
    Database::connect(&url).await
}
