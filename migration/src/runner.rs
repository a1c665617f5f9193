use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// Rolls back every applied migration.
pub async fn reset_database(url: &str) -> Result<(), DbErr> {
    let db = sea_orm::Database::connect(url).await?;
    println!("Rolling back migrations...");
    <crate::Migrator as MigratorTrait>::reset(&db).await?;
    println!("{}", "Database reset".green());
    Ok(())
}

/// Applies every pending migration, printing one status line per migration.
///
/// Migrations already recorded in `seaql_migrations` are skipped. Each step goes through
/// `Migrator::up` with a limit of one so the version table stays in sync.
pub async fn run_all_migrations(url: &str) -> Result<(), DbErr> {
    let db = sea_orm::Database::connect(url).await?;

    println!("Running migrations...");
    let pending = <crate::Migrator as MigratorTrait>::get_pending_migrations(&db).await?;
    if pending.is_empty() {
        println!("{}", "Nothing to migrate".dimmed());
        return Ok(());
    }

    for migration in &pending {
        let name = migration.name().to_string();
        let label = format!("Applying {}", name.bold());
        let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
        print!("{label}{dots} ");
        let _ = io::stdout().flush();

        let start = Instant::now();
        let outcome = std::panic::AssertUnwindSafe(crate::Migrator::up(&db, Some(1)))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Ok(Err(err)) => {
                println!("{}", "failed".red());
                return Err(err);
            }
            Err(_) => {
                println!("{}", "panicked".red());
                return Err(DbErr::Migration(format!("{name} panicked")));
            }
        }
    }

    Ok(())
}
