/// A CLI that migrates question-bank CSV exports into the tracking database.
///
/// Runs the whole pipeline in order: schema init, LeetCode import, Mixed
/// import, failure file write. Exits 0 even when individual rows failed;
/// failed rows land in the failure CSV for a later retry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the LeetCode CSV export.
    #[arg(long, default_value = "leetcode.csv")]
    leetcode: PathBuf,

    /// Path to the Mixed CSV export.
    #[arg(long, default_value = "mixed.csv")]
    mixed: PathBuf,

    /// Where to write rows that failed to import.
    #[arg(long, default_value = "failed_rows.csv")]
    failed_rows: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- Database Setup ---
    let db_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:questions.db".to_string());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(
            db_url
                .parse::<sqlx::sqlite::SqliteConnectOptions>()?
                .create_if_missing(true),
        )
        .await
        .with_context(|| format!("Could not connect to database at '{}'", db_url))?;

    println!("\n--- Creating Schema ---");
    init_schema(&pool).await?;

    // --- Imports ---
    let mut failures = FailureLog::new();

    println!("\n--- LeetCode Import ---");
    import_leetcode(&pool, &cli.leetcode, &mut failures).await?;

    println!("\n--- Mixed Import ---");
    let next_id = import_mixed(&pool, &cli.mixed, MIXED_START_ID, &mut failures).await?;
    println!("Added {} new Mixed questions.", next_id - MIXED_START_ID);

    // --- Failed Rows ---
    if failures.is_empty() {
        println!("\nNo failed rows.");
    } else {
        failures.write_csv(&cli.failed_rows)?;
        println!(
            "\n{} failed rows saved to '{}'.",
            failures.len(),
            cli.failed_rows.display()
        );
    }

    println!("\n--- Migration Finished ---");
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use qbank::db::init_schema;
use qbank::failures::FailureLog;
use qbank::leetcode::import_leetcode;
use qbank::mixed::{MIXED_START_ID, import_mixed};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
