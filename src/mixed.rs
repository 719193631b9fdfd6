/// The first synthetic identifier handed to a Mixed-source question.
/// LeetCode's own identifiers stay well below this.
pub const MIXED_START_ID: i64 = 5001;

/// One row of the Mixed CSV export.
///
/// The exports in the wild are sloppy about headers: some carry a stray
/// trailing space on `Title`, and the link column shows up as either `Link`
/// or `link`. The aliases absorb both variants.
#[derive(Debug, serde::Deserialize)]
pub struct MixedRow {
    #[serde(rename = "Title", alias = "Title ")]
    pub title: Option<String>,
    #[serde(rename = "Link", alias = "link")]
    pub link: Option<String>,
    #[serde(rename = "Topics")]
    pub topics: Option<String>,
    #[serde(rename = "is_kodnest150")]
    pub is_kodnest150: Option<String>,
    #[serde(rename = "is_Final450")]
    pub is_final450: Option<String>,
    #[serde(rename = "is_AlgoPrep150")]
    pub is_algoprep150: Option<String>,
}

/// Imports the Mixed CSV export, deduplicating by URL against questions that
/// were already migrated from LeetCode.
///
/// `next_id` seeds the synthetic identifier sequence (normally
/// [`MIXED_START_ID`]); the advanced counter is returned so a later import
/// in the same run could continue from it. Per-row failures are logged and
/// skipped, same as the LeetCode import.
pub async fn import_mixed(
    pool: &SqlitePool,
    path: &Path,
    mut next_id: i64,
    failures: &mut FailureLog,
) -> anyhow::Result<i64> {
    println!("Importing Mixed questions from '{}'...", path.display());

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Could not open Mixed CSV at '{}'", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut count: u64 = 0;
    for (index, result) in reader.records().enumerate() {
        let row_number = index + 1;
        let record =
            result.with_context(|| format!("Failed to read Mixed CSV row #{}", row_number))?;

        match import_mixed_row(pool, &headers, &record, next_id).await {
            Ok(used_synthetic_id) => {
                if used_synthetic_id {
                    next_id += 1;
                }
                count += 1;
                if count % 50 == 0 {
                    println!("  ...{} Mixed rows imported", count);
                }
            }
            Err(e) => {
                eprintln!("Row #{} caused an error: {:?}", row_number, e);
                eprintln!("Row data: {:?}", record);
                failures.push(&headers, &record);
            }
        }
    }

    println!("Imported {} Mixed rows.", count);
    Ok(next_id)
}

/// Returns whether the row consumed `next_id`. A row whose URL already
/// exists reuses the existing question and leaves the counter alone.
async fn import_mixed_row(
    pool: &SqlitePool,
    headers: &StringRecord,
    record: &StringRecord,
    next_id: i64,
) -> anyhow::Result<bool> {
    let row: MixedRow = record
        .deserialize(Some(headers))
        .context("Row does not match the Mixed export columns")?;

    let url = row
        .link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .context("Row has no Link value")?;

    let mut used_synthetic_id = false;
    let question_id = match find_question_by_url(pool, url).await? {
        // Already migrated via the LeetCode path; attach to it.
        Some(existing_id) => existing_id,
        None => {
            let title = row
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .context("Row has no Title value")?;

            let question_id = insert_question(
                pool,
                &NewQuestion {
                    title,
                    url: Some(url),
                    source: "Mixed",
                    question_id: Some(next_id),
                    ..NewQuestion::default()
                },
            )
            .await?;
            used_synthetic_id = true;
            question_id
        }
    };

    if let Some(topics) = &row.topics {
        for topic in topics.split(',') {
            if let Some(category_id) = get_or_create_category(pool, topic).await? {
                link_category(pool, question_id, category_id).await?;
            }
        }
    }

    let sheet_flags = [
        (row.is_kodnest150.as_deref(), "Kodnest150"),
        (row.is_final450.as_deref(), "Final450"),
        (row.is_algoprep150.as_deref(), "AlgoPrep150"),
    ];
    for (flag, sheet_name) in sheet_flags {
        if flag == Some("1") {
            if let Some(sheet_id) = get_or_create_sheet(pool, sheet_name, Some("Mixed")).await? {
                link_sheet(pool, question_id, sheet_id).await?;
            }
        }
    }

    Ok(used_synthetic_id)
}

use crate::db::{
    NewQuestion, find_question_by_url, get_or_create_category, get_or_create_sheet,
    insert_question, link_category, link_sheet,
};
use crate::failures::FailureLog;
use anyhow::Context;
use csv::StringRecord;
use sqlx::SqlitePool;
use std::path::Path;
