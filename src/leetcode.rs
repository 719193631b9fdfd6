// src/leetcode.rs

/// Relative URLs in the export are joined onto this domain.
const LEETCODE_DOMAIN: &str = "https://leetcode.com";

/// One row of the LeetCode CSV export, keyed by the export's column headers.
#[derive(Debug, serde::Deserialize)]
pub struct LeetCodeRow {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: Option<String>,
    #[serde(rename = "Is Premium")]
    pub is_premium: Option<String>,
    #[serde(rename = "Acceptance %")]
    pub acceptance: Option<String>,
    #[serde(rename = "Frequency %")]
    pub frequency: Option<String>,
    #[serde(rename = "Topics")]
    pub topics: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "is_Blind75")]
    pub is_blind75: Option<String>,
    #[serde(rename = "is_neetCode150")]
    pub is_neetcode150: Option<String>,
}

/// Imports the LeetCode CSV export row by row.
///
/// A bad row is reported, pushed onto the failure log, and skipped; the
/// import only returns an error for problems outside a single row, such as
/// an unreadable file.
pub async fn import_leetcode(
    pool: &SqlitePool,
    path: &Path,
    failures: &mut FailureLog,
) -> anyhow::Result<()> {
    println!("Importing LeetCode questions from '{}'...", path.display());

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Could not open LeetCode CSV at '{}'", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut count: u64 = 0;
    for (index, result) in reader.records().enumerate() {
        let row_number = index + 1;
        let record = result
            .with_context(|| format!("Failed to read LeetCode CSV row #{}", row_number))?;

        match import_leetcode_row(pool, &headers, &record).await {
            Ok(()) => {
                count += 1;
                if count % 50 == 0 {
                    println!("  ...{} LeetCode rows imported", count);
                }
            }
            Err(e) => {
                eprintln!("Row #{} caused an error: {:?}", row_number, e);
                eprintln!("Row data: {:?}", record);
                failures.push(&headers, &record);
            }
        }
    }

    println!("Imported {} LeetCode rows.", count);
    Ok(())
}

async fn import_leetcode_row(
    pool: &SqlitePool,
    headers: &StringRecord,
    record: &StringRecord,
) -> anyhow::Result<()> {
    let row: LeetCodeRow = record
        .deserialize(Some(headers))
        .context("Row does not match the LeetCode export columns")?;

    let url = format!("{}{}", LEETCODE_DOMAIN, row.url.trim());
    let question_id = insert_question(
        pool,
        &NewQuestion {
            title: row.title.trim(),
            url: Some(&url),
            source: "LeetCode",
            difficulty: row.difficulty.as_deref(),
            premium: row.is_premium.as_deref() == Some("Y"),
            acceptance: parse_percent(row.acceptance.as_deref())?,
            frequency: parse_percent(row.frequency.as_deref())?,
            question_id: Some(row.id),
        },
    )
    .await?;

    // Topics and companies are comma-separated and not deduplicated within a
    // row; a repeated topic produces a repeated association.
    if let Some(topics) = &row.topics {
        for topic in topics.split(',') {
            if let Some(category_id) = get_or_create_category(pool, topic).await? {
                link_category(pool, question_id, category_id).await?;
            }
        }
    }

    if let Some(companies) = &row.company {
        for company in companies.split(',') {
            if let Some(company_id) = get_or_create_company(pool, company).await? {
                link_company(pool, question_id, company_id).await?;
            }
        }
    }

    if row.is_blind75.as_deref() == Some("1") {
        if let Some(sheet_id) = get_or_create_sheet(pool, "Blind75", Some("LeetCode")).await? {
            link_sheet(pool, question_id, sheet_id).await?;
        }
    }
    if row.is_neetcode150.as_deref() == Some("1") {
        if let Some(sheet_id) = get_or_create_sheet(pool, "NeetCode150", Some("LeetCode")).await? {
            link_sheet(pool, question_id, sheet_id).await?;
        }
    }

    Ok(())
}

/// Parses a percentage cell like "85.5%" into the raw number 85.5.
///
/// The value is stored exactly as parsed, not divided by 100. Blank or
/// absent cells map to `None`; anything else that fails to parse is an
/// error, which fails the row.
pub fn parse_percent(raw: Option<&str>) -> anyhow::Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = trimmed
        .trim_end_matches('%')
        .parse::<f64>()
        .with_context(|| format!("Failed to parse percentage: '{}'", raw))?;

    Ok(Some(value))
}

use crate::db::{
    NewQuestion, get_or_create_category, get_or_create_company, get_or_create_sheet,
    insert_question, link_category, link_company, link_sheet,
};
use crate::failures::FailureLog;
use anyhow::Context;
use csv::StringRecord;
use sqlx::SqlitePool;
use std::path::Path;
