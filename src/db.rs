use anyhow::{Context, bail};
use sqlx::SqlitePool;

/// The fixed DDL for the question bank, in dependency order.
///
/// Every statement is `CREATE TABLE IF NOT EXISTS`, so running the migration
/// against an already-populated database is safe. The `users` and
/// `user_question_progress` tables are created here for the app that reads
/// this database; the importer itself never writes to them.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS questions (
        question_id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        url TEXT,
        source TEXT NOT NULL,
        difficulty TEXT,
        is_premium BOOLEAN DEFAULT FALSE,
        acceptance_rate REAL,
        frequency REAL,
        description TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS question_categories (
        question_id INT,
        category_id INT,
        FOREIGN KEY (question_id) REFERENCES questions (question_id),
        FOREIGN KEY (category_id) REFERENCES categories (category_id)
    )",
    "CREATE TABLE IF NOT EXISTS companies (
        company_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS question_companies (
        question_id INT,
        company_id INT,
        FOREIGN KEY (question_id) REFERENCES questions (question_id),
        FOREIGN KEY (company_id) REFERENCES companies (company_id)
    )",
    "CREATE TABLE IF NOT EXISTS sheets (
        sheet_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE,
        source TEXT
    )",
    "CREATE TABLE IF NOT EXISTS question_sheets (
        question_id INT,
        sheet_id INT,
        FOREIGN KEY (question_id) REFERENCES questions (question_id),
        FOREIGN KEY (sheet_id) REFERENCES sheets (sheet_id)
    )",
    "CREATE TABLE IF NOT EXISTS users (
        user_id TEXT PRIMARY KEY,
        leetcode_username TEXT,
        app_username TEXT,
        is_verified BOOLEAN DEFAULT FALSE,
        easy_solved INT DEFAULT 0,
        medium_solved INT DEFAULT 0,
        hard_solved INT DEFAULT 0,
        total_solved INT DEFAULT 0,
        current_streak INT DEFAULT 0,
        longest_streak INT DEFAULT 0,
        last_solved_date DATE
    )",
    "CREATE TABLE IF NOT EXISTS user_question_progress (
        user_id TEXT,
        question_id INT,
        is_solved BOOLEAN DEFAULT FALSE,
        is_starred BOOLEAN DEFAULT FALSE,
        solved_at TIMESTAMP NULL,
        PRIMARY KEY (user_id, question_id),
        FOREIGN KEY (user_id) REFERENCES users (user_id),
        FOREIGN KEY (question_id) REFERENCES questions (question_id)
    )",
];

/// Creates every table the migration touches. Must run before any import.
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create schema")?;
    }
    Ok(())
}

/// A question row waiting to be inserted.
///
/// Only `title` and `source` are mandatory; everything else maps to a
/// nullable column. When `question_id` is `None` the store assigns one.
#[derive(Debug, Default)]
pub struct NewQuestion<'a> {
    pub title: &'a str,
    pub url: Option<&'a str>,
    pub source: &'a str,
    pub difficulty: Option<&'a str>,
    pub premium: bool,
    pub acceptance: Option<f64>,
    pub frequency: Option<f64>,
    pub question_id: Option<i64>,
}

/// Inserts a question and returns its identifier, either the explicit one
/// supplied by the caller or the one the store generated.
pub async fn insert_question(
    pool: &SqlitePool,
    question: &NewQuestion<'_>,
) -> anyhow::Result<i64> {
    if question.title.trim().is_empty() {
        bail!("Question title is empty");
    }

    let query = if let Some(question_id) = question.question_id {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions (question_id, title, url, source, difficulty, is_premium, acceptance_rate, frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING question_id
            "#,
        )
        .bind(question_id)
    } else {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions (title, url, source, difficulty, is_premium, acceptance_rate, frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING question_id
            "#,
        )
    };

    let assigned_id = query
        .bind(question.title)
        .bind(question.url)
        .bind(question.source)
        .bind(question.difficulty)
        .bind(question.premium)
        .bind(question.acceptance)
        .bind(question.frequency)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to insert question: {}", question.title))?;

    Ok(assigned_id)
}

/// Looks up a question by its exact URL.
///
/// Returns `Ok(None)` when no question with that URL has been imported yet.
pub async fn find_question_by_url(pool: &SqlitePool, url: &str) -> anyhow::Result<Option<i64>> {
    sqlx::query_scalar::<_, i64>("SELECT question_id FROM questions WHERE url = ?")
        .bind(url)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to look up question by url: {}", url))
}

/// Finds a category by name, creating it on first reference.
///
/// Returns `Ok(None)` for a blank name so callers can skip the association.
/// The select-then-insert pair is not atomic; the migration is strictly
/// single-threaded, so the race between them cannot occur.
pub async fn get_or_create_category(
    pool: &SqlitePool,
    name: &str,
) -> anyhow::Result<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT category_id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to look up category: {}", name))?;
    if let Some(category_id) = existing {
        return Ok(Some(category_id));
    }

    sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to insert category: {}", name))?;

    let category_id =
        sqlx::query_scalar::<_, i64>("SELECT category_id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to re-fetch category: {}", name))?;

    Ok(Some(category_id))
}

/// Finds a company by name, creating it on first reference.
/// Same contract as [`get_or_create_category`].
pub async fn get_or_create_company(
    pool: &SqlitePool,
    name: &str,
) -> anyhow::Result<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT company_id FROM companies WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await
            .with_context(|| format!("Failed to look up company: {}", name))?;
    if let Some(company_id) = existing {
        return Ok(Some(company_id));
    }

    sqlx::query("INSERT INTO companies (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to insert company: {}", name))?;

    let company_id =
        sqlx::query_scalar::<_, i64>("SELECT company_id FROM companies WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
            .with_context(|| format!("Failed to re-fetch company: {}", name))?;

    Ok(Some(company_id))
}

/// Finds a sheet by name, creating it on first reference.
///
/// `source` labels which export the sheet came from ("LeetCode" or "Mixed")
/// and is only written when the sheet is first created.
pub async fn get_or_create_sheet(
    pool: &SqlitePool,
    name: &str,
    source: Option<&str>,
) -> anyhow::Result<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT sheet_id FROM sheets WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to look up sheet: {}", name))?;
    if let Some(sheet_id) = existing {
        return Ok(Some(sheet_id));
    }

    sqlx::query("INSERT INTO sheets (name, source) VALUES (?, ?)")
        .bind(name)
        .bind(source)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to insert sheet: {}", name))?;

    let sheet_id = sqlx::query_scalar::<_, i64>("SELECT sheet_id FROM sheets WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to re-fetch sheet: {}", name))?;

    Ok(Some(sheet_id))
}

pub async fn link_category(
    pool: &SqlitePool,
    question_id: i64,
    category_id: i64,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO question_categories (question_id, category_id) VALUES (?, ?)")
        .bind(question_id)
        .bind(category_id)
        .execute(pool)
        .await
        .with_context(|| {
            format!(
                "Failed to link question {} to category {}",
                question_id, category_id
            )
        })?;

    Ok(())
}

pub async fn link_company(
    pool: &SqlitePool,
    question_id: i64,
    company_id: i64,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO question_companies (question_id, company_id) VALUES (?, ?)")
        .bind(question_id)
        .bind(company_id)
        .execute(pool)
        .await
        .with_context(|| {
            format!(
                "Failed to link question {} to company {}",
                question_id, company_id
            )
        })?;

    Ok(())
}

pub async fn link_sheet(
    pool: &SqlitePool,
    question_id: i64,
    sheet_id: i64,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO question_sheets (question_id, sheet_id) VALUES (?, ?)")
        .bind(question_id)
        .bind(sheet_id)
        .execute(pool)
        .await
        .with_context(|| {
            format!(
                "Failed to link question {} to sheet {}",
                question_id, sheet_id
            )
        })?;

    Ok(())
}
