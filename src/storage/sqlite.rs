use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::error::Result;
use crate::models::AnalysisRecord;

/// Handle to the analysis history database. The connection is released when
/// the handle is closed or dropped.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS analysis (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                resume_name TEXT NOT NULL,
                job_name TEXT NOT NULL,
                score REAL NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_analysis_created_at ON analysis(created_at);
            "#,
        )?;

        Ok(())
    }

    /// Appends a record stamped with the current time. `score` is the
    /// normalized final score and is clamped to [0, 1].
    pub fn insert_analysis(&self, resume_name: &str, job_name: &str, score: f64) -> Result<AnalysisRecord> {
        self.insert_analysis_at(resume_name, job_name, score, Utc::now())
    }

    pub fn insert_analysis_at(
        &self,
        resume_name: &str,
        job_name: &str,
        score: f64,
        created_at: DateTime<Utc>,
    ) -> Result<AnalysisRecord> {
        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };

        self.conn.execute(
            r#"
            INSERT INTO analysis (resume_name, job_name, score, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                resume_name,
                job_name,
                score,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Stored analysis {} for {} against {}", id, resume_name, job_name);

        Ok(AnalysisRecord {
            id,
            resume_name: resume_name.to_string(),
            job_name: job_name.to_string(),
            score,
            created_at,
        })
    }

    /// All records, newest first.
    pub fn fetch_all_analysis(&self) -> Result<Vec<AnalysisRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, resume_name, job_name, score, created_at
            FROM analysis
            ORDER BY created_at DESC, id DESC
            "#,
        )?;

        let records = stmt.query_map([], record_from_row)?;
        records.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Records whose resume or job name contains `term`, ignoring case.
    /// A blank term matches everything.
    pub fn search_analysis(&self, term: &str) -> Result<Vec<AnalysisRecord>> {
        let records = self.fetch_all_analysis()?;
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|r| {
                r.resume_name.to_lowercase().contains(&term) || r.job_name.to_lowercase().contains(&term)
            })
            .collect())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analysis", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
    let created_at_str: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(AnalysisRecord {
        id: row.get(0)?,
        resume_name: row.get(1)?,
        job_name: row.get(2)?,
        score: row.get(3)?,
        created_at,
    })
}
