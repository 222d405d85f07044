//! SQLite graph implementation

use crate::crawler::PersonRecord;
use crate::graph::schema::initialize_schema;
use crate::graph::{validate_record, GraphResult, GraphSink};
use crate::scan::{parse_birthdate, BIRTHDATE_FORMAT};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed graph sink
///
/// Credits are unique per person and work, so a work URL listed twice in a
/// filmography is stored as a single edge. The in-memory [`super::Graph`]
/// keeps such repeats on the person node.
pub struct SqliteGraph {
    conn: Connection,
}

impl SqliteGraph {
    /// Opens or creates the graph database at `path`
    pub fn new(path: &Path) -> GraphResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> GraphResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Loads a person and their credits in listing order
    pub fn get_person(&self, url: &str) -> GraphResult<Option<PersonRecord>> {
        let person = self
            .conn
            .query_row(
                "SELECT name, birthdate FROM people WHERE url = ?1",
                params![url],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;

        let Some((name, birthdate)) = person else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT work_url FROM credits WHERE person_url = ?1 ORDER BY position",
        )?;
        let work_urls = stmt
            .query_map(params![url], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(Some(PersonRecord {
            url: url.to_string(),
            name,
            birthdate: birthdate.as_deref().and_then(parse_birthdate),
            work_urls,
        }))
    }

    /// URLs of the people credited in a work, sorted
    pub fn credited_in(&self, work_url: &str) -> GraphResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT person_url FROM credits WHERE work_url = ?1 ORDER BY person_url",
        )?;
        let people = stmt
            .query_map(params![work_url], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(people)
    }

    pub fn count_people(&self) -> GraphResult<u64> {
        self.count("SELECT COUNT(*) FROM people")
    }

    pub fn count_people_with_birthdate(&self) -> GraphResult<u64> {
        self.count("SELECT COUNT(*) FROM people WHERE birthdate IS NOT NULL")
    }

    pub fn count_works(&self) -> GraphResult<u64> {
        self.count("SELECT COUNT(*) FROM works")
    }

    pub fn count_credits(&self) -> GraphResult<u64> {
        self.count("SELECT COUNT(*) FROM credits")
    }

    /// Works with the most credited people, most first
    pub fn most_credited_works(&self, limit: usize) -> GraphResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT work_url, COUNT(*) AS people FROM credits
             GROUP BY work_url
             ORDER BY people DESC, work_url
             LIMIT ?1",
        )?;

        let works = stmt
            .query_map(params![limit as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(works)
    }

    fn count(&self, sql: &str) -> GraphResult<u64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl GraphSink for SqliteGraph {
    fn add_person(&mut self, record: &PersonRecord) -> GraphResult<()> {
        validate_record(record)?;

        let now = Utc::now().to_rfc3339();
        let birthdate = record
            .birthdate
            .map(|date| date.format(BIRTHDATE_FORMAT).to_string());

        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM credits WHERE person_url = ?1",
            params![record.url],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO people (url, name, birthdate, recorded_at) VALUES (?1, ?2, ?3, ?4)",
            params![record.url, record.name, birthdate, now],
        )?;

        for (position, work) in record.work_urls.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO works (url, first_seen_at) VALUES (?1, ?2)",
                params![work, now],
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO credits (person_url, work_url, position) VALUES (?1, ?2, ?3)",
                params![record.url, work, position as i64],
            )?;
        }

        tx.commit()?;

        tracing::debug!(
            "Stored {} with {} credits",
            record.url,
            record.work_urls.len()
        );
        Ok(())
    }
}
