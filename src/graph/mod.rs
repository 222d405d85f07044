//! Graph module linking people to the works they are credited in
//!
//! This module contains:
//! - The `GraphSink` capability the crawler hands person records to
//! - An in-memory `Graph` for embedding the crawler without a database
//! - A SQLite-backed `SqliteGraph` for persistent output

mod schema;
mod sqlite;

pub use sqlite::SqliteGraph;

use crate::crawler::PersonRecord;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur while recording into a graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid record for {url}: {reason}")]
    InvalidRecord { url: String, reason: String },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Receives person records as the crawl produces them
///
/// Adding the same person twice replaces the earlier node and its credit
/// edges.
pub trait GraphSink {
    fn add_person(&mut self, record: &PersonRecord) -> GraphResult<()>;
}

/// A person node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNode {
    pub name: String,
    pub birthdate: Option<NaiveDate>,

    /// Credited work URLs in document order, duplicates kept
    pub works: Vec<String>,
}

/// In-memory person/work graph
#[derive(Debug, Default)]
pub struct Graph {
    people: HashMap<String, PersonNode>,

    /// Work URL to the people credited in it
    works: HashMap<String, BTreeSet<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(&self, url: &str) -> Option<&PersonNode> {
        self.people.get(url)
    }

    /// People credited in the work at `url`, sorted by URL
    pub fn credited_in(&self, url: &str) -> Vec<&str> {
        self.works
            .get(url)
            .map(|people| people.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn work_count(&self) -> usize {
        self.works.len()
    }

    /// Number of distinct person-to-work edges
    pub fn credit_count(&self) -> usize {
        self.works.values().map(BTreeSet::len).sum()
    }

    fn unlink(&mut self, person_url: &str, works: &[String]) {
        for work in works {
            if let Some(people) = self.works.get_mut(work) {
                people.remove(person_url);
                if people.is_empty() {
                    self.works.remove(work);
                }
            }
        }
    }
}

impl GraphSink for Graph {
    fn add_person(&mut self, record: &PersonRecord) -> GraphResult<()> {
        validate_record(record)?;

        if let Some(previous) = self.people.remove(&record.url) {
            tracing::debug!("Replacing person {}", record.url);
            self.unlink(&record.url, &previous.works);
        }

        for work in &record.work_urls {
            self.works
                .entry(work.clone())
                .or_default()
                .insert(record.url.clone());
        }

        self.people.insert(
            record.url.clone(),
            PersonNode {
                name: record.name.clone(),
                birthdate: record.birthdate,
                works: record.work_urls.clone(),
            },
        );

        Ok(())
    }
}

/// Rejects records no sink can key
pub(crate) fn validate_record(record: &PersonRecord) -> GraphResult<()> {
    if record.url.is_empty() {
        return Err(GraphError::InvalidRecord {
            url: record.url.clone(),
            reason: "person URL is empty".to_string(),
        });
    }
    Ok(())
}
