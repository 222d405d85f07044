//! Database schema for the person/work graph

/// SQL schema for the graph database
pub const SCHEMA_SQL: &str = r#"
-- People analyzed from person pages
CREATE TABLE IF NOT EXISTS people (
    url TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    birthdate TEXT,
    recorded_at TEXT NOT NULL
);

-- Works referenced from filmography tables
CREATE TABLE IF NOT EXISTS works (
    url TEXT PRIMARY KEY,
    first_seen_at TEXT NOT NULL
);

-- Person to work edges; position is the first place the work was listed
CREATE TABLE IF NOT EXISTS credits (
    person_url TEXT NOT NULL REFERENCES people(url) ON DELETE CASCADE,
    work_url TEXT NOT NULL REFERENCES works(url),
    position INTEGER NOT NULL,
    UNIQUE(person_url, work_url)
);

CREATE INDEX IF NOT EXISTS idx_credits_person ON credits(person_url);
CREATE INDEX IF NOT EXISTS idx_credits_work ON credits(work_url);
"#;

/// Creates any missing tables
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
