//! SQLite observation store

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::{check_storable, HashtagFilter, ObservationStore, RecordUpdate, MAX_STORED_COUNT};
use crate::error::{Error, Result};
use crate::models::{
    AggregateMetrics, Category, HashtagKey, HashtagMetadata, HashtagRecord, Observation, Platform,
    SentimentSummary,
};

const RECORD_COLUMNS: &str = "hashtag, platform, category, mentions, likes, shares, comments, \
     views, engagement_rate, reach, positive_count, negative_count, neutral_count, \
     overall_score, trending_score, first_seen, last_updated, total_mentions, peak_mentions, \
     peak_date";

/// SQLite implementation of [`ObservationStore`]
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection. Every
/// trait call holds the lock for its whole duration, so a single call sees
/// one consistent state of the database.
pub struct SqliteObservationStore {
    conn: Mutex<Connection>,
}

impl SqliteObservationStore {
    /// Open or create a database file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self::with_connection(conn)?;
        tracing::info!(path = %path.display(), "SQLite observation store initialized");
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::LockPoisoned("sqlite connection"))
    }

    fn create_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS hashtags (
                    hashtag TEXT NOT NULL,
                    platform TEXT NOT NULL,
                    category TEXT NOT NULL DEFAULT 'other',
                    mentions INTEGER NOT NULL DEFAULT 0,
                    likes INTEGER NOT NULL DEFAULT 0,
                    shares INTEGER NOT NULL DEFAULT 0,
                    comments INTEGER NOT NULL DEFAULT 0,
                    views INTEGER NOT NULL DEFAULT 0,
                    engagement_rate REAL NOT NULL DEFAULT 0,
                    reach INTEGER NOT NULL DEFAULT 0,
                    positive_count INTEGER NOT NULL DEFAULT 0,
                    negative_count INTEGER NOT NULL DEFAULT 0,
                    neutral_count INTEGER NOT NULL DEFAULT 0,
                    overall_score REAL NOT NULL DEFAULT 0,
                    trending_score REAL NOT NULL DEFAULT 0,
                    first_seen TEXT NOT NULL,
                    last_updated TEXT NOT NULL,
                    total_mentions INTEGER NOT NULL DEFAULT 0,
                    peak_mentions INTEGER NOT NULL DEFAULT 0,
                    peak_date TEXT,
                    PRIMARY KEY (hashtag, platform)
                );

                CREATE INDEX IF NOT EXISTS idx_hashtags_last_updated
                    ON hashtags(last_updated);

                CREATE INDEX IF NOT EXISTS idx_hashtags_category
                    ON hashtags(category);

                CREATE TABLE IF NOT EXISTS observations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    hashtag TEXT NOT NULL,
                    platform TEXT NOT NULL,
                    timestamp TEXT NOT NULL,
                    mentions INTEGER NOT NULL,
                    engagement INTEGER NOT NULL,
                    sentiment_score REAL NOT NULL DEFAULT 0,
                    FOREIGN KEY (hashtag, platform)
                        REFERENCES hashtags(hashtag, platform) ON DELETE CASCADE
                );

                CREATE INDEX IF NOT EXISTS idx_observations_key_time
                    ON observations(hashtag, platform, timestamp);
                "#,
        )?;

        Ok(())
    }
}

/// Fixed-width RFC 3339 so that text comparison matches time order
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| {
        Error::invalid(format!(
            "count {value} exceeds the storable maximum {MAX_STORED_COUNT}"
        ))
    })
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn parse_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("bad timestamp {raw:?}: {e}")))
}

fn get_u64(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    Ok(value.max(0) as u64)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HashtagRecord> {
    let platform: String = row.get(1)?;
    let platform = Platform::parse(&platform)
        .ok_or_else(|| conversion_error(1, format!("unknown platform {platform:?}")))?;
    let category: String = row.get(2)?;
    let category = Category::parse(&category).unwrap_or_default();

    let peak_date = match row.get::<_, Option<String>>(19)? {
        Some(_) => Some(parse_ts(row, 19)?),
        None => None,
    };

    Ok(HashtagRecord {
        hashtag: row.get(0)?,
        platform,
        category,
        metrics: AggregateMetrics {
            mentions: get_u64(row, 3)?,
            likes: get_u64(row, 4)?,
            shares: get_u64(row, 5)?,
            comments: get_u64(row, 6)?,
            views: get_u64(row, 7)?,
            engagement_rate: row.get(8)?,
            reach: get_u64(row, 9)?,
        },
        sentiment: SentimentSummary {
            positive_count: get_u64(row, 10)?,
            negative_count: get_u64(row, 11)?,
            neutral_count: get_u64(row, 12)?,
            overall_score: row.get(13)?,
        },
        trending_score: row.get(14)?,
        metadata: HashtagMetadata {
            first_seen: parse_ts(row, 15)?,
            last_updated: parse_ts(row, 16)?,
            total_mentions: get_u64(row, 17)?,
            peak_mentions: get_u64(row, 18)?,
            peak_date,
        },
    })
}

fn observation_from_row(row: &Row<'_>) -> rusqlite::Result<Observation> {
    Ok(Observation {
        timestamp: parse_ts(row, 0)?,
        mentions: get_u64(row, 1)?,
        engagement: get_u64(row, 2)?,
        sentiment_score: row.get(3)?,
    })
}

fn select_record(conn: &Connection, key: &HashtagKey) -> Result<Option<HashtagRecord>> {
    let record = conn
        .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM hashtags WHERE hashtag = ?1 AND platform = ?2"),
            params![key.hashtag, key.platform.as_str()],
            record_from_row,
        )
        .optional()?;

    Ok(record)
}

fn select_observations(
    conn: &Connection,
    key: &HashtagKey,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<Observation>> {
    let mut stmt = conn.prepare(
        "SELECT timestamp, mentions, engagement, sentiment_score FROM observations
         WHERE hashtag = ?1 AND platform = ?2 AND (?3 IS NULL OR timestamp >= ?3)
         ORDER BY timestamp ASC, id ASC",
    )?;

    let observations = stmt
        .query_map(
            params![
                key.hashtag,
                key.platform.as_str(),
                since.as_ref().map(format_ts)
            ],
            observation_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(observations)
}

fn write_record(conn: &Connection, record: &HashtagRecord) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO hashtags ({RECORD_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
             ON CONFLICT(hashtag, platform) DO UPDATE SET
                category = excluded.category,
                mentions = excluded.mentions,
                likes = excluded.likes,
                shares = excluded.shares,
                comments = excluded.comments,
                views = excluded.views,
                engagement_rate = excluded.engagement_rate,
                reach = excluded.reach,
                positive_count = excluded.positive_count,
                negative_count = excluded.negative_count,
                neutral_count = excluded.neutral_count,
                overall_score = excluded.overall_score,
                trending_score = excluded.trending_score,
                first_seen = excluded.first_seen,
                last_updated = excluded.last_updated,
                total_mentions = excluded.total_mentions,
                peak_mentions = excluded.peak_mentions,
                peak_date = excluded.peak_date"
        ),
        params![
            record.hashtag,
            record.platform.as_str(),
            record.category.as_str(),
            to_i64(record.metrics.mentions)?,
            to_i64(record.metrics.likes)?,
            to_i64(record.metrics.shares)?,
            to_i64(record.metrics.comments)?,
            to_i64(record.metrics.views)?,
            record.metrics.engagement_rate,
            to_i64(record.metrics.reach)?,
            to_i64(record.sentiment.positive_count)?,
            to_i64(record.sentiment.negative_count)?,
            to_i64(record.sentiment.neutral_count)?,
            record.sentiment.overall_score,
            record.trending_score,
            format_ts(&record.metadata.first_seen),
            format_ts(&record.metadata.last_updated),
            to_i64(record.metadata.total_mentions)?,
            to_i64(record.metadata.peak_mentions)?,
            record.metadata.peak_date.as_ref().map(format_ts),
        ],
    )?;

    Ok(())
}

fn insert_observation(conn: &Connection, key: &HashtagKey, observation: &Observation) -> Result<()> {
    conn.execute(
        "INSERT INTO observations (hashtag, platform, timestamp, mentions, engagement, sentiment_score)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            key.hashtag,
            key.platform.as_str(),
            format_ts(&observation.timestamp),
            to_i64(observation.mentions)?,
            to_i64(observation.engagement)?,
            observation.sentiment_score,
        ],
    )?;

    Ok(())
}

impl ObservationStore for SqliteObservationStore {
    fn record_observation(
        &self,
        key: &HashtagKey,
        observation: &Observation,
        update: &RecordUpdate<'_>,
    ) -> Result<HashtagRecord> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let current = select_record(&tx, key)?;
        let mut history = select_observations(&tx, key, None)?;
        history.push(observation.clone());

        let record = update(current, &history)?;
        check_storable(key, &record, observation)?;

        write_record(&tx, &record)?;
        insert_observation(&tx, key, observation)?;
        tx.commit()?;

        Ok(record)
    }

    fn get_hashtag(&self, key: &HashtagKey) -> Result<Option<HashtagRecord>> {
        select_record(&*self.lock()?, key)
    }

    fn find_hashtag(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
    ) -> Result<Option<HashtagRecord>> {
        let hashtag = crate::models::normalize_hashtag(hashtag);
        let conn = self.lock()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM hashtags
                     WHERE hashtag = ?1 AND (?2 IS NULL OR platform = ?2)
                     ORDER BY last_updated DESC, platform ASC
                     LIMIT 1"
                ),
                params![hashtag, platform.map(|p| p.as_str())],
                record_from_row,
            )
            .optional()?;

        Ok(record)
    }

    fn observations(
        &self,
        key: &HashtagKey,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Observation>> {
        select_observations(&*self.lock()?, key, since)
    }

    fn list_hashtags(&self, filter: &HashtagFilter) -> Result<Vec<HashtagRecord>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(hashtag) = &filter.hashtag {
            clauses.push("hashtag = ?");
            args.push(hashtag.clone());
        }
        if let Some(platform) = filter.platform {
            clauses.push("platform = ?");
            args.push(platform.as_str().to_string());
        }
        if let Some(category) = filter.category {
            clauses.push("category = ?");
            args.push(category.as_str().to_string());
        }
        if let Some(since) = filter.updated_since {
            clauses.push("last_updated >= ?");
            args.push(format_ts(&since));
        }
        if let Some(term) = &filter.search {
            clauses.push("instr(hashtag, ?) > 0");
            args.push(term.clone());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM hashtags {where_clause}
             ORDER BY last_updated DESC, hashtag ASC, platform ASC"
        ))?;

        let records = stmt
            .query_map(params_from_iter(args.iter()), record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM hashtags", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }
}
