//! In-memory observation store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use super::{check_storable, sort_recent_first, HashtagFilter, ObservationStore, RecordUpdate};
use crate::error::{Error, Result};
use crate::models::{normalize_hashtag, HashtagKey, HashtagRecord, Observation, Platform};

#[derive(Default)]
struct Tables {
    records: HashMap<HashtagKey, HashtagRecord>,
    observations: HashMap<HashtagKey, Vec<Observation>>,
}

/// In-memory implementation of [`ObservationStore`]
///
/// Records and histories share one lock, so each call sees a consistent state.
#[derive(Default)]
pub struct MemoryObservationStore {
    tables: RwLock<Tables>,
}

impl MemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::LockPoisoned("memory store"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::LockPoisoned("memory store"))
    }
}

impl ObservationStore for MemoryObservationStore {
    fn record_observation(
        &self,
        key: &HashtagKey,
        observation: &Observation,
        update: &RecordUpdate<'_>,
    ) -> Result<HashtagRecord> {
        let mut tables = self.write()?;

        let mut history = tables.observations.get(key).cloned().unwrap_or_default();
        history.push(observation.clone());

        // Nothing is written until the update and the range checks pass.
        let record = update(tables.records.get(key).cloned(), &history)?;
        check_storable(key, &record, observation)?;

        tables.records.insert(key.clone(), record.clone());
        tables.observations.insert(key.clone(), history);
        Ok(record)
    }

    fn get_hashtag(&self, key: &HashtagKey) -> Result<Option<HashtagRecord>> {
        Ok(self.read()?.records.get(key).cloned())
    }

    fn find_hashtag(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
    ) -> Result<Option<HashtagRecord>> {
        let hashtag = normalize_hashtag(hashtag);
        let tables = self.read()?;

        let mut matches: Vec<HashtagRecord> = tables
            .records
            .values()
            .filter(|r| r.hashtag == hashtag && platform.is_none_or(|p| r.platform == p))
            .cloned()
            .collect();
        sort_recent_first(&mut matches);

        Ok(matches.into_iter().next())
    }

    fn observations(
        &self,
        key: &HashtagKey,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Observation>> {
        let tables = self.read()?;
        let history = tables
            .observations
            .get(key)
            .map(|obs| {
                obs.iter()
                    .filter(|o| since.is_none_or(|s| o.timestamp >= s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(history)
    }

    fn list_hashtags(&self, filter: &HashtagFilter) -> Result<Vec<HashtagRecord>> {
        let mut records: Vec<HashtagRecord> = self
            .read()?
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_recent_first(&mut records);

        Ok(records)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.records.len())
    }
}
