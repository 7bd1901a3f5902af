use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::errors::MuniError;
use super::Database;
use tracing::{debug, info};

/// Logical collections of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Scores,
    Vulnerabilities,
    Risks,
    Remediation,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Scores,
        Collection::Vulnerabilities,
        Collection::Risks,
        Collection::Remediation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scores => "scores",
            Self::Vulnerabilities => "vulnerabilities",
            Self::Risks => "risks",
            Self::Remediation => "remediation",
        }
    }

    pub fn parse(s: &str) -> Result<Self, MuniError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MuniError::Config(format!("Unknown collection: {}", s)))
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`RecordStore::insert_if_absent`]. A duplicate key is not an
/// error, but callers have to look at it.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Inserted vs skipped keys for one collection during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersistStats {
    pub inserted: usize,
    pub skipped: usize,
}

impl PersistStats {
    pub fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::AlreadyExists => self.skipped += 1,
        }
    }
}

/// Insert-if-absent document persistence for one collection, keyed by
/// entity name. There is no update path: refreshing data means
/// [`clear`](Self::clear) or [`refresh`](Self::refresh).
#[derive(Clone)]
pub struct RecordStore {
    db: Database,
    collection: Collection,
}

impl RecordStore {
    pub fn new(db: &Database, collection: Collection) -> Self {
        Self { db: db.clone(), collection }
    }

    pub fn exists(&self, key: &str) -> Result<bool, MuniError> {
        let conn = self.db.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1 AND name = ?2",
                rusqlite::params![self.collection.as_str(), key],
                |row| row.get(0),
            )
            .map_err(|e| MuniError::Database(format!("Query failed: {}", e)))?;
        Ok(count > 0)
    }

    /// Store `payload` under `key` unless a document with that key exists.
    /// Check and insert are a single statement.
    pub fn insert_if_absent<T: Serialize>(&self, key: &str, payload: &T) -> Result<InsertOutcome, MuniError> {
        let json = serde_json::to_string(payload)?;
        let conn = self.db.lock()?;
        let changed = conn
            .execute(
                "INSERT OR IGNORE INTO documents (collection, name, payload, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![self.collection.as_str(), key, json, Utc::now().to_rfc3339()],
            )
            .map_err(|e| MuniError::Database(format!("Failed to insert document: {}", e)))?;

        let outcome = if changed == 0 {
            InsertOutcome::AlreadyExists
        } else {
            InsertOutcome::Inserted
        };
        debug!(collection = %self.collection, key, ?outcome, "Persist");
        Ok(outcome)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, MuniError> {
        let conn = self.db.lock()?;
        let result = conn.query_row(
            "SELECT payload FROM documents WHERE collection = ?1 AND name = ?2",
            rusqlite::params![self.collection.as_str(), key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(payload) => Ok(serde_json::from_str(&payload)?),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(MuniError::NotFound(format!(
                "No document '{}' in collection {}",
                key, self.collection
            ))),
            Err(e) => Err(MuniError::Database(format!("Query error: {}", e))),
        }
    }

    /// Raw stored payload, for display.
    pub fn get_value(&self, key: &str) -> Result<serde_json::Value, MuniError> {
        self.get(key)
    }

    /// Stored keys in insertion order.
    pub fn keys(&self) -> Result<Vec<String>, MuniError> {
        let conn = self.db.lock()?;
        let mut stmt = conn
            .prepare("SELECT name FROM documents WHERE collection = ?1 ORDER BY seq")
            .map_err(|e| MuniError::Database(format!("Query failed: {}", e)))?;
        let rows = stmt
            .query_map(rusqlite::params![self.collection.as_str()], |row| row.get::<_, String>(0))
            .map_err(|e| MuniError::Database(format!("Query error: {}", e)))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row.map_err(|e| MuniError::Database(format!("Row error: {}", e)))?);
        }
        Ok(keys)
    }

    /// Remove every document in the collection, returning how many went.
    pub fn clear(&self) -> Result<usize, MuniError> {
        let conn = self.db.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1",
                rusqlite::params![self.collection.as_str()],
            )
            .map_err(|e| MuniError::Database(format!("Failed to clear collection: {}", e)))?;
        info!(collection = %self.collection, removed, "Cleared collection");
        Ok(removed)
    }

    /// Delete one document. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool, MuniError> {
        let conn = self.db.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND name = ?2",
                rusqlite::params![self.collection.as_str(), key],
            )
            .map_err(|e| MuniError::Database(format!("Failed to remove document: {}", e)))?;
        Ok(removed > 0)
    }

    /// Remove then insert each given document, leaving every other key in
    /// the collection untouched.
    pub fn replace<T: Serialize>(&self, documents: &[(String, T)]) -> Result<PersistStats, MuniError> {
        for (key, _) in documents {
            self.remove(key)?;
        }
        self.insert_all(documents)
    }

    /// Clear the collection, then insert every document.
    pub fn refresh<T: Serialize>(&self, documents: &[(String, T)]) -> Result<PersistStats, MuniError> {
        self.clear()?;
        self.insert_all(documents)
    }

    /// Insert-if-absent for each document, tallying the outcomes.
    pub fn insert_all<T: Serialize>(&self, documents: &[(String, T)]) -> Result<PersistStats, MuniError> {
        let mut stats = PersistStats::default();
        for (key, payload) in documents {
            stats.record(self.insert_if_absent(key, payload)?);
        }
        info!(
            collection = %self.collection,
            inserted = stats.inserted,
            skipped = stats.skipped,
            "Persisted documents"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(collection: Collection) -> RecordStore {
        let db = Database::in_memory().unwrap();
        RecordStore::new(&db, collection)
    }

    #[test]
    fn test_insert_then_exists() {
        let store = store(Collection::Scores);
        assert!(!store.exists("Salem").unwrap());
        let outcome = store.insert_if_absent("Salem", &json!({"score": 700})).unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);
        assert!(store.exists("Salem").unwrap());
    }

    #[test]
    fn test_second_insert_keeps_first_document() {
        let store = store(Collection::Scores);
        let first = store.insert_if_absent("Salem", &json!({"score": 700})).unwrap();
        let second = store.insert_if_absent("Salem", &json!({"score": 10})).unwrap();
        assert_eq!(first, InsertOutcome::Inserted);
        assert_eq!(second, InsertOutcome::AlreadyExists);

        let stored: serde_json::Value = store.get("Salem").unwrap();
        assert_eq!(stored["score"], 700);
    }

    #[test]
    fn test_collections_are_independent() {
        let db = Database::in_memory().unwrap();
        let scores = RecordStore::new(&db, Collection::Scores);
        let vulns = RecordStore::new(&db, Collection::Vulnerabilities);
        assert_eq!(scores.insert_if_absent("Lynn", &1).unwrap(), InsertOutcome::Inserted);
        assert_eq!(vulns.insert_if_absent("Lynn", &2).unwrap(), InsertOutcome::Inserted);
        assert_eq!(vulns.get::<i32>("Lynn").unwrap(), 2);
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = store(Collection::Risks);
        let _ = store.insert_if_absent("A", &1).unwrap();
        let _ = store.insert_if_absent("B", &2).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(!store.exists("A").unwrap());
        assert!(!store.exists("B").unwrap());
        assert_eq!(store.clear().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = store(Collection::Remediation);
        let result = store.get::<serde_json::Value>("danversma.gov");
        assert!(matches!(result, Err(MuniError::NotFound(_))));
    }

    #[test]
    fn test_insert_all_counts_outcomes() {
        let store = store(Collection::Scores);
        let docs = vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("A".to_string(), 3),
        ];
        let stats = store.insert_all(&docs).unwrap();
        assert_eq!(stats, PersistStats { inserted: 2, skipped: 1 });
        assert_eq!(store.keys().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_refresh_replaces_stale_documents() {
        let store = store(Collection::Risks);
        let _ = store.insert_if_absent("A", &1).unwrap();
        let stats = store.refresh(&[("A".to_string(), 5)]).unwrap();
        assert_eq!(stats.inserted, 1);
        assert_eq!(store.get::<i32>("A").unwrap(), 5);
    }

    #[test]
    fn test_replace_keeps_other_keys() {
        let store = store(Collection::Risks);
        let _ = store.insert_if_absent("A", &1).unwrap();
        let _ = store.insert_if_absent("B", &2).unwrap();
        let stats = store.replace(&[("A".to_string(), 7)]).unwrap();
        assert_eq!(stats, PersistStats { inserted: 1, skipped: 0 });
        assert_eq!(store.get::<i32>("A").unwrap(), 7);
        assert_eq!(store.get::<i32>("B").unwrap(), 2);
        assert!(!store.remove("C").unwrap());
    }

    #[test]
    fn test_collection_parse() {
        assert_eq!(Collection::parse("scores").unwrap(), Collection::Scores);
        assert!(Collection::parse("nope").is_err());
    }
}
