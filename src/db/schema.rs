/// One table holds every collection. The unique constraint keeps at most
/// one document per name per collection.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    name TEXT NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (collection, name)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
";
