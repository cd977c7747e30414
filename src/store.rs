use log::warn;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const MEMBERS: &str = "mt_members";
pub const SESSIONS: &str = "mt_sessions";
pub const ATTENDANCE: &str = "mt_attendance";
pub const AUTH_FLAG: &str = "mt_auth";

/// Where a loaded collection came from. Callers that only want the records
/// can ignore this; callers that must tell "never written" apart from
/// "written but unreadable" (the seed loader, the UI shell) check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Absent,
    Stored,
    Corrupt,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadSource::Absent => "absent",
            LoadSource::Stored => "stored",
            LoadSource::Corrupt => "corrupt",
        }
    }
}

#[derive(Debug)]
pub struct CollectionLoad {
    pub source: LoadSource,
    pub records: Vec<serde_json::Value>,
}

/// Whole-collection persistence plus the auth flag. Object-safe so domain
/// code takes `&dyn RecordStore` and tests can inject an in-memory double.
///
/// Reads never fail: unreadable state is logged, reported as `Corrupt` and
/// returned empty so the calling UI stays usable. Writes propagate errors.
/// Every mutation upstream is read-modify-write of a full collection; two
/// concurrent writers would clobber each other. Single process only.
pub trait RecordStore {
    fn load_collection(&self, name: &str) -> CollectionLoad;
    fn save_collection(&self, name: &str, records: &[serde_json::Value]) -> anyhow::Result<()>;

    fn flag_get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn flag_set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn flag_clear(&self, key: &str) -> anyhow::Result<()>;
}

/// Durable implementation over the workspace database opened by `db::open_db`.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn load_collection(&self, name: &str) -> CollectionLoad {
        let payload: Option<String> = match self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?",
                [name],
                |r| r.get(0),
            )
            .optional()
        {
            Ok(v) => v,
            Err(e) => {
                warn!("reading collection {name} failed, treating as unreadable: {e}");
                return CollectionLoad {
                    source: LoadSource::Corrupt,
                    records: Vec::new(),
                };
            }
        };

        let Some(payload) = payload else {
            return CollectionLoad {
                source: LoadSource::Absent,
                records: Vec::new(),
            };
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&payload) {
            Ok(records) => CollectionLoad {
                source: LoadSource::Stored,
                records,
            },
            Err(e) => {
                warn!("collection {name} payload is not a JSON array, treating as empty: {e}");
                CollectionLoad {
                    source: LoadSource::Corrupt,
                    records: Vec::new(),
                }
            }
        }
    }

    fn save_collection(&self, name: &str, records: &[serde_json::Value]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(records)?;
        self.conn.execute(
            "INSERT INTO collections(name, payload)
             VALUES(?, ?)
             ON CONFLICT(name) DO UPDATE SET
               payload = excluded.payload",
            (name, &payload),
        )?;
        Ok(())
    }

    fn flag_get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM flags WHERE key = ?", [key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn flag_set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO flags(key, value)
             VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    fn flag_clear(&self, key: &str) -> anyhow::Result<()> {
        self.conn.execute("DELETE FROM flags WHERE key = ?", [key])?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct TypedLoad<T> {
    pub source: LoadSource,
    pub records: Vec<T>,
}

/// Decodes a collection into typed records. A record that fails to decode
/// marks the whole collection `Corrupt` and empty, matching the raw layer:
/// a half-readable collection is as unusable as an unreadable one.
pub fn load_records<T: DeserializeOwned>(store: &dyn RecordStore, name: &str) -> TypedLoad<T> {
    let raw = store.load_collection(name);
    let mut records = Vec::with_capacity(raw.records.len());
    for value in raw.records {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("collection {name} holds an undecodable record, treating as empty: {e}");
                return TypedLoad {
                    source: LoadSource::Corrupt,
                    records: Vec::new(),
                };
            }
        }
    }
    TypedLoad {
        source: raw.source,
        records,
    }
}

pub fn save_records<T: Serialize>(
    store: &dyn RecordStore,
    name: &str,
    records: &[T],
) -> anyhow::Result<()> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.save_collection(name, &values)
}
