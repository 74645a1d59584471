use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use dish_core::validate::ArticleLookup;
use dish_core::{CatalogItem, CatalogRecord};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use thiserror::Error;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dishes (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      external_id TEXT NOT NULL,
      article TEXT NOT NULL,
      name TEXT NOT NULL,
      price TEXT NOT NULL,
      is_weighted INTEGER NOT NULL DEFAULT 0,
      full_path TEXT
    );
";

const SELECT_COLUMNS: &str =
    "SELECT id, external_id, article, name, price, is_weighted, full_path FROM dishes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreLocation {
    File(PathBuf),
    #[cfg_attr(not(test), allow(dead_code))]
    Memory,
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Memory => f.write_str(":memory:"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    /// База не открылась или схему не удалось создать
    #[error("catalog storage {location} is unavailable: {source}")]
    Unavailable {
        location: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("catalog storage query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Локальное зеркало меню в таблице `dishes`.
///
/// Все операции идут через один мьютекс: `refresh` (delete + insert в одной
/// транзакции) не может перемежаться с чтением.
pub(crate) struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    pub(crate) fn open(location: &StoreLocation) -> Result<Self, StoreError> {
        let unavailable = |source| StoreError::Unavailable {
            location: location.to_string(),
            source,
        };

        let conn = match location {
            StoreLocation::File(path) => Connection::open(path),
            StoreLocation::Memory => Connection::open_in_memory(),
        }
        .map_err(unavailable)?;

        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        debug!("catalog storage ready at {location}");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        }
    }

    /// Полностью заменяет зеркало свежим снимком меню.
    pub(crate) fn refresh(&self, items: &[CatalogItem]) -> Result<(), StoreError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let removed = tx.execute("DELETE FROM dishes", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO dishes (external_id, article, name, price, is_weighted, full_path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for item in items {
                stmt.execute(params![
                    item.id,
                    item.article,
                    item.name,
                    item.price.to_string(),
                    false,
                    item.full_path,
                ])?;
            }
        }

        tx.commit()?;
        debug!("catalog refreshed: removed={removed} inserted={}", items.len());
        Ok(())
    }

    /// Все записи в порядке вставки последнего `refresh`.
    pub(crate) fn all(&self) -> Result<Vec<CatalogRecord>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt.query_map([], record_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(crate) fn find_by_article(&self, article: &str) -> Result<Option<CatalogRecord>, StoreError> {
        let conn = self.lock();
        let record = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE article = ?1 ORDER BY id LIMIT 1"),
                params![article],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }
}

impl ArticleLookup for CatalogStore {
    type Error = StoreError;

    fn find_by_article(&self, article: &str) -> Result<Option<CatalogRecord>, StoreError> {
        CatalogStore::find_by_article(self, article)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogRecord> {
    let price: String = row.get(4)?;
    let price = Decimal::from_str(&price)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(CatalogRecord {
        key: row.get(0)?,
        external_id: row.get(1)?,
        article: row.get(2)?,
        name: row.get(3)?,
        price,
        is_weighted: row.get(5)?,
        full_path: row.get(6)?,
    })
}
