pub mod schema;
pub mod filter;

pub use filter::SqlFilter;

use crate::search::{Identifiable, Page, PageWindow, QueryFailure, QuerySource};
use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Entity stored in its own SQLite table, keyed by a TEXT `id` column.
pub trait SqlEntity: Identifiable + Sized {
    /// Table name, also used to qualify columns in predicates
    const TABLE: &'static str;
    /// Selected columns, in the order `from_row` reads them
    const COLUMNS: &'static [&'static str];
    /// Deterministic ordering for pagination
    const ORDER_BY: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Load child rows (stacks, inputs, outputs) after the main row
    fn hydrate(&mut self, _conn: &Connection) -> rusqlite::Result<()> {
        Ok(())
    }
}

fn select_list<E: SqlEntity>() -> String {
    E::COLUMNS
        .iter()
        .map(|c| format!("{}.{}", E::TABLE, c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read-only access to the exported dataset
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open the database file, creating missing tables
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        info!("Opened database: {}", path.display());
        let mut store = Self::from_connection(conn)?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Wrap an existing connection, creating missing tables
    pub fn from_connection(conn: Connection) -> Result<Self> {
        schema::init_schema(&conn).context("Failed to initialize schema")?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Query source over the table of `E`
    pub fn source<E: SqlEntity>(&self) -> SqliteSource<'_, E> {
        SqliteSource {
            conn: &self.conn,
            _entity: PhantomData,
        }
    }

    pub fn find_by_id<E: SqlEntity>(&self, id: &str) -> Result<Option<E>, QueryFailure> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}.id = ?1",
            select_list::<E>(),
            E::TABLE,
            E::TABLE
        );
        let entity = self.conn.query_row(&sql, [id], E::from_row).optional()?;

        match entity {
            Some(mut entity) => {
                entity.hydrate(&self.conn)?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    /// Row count of every entity table
    pub fn table_counts(&self) -> Result<Vec<(&'static str, u64)>, QueryFailure> {
        let mut counts = Vec::with_capacity(schema::ENTITY_TABLES.len());
        for table in schema::ENTITY_TABLES {
            let count: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            counts.push((*table, count.max(0) as u64));
        }
        Ok(counts)
    }
}

/// [`QuerySource`] over one SQLite table
pub struct SqliteSource<'a, E> {
    conn: &'a Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: SqlEntity> SqliteSource<'a, E> {
    pub fn count(&self, predicate: &SqlFilter<E>) -> Result<u64, QueryFailure> {
        let sql = format!("SELECT COUNT(*) FROM {}{}", E::TABLE, predicate.where_clause());
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(predicate.params()), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl<'a, E: SqlEntity> QuerySource for SqliteSource<'a, E> {
    type Entity = E;
    type Predicate = SqlFilter<E>;

    fn find_page(&self, predicate: &SqlFilter<E>, window: PageWindow) -> Result<Page<E>, QueryFailure> {
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {} LIMIT ? OFFSET ?",
            select_list::<E>(),
            E::TABLE,
            predicate.where_clause(),
            E::ORDER_BY
        );
        debug!("{} window {:?}: {}", E::TABLE, window, sql);

        let mut params: Vec<Value> = predicate.params().to_vec();
        params.push(Value::Integer(i64::from(window.limit)));
        params.push(Value::Integer(i64::try_from(window.offset).unwrap_or(i64::MAX)));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut items = stmt
            .query_map(params_from_iter(params.iter()), E::from_row)?
            .collect::<rusqlite::Result<Vec<E>>>()?;

        for item in &mut items {
            item.hydrate(self.conn)?;
        }

        let total = self.count(predicate)?;
        Ok(Page { items, total })
    }
}
