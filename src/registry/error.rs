// Table registry error types

use crate::registry::Table;
use thiserror::Error;

// Tables are formatted with `Debug`: `Display` reads the global registry,
// which may be the registry being validated.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Path segment '{path}' is used by both {first:?} and {second:?}")]
    DuplicatePath {
        path: &'static str,
        first: Table,
        second: Table,
    },

    #[error("Table {0:?} is declared more than once")]
    DuplicateTable(Table),

    #[error("Path segment '{path}' of table {table:?} is not URL-safe")]
    InvalidPath { table: Table, path: &'static str },

    #[error("Table {0:?} has no definition")]
    MissingTable(Table),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
