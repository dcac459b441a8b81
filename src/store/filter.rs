// SQL predicate: a WHERE fragment plus its bound parameters

use crate::search::Predicate;
use rusqlite::types::Value;
use std::fmt;
use std::marker::PhantomData;

/// Filter over the SQL table of entity `E`.
///
/// Clauses use positional `?` placeholders; `params` holds their values in
/// placeholder order, which `and` preserves by concatenation.
pub struct SqlFilter<E> {
    clause: Option<String>,
    params: Vec<Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SqlFilter<E> {
    pub fn new(clause: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            clause: Some(clause.into()),
            params,
            _entity: PhantomData,
        }
    }

    /// `column = ?`
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::new(format!("{} = ?", column), vec![value.into()])
    }

    /// Existential match over a child table:
    /// `EXISTS (SELECT 1 FROM <from> WHERE <condition>)`
    pub fn exists(from: &str, condition: &str, params: Vec<Value>) -> Self {
        Self::new(
            format!("EXISTS (SELECT 1 FROM {} WHERE {})", from, condition),
            params,
        )
    }

    pub fn is_match_all(&self) -> bool {
        self.clause.is_none()
    }

    /// ` WHERE ...`, or an empty string for the match-all filter
    pub fn where_clause(&self) -> String {
        match &self.clause {
            Some(clause) => format!(" WHERE {}", clause),
            None => String::new(),
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl<E> Predicate for SqlFilter<E> {
    fn match_all() -> Self {
        Self {
            clause: None,
            params: Vec::new(),
            _entity: PhantomData,
        }
    }

    fn and(mut self, other: Self) -> Self {
        match (self.clause.take(), other.clause) {
            (None, None) => Self::match_all(),
            (Some(clause), None) => Self::new(clause, self.params),
            (None, Some(clause)) => Self::new(clause, other.params),
            (Some(a), Some(b)) => {
                self.params.extend(other.params);
                Self::new(format!("({}) AND ({})", a, b), self.params)
            }
        }
    }
}

impl<E> Clone for SqlFilter<E> {
    fn clone(&self) -> Self {
        Self {
            clause: self.clause.clone(),
            params: self.params.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for SqlFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlFilter")
            .field("clause", &self.clause)
            .field("params", &self.params)
            .finish()
    }
}
