// Thaumcraft plugin: aspects and per-item aspect entries

use crate::plugin::base::Item;
use crate::search::{non_blank, Identifiable, Predicate, SearchParams};
use crate::store::{SqlEntity, SqlFilter};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

pub const ASPECT_FIELDS: &[&str] = &["name", "primal"];
pub const ASPECT_ENTRY_FIELDS: &[&str] = &["aspectId"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    pub id: String,
    pub name: String,
    pub description: String,
    pub primal: bool,
    pub icon_file_path: String,
}

impl Identifiable for Aspect {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SqlEntity for Aspect {
    const TABLE: &'static str = "thaumcraft_aspect";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "primal", "icon_file_path"];
    const ORDER_BY: &'static str = "thaumcraft_aspect.name, thaumcraft_aspect.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            primal: row.get(3)?,
            icon_file_path: row.get(4)?,
        })
    }
}

/// Accepts `true`/`false` and `1`/`0`; anything else is treated as no filter.
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn aspect_name_filter(value: Option<&str>) -> Option<SqlFilter<Aspect>> {
    non_blank(value).map(|name| SqlFilter::eq("thaumcraft_aspect.name", name.to_string()))
}

pub fn aspect_primal_filter(value: Option<&str>) -> Option<SqlFilter<Aspect>> {
    non_blank(value)
        .and_then(parse_flag)
        .map(|primal| SqlFilter::eq("thaumcraft_aspect.primal", i64::from(primal)))
}

pub fn aspect_filter(params: &SearchParams) -> SqlFilter<Aspect> {
    SqlFilter::all_of([
        aspect_name_filter(params.get("name")),
        aspect_primal_filter(params.get("primal")),
    ])
}

/// Items with at least one aspect entry
pub fn aspect_entry_default() -> SqlFilter<Item> {
    SqlFilter::exists(
        "thaumcraft_aspect_entry tae",
        "tae.item_id = item.id",
        Vec::new(),
    )
}

pub fn aspect_entry_aspect_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    non_blank(value).map(|aspect_id| {
        SqlFilter::exists(
            "thaumcraft_aspect_entry tae",
            "tae.item_id = item.id AND tae.aspect_id = ?",
            vec![Value::Text(aspect_id.to_string())],
        )
    })
}

pub fn aspect_entry_filter(params: &SearchParams) -> SqlFilter<Item> {
    SqlFilter::all_of([
        Some(aspect_entry_default()),
        aspect_entry_aspect_filter(params.get("aspectId")),
    ])
}
