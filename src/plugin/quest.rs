// Quest plugin

use crate::search::{non_blank, Identifiable, Predicate, SearchParams};
use crate::store::{SqlEntity, SqlFilter};
use rusqlite::Row;
use serde::Serialize;

pub const QUEST_FIELDS: &[&str] = &["name", "questLine"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quest_line: Option<String>,
    pub icon_item_id: Option<String>,
}

impl Identifiable for Quest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SqlEntity for Quest {
    const TABLE: &'static str = "quest";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "quest_line", "icon_item_id"];
    const ORDER_BY: &'static str = "quest.name, quest.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            quest_line: row.get(3)?,
            icon_item_id: row.get(4)?,
        })
    }
}

pub fn quest_filter(params: &SearchParams) -> SqlFilter<Quest> {
    SqlFilter::all_of([
        non_blank(params.get("name")).map(|v| SqlFilter::eq("quest.name", v.to_string())),
        non_blank(params.get("questLine")).map(|v| SqlFilter::eq("quest.quest_line", v.to_string())),
    ])
}
