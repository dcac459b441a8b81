// GregTech plugin: machine recipes

use crate::plugin::base::{recipe_input_item_filter, recipe_output_item_filter, Recipe};
use crate::search::{non_blank, Predicate, SearchParams};
use crate::store::SqlFilter;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

pub const GREGTECH_RECIPE_FIELDS: &[&str] = &["inputItemId", "outputItemId", "voltageTier"];

/// Machine data attached to a base recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GregTechData {
    pub voltage_tier: String,
    pub voltage: i64,
    pub duration: i64,
}

/// Recipes carrying GregTech machine data
pub fn gregtech_recipe_default() -> SqlFilter<Recipe> {
    SqlFilter::exists("gregtech_recipe gt", "gt.recipe_id = recipe.id", Vec::new())
}

pub fn voltage_tier_filter(value: Option<&str>) -> Option<SqlFilter<Recipe>> {
    non_blank(value).map(|tier| {
        SqlFilter::exists(
            "gregtech_recipe gt",
            "gt.recipe_id = recipe.id AND gt.voltage_tier = ?",
            vec![Value::Text(tier.to_string())],
        )
    })
}

pub fn gregtech_recipe_filter(params: &SearchParams) -> SqlFilter<Recipe> {
    SqlFilter::all_of([
        Some(gregtech_recipe_default()),
        recipe_input_item_filter(params.get("inputItemId")),
        recipe_output_item_filter(params.get("outputItemId")),
        voltage_tier_filter(params.get("voltageTier")),
    ])
}

pub fn gregtech_data(conn: &Connection, recipe_id: &str) -> rusqlite::Result<Option<GregTechData>> {
    conn.query_row(
        "SELECT voltage_tier, voltage, duration FROM gregtech_recipe WHERE recipe_id = ?1",
        [recipe_id],
        |row| {
            Ok(GregTechData {
                voltage_tier: row.get(0)?,
                voltage: row.get(1)?,
                duration: row.get(2)?,
            })
        },
    )
    .optional()
}
