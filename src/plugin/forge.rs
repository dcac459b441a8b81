// Forge plugin: ore dictionary and fluid containers
//
// Both tables are custom searches over base entities; they only add a
// default predicate and their own filter fields.

use crate::plugin::base::{item_group_item_filter, Item, ItemGroup};
use crate::search::{non_blank, Predicate, SearchParams};
use crate::store::SqlFilter;
use rusqlite::types::Value;
use rusqlite::Connection;

pub const ORE_DICTIONARY_FIELDS: &[&str] = &["name", "itemId"];
pub const FLUID_CONTAINER_FIELDS: &[&str] = &["fluidId", "emptyContainerItemId"];

/// Item groups registered under at least one ore dictionary name
pub fn ore_dictionary_default() -> SqlFilter<ItemGroup> {
    SqlFilter::exists(
        "ore_dictionary od",
        "od.item_group_id = item_group.id",
        Vec::new(),
    )
}

pub fn ore_dictionary_name_filter(value: Option<&str>) -> Option<SqlFilter<ItemGroup>> {
    non_blank(value).map(|name| {
        SqlFilter::exists(
            "ore_dictionary od",
            "od.item_group_id = item_group.id AND od.name = ?",
            vec![Value::Text(name.to_string())],
        )
    })
}

pub fn ore_dictionary_filter(params: &SearchParams) -> SqlFilter<ItemGroup> {
    SqlFilter::all_of([
        Some(ore_dictionary_default()),
        ore_dictionary_name_filter(params.get("name")),
        item_group_item_filter(params.get("itemId")),
    ])
}

/// Ore dictionary names of one item group, sorted
pub fn ore_dictionary_names(conn: &Connection, item_group_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT name FROM ore_dictionary WHERE item_group_id = ?1 ORDER BY name",
    )?;
    let names = stmt
        .query_map([item_group_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Items that hold a fluid
pub fn fluid_container_default() -> SqlFilter<Item> {
    SqlFilter::exists(
        "fluid_container fc",
        "fc.container_item_id = item.id",
        Vec::new(),
    )
}

pub fn fluid_container_fluid_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    non_blank(value).map(|fluid_id| {
        SqlFilter::exists(
            "fluid_container fc",
            "fc.container_item_id = item.id AND fc.fluid_id = ?",
            vec![Value::Text(fluid_id.to_string())],
        )
    })
}

pub fn fluid_container_empty_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    non_blank(value).map(|item_id| {
        SqlFilter::exists(
            "fluid_container fc",
            "fc.container_item_id = item.id AND fc.empty_container_item_id = ?",
            vec![Value::Text(item_id.to_string())],
        )
    })
}

pub fn fluid_container_filter(params: &SearchParams) -> SqlFilter<Item> {
    SqlFilter::all_of([
        Some(fluid_container_default()),
        fluid_container_fluid_filter(params.get("fluidId")),
        fluid_container_empty_filter(params.get("emptyContainerItemId")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_always_applies() {
        let filter = ore_dictionary_filter(&SearchParams::new());
        assert!(!filter.is_match_all());
        assert!(filter.where_clause().contains("FROM ore_dictionary od"));
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_filters_follow_default() {
        let params = SearchParams::new().with("name", "ingotIron").with("itemId", " ");
        let filter = ore_dictionary_filter(&params);
        assert_eq!(filter.params(), &[Value::Text("ingotIron".into())]);
    }

    #[test]
    fn test_fluid_container_params_in_order() {
        let params = SearchParams::new()
            .with("emptyContainerItemId", "bucket")
            .with("fluidId", "water");
        let filter = fluid_container_filter(&params);
        assert_eq!(
            filter.params(),
            &[Value::Text("water".into()), Value::Text("bucket".into())]
        );
    }
}
