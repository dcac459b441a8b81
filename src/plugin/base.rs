// Base plugin: items, fluids, groups, recipes and recipe types

use crate::search::{non_blank, Identifiable, Predicate, SearchParams};
use crate::store::{SqlEntity, SqlFilter};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub mod_id: String,
    pub internal_name: String,
    pub item_damage: i64,
    pub localized_name: String,
    pub tooltip: Option<String>,
    pub image_file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fluid {
    pub id: String,
    pub mod_id: String,
    pub internal_name: String,
    pub localized_name: String,
    pub image_file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStack {
    pub item_id: String,
    pub stack_size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluidStack {
    pub fluid_id: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGroup {
    pub id: String,
    pub item_stacks: Vec<ItemStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluidGroup {
    pub id: String,
    pub fluid_stacks: Vec<FluidStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeType {
    pub id: String,
    pub category: String,
    pub type_name: String,
    pub icon_item_id: Option<String>,
}

/// Item stack in a numbered recipe slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSlot {
    pub slot: i64,
    pub item_id: String,
    pub stack_size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub recipe_type_id: String,
    pub item_inputs: Vec<RecipeSlot>,
    pub item_outputs: Vec<RecipeSlot>,
}

impl Identifiable for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for Fluid {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for ItemGroup {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for FluidGroup {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for RecipeType {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SqlEntity for Item {
    const TABLE: &'static str = "item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "mod_id",
        "internal_name",
        "item_damage",
        "localized_name",
        "tooltip",
        "image_file_path",
    ];
    const ORDER_BY: &'static str = "item.localized_name, item.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mod_id: row.get(1)?,
            internal_name: row.get(2)?,
            item_damage: row.get(3)?,
            localized_name: row.get(4)?,
            tooltip: row.get(5)?,
            image_file_path: row.get(6)?,
        })
    }
}

impl SqlEntity for Fluid {
    const TABLE: &'static str = "fluid";
    const COLUMNS: &'static [&'static str] =
        &["id", "mod_id", "internal_name", "localized_name", "image_file_path"];
    const ORDER_BY: &'static str = "fluid.localized_name, fluid.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mod_id: row.get(1)?,
            internal_name: row.get(2)?,
            localized_name: row.get(3)?,
            image_file_path: row.get(4)?,
        })
    }
}

impl SqlEntity for ItemGroup {
    const TABLE: &'static str = "item_group";
    const COLUMNS: &'static [&'static str] = &["id"];
    const ORDER_BY: &'static str = "item_group.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            item_stacks: Vec::new(),
        })
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let mut stmt = conn.prepare_cached(
            "SELECT item_id, stack_size FROM item_group_item
             WHERE item_group_id = ?1 ORDER BY rowid",
        )?;
        self.item_stacks = stmt
            .query_map([&self.id], |row| {
                Ok(ItemStack {
                    item_id: row.get(0)?,
                    stack_size: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(())
    }
}

impl SqlEntity for FluidGroup {
    const TABLE: &'static str = "fluid_group";
    const COLUMNS: &'static [&'static str] = &["id"];
    const ORDER_BY: &'static str = "fluid_group.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fluid_stacks: Vec::new(),
        })
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        let mut stmt = conn.prepare_cached(
            "SELECT fluid_id, amount FROM fluid_group_fluid
             WHERE fluid_group_id = ?1 ORDER BY rowid",
        )?;
        self.fluid_stacks = stmt
            .query_map([&self.id], |row| {
                Ok(FluidStack {
                    fluid_id: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(())
    }
}

impl SqlEntity for RecipeType {
    const TABLE: &'static str = "recipe_type";
    const COLUMNS: &'static [&'static str] = &["id", "category", "type_name", "icon_item_id"];
    const ORDER_BY: &'static str = "recipe_type.category, recipe_type.type_name, recipe_type.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            category: row.get(1)?,
            type_name: row.get(2)?,
            icon_item_id: row.get(3)?,
        })
    }
}

fn load_slots(conn: &Connection, table: &str, recipe_id: &str) -> rusqlite::Result<Vec<RecipeSlot>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT slot, item_id, stack_size FROM {} WHERE recipe_id = ?1 ORDER BY slot",
        table
    ))?;
    let slots = stmt
        .query_map([recipe_id], |row| {
            Ok(RecipeSlot {
                slot: row.get(0)?,
                item_id: row.get(1)?,
                stack_size: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(slots)
}

impl SqlEntity for Recipe {
    const TABLE: &'static str = "recipe";
    const COLUMNS: &'static [&'static str] = &["id", "recipe_type_id"];
    const ORDER_BY: &'static str = "recipe.recipe_type_id, recipe.id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            recipe_type_id: row.get(1)?,
            item_inputs: Vec::new(),
            item_outputs: Vec::new(),
        })
    }

    fn hydrate(&mut self, conn: &Connection) -> rusqlite::Result<()> {
        self.item_inputs = load_slots(conn, "recipe_item_input", &self.id)?;
        self.item_outputs = load_slots(conn, "recipe_item_output", &self.id)?;
        Ok(())
    }
}

// ── Predicate builders ──────────────────────────────────────────────

pub const ITEM_FIELDS: &[&str] = &["localizedName", "modId", "internalName"];
pub const FLUID_FIELDS: &[&str] = &["localizedName", "modId", "internalName"];
pub const ITEM_GROUP_FIELDS: &[&str] = &["itemId"];
pub const FLUID_GROUP_FIELDS: &[&str] = &["fluidId"];
pub const RECIPE_FIELDS: &[&str] = &["inputItemId", "outputItemId", "recipeTypeId"];
pub const RECIPE_TYPE_FIELDS: &[&str] = &["category"];

fn column_filter<E>(column: &str, value: Option<&str>) -> Option<SqlFilter<E>> {
    non_blank(value).map(|v| SqlFilter::eq(column, v.to_string()))
}

pub fn item_mod_id_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    column_filter("item.mod_id", value)
}

pub fn item_internal_name_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    column_filter("item.internal_name", value)
}

pub fn item_localized_name_filter(value: Option<&str>) -> Option<SqlFilter<Item>> {
    column_filter("item.localized_name", value)
}

pub fn item_filter(params: &SearchParams) -> SqlFilter<Item> {
    SqlFilter::all_of([
        item_localized_name_filter(params.get("localizedName")),
        item_mod_id_filter(params.get("modId")),
        item_internal_name_filter(params.get("internalName")),
    ])
}

pub fn fluid_filter(params: &SearchParams) -> SqlFilter<Fluid> {
    SqlFilter::all_of([
        column_filter("fluid.localized_name", params.get("localizedName")),
        column_filter("fluid.mod_id", params.get("modId")),
        column_filter("fluid.internal_name", params.get("internalName")),
    ])
}

/// Groups containing the given item
pub fn item_group_item_filter(value: Option<&str>) -> Option<SqlFilter<ItemGroup>> {
    non_blank(value).map(|item_id| {
        SqlFilter::exists(
            "item_group_item igi",
            "igi.item_group_id = item_group.id AND igi.item_id = ?",
            vec![Value::Text(item_id.to_string())],
        )
    })
}

pub fn item_group_filter(params: &SearchParams) -> SqlFilter<ItemGroup> {
    SqlFilter::all_of([item_group_item_filter(params.get("itemId"))])
}

/// Groups containing the given fluid
pub fn fluid_group_fluid_filter(value: Option<&str>) -> Option<SqlFilter<FluidGroup>> {
    non_blank(value).map(|fluid_id| {
        SqlFilter::exists(
            "fluid_group_fluid fgf",
            "fgf.fluid_group_id = fluid_group.id AND fgf.fluid_id = ?",
            vec![Value::Text(fluid_id.to_string())],
        )
    })
}

pub fn fluid_group_filter(params: &SearchParams) -> SqlFilter<FluidGroup> {
    SqlFilter::all_of([fluid_group_fluid_filter(params.get("fluidId"))])
}

/// Recipes with at least one input slot holding the given item
pub fn recipe_input_item_filter(value: Option<&str>) -> Option<SqlFilter<Recipe>> {
    non_blank(value).map(|item_id| {
        SqlFilter::exists(
            "recipe_item_input rii",
            "rii.recipe_id = recipe.id AND rii.item_id = ?",
            vec![Value::Text(item_id.to_string())],
        )
    })
}

/// Recipes with at least one output slot holding the given item
pub fn recipe_output_item_filter(value: Option<&str>) -> Option<SqlFilter<Recipe>> {
    non_blank(value).map(|item_id| {
        SqlFilter::exists(
            "recipe_item_output rio",
            "rio.recipe_id = recipe.id AND rio.item_id = ?",
            vec![Value::Text(item_id.to_string())],
        )
    })
}

pub fn recipe_type_id_filter(value: Option<&str>) -> Option<SqlFilter<Recipe>> {
    column_filter("recipe.recipe_type_id", value)
}

pub fn recipe_filter(params: &SearchParams) -> SqlFilter<Recipe> {
    SqlFilter::all_of([
        recipe_input_item_filter(params.get("inputItemId")),
        recipe_output_item_filter(params.get("outputItemId")),
        recipe_type_id_filter(params.get("recipeTypeId")),
    ])
}

pub fn recipe_type_filter(params: &SearchParams) -> SqlFilter<RecipeType> {
    SqlFilter::all_of([column_filter("recipe_type.category", params.get("category"))])
}
