// Table dispatch
//
// Maps a table to its entity type, predicate builders and icon formatter,
// then hands the pieces to the generic search service.

use crate::display::{self, DisplayIcon};
use crate::plugin::base::{self, Fluid, FluidGroup, Item, ItemGroup, Recipe, RecipeType};
use crate::plugin::{forge, gregtech, quest, thaumcraft, Aspect, Quest};
use crate::registry::Table;
use crate::search::{PageResult, QueryFailure, SearchParams, SearchService, ViewError};
use crate::store::{SqlEntity, SqlFilter, Store};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;

/// Query parameter names a table filters on, in predicate order
pub fn filter_fields(table: Table) -> &'static [&'static str] {
    match table {
        Table::Item => base::ITEM_FIELDS,
        Table::Fluid => base::FLUID_FIELDS,
        Table::ItemGroup => base::ITEM_GROUP_FIELDS,
        Table::FluidGroup => base::FLUID_GROUP_FIELDS,
        Table::Recipe => base::RECIPE_FIELDS,
        Table::RecipeType => base::RECIPE_TYPE_FIELDS,
        Table::OreDictionary => forge::ORE_DICTIONARY_FIELDS,
        Table::FluidContainer => forge::FLUID_CONTAINER_FIELDS,
        Table::GregTechRecipe => gregtech::GREGTECH_RECIPE_FIELDS,
        Table::ThaumcraftAspect => thaumcraft::ASPECT_FIELDS,
        Table::ThaumcraftAspectEntry => thaumcraft::ASPECT_ENTRY_FIELDS,
        Table::Quest => quest::QUEST_FIELDS,
    }
}

/// Filtered search. Blank or unknown parameters are ignored; virtual tables
/// always apply their default predicate.
pub fn search_table(
    store: &Store,
    service: &SearchService,
    table: Table,
    page: i64,
    params: &SearchParams,
) -> Result<PageResult<DisplayIcon>, QueryFailure> {
    dispatch(store, service, table, page, Some(params))
}

/// Unfiltered listing; for virtual tables, their default search.
pub fn all_table(
    store: &Store,
    service: &SearchService,
    table: Table,
    page: i64,
) -> Result<PageResult<DisplayIcon>, QueryFailure> {
    dispatch(store, service, table, page, None)
}

fn run<E, F>(
    store: &Store,
    service: &SearchService,
    page: i64,
    filter: Option<SqlFilter<E>>,
    formatter: F,
) -> Result<PageResult<DisplayIcon>, QueryFailure>
where
    E: SqlEntity,
    F: Fn(&E) -> DisplayIcon,
{
    let source = store.source::<E>();
    match filter {
        Some(filter) => service.handle_search(page, filter, &source, formatter),
        None => service.handle_get_all(page, &source, formatter),
    }
}

fn dispatch(
    store: &Store,
    service: &SearchService,
    table: Table,
    page: i64,
    params: Option<&SearchParams>,
) -> Result<PageResult<DisplayIcon>, QueryFailure> {
    let conn = store.connection();
    match table {
        Table::Item => run(store, service, page, params.map(base::item_filter), |e: &Item| {
            display::item_icon(table, e)
        }),
        Table::Fluid => run(store, service, page, params.map(base::fluid_filter), |e: &Fluid| {
            display::fluid_icon(table, e)
        }),
        Table::ItemGroup => run(
            store,
            service,
            page,
            params.map(base::item_group_filter),
            |e: &ItemGroup| display::item_group_icon(table, e),
        ),
        Table::FluidGroup => run(
            store,
            service,
            page,
            params.map(base::fluid_group_filter),
            |e: &FluidGroup| display::fluid_group_icon(table, e),
        ),
        Table::Recipe => run(store, service, page, params.map(base::recipe_filter), |e: &Recipe| {
            display::recipe_icon(table, e)
        }),
        Table::RecipeType => run(
            store,
            service,
            page,
            params.map(base::recipe_type_filter),
            |e: &RecipeType| display::recipe_type_icon(table, e),
        ),
        Table::OreDictionary => run(
            store,
            service,
            page,
            Some(params.map_or_else(forge::ore_dictionary_default, forge::ore_dictionary_filter)),
            |e: &ItemGroup| display::ore_dictionary_icon(table, e, &ore_names(conn, &e.id)),
        ),
        Table::FluidContainer => run(
            store,
            service,
            page,
            Some(params.map_or_else(forge::fluid_container_default, forge::fluid_container_filter)),
            |e: &Item| display::item_icon(table, e),
        ),
        Table::GregTechRecipe => run(
            store,
            service,
            page,
            Some(params.map_or_else(gregtech::gregtech_recipe_default, gregtech::gregtech_recipe_filter)),
            |e: &Recipe| display::gregtech_recipe_icon(table, e, gregtech_data(conn, &e.id).as_ref()),
        ),
        Table::ThaumcraftAspect => run(
            store,
            service,
            page,
            params.map(thaumcraft::aspect_filter),
            |e: &Aspect| display::aspect_icon(table, e),
        ),
        Table::ThaumcraftAspectEntry => run(
            store,
            service,
            page,
            Some(params.map_or_else(thaumcraft::aspect_entry_default, thaumcraft::aspect_entry_filter)),
            |e: &Item| display::item_icon(table, e),
        ),
        Table::Quest => run(store, service, page, params.map(quest::quest_filter), |e: &Quest| {
            display::quest_icon(table, e)
        }),
    }
}

// Formatters cannot fail; a failed side lookup only degrades the label.

fn ore_names(conn: &Connection, group_id: &str) -> Vec<String> {
    forge::ore_dictionary_names(conn, group_id).unwrap_or_else(|e| {
        warn!("Failed to load ore dictionary names for {}: {}", group_id, e);
        Vec::new()
    })
}

fn gregtech_data(conn: &Connection, recipe_id: &str) -> Option<gregtech::GregTechData> {
    gregtech::gregtech_data(conn, recipe_id).unwrap_or_else(|e| {
        warn!("Failed to load GregTech data for {}: {}", recipe_id, e);
        None
    })
}

/// Detail page payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    /// Path segment of the table the entity was viewed through
    pub table: &'static str,
    pub icon: DisplayIcon,
    pub entity: serde_json::Value,
}

fn view<E, F>(store: &Store, table: Table, id: &str, formatter: F) -> Result<EntityView, ViewError>
where
    E: SqlEntity + Serialize,
    F: Fn(&E) -> DisplayIcon,
{
    let entity = store
        .find_by_id::<E>(id)?
        .ok_or_else(|| ViewError::NotFound {
            table,
            id: id.to_string(),
        })?;

    Ok(EntityView {
        table: table.path(),
        icon: formatter(&entity),
        entity: serde_json::to_value(&entity)?,
    })
}

fn attach<T: Serialize>(view: &mut EntityView, key: &str, value: &T) -> Result<(), ViewError> {
    if let serde_json::Value::Object(map) = &mut view.entity {
        map.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

/// Single entity by id. Virtual tables resolve ids against the entity table
/// they customize.
pub fn view_table(store: &Store, table: Table, id: &str) -> Result<EntityView, ViewError> {
    let conn = store.connection();
    match table {
        Table::Item | Table::FluidContainer | Table::ThaumcraftAspectEntry => {
            view(store, table, id, |e: &Item| display::item_icon(table, e))
        }
        Table::Fluid => view(store, table, id, |e: &Fluid| display::fluid_icon(table, e)),
        Table::ItemGroup => view(store, table, id, |e: &ItemGroup| {
            display::item_group_icon(table, e)
        }),
        Table::OreDictionary => {
            let names = forge::ore_dictionary_names(conn, id).map_err(QueryFailure::from)?;
            let mut entity_view = view(store, table, id, |e: &ItemGroup| {
                display::ore_dictionary_icon(table, e, &names)
            })?;
            attach(&mut entity_view, "ore_dictionary_names", &names)?;
            Ok(entity_view)
        }
        Table::FluidGroup => view(store, table, id, |e: &FluidGroup| {
            display::fluid_group_icon(table, e)
        }),
        Table::Recipe => view(store, table, id, |e: &Recipe| display::recipe_icon(table, e)),
        Table::GregTechRecipe => {
            let data = gregtech::gregtech_data(conn, id).map_err(QueryFailure::from)?;
            let mut entity_view = view(store, table, id, |e: &Recipe| {
                display::gregtech_recipe_icon(table, e, data.as_ref())
            })?;
            attach(&mut entity_view, "gregtech", &data)?;
            Ok(entity_view)
        }
        Table::RecipeType => view(store, table, id, |e: &RecipeType| {
            display::recipe_type_icon(table, e)
        }),
        Table::ThaumcraftAspect => view(store, table, id, |e: &Aspect| display::aspect_icon(table, e)),
        Table::Quest => view(store, table, id, |e: &Quest| display::quest_icon(table, e)),
    }
}
