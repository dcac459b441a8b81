//! Table registry.
//!
//! The fixed catalog of browsable tables, each owned by exactly one
//! [`Plugin`] and addressed by a unique URL path segment. The catalog is
//! built once per process from [`TABLE_DEFS`] and validated on first access;
//! an invalid catalog aborts startup.

pub mod error;

pub use error::{RegistryError, Result};

use crate::search::Identifiable;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Data source contributing one or more tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    Base,
    Forge,
    GregTech,
    Thaumcraft,
    Quest,
}

impl Plugin {
    pub const ALL: [Plugin; 5] = [
        Plugin::Base,
        Plugin::Forge,
        Plugin::GregTech,
        Plugin::Thaumcraft,
        Plugin::Quest,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Plugin::Base => "base",
            Plugin::Forge => "forge",
            Plugin::GregTech => "gregtech",
            Plugin::Thaumcraft => "thaumcraft",
            Plugin::Quest => "quest",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Plugin::Base => "Base",
            Plugin::Forge => "Forge",
            Plugin::GregTech => "GregTech",
            Plugin::Thaumcraft => "Thaumcraft",
            Plugin::Quest => "Quest",
        }
    }

    /// Tables owned by this plugin, in declaration order
    pub fn tables(self) -> Vec<Table> {
        TableRegistry::global().tables_for_plugin(self)
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Browsable table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Table {
    Item,
    Fluid,
    ItemGroup,
    FluidGroup,
    Recipe,
    RecipeType,
    /// Custom search over item groups.
    OreDictionary,
    /// Custom search over items.
    FluidContainer,
    /// Custom search over recipes.
    GregTechRecipe,
    ThaumcraftAspect,
    /// Custom search over items.
    ThaumcraftAspectEntry,
    Quest,
}

/// Entity type backing a table. Virtual tables share the kind of the table
/// they customize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Fluid,
    ItemGroup,
    FluidGroup,
    Recipe,
    RecipeType,
    Aspect,
    Quest,
}

impl Table {
    pub const ALL: [Table; 12] = [
        Table::Item,
        Table::Fluid,
        Table::ItemGroup,
        Table::FluidGroup,
        Table::Recipe,
        Table::RecipeType,
        Table::OreDictionary,
        Table::FluidContainer,
        Table::GregTechRecipe,
        Table::ThaumcraftAspect,
        Table::ThaumcraftAspectEntry,
        Table::Quest,
    ];

    pub fn entity_kind(self) -> EntityKind {
        match self {
            Table::Item | Table::FluidContainer | Table::ThaumcraftAspectEntry => EntityKind::Item,
            Table::Fluid => EntityKind::Fluid,
            Table::ItemGroup | Table::OreDictionary => EntityKind::ItemGroup,
            Table::FluidGroup => EntityKind::FluidGroup,
            Table::Recipe | Table::GregTechRecipe => EntityKind::Recipe,
            Table::RecipeType => EntityKind::RecipeType,
            Table::ThaumcraftAspect => EntityKind::Aspect,
            Table::Quest => EntityKind::Quest,
        }
    }

    /// Whether this table only customizes the default search of another
    /// table's entity.
    pub fn is_virtual(self) -> bool {
        matches!(
            self,
            Table::OreDictionary
                | Table::FluidContainer
                | Table::GregTechRecipe
                | Table::ThaumcraftAspectEntry
        )
    }

    fn def(self) -> &'static TableDef {
        TableRegistry::global()
            .lookup(self)
            .unwrap_or_else(|| unreachable!("global registry is complete"))
    }

    pub fn plugin(self) -> Plugin {
        self.def().plugin
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn path(self) -> &'static str {
        self.def().path
    }

    pub fn from_path(path: &str) -> Option<Table> {
        TableRegistry::global().from_path(path)
    }

    /// `/<path>/view/<id>`, with the id inserted verbatim
    pub fn view_url<E: Identifiable + ?Sized>(self, entity: &E) -> String {
        format!("/{}/view/{}", self.path(), entity.id())
    }

    pub fn search_url(self) -> String {
        format!("/{}/search", self.path())
    }

    pub fn all_url(self) -> String {
        format!("/{}/all", self.path())
    }

    /// Search URL with a query string built from a flat `key, value, ...` list.
    ///
    /// Keys may repeat and pair order is kept. Panics when `params` has odd
    /// length: parameter lists are assembled by code, never by users.
    pub fn search_url_with_params<S: AsRef<str>>(self, params: &[S]) -> String {
        append_query(self.search_url(), params)
    }

    pub fn all_url_with_params<S: AsRef<str>>(self, params: &[S]) -> String {
        append_query(self.all_url(), params)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn append_query<S: AsRef<str>>(mut url: String, params: &[S]) -> String {
    assert!(
        params.len() % 2 == 0,
        "params must have even length: {:?}",
        params.iter().map(AsRef::as_ref).collect::<Vec<_>>()
    );

    for (i, pair) in params.chunks_exact(2).enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(pair[0].as_ref()));
        url.push('=');
        url.push_str(&urlencoding::encode(pair[1].as_ref()));
    }
    url
}

/// One row of the literal catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub table: Table,
    pub plugin: Plugin,
    pub name: &'static str,
    pub path: &'static str,
}

const fn def(table: Table, plugin: Plugin, name: &'static str, path: &'static str) -> TableDef {
    TableDef {
        table,
        plugin,
        name,
        path,
    }
}

pub const TABLE_DEFS: &[TableDef] = &[
    def(Table::Item, Plugin::Base, "Item", "item"),
    def(Table::Fluid, Plugin::Base, "Fluid", "fluid"),
    def(Table::ItemGroup, Plugin::Base, "Item Group", "itemgroup"),
    def(Table::FluidGroup, Plugin::Base, "Fluid Group", "fluidgroup"),
    def(Table::Recipe, Plugin::Base, "Recipe", "recipe"),
    def(Table::RecipeType, Plugin::Base, "Recipe Type", "recipetype"),
    def(Table::OreDictionary, Plugin::Forge, "Ore Dictionary", "oredictionary"),
    def(Table::FluidContainer, Plugin::Forge, "Fluid Container", "fluidcontainer"),
    def(Table::GregTechRecipe, Plugin::GregTech, "GregTech Recipe", "gregtechrecipe"),
    def(Table::ThaumcraftAspect, Plugin::Thaumcraft, "Thaumcraft Aspect", "thaumcraftaspect"),
    def(
        Table::ThaumcraftAspectEntry,
        Plugin::Thaumcraft,
        "Thaumcraft Aspect Entry",
        "thaumcraftaspectentry",
    ),
    def(Table::Quest, Plugin::Quest, "Quest", "quest"),
];

static REGISTRY: Lazy<TableRegistry> = Lazy::new(|| TableRegistry::build(TABLE_DEFS));

/// Validated, immutable table catalog
#[derive(Debug)]
pub struct TableRegistry {
    defs: Vec<TableDef>,
    by_table: HashMap<Table, usize>,
    by_path: HashMap<&'static str, Table>,
}

impl TableRegistry {
    /// Build a registry, rejecting duplicate tables and duplicate or
    /// non-URL-safe path segments.
    pub fn new(defs: &[TableDef]) -> Result<Self> {
        let mut by_table = HashMap::new();
        let mut by_path: HashMap<&'static str, Table> = HashMap::new();

        for (index, def) in defs.iter().enumerate() {
            if !is_url_safe(def.path) {
                return Err(RegistryError::InvalidPath {
                    table: def.table,
                    path: def.path,
                });
            }
            if by_table.insert(def.table, index).is_some() {
                return Err(RegistryError::DuplicateTable(def.table));
            }
            if let Some(first) = by_path.insert(def.path, def.table) {
                return Err(RegistryError::DuplicatePath {
                    path: def.path,
                    first,
                    second: def.table,
                });
            }
        }

        Ok(Self {
            defs: defs.to_vec(),
            by_table,
            by_path,
        })
    }

    /// Build a complete registry or abort. Must not touch [`REGISTRY`].
    fn build(defs: &[TableDef]) -> Self {
        match Self::new(defs).and_then(Self::require_complete) {
            Ok(registry) => registry,
            Err(e) => panic!("invalid table catalog: {}", e),
        }
    }

    /// Process-wide catalog built from [`TABLE_DEFS`]
    pub fn global() -> &'static TableRegistry {
        &REGISTRY
    }

    fn require_complete(self) -> Result<Self> {
        match Table::ALL.iter().find(|t| !self.by_table.contains_key(t)) {
            Some(&missing) => Err(RegistryError::MissingTable(missing)),
            None => Ok(self),
        }
    }

    pub fn lookup(&self, table: Table) -> Option<&TableDef> {
        self.by_table.get(&table).map(|&i| &self.defs[i])
    }

    pub fn from_path(&self, path: &str) -> Option<Table> {
        self.by_path.get(path).copied()
    }

    /// All definitions in declaration order
    pub fn defs(&self) -> &[TableDef] {
        &self.defs
    }

    /// Tables owned by `plugin`, in declaration order
    pub fn tables_for_plugin(&self, plugin: Plugin) -> Vec<Table> {
        self.defs
            .iter()
            .filter(|d| d.plugin == plugin)
            .map(|d| d.table)
            .collect()
    }
}

fn is_url_safe(path: &str) -> bool {
    !path.is_empty()
        && path
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Identifiable for Named {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_global_registry_is_complete() {
        let registry = TableRegistry::global();
        assert_eq!(registry.defs().len(), Table::ALL.len());
        for table in Table::ALL {
            assert!(registry.lookup(table).is_some(), "{:?} missing", table);
        }
    }

    #[test]
    fn test_tables_for_plugin_declaration_order() {
        let base = TableRegistry::global().tables_for_plugin(Plugin::Base);
        assert_eq!(
            base,
            vec![
                Table::Item,
                Table::Fluid,
                Table::ItemGroup,
                Table::FluidGroup,
                Table::Recipe,
                Table::RecipeType,
            ]
        );
        assert_eq!(
            Plugin::Forge.tables(),
            vec![Table::OreDictionary, Table::FluidContainer]
        );
        assert_eq!(Plugin::Quest.tables(), vec![Table::Quest]);
    }

    #[test]
    fn test_two_table_scenario() {
        let registry = TableRegistry::new(&[
            def(Table::Item, Plugin::Base, "Item", "item"),
            def(Table::Recipe, Plugin::Base, "Recipe", "recipe"),
        ])
        .unwrap();
        assert_eq!(
            registry.tables_for_plugin(Plugin::Base),
            vec![Table::Item, Table::Recipe]
        );
        assert!(registry.tables_for_plugin(Plugin::Forge).is_empty());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = TableRegistry::new(&[
            def(Table::Item, Plugin::Base, "Item", "item"),
            def(Table::Fluid, Plugin::Base, "Fluid", "item"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePath {
                path: "item",
                first: Table::Item,
                second: Table::Fluid,
            }
        );
    }

    #[test]
    #[should_panic(expected = "invalid table catalog: Path segment 'item' is used by both Item and Fluid")]
    fn test_build_panics_on_duplicate_path() {
        let mut defs = TABLE_DEFS.to_vec();
        defs[1] = def(Table::Fluid, Plugin::Base, "Fluid", "item");
        TableRegistry::build(&defs);
    }

    #[test]
    #[should_panic(expected = "invalid table catalog: Table Fluid has no definition")]
    fn test_build_panics_on_incomplete_catalog() {
        TableRegistry::build(&[def(Table::Item, Plugin::Base, "Item", "item")]);
    }

    #[test]
    fn test_error_messages_do_not_need_registry() {
        let err = RegistryError::InvalidPath {
            table: Table::GregTechRecipe,
            path: "Bad Path",
        };
        assert_eq!(
            err.to_string(),
            "Path segment 'Bad Path' of table GregTechRecipe is not URL-safe"
        );
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let err = TableRegistry::new(&[
            def(Table::Item, Plugin::Base, "Item", "item"),
            def(Table::Item, Plugin::Base, "Item", "item2"),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTable(Table::Item));
    }

    #[test]
    fn test_unsafe_path_rejected() {
        for path in ["", "item group", "item/view", "Item"] {
            let defs = [def(Table::Item, Plugin::Base, "Item", path)];
            assert!(
                matches!(TableRegistry::new(&defs), Err(RegistryError::InvalidPath { .. })),
                "path {:?} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_incomplete_registry_rejected() {
        let registry =
            TableRegistry::new(&[def(Table::Item, Plugin::Base, "Item", "item")]).unwrap();
        assert_eq!(
            registry.require_complete().unwrap_err(),
            RegistryError::MissingTable(Table::Fluid)
        );
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Table::from_path("gregtechrecipe"), Some(Table::GregTechRecipe));
        assert_eq!(Table::from_path("GregTechRecipe"), None);
        assert_eq!(Table::from_path("nope"), None);
    }

    #[test]
    fn test_urls() {
        assert_eq!(Table::Recipe.view_url(&Named("abc~1")), "/recipe/view/abc~1");
        assert_eq!(Table::Item.search_url(), "/item/search");
        assert_eq!(Table::Quest.all_url(), "/quest/all");
    }

    #[test]
    fn test_search_url_with_params_preserves_order_and_repeats() {
        let url = Table::Recipe.search_url_with_params(&[
            "inputItemId",
            "iron_ingot",
            "inputItemId",
            "gold ingot",
            "page",
            "2",
        ]);
        assert_eq!(
            url,
            "/recipe/search?inputItemId=iron_ingot&inputItemId=gold%20ingot&page=2"
        );
    }

    #[test]
    fn test_search_url_with_no_params() {
        let empty: [&str; 0] = [];
        assert_eq!(Table::Item.search_url_with_params(&empty), "/item/search");
    }

    #[test]
    #[should_panic(expected = "even length")]
    fn test_search_url_with_odd_params_panics() {
        Table::Item.search_url_with_params(&["modId"]);
    }

    #[test]
    fn test_virtual_tables_share_entity_kind() {
        assert_eq!(Table::OreDictionary.entity_kind(), Table::ItemGroup.entity_kind());
        assert_eq!(Table::FluidContainer.entity_kind(), EntityKind::Item);
        assert_eq!(Table::GregTechRecipe.entity_kind(), EntityKind::Recipe);
        assert!(Table::ThaumcraftAspectEntry.is_virtual());
        assert!(!Table::ThaumcraftAspect.is_virtual());
    }
}
