// SQLite schema of the exported dataset

use rusqlite::Connection;

/// Entity tables, in the order they are reported by `Store::table_counts`
pub const ENTITY_TABLES: &[&str] = &[
    "item",
    "fluid",
    "item_group",
    "fluid_group",
    "recipe",
    "recipe_type",
    "thaumcraft_aspect",
    "quest",
];

const SCHEMA: &str = r#"
    -- Base plugin
    CREATE TABLE IF NOT EXISTS item (
        id TEXT PRIMARY KEY,
        mod_id TEXT NOT NULL,
        internal_name TEXT NOT NULL,
        item_damage INTEGER NOT NULL DEFAULT 0,
        localized_name TEXT NOT NULL,
        tooltip TEXT,
        image_file_path TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS fluid (
        id TEXT PRIMARY KEY,
        mod_id TEXT NOT NULL,
        internal_name TEXT NOT NULL,
        localized_name TEXT NOT NULL,
        image_file_path TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS item_group (
        id TEXT PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS item_group_item (
        item_group_id TEXT NOT NULL REFERENCES item_group(id),
        item_id TEXT NOT NULL REFERENCES item(id),
        stack_size INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS fluid_group (
        id TEXT PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS fluid_group_fluid (
        fluid_group_id TEXT NOT NULL REFERENCES fluid_group(id),
        fluid_id TEXT NOT NULL REFERENCES fluid(id),
        amount INTEGER NOT NULL DEFAULT 1000
    );

    CREATE TABLE IF NOT EXISTS recipe_type (
        id TEXT PRIMARY KEY,
        category TEXT NOT NULL,
        type_name TEXT NOT NULL,
        icon_item_id TEXT
    );

    CREATE TABLE IF NOT EXISTS recipe (
        id TEXT PRIMARY KEY,
        recipe_type_id TEXT NOT NULL REFERENCES recipe_type(id)
    );

    CREATE TABLE IF NOT EXISTS recipe_item_input (
        recipe_id TEXT NOT NULL REFERENCES recipe(id),
        slot INTEGER NOT NULL,
        item_id TEXT NOT NULL REFERENCES item(id),
        stack_size INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS recipe_item_output (
        recipe_id TEXT NOT NULL REFERENCES recipe(id),
        slot INTEGER NOT NULL,
        item_id TEXT NOT NULL REFERENCES item(id),
        stack_size INTEGER NOT NULL DEFAULT 1
    );

    -- Forge plugin
    CREATE TABLE IF NOT EXISTS ore_dictionary (
        name TEXT NOT NULL,
        item_group_id TEXT NOT NULL REFERENCES item_group(id)
    );

    CREATE TABLE IF NOT EXISTS fluid_container (
        container_item_id TEXT NOT NULL REFERENCES item(id),
        fluid_id TEXT NOT NULL REFERENCES fluid(id),
        amount INTEGER NOT NULL,
        empty_container_item_id TEXT REFERENCES item(id)
    );

    -- GregTech plugin
    CREATE TABLE IF NOT EXISTS gregtech_recipe (
        recipe_id TEXT PRIMARY KEY REFERENCES recipe(id),
        voltage_tier TEXT NOT NULL,
        voltage INTEGER NOT NULL,
        duration INTEGER NOT NULL
    );

    -- Thaumcraft plugin
    CREATE TABLE IF NOT EXISTS thaumcraft_aspect (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        primal INTEGER NOT NULL DEFAULT 0,
        icon_file_path TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS thaumcraft_aspect_entry (
        item_id TEXT NOT NULL REFERENCES item(id),
        aspect_id TEXT NOT NULL REFERENCES thaumcraft_aspect(id),
        amount INTEGER NOT NULL
    );

    -- Quest plugin
    CREATE TABLE IF NOT EXISTS quest (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        quest_line TEXT,
        icon_item_id TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_item_group_item_group ON item_group_item(item_group_id);
    CREATE INDEX IF NOT EXISTS idx_item_group_item_item ON item_group_item(item_id);
    CREATE INDEX IF NOT EXISTS idx_fluid_group_fluid_group ON fluid_group_fluid(fluid_group_id);
    CREATE INDEX IF NOT EXISTS idx_recipe_item_input_recipe ON recipe_item_input(recipe_id);
    CREATE INDEX IF NOT EXISTS idx_recipe_item_input_item ON recipe_item_input(item_id);
    CREATE INDEX IF NOT EXISTS idx_recipe_item_output_recipe ON recipe_item_output(recipe_id);
    CREATE INDEX IF NOT EXISTS idx_recipe_item_output_item ON recipe_item_output(item_id);
    CREATE INDEX IF NOT EXISTS idx_ore_dictionary_group ON ore_dictionary(item_group_id);
    CREATE INDEX IF NOT EXISTS idx_fluid_container_item ON fluid_container(container_item_id);
    CREATE INDEX IF NOT EXISTS idx_aspect_entry_item ON thaumcraft_aspect_entry(item_id);
"#;

/// Create any missing tables and indexes
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
