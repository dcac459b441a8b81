#![allow(dead_code)]

use nesql_rust::config::Config;
use nesql_rust::store::Store;
use std::fs;
use std::path::{Path, PathBuf};

/// Small dataset touching every table.
///
/// Recipes: r1 crafting iron_ingot x3 -> bucket, r2 crafting gold_ingot ->
/// gear, r3 assembler (LV) copper_wire + iron_ingot -> circuit, r4 assembler
/// (MV) gold_ingot -> gold_wire.
const FIXTURE: &str = r#"
    INSERT INTO item (id, mod_id, internal_name, item_damage, localized_name, tooltip, image_file_path) VALUES
        ('iron_ingot', 'minecraft', 'iron_ingot', 0, 'Iron Ingot', NULL, 'minecraft/iron_ingot.png'),
        ('gold_ingot', 'minecraft', 'gold_ingot', 0, 'Gold Ingot', NULL, 'minecraft/gold_ingot.png'),
        ('bucket', 'minecraft', 'bucket', 0, 'Bucket', NULL, ''),
        ('water_bucket', 'minecraft', 'water_bucket', 0, 'Water Bucket', NULL, ''),
        ('copper_wire', 'gregtech', 'wire_copper', 0, 'Copper Wire', '1x Copper', ''),
        ('gear', 'gregtech', 'gear_gold', 0, 'Gold Gear', NULL, ''),
        ('circuit', 'gregtech', 'circuit_basic', 1, 'Basic Circuit', NULL, ''),
        ('gold_wire', 'gregtech', 'wire_gold', 0, 'Gold Wire', NULL, '');

    INSERT INTO fluid (id, mod_id, internal_name, localized_name) VALUES
        ('water', 'minecraft', 'water', 'Water'),
        ('lava', 'minecraft', 'lava', 'Lava');

    INSERT INTO item_group (id) VALUES ('g_iron'), ('g_gold'), ('g_misc');
    INSERT INTO item_group_item (item_group_id, item_id, stack_size) VALUES
        ('g_iron', 'iron_ingot', 1),
        ('g_gold', 'gold_ingot', 1),
        ('g_misc', 'bucket', 1),
        ('g_misc', 'water_bucket', 1);

    INSERT INTO fluid_group (id) VALUES ('fg_water');
    INSERT INTO fluid_group_fluid (fluid_group_id, fluid_id, amount) VALUES ('fg_water', 'water', 1000);

    INSERT INTO recipe_type (id, category, type_name, icon_item_id) VALUES
        ('crafting', 'minecraft', 'Shaped Crafting', NULL),
        ('assembler', 'gregtech', 'Assembler', 'circuit');

    INSERT INTO recipe (id, recipe_type_id) VALUES
        ('r1', 'crafting'), ('r2', 'crafting'), ('r3', 'assembler'), ('r4', 'assembler');

    INSERT INTO recipe_item_input (recipe_id, slot, item_id, stack_size) VALUES
        ('r1', 0, 'iron_ingot', 3),
        ('r2', 0, 'gold_ingot', 1),
        ('r3', 1, 'iron_ingot', 1),
        ('r3', 0, 'copper_wire', 2),
        ('r4', 0, 'gold_ingot', 1);

    INSERT INTO recipe_item_output (recipe_id, slot, item_id, stack_size) VALUES
        ('r1', 0, 'bucket', 1),
        ('r2', 0, 'gear', 1),
        ('r3', 0, 'circuit', 1),
        ('r4', 0, 'gold_wire', 2);

    INSERT INTO ore_dictionary (name, item_group_id) VALUES
        ('ingotIron', 'g_iron'),
        ('ingotGold', 'g_gold');

    INSERT INTO fluid_container (container_item_id, fluid_id, amount, empty_container_item_id) VALUES
        ('water_bucket', 'water', 1000, 'bucket');

    INSERT INTO gregtech_recipe (recipe_id, voltage_tier, voltage, duration) VALUES
        ('r3', 'LV', 32, 200),
        ('r4', 'MV', 128, 100);

    INSERT INTO thaumcraft_aspect (id, name, description, primal, icon_file_path) VALUES
        ('ignis', 'Ignis', 'Fire', 1, ''),
        ('metallum', 'Metallum', 'Metal', 0, '');

    INSERT INTO thaumcraft_aspect_entry (item_id, aspect_id, amount) VALUES
        ('iron_ingot', 'metallum', 3),
        ('gold_ingot', 'metallum', 2);

    INSERT INTO quest (id, name, description, quest_line, icon_item_id) VALUES
        ('q1', 'Getting Started', '', 'Tier 1', NULL),
        ('q2', 'Iron Age', '', 'Tier 1', 'iron_ingot'),
        ('q3', 'Steam', '', 'Tier 2', NULL);
"#;

/// Open a store at `path` and load the fixture dataset
pub fn seed_store(path: &Path) -> Store {
    let store = Store::open(path).unwrap();
    store.connection().execute_batch(FIXTURE).unwrap();
    store
}

/// Add `n` filler items with mod id `filler`, ids `filler00`, `filler01`, ...
pub fn add_filler_items(store: &Store, n: usize) {
    for i in 0..n {
        store
            .connection()
            .execute(
                "INSERT INTO item (id, mod_id, internal_name, localized_name) VALUES (?1, 'filler', ?1, ?2)",
                rusqlite::params![format!("filler{:02}", i), format!("Filler {:02}", i)],
            )
            .unwrap();
    }
}

/// Write a config file pointing at `database` and return its path
pub fn write_config(dir: &Path, database: &Path, page_size: u32) -> PathBuf {
    let content = format!(
        "database: {}\nsearch:\n  page_size: {}\n  nav_radius: 2\nserver:\n  host: 127.0.0.1\n  port: 0\n",
        database.display(),
        page_size
    );
    let path = dir.join("server.yaml");
    fs::write(&path, content).unwrap();
    path
}

/// Config loaded the same way the binary loads it
pub fn load_config(path: &Path) -> Config {
    Config::load_from(path).unwrap()
}
