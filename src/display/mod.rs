// Display summaries for search result lists

use crate::plugin::base::{Fluid, FluidGroup, Item, ItemGroup, Recipe, RecipeType};
use crate::plugin::gregtech::GregTechData;
use crate::plugin::{Aspect, Quest};
use crate::registry::Table;
use serde::Serialize;

/// One entry of a result grid: a label, a short description and the link
/// to the entity's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayIcon {
    pub id: String,
    pub label: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
}

fn image(path: &str) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", n, word)
    }
}

pub fn item_icon(table: Table, item: &Item) -> DisplayIcon {
    let mut description = format!("{}:{}", item.mod_id, item.internal_name);
    if item.item_damage != 0 {
        description.push_str(&format!(":{}", item.item_damage));
    }
    DisplayIcon {
        id: item.id.clone(),
        label: item.localized_name.clone(),
        description,
        url: table.view_url(item),
        image: image(&item.image_file_path),
    }
}

pub fn fluid_icon(table: Table, fluid: &Fluid) -> DisplayIcon {
    DisplayIcon {
        id: fluid.id.clone(),
        label: fluid.localized_name.clone(),
        description: format!("{}:{}", fluid.mod_id, fluid.internal_name),
        url: table.view_url(fluid),
        image: image(&fluid.image_file_path),
    }
}

pub fn item_group_icon(table: Table, group: &ItemGroup) -> DisplayIcon {
    let label = match group.item_stacks.first() {
        Some(stack) if group.item_stacks.len() == 1 => stack.item_id.clone(),
        _ => format!("Item Group {}", group.id),
    };
    DisplayIcon {
        id: group.id.clone(),
        label,
        description: plural(group.item_stacks.len(), "item"),
        url: table.view_url(group),
        image: None,
    }
}

/// Ore dictionary groups are labelled by their dictionary names
pub fn ore_dictionary_icon(table: Table, group: &ItemGroup, names: &[String]) -> DisplayIcon {
    let mut icon = item_group_icon(table, group);
    if !names.is_empty() {
        icon.label = names.join(", ");
    }
    icon
}

pub fn fluid_group_icon(table: Table, group: &FluidGroup) -> DisplayIcon {
    let label = match group.fluid_stacks.first() {
        Some(stack) if group.fluid_stacks.len() == 1 => stack.fluid_id.clone(),
        _ => format!("Fluid Group {}", group.id),
    };
    DisplayIcon {
        id: group.id.clone(),
        label,
        description: plural(group.fluid_stacks.len(), "fluid"),
        url: table.view_url(group),
        image: None,
    }
}

pub fn recipe_icon(table: Table, recipe: &Recipe) -> DisplayIcon {
    let label = match recipe.item_outputs.first() {
        Some(output) => format!("{} x{}", output.item_id, output.stack_size),
        None => format!("Recipe {}", recipe.id),
    };
    DisplayIcon {
        id: recipe.id.clone(),
        label,
        description: format!(
            "{}: {} in, {} out",
            recipe.recipe_type_id,
            plural(recipe.item_inputs.len(), "input"),
            plural(recipe.item_outputs.len(), "output"),
        ),
        url: table.view_url(recipe),
        image: None,
    }
}

/// GregTech recipes append the machine tier and running time
pub fn gregtech_recipe_icon(table: Table, recipe: &Recipe, data: Option<&GregTechData>) -> DisplayIcon {
    let mut icon = recipe_icon(table, recipe);
    if let Some(data) = data {
        icon.description
            .push_str(&format!(" ({} {} EU/t, {} ticks)", data.voltage_tier, data.voltage, data.duration));
    }
    icon
}

pub fn recipe_type_icon(table: Table, recipe_type: &RecipeType) -> DisplayIcon {
    DisplayIcon {
        id: recipe_type.id.clone(),
        label: recipe_type.type_name.clone(),
        description: recipe_type.category.clone(),
        url: table.view_url(recipe_type),
        image: None,
    }
}

pub fn aspect_icon(table: Table, aspect: &Aspect) -> DisplayIcon {
    let description = if aspect.primal {
        format!("Primal. {}", aspect.description)
    } else {
        aspect.description.clone()
    };
    DisplayIcon {
        id: aspect.id.clone(),
        label: aspect.name.clone(),
        description,
        url: table.view_url(aspect),
        image: image(&aspect.icon_file_path),
    }
}

pub fn quest_icon(table: Table, quest: &Quest) -> DisplayIcon {
    DisplayIcon {
        id: quest.id.clone(),
        label: quest.name.clone(),
        description: quest.quest_line.clone().unwrap_or_default(),
        url: table.view_url(quest),
        image: None,
    }
}
