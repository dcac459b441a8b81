// Plugin data models
// Each plugin contributes entities, row mappings and predicate builders
// for the tables it owns.

pub mod base;
pub mod forge;
pub mod gregtech;
pub mod quest;
pub mod thaumcraft;

pub use base::{Fluid, FluidGroup, Item, ItemGroup, Recipe, RecipeType};
pub use quest::Quest;
pub use thaumcraft::Aspect;
