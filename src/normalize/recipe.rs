use crate::api::models::{Ingredient, Recipe};
use crate::upstream::mealdb::RawMeal;

/// The provider exposes `strIngredient1..20` / `strMeasure1..20`.
pub const INGREDIENT_SLOTS: usize = 20;

/// `None` when the meal has no id or no name.
pub fn normalize(meal: &RawMeal) -> Option<Recipe> {
    let id = meal.id()?.to_string();
    let name = text(meal, "strMeal")?;
    let instructions = text(meal, "strInstructions").unwrap_or_default();

    Some(Recipe {
        id,
        image: text(meal, "strMealThumb").unwrap_or_else(|| placeholder_image(&name)),
        category: text(meal, "strCategory").unwrap_or_default(),
        area: text(meal, "strArea"),
        steps: split_steps(&instructions),
        instructions,
        video: text(meal, "strYoutube"),
        ingredients: ingredients(meal),
        name,
    })
}

/// Walks the numbered slots in order, keeping only named ingredients.
pub fn ingredients(meal: &RawMeal) -> Vec<Ingredient> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = text(meal, &format!("strIngredient{slot}"))?;
            let measure = text(meal, &format!("strMeasure{slot}")).unwrap_or_default();
            Some(Ingredient { name, measure })
        })
        .collect()
}

/// Splits on `\n` or `\r\n`, dropping blank lines.
pub fn split_steps(instructions: &str) -> Vec<String> {
    instructions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn placeholder_image(name: &str) -> String {
    let label = name.split_whitespace().collect::<Vec<_>>().join("+");
    format!("/placeholder.svg?height=200&width=300&text={label}")
}

fn text(meal: &RawMeal, key: &str) -> Option<String> {
    meal.field(key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
