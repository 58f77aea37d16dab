//! Hardcoded records served whenever an upstream provider cannot be used.

use chrono::{Duration, NaiveDate, Utc};

use crate::api::models::{ForecastDay, Ingredient, LOCAL_SOURCE, Quote, Recipe, WeatherSnapshot};
use crate::normalize::recipe::{placeholder_image, split_steps};
use crate::normalize::weather::day_label;

struct CatalogQuote {
    text: &'static str,
    author: &'static str,
    category: &'static str,
}

const QUOTES: &[CatalogQuote] = &[
    CatalogQuote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
        category: "Passion",
    },
    CatalogQuote {
        text: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
        category: "Perseverance",
    },
    CatalogQuote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
        category: "Dreams",
    },
    CatalogQuote {
        text: "It is during our darkest moments that we must focus to see the light.",
        author: "Aristotle",
        category: "Inspiration",
    },
    CatalogQuote {
        text: "The only impossible journey is the one you never begin.",
        author: "Tony Robbins",
        category: "Beginning",
    },
    CatalogQuote {
        text: "In the middle of difficulty lies opportunity.",
        author: "Albert Einstein",
        category: "Growth",
    },
    CatalogQuote {
        text: "Believe you can and you're halfway there.",
        author: "Theodore Roosevelt",
        category: "Motivation",
    },
    CatalogQuote {
        text: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
        category: "Action",
    },
    CatalogQuote {
        text: "Don't let yesterday take up too much of today.",
        author: "Will Rogers",
        category: "Life",
    },
    CatalogQuote {
        text: "You learn more from failure than from success. Don't let it stop you. Failure builds character.",
        author: "Unknown",
        category: "Success",
    },
];

/// Category names the recipe provider accepts in its filter endpoint.
pub const RECIPE_CATEGORIES: &[&str] = &[
    "Beef",
    "Chicken",
    "Dessert",
    "Lamb",
    "Miscellaneous",
    "Pasta",
    "Pork",
    "Seafood",
    "Side",
    "Starter",
    "Vegan",
    "Vegetarian",
    "Breakfast",
    "Goat",
];

struct CatalogRecipe {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    area: &'static str,
    instructions: &'static str,
    ingredients: &'static [(&'static str, &'static str)],
}

const RECIPES: &[CatalogRecipe] = &[
    CatalogRecipe {
        id: "1",
        name: "Spaghetti Carbonara",
        category: "Pasta",
        area: "Italian",
        instructions: "Cook spaghetti according to package directions.\r\n\
            In a large bowl, whisk together eggs, cheese, and pepper.\r\n\
            Drain pasta and immediately add to egg mixture, tossing quickly to coat.",
        ingredients: &[
            ("Spaghetti", "400g"),
            ("Eggs", "4 large"),
            ("Parmesan cheese", "100g grated"),
            ("Black pepper", "to taste"),
        ],
    },
    CatalogRecipe {
        id: "2",
        name: "Chicken Tikka Masala",
        category: "Chicken",
        area: "Indian",
        instructions: "Marinate chicken in yogurt and spices.\r\n\
            Grill until cooked.\r\n\
            Make sauce with tomatoes, cream, and spices.\r\n\
            Combine chicken with sauce and simmer.",
        ingredients: &[
            ("Chicken breast", "500g"),
            ("Yogurt", "200ml"),
            ("Tomatoes", "400g canned"),
            ("Heavy cream", "200ml"),
        ],
    },
    CatalogRecipe {
        id: "3",
        name: "Vegetable Stir Fry",
        category: "Vegetarian",
        area: "Chinese",
        instructions: "Heat oil in a wok over high heat.\r\n\
            Add garlic and ginger and fry for 30 seconds.\r\n\
            Add the vegetables and stir fry until just tender.\r\n\
            Season with soy sauce and serve over rice.",
        ingredients: &[
            ("Mixed vegetables", "500g"),
            ("Garlic", "2 cloves"),
            ("Ginger", "1 tbsp grated"),
            ("Soy sauce", "3 tbsp"),
            ("Vegetable oil", "2 tbsp"),
        ],
    },
];

pub fn random_quote() -> Quote {
    quote_at(fastrand::usize(..QUOTES.len()))
}

fn quote_at(index: usize) -> Quote {
    let entry = &QUOTES[index % QUOTES.len()];
    Quote {
        text: entry.text.to_string(),
        author: entry.author.to_string(),
        category: Some(entry.category.to_string()),
        source: LOCAL_SOURCE.to_string(),
        fallback: true,
    }
}

pub fn recipes() -> Vec<Recipe> {
    RECIPES.iter().map(to_recipe).collect()
}

pub fn recipe_by_id(id: &str) -> Option<Recipe> {
    RECIPES.iter().find(|entry| entry.id == id).map(to_recipe)
}

fn to_recipe(entry: &CatalogRecipe) -> Recipe {
    Recipe {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        image: placeholder_image(entry.name),
        category: entry.category.to_string(),
        area: Some(entry.area.to_string()),
        instructions: entry.instructions.to_string(),
        steps: split_steps(entry.instructions),
        video: None,
        ingredients: entry
            .ingredients
            .iter()
            .map(|(name, measure)| Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            })
            .collect(),
    }
}

/// Synthetic forecast rows: (high, low, condition, icon).
const FORECAST: [(i64, i64, &str, &str); 5] = [
    (24, 18, "Partly Cloudy", "partly-cloudy"),
    (26, 19, "Sunny", "sunny"),
    (23, 17, "Cloudy", "cloudy"),
    (21, 15, "Rainy", "rainy"),
    (25, 18, "Sunny", "sunny"),
];

pub fn weather(city: &str) -> WeatherSnapshot {
    weather_on(city, Utc::now().date_naive())
}

fn weather_on(city: &str, today: NaiveDate) -> WeatherSnapshot {
    let forecast = FORECAST
        .iter()
        .enumerate()
        .map(|(index, (high, low, condition, icon))| {
            let date = today + Duration::days(index as i64);
            ForecastDay {
                day: day_label(index, date),
                high: *high,
                low: *low,
                condition: condition.to_string(),
                icon: icon.to_string(),
            }
        })
        .collect();

    WeatherSnapshot {
        location: city.to_string(),
        temperature: 22,
        feels_like: 24,
        condition: "Partly Cloudy".to_string(),
        humidity: 65,
        wind_speed: 12,
        visibility: 10,
        pressure: 1013,
        uv_index: 5,
        sunrise: "06:30 AM".to_string(),
        sunset: "07:45 PM".to_string(),
        forecast,
        source: LOCAL_SOURCE.to_string(),
        fallback: true,
    }
}
