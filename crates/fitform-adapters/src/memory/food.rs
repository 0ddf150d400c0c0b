//! Offline food lookup: a small nutrient table and a quantity parser.
//!
//! Accepts phrases like "200 g de arroz", "2 huevos", "1 porción de avena"
//! or "arroz 150". Failures use the backend's error codes so callers
//! localize them the same way.

use std::sync::LazyLock;

use regex::Regex;

use fitform_core::application::dto::MealEstimate;
use fitform_core::application::ports::ApiError;
use fitform_core::domain::localization::server;

const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Nutrients per 100 g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    /// Weight of one piece, for counted foods like eggs.
    pub unit_grams: Option<f64>,
}

const fn food(
    name: &'static str,
    aliases: &'static [&'static str],
    [calories, carbs, protein, fat]: [f64; 4],
    unit_grams: Option<f64>,
) -> Food {
    Food {
        name,
        aliases,
        calories,
        carbs,
        protein,
        fat,
        unit_grams,
    }
}

pub const FOODS: &[Food] = &[
    food("arroz", &["arroz", "rice"], [130.0, 28.2, 2.7, 0.3], None),
    food("pollo", &["pollo", "pechuga", "chicken"], [165.0, 0.0, 31.0, 3.6], None),
    food("huevo", &["huevo", "huevos", "egg", "eggs"], [155.0, 1.1, 13.0, 11.0], Some(50.0)),
    food("pan", &["pan", "bread", "tostada", "tostadas"], [265.0, 49.0, 9.0, 3.2], Some(30.0)),
    food("manzana", &["manzana", "manzanas", "apple", "apples"], [52.0, 14.0, 0.3, 0.2], Some(180.0)),
    food(
        "plátano",
        &["plátano", "plátanos", "platano", "platanos", "banana", "bananas", "banano"],
        [89.0, 23.0, 1.1, 0.3],
        Some(120.0),
    ),
    food("avena", &["avena", "oats", "oatmeal"], [389.0, 66.3, 16.9, 6.9], None),
    food("leche", &["leche", "milk"], [42.0, 5.0, 3.4, 1.0], None),
    food("pasta", &["pasta", "espaguetis", "macarrones", "spaghetti"], [131.0, 25.0, 5.0, 1.1], None),
    food("salmón", &["salmón", "salmon"], [208.0, 0.0, 20.0, 13.0], None),
    food("atún", &["atún", "atun", "tuna"], [132.0, 0.0, 28.0, 1.3], None),
    food("aguacate", &["aguacate", "aguacates", "palta", "avocado"], [160.0, 8.5, 2.0, 14.7], Some(150.0)),
    food("yogur", &["yogur", "yogures", "yogurt"], [61.0, 4.7, 3.5, 3.3], Some(125.0)),
    food("papa", &["papa", "papas", "patata", "patatas", "potato", "potatoes"], [77.0, 17.0, 2.0, 0.1], Some(170.0)),
    food("lentejas", &["lentejas", "lentils"], [116.0, 20.0, 9.0, 0.4], None),
];

const UNIT_TO_GRAMS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("gr", 1.0),
    ("gram", 1.0),
    ("grams", 1.0),
    ("gramo", 1.0),
    ("gramos", 1.0),
    ("kg", 1000.0),
    ("kilogram", 1000.0),
    ("kilograms", 1000.0),
    ("kilogramo", 1000.0),
    ("kilogramos", 1000.0),
    ("ml", 1.0),
    ("oz", 28.3495),
    ("onza", 28.3495),
    ("onzas", 28.3495),
    ("lb", 453.592),
    ("lbs", 453.592),
    ("libra", 453.592),
    ("libras", 453.592),
];

const SERVING_UNITS: &[&str] = &[
    "serving", "servings", "portion", "portions", "porción", "porcion", "porciones",
];

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*([\p{L}]+)?").expect("quantity pattern is a valid regex")
});

fn unprocessable(code: &str) -> ApiError {
    ApiError::Status {
        status: 422,
        detail: Some(code.to_string()),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// First food mentioned in the text.
pub fn lookup(text: &str) -> Option<&'static Food> {
    words(text).find_map(|word| FOODS.iter().find(|f| f.aliases.contains(&word)))
}

fn grams_for(quantity: f64, unit: Option<&str>, food: &Food) -> f64 {
    if let Some(unit) = unit {
        if let Some((_, factor)) = UNIT_TO_GRAMS.iter().find(|(name, _)| *name == unit) {
            return quantity * factor;
        }
        if SERVING_UNITS.contains(&unit) {
            return quantity * food.unit_grams.unwrap_or(DEFAULT_SERVING_GRAMS);
        }
    }
    // "2 huevos" counts pieces; a bare number on bulk food is grams.
    quantity * food.unit_grams.unwrap_or(1.0)
}

/// Parses a meal description and computes its totals.
pub fn parse(text: &str) -> Result<MealEstimate, ApiError> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(unprocessable(server::FOOD_INSUFFICIENT_DATA));
    }

    let Some(food) = lookup(&lowered) else {
        return Err(if lowered.chars().any(char::is_alphabetic) {
            unprocessable(server::FOOD_INVALID_DOMAIN)
        } else {
            unprocessable(server::FOOD_INSUFFICIENT_DATA)
        });
    };

    let Some(captures) = QUANTITY.captures(&lowered) else {
        return Err(unprocessable(server::FOOD_INSUFFICIENT_DATA));
    };
    let quantity: f64 = captures[1]
        .replace(',', ".")
        .parse()
        .map_err(|_| unprocessable(server::FOOD_INSUFFICIENT_DATA))?;
    let unit = captures.get(2).map(|m| m.as_str());

    let grams = round2(grams_for(quantity, unit, food));
    if grams <= 0.0 {
        return Err(unprocessable(server::FOOD_INSUFFICIENT_DATA));
    }

    let total = |per_100g: f64| round2(per_100g * grams / 100.0);
    Ok(MealEstimate {
        food: food.name.to_string(),
        quantity_grams: grams,
        calories_per_100g: food.calories,
        carbs_per_100g: food.carbs,
        protein_per_100g: food.protein,
        fat_per_100g: food.fat,
        total_calories: total(food.calories),
        total_carbs: total(food.carbs),
        total_protein: total(food.protein),
        total_fat: total(food.fat),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: ApiError) -> Option<String> {
        err.detail().map(str::to_string)
    }

    #[test]
    fn grams_of_bulk_food() {
        let meal = parse("200 g de arroz").unwrap();
        assert_eq!(meal.food, "arroz");
        assert_eq!(meal.quantity_grams, 200.0);
        assert_eq!(meal.total_calories, 260.0);
        assert_eq!(meal.total_carbs, 56.4);
    }

    #[test]
    fn counted_pieces_use_unit_weight() {
        let meal = parse("2 huevos revueltos").unwrap();
        assert_eq!(meal.food, "huevo");
        assert_eq!(meal.quantity_grams, 100.0);
        assert_eq!(meal.total_protein, 13.0);
    }

    #[test]
    fn imperial_and_kilogram_units() {
        assert_eq!(parse("1 lb chicken").unwrap().quantity_grams, 453.59);
        assert_eq!(parse("0,5 kg de pollo").unwrap().quantity_grams, 500.0);
    }

    #[test]
    fn servings_default_to_one_hundred_grams() {
        let meal = parse("1 porción de avena").unwrap();
        assert_eq!(meal.quantity_grams, 100.0);
        assert_eq!(meal.total_calories, 389.0);
    }

    #[test]
    fn missing_quantity_is_insufficient() {
        let err = parse("arroz con pollo").unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(code(err).as_deref(), Some("insufficient_data"));
    }

    #[test]
    fn non_food_text_is_out_of_domain() {
        let err = parse("ayer corrí 5 km").unwrap_err();
        assert_eq!(code(err).as_deref(), Some("invalid_domain"));
    }

    #[test]
    fn blank_text_is_insufficient() {
        assert_eq!(code(parse("   ").unwrap_err()).as_deref(), Some("insufficient_data"));
    }
}
