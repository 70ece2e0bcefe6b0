use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Dietary classification of a recipe, derived from its free-text diet field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    Vegetarian,
    NonVegetarian,
    /// No diet field in the source record
    Unspecified,
}

/// One dish in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub ingredients: Vec<String>,
    pub diet_label: Option<String>,
    pub veg: Option<bool>,
    pub time: Option<String>,
    pub instructions: Option<Vec<String>>,
    pub translated_instructions: Option<Vec<String>>,
    pub url: Option<String>,
    pub ingredients_hinglish: Option<Vec<String>>,
}

impl Recipe {
    /// Minimal constructor; optional fields start empty.
    pub fn new(id: i64, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients,
            diet_label: None,
            veg: None,
            time: None,
            instructions: None,
            translated_instructions: None,
            url: None,
            ingredients_hinglish: None,
        }
    }

    pub fn with_diet(mut self, label: impl Into<String>) -> Self {
        self.diet_label = Some(label.into());
        self
    }

    /// Only an exact case-insensitive "vegetarian" counts as vegetarian;
    /// any other present label is non-vegetarian.
    pub fn diet(&self) -> Diet {
        match &self.diet_label {
            Some(label) if label.to_lowercase() == "vegetarian" => Diet::Vegetarian,
            Some(_) => Diet::NonVegetarian,
            None => Diet::Unspecified,
        }
    }

    pub fn is_vegetarian(&self) -> bool {
        self.diet() == Diet::Vegetarian
    }

    /// Steps shown to the user: translated if available, else the originals.
    pub fn display_steps(&self) -> &[String] {
        self.translated_instructions
            .as_deref()
            .or(self.instructions.as_deref())
            .unwrap_or(&[])
    }
}

/// Wire shape of a corpus entry. Field names follow the published
/// `recipes.json` dataset. The detail-page spellings (`name`, `ingredients`,
/// `steps`, `video_url`) are decoded separately so a record may carry both.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRecord {
    pub id: i64,
    #[serde(default)]
    pub translated_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub translated_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(rename = "Diet", default)]
    pub diet: Option<String>,
    /// Shown on the detail page only; never used for diet filtering
    #[serde(default)]
    pub veg: Option<bool>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "Instructions", default)]
    pub instructions: Option<Vec<String>>,
    #[serde(rename = "TranslatedInstructions", default)]
    pub translated_instructions: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub ingredients_hinglish: Option<Vec<String>>,
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = Error;

    /// The `translated_*` spellings win when both are present.
    fn try_from(record: RecipeRecord) -> Result<Self> {
        let name = record
            .translated_name
            .or(record.name)
            .ok_or_else(|| Error::Validation("missing field `translated_name`".to_string()))?;
        let ingredients = record
            .translated_ingredients
            .or(record.ingredients)
            .ok_or_else(|| {
                Error::Validation("missing field `translated_ingredients`".to_string())
            })?;

        Ok(Recipe {
            id: record.id,
            name,
            ingredients,
            diet_label: record.diet,
            veg: record.veg,
            time: record.time,
            instructions: record.instructions,
            translated_instructions: record.translated_instructions.or(record.steps),
            url: record.url.or(record.video_url),
            ingredients_hinglish: record.ingredients_hinglish,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "id": 7,
            "translated_name": "Aloo Matar",
            "translated_ingredients": ["Potato", "Green Peas"],
            "Diet": "Vegetarian",
            "time": "30 mins",
            "Instructions": ["Boil"],
            "TranslatedInstructions": ["Boil the potatoes"],
            "URL": "https://youtu.be/abc",
            "Cuisine": "Indian"
        }"#;

        let recipe = decode(json).unwrap();
        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.name, "Aloo Matar");
        assert_eq!(recipe.ingredients, vec!["Potato", "Green Peas"]);
        assert_eq!(recipe.diet(), Diet::Vegetarian);
        assert_eq!(recipe.time.as_deref(), Some("30 mins"));
        assert_eq!(recipe.display_steps(), ["Boil the potatoes".to_string()]);
        assert_eq!(recipe.url.as_deref(), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_optional_fields_absent() {
        let json = r#"{"id": 1, "translated_name": "Plain", "translated_ingredients": []}"#;
        let recipe = decode(json).unwrap();

        assert_eq!(recipe.diet(), Diet::Unspecified);
        assert!(recipe.time.is_none());
        assert!(recipe.url.is_none());
        assert!(recipe.display_steps().is_empty());
    }

    fn decode(json: &str) -> Result<Recipe> {
        Recipe::try_from(serde_json::from_str::<RecipeRecord>(json).unwrap())
    }

    #[test]
    fn test_missing_ingredients_rejected() {
        let err = decode(r#"{"id": 1, "translated_name": "Broken"}"#).unwrap_err();
        assert!(err.to_string().contains("translated_ingredients"));

        let err = decode(r#"{"id": 1, "translated_ingredients": []}"#).unwrap_err();
        assert!(err.to_string().contains("translated_name"));
    }

    #[test]
    fn test_record_with_both_spellings() {
        let recipe = decode(
            r#"{
            "id": 1,
            "translated_name": "Aloo Gobi",
            "name": "Aloo Gobhi",
            "translated_ingredients": ["Potato", "Cauliflower"],
            "ingredients": ["aloo", "gobhi"],
            "TranslatedInstructions": ["Fry the potatoes"],
            "steps": ["Aloo bhuno"],
            "URL": "https://youtu.be/abc",
            "video_url": "https://youtu.be/other",
            "Diet": "Vegetarian",
            "veg": true
        }"#,
        )
        .unwrap();

        assert_eq!(recipe.name, "Aloo Gobi");
        assert_eq!(recipe.ingredients, vec!["Potato", "Cauliflower"]);
        assert_eq!(recipe.display_steps(), ["Fry the potatoes".to_string()]);
        assert_eq!(recipe.url.as_deref(), Some("https://youtu.be/abc"));
        assert!(recipe.is_vegetarian());
    }

    #[test]
    fn test_detail_page_aliases() {
        let json = r#"{
            "id": 3,
            "name": "Palak Paneer",
            "ingredients": ["spinach", "cottage cheese"],
            "veg": true,
            "steps": ["Blanch spinach"],
            "video_url": "https://www.youtube.com/watch?v=xyz"
        }"#;

        let recipe = decode(json).unwrap();
        assert_eq!(recipe.name, "Palak Paneer");
        assert_eq!(recipe.ingredients, vec!["spinach", "cottage cheese"]);
        assert_eq!(recipe.veg, Some(true));
        // The veg flag does not stand in for a missing Diet label
        assert_eq!(recipe.diet(), Diet::Unspecified);
        assert_eq!(recipe.display_steps(), ["Blanch spinach".to_string()]);
        assert!(recipe.url.is_some());
    }

    #[test]
    fn test_diet_field_wins_over_veg_flag() {
        let json = r#"{
            "id": 4,
            "translated_name": "Egg Curry",
            "translated_ingredients": ["egg"],
            "Diet": "Eggetarian",
            "veg": true
        }"#;

        let recipe = decode(json).unwrap();
        assert_eq!(recipe.diet(), Diet::NonVegetarian);
    }

    #[test]
    fn test_diet_case_insensitive() {
        let recipe = Recipe::new(1, "x", vec![]).with_diet("VEGETARIAN");
        assert!(recipe.is_vegetarian());

        let recipe = Recipe::new(1, "x", vec![]).with_diet("Non Vegeterian");
        assert_eq!(recipe.diet(), Diet::NonVegetarian);

        // Labels that only contain the word do not count
        let recipe = Recipe::new(1, "x", vec![]).with_diet("High Protein Vegetarian");
        assert!(!recipe.is_vegetarian());
    }
}
