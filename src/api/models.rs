use crate::catalog::{Diet, Recipe};
use crate::matching::{DietaryConstraint, MatchPhase};
use serde::{Deserialize, Serialize};

/// Ingredients shown on a result card
pub const CARD_INGREDIENTS: usize = 6;
/// Steps shown on a result card
pub const CARD_STEPS: usize = 3;

/// Search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Comma-separated ingredients, Hinglish or English
    #[serde(default)]
    pub ingredients: String,
    /// Kept as text so a bad number gets the JSON error body
    #[serde(default)]
    pub people: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: QueryEcho,
    pub phase: MatchPhase,
    pub total: usize,
    pub results: Vec<RecipeCard>,
}

/// The query as the server understood it
#[derive(Debug, Clone, Serialize)]
pub struct QueryEcho {
    pub tokens: Vec<String>,
    pub dietary: DietaryConstraint,
    pub people: u32,
}

/// Recipe card for search results
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    pub id: i64,
    pub name: String,
    pub time: Option<String>,
    pub diet: Diet,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        RecipeCard {
            id: recipe.id,
            name: recipe.name.clone(),
            time: recipe.time.clone(),
            diet: recipe.diet(),
            ingredients: recipe
                .ingredients
                .iter()
                .take(CARD_INGREDIENTS)
                .cloned()
                .collect(),
            steps: recipe
                .display_steps()
                .iter()
                .take(CARD_STEPS)
                .cloned()
                .collect(),
        }
    }
}

/// Full recipe details
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub name: String,
    pub time: Option<String>,
    pub diet: Diet,
    pub diet_label: Option<String>,
    pub veg: Option<bool>,
    pub ingredients: Vec<String>,
    pub ingredients_hinglish: Option<Vec<String>>,
    pub steps: Vec<String>,
    pub instructions: Option<Vec<String>>,
    pub url: Option<String>,
    pub embed_url: Option<String>,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        RecipeDetail {
            id: recipe.id,
            name: recipe.name.clone(),
            time: recipe.time.clone(),
            diet: recipe.diet(),
            diet_label: recipe.diet_label.clone(),
            veg: recipe.veg,
            ingredients: recipe.ingredients.clone(),
            ingredients_hinglish: recipe.ingredients_hinglish.clone(),
            steps: recipe.display_steps().to_vec(),
            instructions: recipe.instructions.clone(),
            url: recipe.url.clone(),
            embed_url: recipe
                .url
                .as_deref()
                .and_then(crate::utils::youtube_embed_url),
        }
    }
}

/// Normalize request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResponse {
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackKind {
    Useful,
    NotUseful,
}

/// Feedback request body
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub kind: FeedbackKind,
}

/// System statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_recipes: usize,
    pub vegetarian_recipes: usize,
    pub aliases: usize,
    pub skipped_records: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub recipes: usize,
    pub loaded_at: String,
}
