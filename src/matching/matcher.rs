use crate::catalog::Recipe;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Dietary filter chosen per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DietaryConstraint {
    #[default]
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "veg")]
    VegetarianOnly,
    #[serde(rename = "non-veg")]
    NonVegetarianOnly,
}

impl DietaryConstraint {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryConstraint::Both => "both",
            DietaryConstraint::VegetarianOnly => "veg",
            DietaryConstraint::NonVegetarianOnly => "non-veg",
        }
    }
}

impl fmt::Display for DietaryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "both" => Ok(DietaryConstraint::Both),
            "veg" => Ok(DietaryConstraint::VegetarianOnly),
            "non-veg" => Ok(DietaryConstraint::NonVegetarianOnly),
            other => Err(Error::Validation(format!(
                "Invalid dietary preference: {other}. Must be both, veg, or non-veg"
            ))),
        }
    }
}

/// Which strategy produced a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    /// Every token found in the recipe
    Strict,
    /// Strict found nothing; at least one token found
    Partial,
    /// Neither strategy matched
    None,
}

/// Result of a two-phase match.
#[derive(Debug, Clone)]
pub struct MatchOutcome<'a> {
    pub phase: MatchPhase,
    pub recipes: Vec<&'a Recipe>,
}

/// Diet pre-filter. A recipe without a diet label fails the vegetarian
/// filter and passes the non-vegetarian one.
pub fn passes_diet(recipe: &Recipe, diet: DietaryConstraint) -> bool {
    match diet {
        DietaryConstraint::Both => true,
        DietaryConstraint::VegetarianOnly => recipe.is_vegetarian(),
        DietaryConstraint::NonVegetarianOnly => !recipe.is_vegetarian(),
    }
}

/// Ingredients of a recipe, lowercased once per evaluation.
struct LoweredRecipe<'a> {
    recipe: &'a Recipe,
    ingredients: Vec<String>,
}

impl LoweredRecipe<'_> {
    fn contains(&self, token: &str) -> bool {
        self.ingredients.iter().any(|i| i.contains(token))
    }
}

fn lowered_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}

fn diet_filtered(corpus: &[Recipe], diet: DietaryConstraint) -> Vec<LoweredRecipe<'_>> {
    corpus
        .iter()
        .filter(|recipe| passes_diet(recipe, diet))
        .map(|recipe| LoweredRecipe {
            recipe,
            ingredients: recipe.ingredients.iter().map(|i| i.to_lowercase()).collect(),
        })
        .collect()
}

fn strict_over<'a>(candidates: &[LoweredRecipe<'a>], tokens: &[String]) -> Vec<&'a Recipe> {
    candidates
        .iter()
        .filter(|c| tokens.iter().all(|t| c.contains(t)))
        .map(|c| c.recipe)
        .collect()
}

fn partial_over<'a>(candidates: &[LoweredRecipe<'a>], tokens: &[String]) -> Vec<&'a Recipe> {
    candidates
        .iter()
        .filter(|c| tokens.iter().any(|t| c.contains(t)))
        .map(|c| c.recipe)
        .collect()
}

/// Diet-filtered recipes containing every token as a substring of some
/// ingredient. An empty token list matches every diet-filtered recipe.
pub fn strict_matches<'a>(
    tokens: &[String],
    corpus: &'a [Recipe],
    diet: DietaryConstraint,
) -> Vec<&'a Recipe> {
    strict_over(&diet_filtered(corpus, diet), &lowered_tokens(tokens))
}

/// Diet-filtered recipes containing at least one token as a substring of
/// some ingredient. An empty token list matches nothing.
pub fn partial_matches<'a>(
    tokens: &[String],
    corpus: &'a [Recipe],
    diet: DietaryConstraint,
) -> Vec<&'a Recipe> {
    partial_over(&diet_filtered(corpus, diet), &lowered_tokens(tokens))
}

/// Strict match, falling back to partial match only when strict is empty.
/// Results keep corpus order.
pub fn match_with_phase<'a>(
    tokens: &[String],
    corpus: &'a [Recipe],
    diet: DietaryConstraint,
) -> MatchOutcome<'a> {
    let tokens = lowered_tokens(tokens);
    let candidates = diet_filtered(corpus, diet);

    let strict = strict_over(&candidates, &tokens);
    let outcome = if !strict.is_empty() {
        MatchOutcome {
            phase: MatchPhase::Strict,
            recipes: strict,
        }
    } else {
        let partial = partial_over(&candidates, &tokens);
        let phase = if partial.is_empty() {
            MatchPhase::None
        } else {
            MatchPhase::Partial
        };
        MatchOutcome {
            phase,
            recipes: partial,
        }
    };

    debug!(
        "Matched {} of {} recipes ({:?}, diet {}, {} tokens)",
        outcome.recipes.len(),
        corpus.len(),
        outcome.phase,
        diet,
        tokens.len()
    );

    outcome
}

pub fn match_recipes<'a>(
    tokens: &[String],
    corpus: &'a [Recipe],
    diet: DietaryConstraint,
) -> Vec<&'a Recipe> {
    match_with_phase(tokens, corpus, diet).recipes
}
