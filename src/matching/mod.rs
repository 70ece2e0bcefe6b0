// Ingredient normalization and recipe matching

pub mod matcher;
pub mod normalizer;

pub use matcher::{
    match_recipes, match_with_phase, partial_matches, passes_diet, strict_matches,
    DietaryConstraint, MatchOutcome, MatchPhase,
};
pub use normalizer::AliasTable;
