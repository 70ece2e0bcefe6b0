// Recipe corpus: record types, loading, and the in-memory catalog

pub mod loader;
pub mod recipe;

pub use loader::{parse_corpus, CorpusLoader, CorpusSource, LoadReport, SkippedRecord};
pub use recipe::{Diet, Recipe, RecipeRecord};

use std::collections::HashMap;

/// Immutable, ordered collection of recipes with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Build a catalog. Ids are expected to be unique; if not, `get`
    /// returns the first recipe with that id.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            by_id.entry(recipe.id).or_insert(index);
        }
        Self { recipes, by_id }
    }

    /// Recipes in corpus order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.by_id.get(&id).map(|&index| &self.recipes[index])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn veg_count(&self) -> usize {
        self.recipes.iter().filter(|r| r.is_vegetarian()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_counts() {
        let catalog = Catalog::new(vec![
            Recipe::new(3, "Dal Tadka", vec!["lentils".to_string()]).with_diet("Vegetarian"),
            Recipe::new(8, "Fish Curry", vec!["fish".to_string()]).with_diet("Non Vegeterian"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.veg_count(), 1);
        assert_eq!(catalog.get(8).map(|r| r.name.as_str()), Some("Fish Curry"));
        assert!(catalog.get(1).is_none());
        assert_eq!(catalog.recipes()[0].id, 3);
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let catalog = Catalog::new(vec![
            Recipe::new(1, "First", vec![]),
            Recipe::new(1, "Second", vec![]),
        ]);

        assert_eq!(catalog.get(1).map(|r| r.name.as_str()), Some("First"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.veg_count(), 0);
    }
}
