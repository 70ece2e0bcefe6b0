use crate::catalog::{Catalog, CorpusLoader, CorpusSource, LoadReport};
use crate::config::{aliases::load_alias_table, Settings};
use crate::matching::{match_with_phase, AliasTable, DietaryConstraint, MatchPhase};
use crate::utils::validation::validate_people;
use crate::{Error, Result};

/// Print canonical tokens, one per line
pub fn normalize(aliases: &AliasTable, text: &str) {
    for token in aliases.normalize(text) {
        println!("{token}");
    }
}

async fn load_report(settings: &Settings, source: &str) -> Result<LoadReport> {
    let source = CorpusSource::parse(source)?;
    let loader = CorpusLoader::new(settings.corpus.user_agent.clone(), settings.corpus.max_size)?;
    loader.load(&source).await
}

/// Search the configured corpus without a running server
pub async fn search(
    settings: &Settings,
    ingredients: &str,
    dietary: DietaryConstraint,
    people: u32,
    limit: usize,
) -> Result<()> {
    validate_people(people)?;

    let aliases = load_alias_table(settings.aliases.config_path.as_deref())?;
    let report = load_report(settings, &settings.corpus.source).await?;
    let catalog = Catalog::new(report.recipes);

    let tokens = aliases.normalize(ingredients);
    let outcome = match_with_phase(&tokens, catalog.recipes(), dietary);

    println!("\nIngredients: {}", tokens.join(", "));
    println!("Dietary: {dietary}  Serves: {people}");

    if outcome.recipes.is_empty() {
        println!("\nNo recipes found. Try different ingredients or remove filters");
        return Ok(());
    }

    let phase = match outcome.phase {
        MatchPhase::Strict => "all ingredients matched",
        MatchPhase::Partial => "partial matches",
        MatchPhase::None => "no matches",
    };
    println!("\nFound {} recipes ({phase}):\n", outcome.recipes.len());
    println!("{:<6} {:<40} {:<12} {:<16}", "ID", "Name", "Time", "Diet");
    println!("{}", "-".repeat(76));

    for recipe in outcome.recipes.iter().take(limit) {
        println!(
            "{:<6} {:<40} {:<12} {:<16}",
            recipe.id,
            truncate(&recipe.name, 38),
            truncate(recipe.time.as_deref().unwrap_or("N/A"), 10),
            truncate(recipe.diet_label.as_deref().unwrap_or("-"), 14)
        );
    }

    if outcome.recipes.len() > limit {
        println!("\n... and {} more", outcome.recipes.len() - limit);
    }

    Ok(())
}

/// Load a corpus and report what was accepted and skipped
pub async fn validate(settings: &Settings, source: Option<String>) -> Result<()> {
    let source = source.unwrap_or_else(|| settings.corpus.source.clone());
    let report = load_report(settings, &source).await?;

    for skipped in &report.skipped {
        let id = skipped
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "\x1b[33m!\x1b[0m Entry #{} (id {}): {}",
            skipped.index, id, skipped.reason
        );
    }

    if report.recipes.is_empty() {
        println!("\x1b[31m\u{2717}\x1b[0m No usable recipes in {source}");
        return Err(Error::Validation(format!("No usable recipes in {source}")));
    }

    let catalog = Catalog::new(report.recipes);
    println!(
        "\x1b[32m\u{2713}\x1b[0m {} recipes loaded ({} vegetarian, {} skipped)",
        catalog.len(),
        catalog.veg_count(),
        report.skipped.len()
    );

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
