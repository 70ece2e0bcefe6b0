use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::models::*,
    catalog::{Catalog, CorpusLoader, CorpusSource},
    config::{aliases::load_alias_table, Settings},
    matching::{match_with_phase, AliasTable, DietaryConstraint},
    utils::validation::validate_people,
    Error, Result,
};

/// Serving count used when the query does not give one
pub const DEFAULT_PEOPLE: u32 = 2;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub aliases: Arc<AliasTable>,
    pub settings: Settings,
    pub skipped_records: usize,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Catalog, aliases: AliasTable, settings: Settings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            aliases: Arc::new(aliases),
            settings,
            skipped_records: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Load the alias table and corpus named by `settings`.
    pub async fn load(settings: Settings) -> Result<Self> {
        let aliases = load_alias_table(settings.aliases.config_path.as_deref())?;
        info!("Alias table ready ({} entries)", aliases.len());

        let source = CorpusSource::parse(&settings.corpus.source)?;
        let loader = CorpusLoader::new(
            settings.corpus.user_agent.clone(),
            settings.corpus.max_size,
        )?;
        let report = loader.load(&source).await?;

        let skipped_records = report.skipped.len();
        let mut state = Self::new(Catalog::new(report.recipes), aliases, settings);
        state.skipped_records = skipped_records;
        Ok(state)
    }
}

fn parse_dietary(value: Option<&str>) -> Result<DietaryConstraint> {
    match value {
        Some(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(DietaryConstraint::Both),
    }
}

/// Parse an optional numeric query parameter. Missing or blank means unset.
fn parse_number<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<Option<T>> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map(Some)
            .map_err(|_| Error::Validation(format!("Invalid {name}: '{value}' is not a number"))),
        _ => Ok(None),
    }
}

/// GET /api/search - Match recipes against ingredients
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let dietary = parse_dietary(params.dietary.as_deref())?;
    let people = parse_number::<u32>("people", params.people.as_deref())?
        .unwrap_or(DEFAULT_PEOPLE);
    validate_people(people)?;

    let tokens = state.aliases.normalize(&params.ingredients);
    let outcome = match_with_phase(&tokens, state.catalog.recipes(), dietary);

    let limit = parse_number::<usize>("limit", params.limit.as_deref())?
        .unwrap_or(state.settings.limits.default_limit)
        .min(state.settings.limits.api_max_limit);

    let results = outcome
        .recipes
        .iter()
        .take(limit)
        .map(|recipe| RecipeCard::from(*recipe))
        .collect();

    Ok(Json(SearchResponse {
        query: QueryEcho {
            tokens,
            dietary,
            people,
        },
        phase: outcome.phase,
        total: outcome.recipes.len(),
        results,
    }))
}

/// GET /api/normalize - Show how ingredient text is canonicalized
pub async fn normalize_ingredients(
    State(state): State<AppState>,
    Query(params): Query<NormalizeParams>,
) -> Result<Json<NormalizeResponse>> {
    Ok(Json(NormalizeResponse {
        tokens: state.aliases.normalize(&params.q),
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let recipe = state
        .catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    Ok(Json(RecipeDetail::from(recipe)))
}

/// POST /api/recipes/:id/feedback - Record whether a recipe was useful
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<FeedbackRequest>,
) -> Result<StatusCode> {
    let recipe = state
        .catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    info!(
        recipe_id = recipe.id,
        kind = ?request.kind,
        "Feedback received for '{}'",
        recipe.name
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/stats - Get catalog statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    Ok(Json(Stats {
        total_recipes: state.catalog.len(),
        vegetarian_recipes: state.catalog.veg_count(),
        aliases: state.aliases.len(),
        skipped_records: state.skipped_records,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    Ok(Json(ReadinessResponse {
        ready: !state.catalog.is_empty(),
        recipes: state.catalog.len(),
        loaded_at: state.loaded_at.to_rfc3339(),
    }))
}
