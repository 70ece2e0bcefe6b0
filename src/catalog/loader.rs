use crate::catalog::recipe::{Recipe, RecipeRecord};
use crate::error::{Error, Result};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Where the recipe document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    File(PathBuf),
    Http(Url),
}

impl CorpusSource {
    /// Anything starting with `http://` or `https://` is a URL; everything
    /// else is a filesystem path.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(Error::Config("Corpus source cannot be empty".to_string()));
        }

        let lower = source.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = crate::utils::validation::validate_source_url(source)?;
            Ok(CorpusSource::Http(url))
        } else {
            Ok(CorpusSource::File(PathBuf::from(source)))
        }
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusSource::File(path) => write!(f, "{}", path.display()),
            CorpusSource::Http(url) => write!(f, "{url}"),
        }
    }
}

/// A corpus entry that was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    /// Position in the source array
    pub index: usize,
    pub id: Option<i64>,
    pub reason: String,
}

/// Outcome of loading a corpus document.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub recipes: Vec<Recipe>,
    pub skipped: Vec<SkippedRecord>,
}

/// Decode a corpus document. Entries are decoded one at a time so that a
/// malformed entry or a repeated id is skipped instead of failing the load.
pub fn parse_corpus(content: &str) -> Result<LoadReport> {
    let document: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| Error::CorpusLoad(format!("Corpus is not valid JSON: {e}")))?;

    let entries = match document {
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(Error::CorpusLoad(format!(
                "Corpus must be a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut report = LoadReport::default();
    let mut seen = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry.get("id").and_then(serde_json::Value::as_i64);

        let decoded = serde_json::from_value::<RecipeRecord>(entry)
            .map_err(|e| e.to_string())
            .and_then(|record| Recipe::try_from(record).map_err(|e| e.to_string()));

        match decoded {
            Ok(recipe) => {
                if !seen.insert(recipe.id) {
                    warn!("Skipping corpus entry #{}: duplicate id {}", index, recipe.id);
                    report.skipped.push(SkippedRecord {
                        index,
                        id: Some(recipe.id),
                        reason: format!("duplicate id {}", recipe.id),
                    });
                    continue;
                }
                report.recipes.push(recipe);
            }
            Err(reason) => {
                warn!("Skipping corpus entry #{}: {}", index, reason);
                report.skipped.push(SkippedRecord { index, id, reason });
            }
        }
    }

    Ok(report)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Reads the corpus from disk or over HTTP with retry and a size limit.
pub struct CorpusLoader {
    client: Client,
    max_retries: u32,
    initial_backoff: Duration,
    max_size: usize,
}

impl CorpusLoader {
    pub fn new(user_agent: String, max_size: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_size,
        })
    }

    /// Override the first retry delay. Doubles on every retry.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub async fn load(&self, source: &CorpusSource) -> Result<LoadReport> {
        let content = match source {
            CorpusSource::File(path) => self.read_file(path).await?,
            CorpusSource::Http(url) => self.fetch(url.as_str()).await?,
        };

        let report = parse_corpus(&content)?;
        info!(
            "Loaded {} recipes from {} ({} skipped)",
            report.recipes.len(),
            source,
            report.skipped.len()
        );
        Ok(report)
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        debug!("Reading corpus file: {}", path.display());

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            Error::CorpusLoad(format!("Cannot read {}: {}", path.display(), e))
        })?;

        if metadata.len() > self.max_size as u64 {
            return Err(Error::Validation(format!(
                "Corpus size {} exceeds maximum {}",
                metadata.len(),
                self.max_size
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        String::from_utf8(bytes)
            .map_err(|e| Error::CorpusLoad(format!("Invalid UTF-8 in corpus file: {e}")))
    }

    /// Fetch a URL with retry logic and exponential backoff
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match self.fetch_once(url).await {
                Ok(content) => return Ok(content),
                Err(e) if retries < self.max_retries && Self::is_retryable(&e) => {
                    retries += 1;
                    warn!(
                        "Corpus fetch failed (attempt {}/{}): {}. Retrying in {:?}",
                        retries, self.max_retries, e, backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        debug!("Fetching corpus: {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::CorpusLoad(format!("HTTP {}", response.status())));
        }

        if let Some(ct) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let ct_lower = ct.to_lowercase();
            if !ct_lower.starts_with("application/json") && !ct_lower.starts_with("text/") {
                // Static hosts often mislabel JSON, so only warn
                warn!("Unexpected content type: {} for {}", ct, url);
            }
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size as u64 {
                return Err(Error::Validation(format!(
                    "Corpus size {} exceeds maximum {}",
                    content_length, self.max_size
                )));
            }
        }

        self.read_with_limit(response).await
    }

    /// Stream the body, stopping as soon as it grows past `max_size`.
    async fn read_with_limit(&self, mut response: Response) -> Result<String> {
        let mut body = Vec::new();

        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_size {
                return Err(Error::Validation(format!(
                    "Corpus size exceeds maximum {}",
                    self.max_size
                )));
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body)
            .map_err(|e| Error::CorpusLoad(format!("Invalid UTF-8 in response: {e}")))
    }

    fn is_retryable(error: &Error) -> bool {
        match error {
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing() {
        assert_eq!(
            CorpusSource::parse("./data/recipes.json").unwrap(),
            CorpusSource::File(PathBuf::from("./data/recipes.json"))
        );
        assert!(matches!(
            CorpusSource::parse("https://example.com/recipes.json").unwrap(),
            CorpusSource::Http(_)
        ));
        assert!(CorpusSource::parse("  ").is_err());
        assert!(CorpusSource::parse("https://").is_err());
    }

    #[test]
    fn test_parse_skips_bad_entries() {
        let content = r#"[
            {"id": 1, "translated_name": "Good", "translated_ingredients": ["rice"]},
            {"id": 2, "translated_name": "No Ingredients"},
            {"id": "three", "translated_name": "Bad Id", "translated_ingredients": []},
            {"id": 4, "translated_name": "Also Good", "translated_ingredients": ["dal"]}
        ]"#;

        let report = parse_corpus(content).unwrap();
        let ids: Vec<i64> = report.recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].id, Some(2));
        assert!(report.skipped[0].reason.contains("translated_ingredients"));
        assert_eq!(report.skipped[1].index, 2);
        assert_eq!(report.skipped[1].id, None);
    }

    #[test]
    fn test_parse_keeps_record_with_both_spellings() {
        let content = r#"[{
            "id": 1,
            "translated_name": "Aloo Gobi",
            "name": "Aloo Gobi",
            "translated_ingredients": ["Potato"],
            "ingredients": ["Potato"],
            "Diet": "Vegetarian",
            "veg": true
        }]"#;

        let report = parse_corpus(content).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.recipes.len(), 1);
        assert!(report.recipes[0].is_vegetarian());
    }

    #[test]
    fn test_parse_accepts_detail_spelling_alone() {
        let content = r#"[{"id": 5, "name": "Poha", "ingredients": ["flattened rice"]}]"#;

        let report = parse_corpus(content).unwrap();
        assert_eq!(report.recipes[0].name, "Poha");
        assert_eq!(report.recipes[0].ingredients, vec!["flattened rice"]);
    }

    #[test]
    fn test_parse_skips_duplicate_ids() {
        let content = r#"[
            {"id": 1, "translated_name": "First", "translated_ingredients": []},
            {"id": 1, "translated_name": "Second", "translated_ingredients": []}
        ]"#;

        let report = parse_corpus(content).unwrap();
        assert_eq!(report.recipes.len(), 1);
        assert_eq!(report.recipes[0].name, "First");
        assert!(report.skipped[0].reason.contains("duplicate"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_corpus(r#"{"recipes": []}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));

        assert!(parse_corpus("not json").is_err());
    }

    #[test]
    fn test_parse_empty_array() {
        let report = parse_corpus("[]").unwrap();
        assert!(report.recipes.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_loader_creation() {
        assert!(CorpusLoader::new("TestBot/1.0".to_string(), 1024).is_ok());
    }
}
