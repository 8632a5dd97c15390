use anyhow::Context;
use serde_json::Value;

use crate::cli::{utils, FilterArgs, OutputFormat};
use crate::search::{SearchQuery, SearchResults};

pub async fn handle(server: &str, filters: FilterArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let query = SearchQuery::from(filters);
    let url = format!("{}/api/opportunities", server.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .get(&url)
        .query(&query)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        utils::output_error(&output_format, &format!("{} ({})", message, status), Some(status.as_str()))?;
        if let Some(field_errors) = body.get("field_errors").and_then(Value::as_object) {
            for (field, reason) in field_errors {
                eprintln!("  {}: {}", field, reason.as_str().unwrap_or_default());
            }
        }
        anyhow::bail!("search failed with status {}", status);
    }

    let results: SearchResults = serde_json::from_value(body).context("unexpected search response shape")?;
    utils::output_results(&output_format, &results)
}
