use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::search::SearchResults;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print a page of search results, as the raw response body or as a table
pub fn output_results(output_format: &OutputFormat, results: &SearchResults) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Text => {
            if results.opportunities.is_empty() {
                println!("No opportunities found");
            } else {
                println!("{:<36}  {:<32}  {:<10}  {:<14}  {:>7}", "ID", "NAME", "STATUS", "CITY", "IRR");
                for o in &results.opportunities {
                    let city = o
                        .address
                        .as_ref()
                        .and_then(|a| a.city.clone())
                        .unwrap_or_else(|| "-".to_string());
                    let marker = if o.featured_listing { "*" } else { "" };
                    println!(
                        "{:<36}  {:<32}  {:<10}  {:<14}  {:>7}",
                        o.id,
                        truncate(&format!("{}{}", marker, o.opportunity_name), 32),
                        o.status,
                        truncate(&city, 14),
                        format_irr(o.projected_irr)
                    );
                }
            }

            let p = &results.pagination;
            println!(
                "Page {} of {} ({} total, {} per page)",
                p.page, p.total_pages, p.total, p.limit
            );
        }
    }
    Ok(())
}

/// IRR is stored as a fraction; show it as a percentage.
fn format_irr(irr: Option<f64>) -> String {
    irr.map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
