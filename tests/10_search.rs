mod common;

use anyhow::Result;
use axum::http::StatusCode;
use opportunity_api::testing::OpportunityBuilder;

use common::{app_with, get, names};

#[tokio::test]
async fn public_search_hides_private_and_inactive_listings() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Visible Tower").build(),
        OpportunityBuilder::new("Private Tower").public(false).build(),
        OpportunityBuilder::new("Draft Tower").status("draft").build(),
        OpportunityBuilder::new("Closed Tower").status("closed").build(),
    ]);

    let (status, body) = get(&app, "/api/opportunities").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Visible Tower"]);
    assert_eq!(body["pagination"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn orders_featured_first_then_newest() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Old Plain").created_days_ago(30).build(),
        OpportunityBuilder::new("New Plain").created_days_ago(1).build(),
        OpportunityBuilder::new("Old Featured").featured(true).created_days_ago(60).build(),
        OpportunityBuilder::new("New Featured").featured(true).created_days_ago(2).build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities").await?;

    assert_eq!(names(&body), vec!["New Featured", "Old Featured", "New Plain", "Old Plain"]);
    Ok(())
}

#[tokio::test]
async fn keyword_matches_any_text_column_case_insensitively() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Harbor Point").build(),
        OpportunityBuilder::new("Maple Court").description("Waterfront HARBOR views").build(),
        OpportunityBuilder::new("Desert Flex").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?keyword=harbor").await?;

    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["Harbor Point", "Maple Court"]);
    Ok(())
}

#[tokio::test]
async fn keyword_reaches_every_text_column() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Solar Name").build(),
        OpportunityBuilder::new("By Description").description("rooftop solar array").build(),
        OpportunityBuilder::new("By Plan").business_plan("Install SOLAR canopies").build(),
        OpportunityBuilder::new("By Strategy").value_creation_strategy("sell solar credits").build(),
        OpportunityBuilder::new("Unrelated").description("wind farm").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?keyword=solar").await?;

    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["By Description", "By Plan", "By Strategy", "Solar Name"]);
    Ok(())
}

#[tokio::test]
async fn keyword_wildcards_are_literal() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("100% Occupied").build(),
        OpportunityBuilder::new("Half Occupied").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?keyword=100%25").await?;

    assert_eq!(names(&body), vec!["100% Occupied"]);
    Ok(())
}

#[tokio::test]
async fn irr_range_is_inclusive_fractions() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Low").irr(0.08).build(),
        OpportunityBuilder::new("Mid").irr(0.12).build(),
        OpportunityBuilder::new("High").irr(0.18).build(),
        OpportunityBuilder::new("Stretch").irr(0.25).build(),
        OpportunityBuilder::new("Unknown").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?min_irr=0.12&max_irr=0.18").await?;

    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["High", "Mid"]);
    Ok(())
}

#[tokio::test]
async fn investment_range_includes_both_bounds() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Just Below").minimum_investment(49_999.99).build(),
        OpportunityBuilder::new("At Lower").minimum_investment(50_000.0).build(),
        OpportunityBuilder::new("Inside").minimum_investment(100_000.0).build(),
        OpportunityBuilder::new("At Upper").minimum_investment(250_000.0).build(),
        OpportunityBuilder::new("Just Above").minimum_investment(250_000.01).build(),
        OpportunityBuilder::new("Unknown").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?min_investment=50000&max_investment=250000").await?;
    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["At Lower", "At Upper", "Inside"]);

    let (_, body) = get(&app, "/api/opportunities?min_investment=250000").await?;
    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["At Upper", "Just Above"]);
    Ok(())
}

#[tokio::test]
async fn city_and_state_match_address_substrings() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Austin Lofts").city("Austin", "TX").build(),
        OpportunityBuilder::new("Dallas Yards").city("Dallas", "TX").build(),
        OpportunityBuilder::new("Austin Annex").city("Austin", "MN").build(),
        OpportunityBuilder::new("No Address").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?state=tx").await?;
    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["Austin Lofts", "Dallas Yards"]);

    let (_, body) = get(&app, "/api/opportunities?city=aust&state=TX").await?;
    assert_eq!(names(&body), vec!["Austin Lofts"]);
    Ok(())
}

#[tokio::test]
async fn filters_by_property_type() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Garden Apartments").property_type("multifamily").build(),
        OpportunityBuilder::new("Downtown Office").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?property_type=multifamily").await?;

    assert_eq!(names(&body), vec!["Garden Apartments"]);
    Ok(())
}

#[tokio::test]
async fn external_status_terms_map_to_stored_statuses() -> Result<()> {
    let app = app_with(vec![
        OpportunityBuilder::new("Raising").status("active").build(),
        OpportunityBuilder::new("Done").status("closed").build(),
        OpportunityBuilder::new("Gone").status("archived").build(),
    ]);

    let (_, body) = get(&app, "/api/opportunities?status=fundraising").await?;
    assert_eq!(names(&body), vec!["Raising"]);

    let (_, body) = get(&app, "/api/opportunities?status=funded").await?;
    assert_eq!(names(&body), vec!["Done"]);

    let (_, body) = get(&app, "/api/opportunities?status=cancelled").await?;
    assert_eq!(names(&body), vec!["Gone"]);

    // unknown terms pass through unchanged
    let (status, body) = get(&app, "/api/opportunities?status=paused").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());
    Ok(())
}

#[tokio::test]
async fn detail_returns_public_records_only() -> Result<()> {
    let visible = OpportunityBuilder::new("Visible").build();
    let hidden = OpportunityBuilder::new("Hidden").public(false).build();
    let (visible_id, hidden_id) = (visible.id, hidden.id);
    let app = app_with(vec![visible, hidden]);

    let (status, body) = get(&app, &format!("/api/opportunities/{}", visible_id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["opportunity_name"], "Visible");

    let (status, _) = get(&app, &format!("/api/opportunities/{}", hidden_id)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/opportunities/not-a-uuid").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid opportunity id");
    assert!(body["field_errors"]["id"].as_str().unwrap_or_default().contains("not-a-uuid"));
    Ok(())
}
