use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;

use crate::cli::{utils, FilterArgs, OutputFormat};
use crate::config;
use crate::database::{MemoryOpportunityStore, Opportunity};
use crate::search::{SearchEngine, SearchQuery, SearchScope};

#[derive(Subcommand)]
pub enum FixtureCommands {
    #[command(about = "Run a public search over opportunities loaded from a YAML file")]
    Search {
        #[arg(help = "YAML file containing a list of opportunities")]
        file: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },

    #[command(about = "Validate a fixture file and report how many listings it holds")]
    Check {
        #[arg(help = "YAML file containing a list of opportunities")]
        file: PathBuf,
    },
}

pub async fn handle(cmd: FixtureCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FixtureCommands::Search { file, filters } => {
            let rows = load_fixture(&file)?;
            let engine = SearchEngine::new(
                Arc::new(MemoryOpportunityStore::new(rows)),
                config::config().search.clone(),
            );

            let results = engine
                .search_query(&SearchScope::Public, &SearchQuery::from(filters))
                .await?;
            utils::output_results(&output_format, &results)
        }
        FixtureCommands::Check { file } => {
            let rows = load_fixture(&file)?;
            let public = rows.iter().filter(|o| o.public_listing).count();
            utils::output_success(
                &output_format,
                &format!("{} holds {} opportunities ({} public)", file.display(), rows.len(), public),
                Some(serde_json::json!({ "total": rows.len(), "public": public })),
            )
        }
    }
}

pub fn load_fixture(path: &Path) -> anyhow::Result<Vec<Opportunity>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    parse_fixture(&content).with_context(|| format!("invalid fixture {}", path.display()))
}

fn parse_fixture(content: &str) -> anyhow::Result<Vec<Opportunity>> {
    Ok(serde_yaml::from_str(content)?)
}
