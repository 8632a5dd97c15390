pub mod commands;
pub mod utils;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::search::SearchQuery;

#[derive(Parser)]
#[command(name = "oppctl")]
#[command(about = "Opportunity CLI - search listings, replay fixtures and mint sponsor tokens")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Search public opportunities on a running server")]
    Search {
        #[arg(long, env = "OPPCTL_SERVER", default_value = "http://localhost:3000", help = "Base URL of the API server")]
        server: String,
        #[command(flatten)]
        filters: FilterArgs,
    },

    #[command(about = "Run searches against local fixture files")]
    Fixture {
        #[command(subcommand)]
        cmd: commands::fixture::FixtureCommands,
    },

    #[command(about = "Sponsor token management")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },
}

/// Search filters shared by every command that runs a search.
///
/// Values stay as text so the server (or the local engine) applies its own
/// parameter policy, exactly as it would for a query string.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Free-text keyword matched against name, description and plans")]
    pub keyword: Option<String>,
    #[arg(long, help = "Property type, e.g. office or multifamily")]
    pub property_type: Option<String>,
    #[arg(long, help = "Investment strategy, e.g. value_add")]
    pub investment_strategy: Option<String>,
    #[arg(long, help = "Lower bound on minimum investment")]
    pub min_investment: Option<String>,
    #[arg(long, help = "Upper bound on minimum investment")]
    pub max_investment: Option<String>,
    #[arg(long, help = "Lower bound on projected IRR, as a fraction (0.12 = 12%)")]
    pub min_irr: Option<String>,
    #[arg(long, help = "Upper bound on projected IRR, as a fraction")]
    pub max_irr: Option<String>,
    #[arg(long, help = "Address state (substring match)")]
    pub state: Option<String>,
    #[arg(long, help = "Address city (substring match)")]
    pub city: Option<String>,
    #[arg(long, help = "Status term, e.g. fundraising or funded")]
    pub status: Option<String>,
    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<String>,
    #[arg(long, help = "Page size")]
    pub limit: Option<String>,
}

impl From<FilterArgs> for SearchQuery {
    fn from(args: FilterArgs) -> Self {
        SearchQuery {
            keyword: args.keyword,
            property_type: args.property_type,
            investment_strategy: args.investment_strategy,
            min_investment: args.min_investment,
            max_investment: args.max_investment,
            min_irr: args.min_irr,
            max_irr: args.max_irr,
            state: args.state,
            city: args.city,
            status: args.status,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Search { server, filters } => commands::search::handle(&server, filters, output_format).await,
        Commands::Fixture { cmd } => commands::fixture::handle(cmd, output_format).await,
        Commands::Token { cmd } => commands::token::handle(cmd, output_format).await,
    }
}
