use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, validate_jwt, Claims};
use crate::cli::{utils, OutputFormat};
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a sponsor bearer token signed with JWT_SECRET")]
    Create {
        #[arg(long, help = "Sponsor account id")]
        sponsor: Uuid,
        #[arg(long, help = "Lifetime in hours (defaults to the configured expiry)")]
        hours: Option<u64>,
    },

    #[command(about = "Decode and verify a sponsor bearer token")]
    Verify {
        #[arg(help = "Bearer token")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;

    match cmd {
        TokenCommands::Create { sponsor, hours } => {
            let claims = Claims::sponsor(sponsor, hours.unwrap_or(security.jwt_expiry_hours));
            let token = generate_jwt(&claims, security)?;
            match output_format {
                OutputFormat::Json => utils::output_success(
                    &output_format,
                    "Token created",
                    Some(json!({ "token": token, "sponsor_id": sponsor, "expires_at": claims.exp })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => {
            let claims = validate_jwt(token.trim(), security)?;
            utils::output_success(
                &output_format,
                &format!("Valid {} token for {}", claims.role, claims.sub),
                Some(json!({ "sponsor_id": claims.sub, "role": claims.role, "expires_at": claims.exp })),
            )
        }
    }
}
