use clout_crypto::token::Claims;
use clout_identity::{Identity, SigningIdentity};
use serde_json::Value;

use crate::error::CliError;
use crate::format::{style_bold, style_info};

pub async fn run(
    identity: &SigningIdentity,
    claims: Vec<(String, Value)>,
    json: bool,
) -> Result<(), CliError> {
    let claims: Claims = claims.into_iter().collect();
    let token = identity.issue_token(&claims).await?;

    if json {
        let info = serde_json::json!({
            "address": identity.public_key(),
            "jwt": token,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("  {}: {}", style_bold().apply_to("Issuer"), identity.public_key());
    println!(
        "  {}: {}",
        style_bold().apply_to("Token"),
        style_info().apply_to(&token)
    );
    println!();

    Ok(())
}
