use clout_identity::{Identity, SigningIdentity};

use crate::error::CliError;
use crate::format::{print_success, style_bold, style_info};

pub async fn run(identity: &SigningIdentity, unsigned_hex: &str, json: bool) -> Result<(), CliError> {
    let signed = identity.sign_transaction(unsigned_hex).await?;

    if json {
        let info = serde_json::json!({
            "address": identity.public_key(),
            "signed_transaction_hex": signed,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    print_success("Transaction signed");
    println!("  {}: {}", style_bold().apply_to("Signer"), identity.public_key());
    println!(
        "  {}: {}",
        style_bold().apply_to("Signed hex"),
        style_info().apply_to(&signed)
    );
    println!();

    Ok(())
}
