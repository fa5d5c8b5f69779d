use clout_crypto::keys::compress;
use clout_identity::{Identity, SeedIdentity};
use clout_types::primitives::Network;

use crate::error::CliError;
use crate::format::{format_pubkey, style_bold};
use crate::ui::{cell, info_table, print_table};

pub fn run(phrase: &str, network: Network, json: bool) -> Result<(), CliError> {
    let identity = SeedIdentity::from_mnemonic(phrase, network)?;
    let public_key = format_pubkey(&compress(identity.verifying_key()));

    if json {
        let info = serde_json::json!({
            "address": identity.public_key(),
            "public_key": public_key,
            "network": network,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("  {}", style_bold().apply_to("Account"));

    let mut table = info_table();
    table.add_row(vec![cell("Network"), cell(network)]);
    table.add_row(vec![cell("Address"), cell(identity.public_key())]);
    table.add_row(vec![cell("Public key"), cell(public_key)]);
    print_table(&table);
    println!();

    Ok(())
}
