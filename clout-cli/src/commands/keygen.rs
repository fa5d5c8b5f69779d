use clout_crypto::address::keypair_to_address;
use clout_crypto::hd::derive_keypair;
use clout_crypto::seed::{generate_mnemonic, mnemonic_to_seed};
use clout_types::primitives::Network;
use zeroize::Zeroizing;

use crate::error::CliError;
use crate::format::{format_pubkey, print_mnemonic_box, print_success, style_bold};
use crate::ui::{cell, info_table, print_table};

pub fn run(network: Network, json: bool) -> Result<(), CliError> {
    let mnemonic = generate_mnemonic();
    let phrase = Zeroizing::new(mnemonic.to_string());
    let keypair = derive_keypair(&mnemonic_to_seed(&mnemonic))?;
    let address = keypair_to_address(&keypair, network);

    if json {
        let info = serde_json::json!({
            "mnemonic": phrase.as_str(),
            "address": address,
            "public_key": format_pubkey(&keypair.public_key()),
            "network": network,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("  {}", style_bold().apply_to("New account"));

    let mut table = info_table();
    table.add_row(vec![cell("Network"), cell(network)]);
    table.add_row(vec![cell("Address"), cell(&address)]);
    table.add_row(vec![
        cell("Public key"),
        cell(format_pubkey(&keypair.public_key())),
    ]);
    print_table(&table);

    let words: Vec<&str> = phrase.split_whitespace().collect();
    print_mnemonic_box(&words);
    print_success("Keep the phrase secret; it is not stored anywhere.");

    Ok(())
}
