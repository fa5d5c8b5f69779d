use clout_crypto::address::decode_address_bytes;

use crate::error::CliError;
use crate::format::{format_pubkey, style_bold};
use crate::ui::{cell, info_table, print_table};

pub fn run(address: &str, json: bool) -> Result<(), CliError> {
    let public_key = decode_address_bytes(address)?;

    if json {
        let info = serde_json::json!({
            "address": address,
            "public_key": format_pubkey(&public_key),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("  {}", style_bold().apply_to("Decoded address"));

    let mut table = info_table();
    table.add_row(vec![cell("Address"), cell(address)]);
    table.add_row(vec![cell("Public key"), cell(format_pubkey(&public_key))]);
    print_table(&table);
    println!();

    Ok(())
}
