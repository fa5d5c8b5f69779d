use clout_crypto::token::verify_token;

use crate::error::CliError;
use crate::format::print_success;
use crate::ui::{cell, info_table, print_table};

pub fn run(token: &str, address: &str, json: bool) -> Result<(), CliError> {
    let claims = verify_token(token, address)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&claims).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    print_success("Token valid");

    let mut table = info_table();
    for (key, value) in &claims {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(vec![cell(key), cell(rendered)]);
    }
    print_table(&table);
    println!();

    Ok(())
}
