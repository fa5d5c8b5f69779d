use clout_crypto::address::decode_address;
use clout_crypto::transaction::verify_signed_transaction;

use crate::error::CliError;
use crate::format::print_success;

/// Fails with the verification error when the signature does not match.
pub fn run(unsigned_hex: &str, signed_hex: &str, address: &str) -> Result<(), CliError> {
    let key = decode_address(address)?;
    verify_signed_transaction(unsigned_hex, signed_hex, &key)?;
    println!();
    print_success("Signature valid");
    println!();
    Ok(())
}
