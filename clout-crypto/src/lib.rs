//! Cryptographic primitives for Clout accounts: BIP-39/BIP-32 key
//! derivation, secp256k1 keypairs, checksummed addresses, transaction
//! signing, and short-lived tokens.

pub mod address;
pub mod hash;
pub mod hd;
pub mod keys;
pub mod seed;
pub mod token;
pub mod transaction;
pub mod varint;
