use clout_types::constants::{ADDRESS_CHECKSUM_LEN, ADDRESS_PREFIX_LEN, COMPRESSED_PUBKEY_LEN};
use clout_types::error::CloutError;
use clout_types::primitives::{Address, Network, PublicKeyBytes};
use k256::ecdsa::VerifyingKey;

use crate::hash::checksum;
use crate::keys::{verifying_key_from_bytes, Keypair};

const PAYLOAD_LEN: usize = ADDRESS_PREFIX_LEN + COMPRESSED_PUBKEY_LEN;

/// Encode a compressed public key as a network address.
///
/// Address = base58(prefix ∥ pubkey ∥ checksum4), where checksum4 is the
/// first four bytes of SHA-256(SHA-256(prefix ∥ pubkey)).
pub fn pubkey_to_address(pubkey: &PublicKeyBytes, network: Network) -> Address {
    let mut buf = Vec::with_capacity(PAYLOAD_LEN + ADDRESS_CHECKSUM_LEN);
    buf.extend_from_slice(&network.prefix());
    buf.extend_from_slice(pubkey);
    let check = checksum(&buf);
    buf.extend_from_slice(&check);
    Address::from(bs58::encode(buf).into_string())
}

/// Encode the public half of a keypair as a network address.
pub fn keypair_to_address(keypair: &Keypair, network: Network) -> Address {
    pubkey_to_address(&keypair.public_key(), network)
}

/// Decode an address back to its compressed public key bytes.
///
/// The network prefix is stripped and discarded; it is not checked against
/// the known networks.
pub fn decode_address_bytes(address: &str) -> Result<PublicKeyBytes, CloutError> {
    let raw = bs58::decode(address)
        .into_vec()
        .map_err(|e| CloutError::address(format!("not base58: {}", e)))?;
    if raw.len() != PAYLOAD_LEN + ADDRESS_CHECKSUM_LEN {
        return Err(CloutError::address(format!(
            "expected {} bytes, got {}",
            PAYLOAD_LEN + ADDRESS_CHECKSUM_LEN,
            raw.len()
        )));
    }

    let (payload, check) = raw.split_at(PAYLOAD_LEN);
    if checksum(payload) != check {
        return Err(CloutError::address("checksum mismatch"));
    }

    let mut pubkey = [0u8; COMPRESSED_PUBKEY_LEN];
    pubkey.copy_from_slice(&payload[ADDRESS_PREFIX_LEN..]);
    Ok(pubkey)
}

/// Decode an address back to the public point it encodes.
pub fn decode_address(address: &str) -> Result<VerifyingKey, CloutError> {
    let pubkey = decode_address_bytes(address)?;
    verifying_key_from_bytes(&pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hd::keypair_from_mnemonic;
    use proptest::prelude::*;

    const PHRASE: &str =
        "outside seven reunion sniff mimic skull pulp twist twice elegant replace luggage";
    const MAINNET_ADDRESS: &str = "BC1YLhv73xX4vYcXGiCoinNMEfYE6zwX4BGn54vtdFr9RprYcAvpiB2";
    const TESTNET_ADDRESS: &str = "tBCKX3M58o2LeXT1cn8Apxb34rFVKTHzG1qznbpNGDxUmmW3F2iise";

    #[test]
    fn test_known_mainnet_address() {
        let kp = keypair_from_mnemonic(PHRASE).unwrap();
        assert_eq!(keypair_to_address(&kp, Network::Mainnet).as_str(), MAINNET_ADDRESS);
    }

    #[test]
    fn test_known_testnet_address() {
        let kp = keypair_from_mnemonic(PHRASE).unwrap();
        assert_eq!(keypair_to_address(&kp, Network::Testnet).as_str(), TESTNET_ADDRESS);
    }

    #[test]
    fn test_address_derivation_deterministic() {
        let kp = Keypair::generate();
        let addr1 = keypair_to_address(&kp, Network::Mainnet);
        let addr2 = keypair_to_address(&kp, Network::Mainnet);
        assert_eq!(addr1, addr2);
    }

    #[test]
    fn test_network_changes_address() {
        let kp = Keypair::generate();
        assert_ne!(
            keypair_to_address(&kp, Network::Mainnet),
            keypair_to_address(&kp, Network::Testnet)
        );
    }

    #[test]
    fn test_address_prefix_renders() {
        let kp = Keypair::generate();
        assert!(keypair_to_address(&kp, Network::Mainnet)
            .as_str()
            .starts_with("BC1YL"));
        assert!(keypair_to_address(&kp, Network::Testnet)
            .as_str()
            .starts_with("tBC"));
    }

    #[test]
    fn test_decode_both_networks_to_same_key() {
        let main = decode_address_bytes(MAINNET_ADDRESS).unwrap();
        let test = decode_address_bytes(TESTNET_ADDRESS).unwrap();
        assert_eq!(main, test);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let mut raw = bs58::decode(MAINNET_ADDRESS).into_vec().unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let corrupted = bs58::encode(raw).into_string();
        assert_eq!(
            decode_address(&corrupted).unwrap_err(),
            CloutError::address("checksum mismatch")
        );
    }

    #[test]
    fn test_corrupted_key_rejected() {
        let mut raw = bs58::decode(MAINNET_ADDRESS).into_vec().unwrap();
        raw[10] ^= 0xff;
        let corrupted = bs58::encode(raw).into_string();
        assert!(matches!(
            decode_address(&corrupted),
            Err(CloutError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        for bad in ["", "0OIl", "BC1YL", "not base58 at all!"] {
            assert!(
                matches!(decode_address(bad), Err(CloutError::InvalidAddress { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_valid_checksum_but_not_a_point() {
        let mut buf = Network::Mainnet.prefix().to_vec();
        buf.push(0x02);
        buf.extend_from_slice(&[0xff; 32]);
        let check = checksum(&buf);
        buf.extend_from_slice(&check);
        let encoded = bs58::encode(buf).into_string();
        assert!(decode_address_bytes(&encoded).is_ok());
        assert!(decode_address(&encoded).is_err());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(scalar in prop::array::uniform32(any::<u8>()), testnet in any::<bool>()) {
            // Zero and out-of-range scalars are not keys; skip them.
            let Ok(kp) = Keypair::from_private_key_bytes(&scalar) else {
                return Ok(());
            };
            let network = if testnet { Network::Testnet } else { Network::Mainnet };
            let addr = keypair_to_address(&kp, network);
            let decoded = decode_address(addr.as_str()).unwrap();
            prop_assert_eq!(&decoded, kp.verifying_key());
        }
    }
}
