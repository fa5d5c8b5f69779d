//! Full account flow through `SigningIdentity`: phrase → address → signed
//! transaction → token, plus the read-only and remote variants.

use std::sync::Arc;
use std::time::Duration;

use clout_crypto::address::decode_address;
use clout_crypto::token::{verify_token, verify_token_at, Claims};
use clout_crypto::transaction::verify_signed_transaction;
use clout_identity::protocol::RemoteResponse;
use clout_identity::{
    ChannelTransport, Identity, RemoteIdentity, RemoteSignerConfig, SigningIdentity,
    TransportMessage,
};
use clout_types::error::CloutError;
use clout_types::primitives::{Address, Network};

const PHRASE: &str =
    "outside seven reunion sniff mimic skull pulp twist twice elegant replace luggage";
const MAINNET: &str = "BC1YLhv73xX4vYcXGiCoinNMEfYE6zwX4BGn54vtdFr9RprYcAvpiB2";
const TESTNET: &str = "tBCKX3M58o2LeXT1cn8Apxb34rFVKTHzG1qznbpNGDxUmmW3F2iise";
const UNSIGNED_HEX: &str = "01a1b2c3d4e5f60708090a0b0c0d0e0f00";

#[tokio::test]
async fn test_seed_identity_full_flow() {
    let identity = SigningIdentity::from_mnemonic(PHRASE, Network::Mainnet).unwrap();
    assert_eq!(identity.public_key().as_str(), MAINNET);

    let signed = identity.sign_transaction(UNSIGNED_HEX).await.unwrap();
    let key = decode_address(MAINNET).unwrap();
    verify_signed_transaction(UNSIGNED_HEX, &signed, &key).unwrap();

    let mut claims = Claims::new();
    claims.insert("purpose".to_string(), serde_json::json!("login"));
    let jwt = identity.issue_token(&claims).await.unwrap();
    let verified = verify_token(&jwt, MAINNET).unwrap();
    assert_eq!(verified["purpose"], "login");
    assert_eq!(
        verified["exp"].as_u64().unwrap() - verified["iat"].as_u64().unwrap(),
        60
    );

    let iat = verified["iat"].as_u64().unwrap();
    assert!(matches!(
        verify_token_at(&jwt, MAINNET, iat + 61),
        Err(CloutError::TokenValidation { .. })
    ));
}

#[tokio::test]
async fn test_testnet_identity_signs_with_same_key() {
    let main = SigningIdentity::from_mnemonic(PHRASE, Network::Mainnet).unwrap();
    let test = SigningIdentity::from_mnemonic(PHRASE, Network::Testnet).unwrap();
    assert_eq!(test.public_key().as_str(), TESTNET);

    // Same key under both prefixes, so a testnet signature verifies under
    // the mainnet address's key.
    let signed = test.sign_transaction(UNSIGNED_HEX).await.unwrap();
    let key = decode_address(main.public_key().as_str()).unwrap();
    verify_signed_transaction(UNSIGNED_HEX, &signed, &key).unwrap();
}

#[tokio::test]
async fn test_read_only_identity_is_gated() {
    let identity = SigningIdentity::read_only(Address::from(MAINNET));
    assert!(!identity.can_sign());
    assert!(matches!(
        identity.sign_transaction(UNSIGNED_HEX).await,
        Err(CloutError::NotAuthenticated { .. })
    ));
    assert!(matches!(
        identity.issue_token(&Claims::new()).await,
        Err(CloutError::NotAuthenticated { .. })
    ));
}

#[tokio::test]
async fn test_remote_identity_backed_by_seed_signer() {
    // The "external" signer is a seed identity on the other end of a channel.
    let signer = SigningIdentity::from_mnemonic(PHRASE, Network::Mainnet).unwrap();
    let (transport, mut rx) = ChannelTransport::new(4);
    let remote = RemoteIdentity::new(
        Address::from(MAINNET),
        Arc::new(transport),
        RemoteSignerConfig::default().with_response_timeout(Duration::from_secs(5)),
    );
    let sink = remote.responses();

    tokio::spawn(async move {
        let mut approved = false;
        while let Some(message) = rx.recv().await {
            match message {
                TransportMessage::Request(req) if !approved => {
                    approved = true;
                    sink.deliver(RemoteResponse::needs_approval(req.id));
                }
                TransportMessage::Request(req) => {
                    let jwt = signer.issue_token(&req.payload.claims).await.unwrap();
                    sink.deliver(RemoteResponse::token(req.id, jwt));
                }
                TransportMessage::OpenApproval { transaction_hex } => {
                    let signed = signer.sign_transaction(&transaction_hex).await.unwrap();
                    let mut response = RemoteResponse::signed("", signed);
                    response.id = None;
                    sink.deliver(response);
                }
            }
        }
    });

    let identity = SigningIdentity::Remote(remote);
    let signed = identity.sign_transaction(UNSIGNED_HEX).await.unwrap();
    let key = decode_address(MAINNET).unwrap();
    verify_signed_transaction(UNSIGNED_HEX, &signed, &key).unwrap();

    let jwt = identity.issue_token(&Claims::new()).await.unwrap();
    assert!(verify_token(&jwt, MAINNET).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_silent_remote_signer_times_out() {
    let (transport, _rx) = ChannelTransport::new(4);
    let identity = SigningIdentity::remote(
        Address::from(MAINNET),
        Arc::new(transport),
        RemoteSignerConfig::default(),
    );
    let err = identity.sign_transaction(UNSIGNED_HEX).await.unwrap_err();
    assert!(matches!(err, CloutError::SigningFailed { .. }));
}
