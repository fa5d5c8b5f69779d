//! End-to-end runs of the `clout` commands through the library entry point:
//! config init → load → derive → sign → token → verify.

use clap::Parser;
use clout_cli::cli::{run, Cli};
use clout_cli::config::{CliConfig, CONFIG_FILE_NAME};
use clout_cli::error::CliError;
use clout_crypto::hd::keypair_from_mnemonic;
use clout_crypto::token::{issue_token, Claims};
use clout_crypto::transaction::sign_transaction;
use clout_types::error::CloutError;
use clout_types::primitives::Network;

const PHRASE: &str =
    "outside seven reunion sniff mimic skull pulp twist twice elegant replace luggage";
const MAINNET: &str = "BC1YLhv73xX4vYcXGiCoinNMEfYE6zwX4BGn54vtdFr9RprYcAvpiB2";

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("clout").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn test_init_then_run_with_loaded_config() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_str().unwrap();
    run(parse(&["init", "--dir", dir]), CliConfig::default())
        .await
        .unwrap();

    let path = tmp.path().join(CONFIG_FILE_NAME);
    let config = CliConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.network, Network::Mainnet);

    let cli = parse(&[
        "--config",
        path.to_str().unwrap(),
        "address",
        "--mnemonic",
        PHRASE,
        "--json",
    ]);
    run(cli, config).await.unwrap();
}

#[tokio::test]
async fn test_sign_and_decode() {
    let config = CliConfig::default();
    run(
        parse(&["sign", "0102030400", "--mnemonic", PHRASE, "--json"]),
        config.clone(),
    )
    .await
    .unwrap();
    run(parse(&["decode-address", MAINNET]), config)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_verify_transaction_rejects_tampered_body() {
    let keypair = keypair_from_mnemonic(PHRASE).unwrap();
    let signed = sign_transaction("0102030400", &keypair).unwrap();
    let config = CliConfig::default();

    run(
        parse(&["verify-transaction", "0102030400", signed.as_str(), MAINNET]),
        config.clone(),
    )
    .await
    .unwrap();

    let err = run(
        parse(&["verify-transaction", "0902030400", signed.as_str(), MAINNET]),
        config,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        CliError::Clout(CloutError::SigningFailed { .. })
    ));
}

#[tokio::test]
async fn test_token_verify_round_trip() {
    let keypair = keypair_from_mnemonic(PHRASE).unwrap();
    let mut claims = Claims::new();
    claims.insert("sub".to_string(), serde_json::json!("clout"));
    let jwt = issue_token(&keypair, &claims).unwrap();

    run(parse(&["verify-token", jwt.as_str(), MAINNET, "--json"]), CliConfig::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_from_wrong_account_fails() {
    let other =
        keypair_from_mnemonic("source wink idea genuine upper better wood fault solve reform doll gown")
            .unwrap();
    let jwt = issue_token(&other, &Claims::new()).unwrap();

    let err = run(parse(&["verify-token", jwt.as_str(), MAINNET]), CliConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::Clout(CloutError::TokenValidation { .. })
    ));
}

#[tokio::test]
async fn test_bad_mnemonic_reports_invalid_mnemonic() {
    let err = run(
        parse(&["token", "--mnemonic", "twelve words that are not a phrase"]),
        CliConfig::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::Clout(CloutError::InvalidMnemonic)));
    assert!(err.hint().is_some());
}
