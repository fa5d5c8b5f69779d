use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use clout_identity::{ReadOnlyIdentity, RemoteIdentity, SigningIdentity};
use clout_types::primitives::{Address, Network};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{CliConfig, CONFIG_FILE_NAME};
use crate::error::CliError;
use crate::format::print_success;
use crate::stdio::{spawn_response_reader, StdioTransport};

#[derive(Parser)]
#[command(
    name = "clout",
    about = "Clout account keys: derive addresses, sign transactions, issue and verify tokens",
    version
)]
pub struct Cli {
    /// Path to config file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: String,
    /// Network: "mainnet" or "testnet" (overrides the config file)
    #[arg(short, long, global = true)]
    pub network: Option<Network>,
    #[command(subcommand)]
    pub command: Command,
}

/// Where the seed phrase comes from.
#[derive(Args, Clone, Default)]
pub struct MnemonicArgs {
    /// 12-word seed phrase; prompted for if omitted
    #[arg(long, env = "CLOUT_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,
}

/// Which identity signs.
#[derive(Args, Clone, Default)]
pub struct SignerArgs {
    #[command(flatten)]
    pub seed: MnemonicArgs,
    /// Sign through an external signer for this address, speaking JSON
    /// lines over stdout (requests) and stdin (responses)
    #[arg(long, value_name = "ADDRESS", conflicts_with = "mnemonic")]
    pub remote: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new 12-word seed phrase and show its address
    Keygen {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the address derived from a seed phrase
    Address {
        #[command(flatten)]
        seed: MnemonicArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign a hex-encoded unsigned transaction
    Sign {
        /// Unsigned transaction hex (last byte is the signature placeholder)
        transaction_hex: String,
        #[command(flatten)]
        signer: SignerArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Issue a 60-second token proving control of the account
    Token {
        /// Extra claim; the value is parsed as JSON, else taken as a string
        #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = parse_claim)]
        claims: Vec<(String, Value)>,
        #[command(flatten)]
        signer: SignerArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a token against the address that should have issued it
    VerifyToken {
        token: String,
        address: String,
        /// Print the claims as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a signed transaction against its unsigned form and signer address
    VerifyTransaction {
        unsigned_hex: String,
        signed_hex: String,
        address: String,
    },
    /// Decode an address back to its public key
    DecodeAddress {
        address: String,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a default clout.toml
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
}

pub async fn run(cli: Cli, config: CliConfig) -> Result<(), CliError> {
    let network = cli.network.unwrap_or(config.network);
    debug!(%network, config = %cli.config, "starting");

    match cli.command {
        Command::Keygen { json } => crate::commands::keygen::run(network, json),
        Command::Address { seed, json } => {
            let phrase = read_mnemonic(seed)?;
            crate::commands::address::run(&phrase, network, json)
        }
        Command::Sign {
            transaction_hex,
            signer,
            json,
        } => {
            let identity = resolve_identity(signer, network, &config)?;
            crate::commands::sign::run(&identity, &transaction_hex, json).await
        }
        Command::Token {
            claims,
            signer,
            json,
        } => {
            let identity = resolve_identity(signer, network, &config)?;
            crate::commands::token::run(&identity, claims, json).await
        }
        Command::VerifyToken {
            token,
            address,
            json,
        } => crate::commands::verify_token::run(&token, &address, json),
        Command::VerifyTransaction {
            unsigned_hex,
            signed_hex,
            address,
        } => crate::commands::verify_transaction::run(&unsigned_hex, &signed_hex, &address),
        Command::DecodeAddress { address, json } => {
            crate::commands::decode_address::run(&address, json)
        }
        Command::Init { dir } => {
            let path = CliConfig::init(&dir)?;
            print_success(&format!("Wrote {}", path.display()));
            Ok(())
        }
    }
}

/// Build the signing identity selected on the command line.
///
/// Must be called inside the runtime: the remote variant spawns its reader.
fn resolve_identity(
    signer: SignerArgs,
    network: Network,
    config: &CliConfig,
) -> Result<SigningIdentity, CliError> {
    if let Some(address) = signer.remote {
        ReadOnlyIdentity::parse(&address)?;
        let remote = RemoteIdentity::new(
            Address::from(address),
            Arc::new(StdioTransport::new()),
            config.remote_signer_config(),
        );
        spawn_response_reader(remote.responses());
        return Ok(SigningIdentity::Remote(remote));
    }

    let phrase = read_mnemonic(signer.seed)?;
    Ok(SigningIdentity::from_mnemonic(&phrase, network)?)
}

fn read_mnemonic(args: MnemonicArgs) -> Result<Zeroizing<String>, CliError> {
    match args.mnemonic {
        Some(phrase) => Ok(Zeroizing::new(phrase)),
        None => crate::prompt::prompt_mnemonic(),
    }
}

/// Parse `key=value`. The value is JSON if it parses, else a plain string.
fn parse_claim(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err("claim key must not be empty".to_string());
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_claim_json_and_string() {
        assert_eq!(parse_claim("n=5").unwrap(), ("n".to_string(), json!(5)));
        assert_eq!(
            parse_claim("sub=alice").unwrap(),
            ("sub".to_string(), json!("alice"))
        );
        assert_eq!(
            parse_claim("tags=[\"a\"]").unwrap(),
            ("tags".to_string(), json!(["a"]))
        );
        assert_eq!(
            parse_claim("url=a=b").unwrap(),
            ("url".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_claim_rejects_malformed() {
        assert!(parse_claim("novalue").is_err());
        assert!(parse_claim("=x").is_err());
    }

    #[test]
    fn test_network_flag_parses() {
        let cli = Cli::try_parse_from(["clout", "--network", "testnet", "keygen"]).unwrap();
        assert_eq!(cli.network, Some(Network::Testnet));
        assert_eq!(cli.config, CONFIG_FILE_NAME);
        assert!(matches!(cli.command, Command::Keygen { json: false }));
    }

    #[test]
    fn test_remote_conflicts_with_mnemonic() {
        let result = Cli::try_parse_from([
            "clout",
            "sign",
            "00",
            "--remote",
            "BC1YLhv73xX4vYcXGiCoinNMEfYE6zwX4BGn54vtdFr9RprYcAvpiB2",
            "--mnemonic",
            "a b c",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_claims_collected() {
        let cli = Cli::try_parse_from([
            "clout", "token", "--claim", "sub=alice", "--claim", "n=1", "--mnemonic", "x",
        ])
        .unwrap();
        let Command::Token { claims, .. } = cli.command else {
            panic!("expected token command");
        };
        assert_eq!(claims.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_seed_identity() {
        let signer = SignerArgs {
            seed: MnemonicArgs {
                mnemonic: Some(
                    "outside seven reunion sniff mimic skull pulp twist twice elegant replace luggage"
                        .to_string(),
                ),
            },
            remote: None,
        };
        let identity = resolve_identity(signer, Network::Testnet, &CliConfig::default()).unwrap();
        assert!(matches!(identity, SigningIdentity::LocalSeed(_)));
    }

    #[tokio::test]
    async fn test_resolve_remote_rejects_bad_address() {
        let signer = SignerArgs {
            seed: MnemonicArgs::default(),
            remote: Some("not-an-address".to_string()),
        };
        assert!(matches!(
            resolve_identity(signer, Network::Mainnet, &CliConfig::default()),
            Err(CliError::Clout(_))
        ));
    }
}
