//! The signing capability of an account.
//!
//! An identity is resolved once, at construction, to one of three variants:
//! read-only, backed by a local seed, or backed by a remote signer. Callers
//! dispatch through [`Identity`] and never inspect the variant to decide
//! whether signing is possible.

use std::sync::Arc;

use async_trait::async_trait;
use clout_crypto::address::{decode_address_bytes, keypair_to_address};
use clout_crypto::hd::keypair_from_mnemonic;
use clout_crypto::keys::Keypair;
use clout_crypto::token::{self, Claims};
use clout_crypto::transaction;
use clout_types::error::CloutError;
use clout_types::primitives::{Address, Network};
use k256::ecdsa::VerifyingKey;
use tracing::debug;

use crate::config::RemoteSignerConfig;
use crate::remote::{RemoteIdentity, RemoteTransport};

/// Something that owns an address and may be able to sign for it.
#[async_trait]
pub trait Identity: Send + Sync {
    /// The account address, computed when the identity was built.
    fn public_key(&self) -> &Address;

    /// Whether signing operations can succeed at all.
    fn can_sign(&self) -> bool;

    /// Sign a hex-encoded unsigned transaction.
    async fn sign_transaction(&self, unsigned_hex: &str) -> Result<String, CloutError>;

    /// Issue a short-lived token over `claims`.
    async fn issue_token(&self, claims: &Claims) -> Result<String, CloutError>;
}

/// Fail with [`CloutError::NotAuthenticated`] unless `identity` can sign.
pub fn require_signer<I: Identity + ?Sized>(
    identity: &I,
    operation: &str,
) -> Result<(), CloutError> {
    if identity.can_sign() {
        Ok(())
    } else {
        Err(not_authenticated(operation))
    }
}

fn not_authenticated(operation: &str) -> CloutError {
    CloutError::NotAuthenticated {
        operation: operation.to_string(),
    }
}

// ─── Read-only ───────────────────────────────────────────────────────────────

/// An address with no signing capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyIdentity {
    address: Address,
}

impl ReadOnlyIdentity {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Build from an encoded address, checking its checksum.
    pub fn parse(address: &str) -> Result<Self, CloutError> {
        decode_address_bytes(address)?;
        Ok(Self::new(Address::from(address)))
    }
}

#[async_trait]
impl Identity for ReadOnlyIdentity {
    fn public_key(&self) -> &Address {
        &self.address
    }

    fn can_sign(&self) -> bool {
        false
    }

    async fn sign_transaction(&self, _unsigned_hex: &str) -> Result<String, CloutError> {
        Err(not_authenticated("sign_transaction"))
    }

    async fn issue_token(&self, _claims: &Claims) -> Result<String, CloutError> {
        Err(not_authenticated("issue_token"))
    }
}

// ─── Local seed ──────────────────────────────────────────────────────────────

/// Identity holding its own keypair, derived from a mnemonic.
pub struct SeedIdentity {
    keypair: Keypair,
    network: Network,
    address: Address,
}

impl SeedIdentity {
    /// Derive the keypair at the fixed path and cache the address.
    pub fn from_mnemonic(phrase: &str, network: Network) -> Result<Self, CloutError> {
        let keypair = keypair_from_mnemonic(phrase)?;
        Ok(Self::from_keypair(keypair, network))
    }

    /// Take ownership of an existing keypair.
    pub fn from_keypair(keypair: Keypair, network: Network) -> Self {
        let address = keypair_to_address(&keypair, network);
        debug!(%address, %network, "seed identity ready");
        Self {
            keypair,
            network,
            address,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        self.keypair.verifying_key()
    }
}

impl std::fmt::Debug for SeedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedIdentity")
            .field("address", &self.address)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Identity for SeedIdentity {
    fn public_key(&self) -> &Address {
        &self.address
    }

    fn can_sign(&self) -> bool {
        true
    }

    async fn sign_transaction(&self, unsigned_hex: &str) -> Result<String, CloutError> {
        transaction::sign_transaction(unsigned_hex, &self.keypair)
    }

    async fn issue_token(&self, claims: &Claims) -> Result<String, CloutError> {
        token::issue_token(&self.keypair, claims)
    }
}

// ─── Remote ──────────────────────────────────────────────────────────────────

#[async_trait]
impl Identity for RemoteIdentity {
    fn public_key(&self) -> &Address {
        self.address()
    }

    fn can_sign(&self) -> bool {
        true
    }

    async fn sign_transaction(&self, unsigned_hex: &str) -> Result<String, CloutError> {
        RemoteIdentity::sign_transaction(self, unsigned_hex).await
    }

    async fn issue_token(&self, claims: &Claims) -> Result<String, CloutError> {
        RemoteIdentity::issue_token(self, claims).await
    }
}

// ─── Tagged identity ─────────────────────────────────────────────────────────

/// One of the three identity variants, fixed at construction.
#[derive(Debug)]
pub enum SigningIdentity {
    ReadOnly(ReadOnlyIdentity),
    LocalSeed(SeedIdentity),
    Remote(RemoteIdentity),
}

impl SigningIdentity {
    pub fn read_only(address: Address) -> Self {
        SigningIdentity::ReadOnly(ReadOnlyIdentity::new(address))
    }

    pub fn from_mnemonic(phrase: &str, network: Network) -> Result<Self, CloutError> {
        SeedIdentity::from_mnemonic(phrase, network).map(SigningIdentity::LocalSeed)
    }

    pub fn remote(
        address: Address,
        transport: Arc<dyn RemoteTransport>,
        config: RemoteSignerConfig,
    ) -> Self {
        SigningIdentity::Remote(RemoteIdentity::new(address, transport, config))
    }

    fn inner(&self) -> &dyn Identity {
        match self {
            SigningIdentity::ReadOnly(id) => id,
            SigningIdentity::LocalSeed(id) => id,
            SigningIdentity::Remote(id) => id,
        }
    }
}

#[async_trait]
impl Identity for SigningIdentity {
    fn public_key(&self) -> &Address {
        self.inner().public_key()
    }

    fn can_sign(&self) -> bool {
        self.inner().can_sign()
    }

    async fn sign_transaction(&self, unsigned_hex: &str) -> Result<String, CloutError> {
        require_signer(self, "sign_transaction")?;
        self.inner().sign_transaction(unsigned_hex).await
    }

    async fn issue_token(&self, claims: &Claims) -> Result<String, CloutError> {
        require_signer(self, "issue_token")?;
        self.inner().issue_token(claims).await
    }
}
