//! Signing identities for Clout accounts.
//!
//! An identity is read-only, backed by a local seed phrase, or backed by an
//! external signer reached over a [`remote::RemoteTransport`].

pub mod config;
pub mod identity;
pub mod protocol;
pub mod registry;
pub mod remote;

pub use config::RemoteSignerConfig;
pub use identity::{require_signer, Identity, ReadOnlyIdentity, SeedIdentity, SigningIdentity};
pub use remote::{ChannelTransport, RemoteIdentity, RemoteTransport, ResponseSink, TransportMessage};
