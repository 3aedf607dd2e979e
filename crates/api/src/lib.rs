//! Remote-call surface for atelier
//!
//! This crate exposes the [`Atelier`] service struct and the facade traits
//! a transport binding programs against. The surface is
//! transport-agnostic: implementable as RPC, REST, or message-based, with
//! remote-call failures surfaced as explicit errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod facade;
mod service;

pub use config::AtelierConfig;
pub use facade::{AuthApi, DocumentApi, FolderApi, ObserverApi, ShareApi};
pub use service::Atelier;

// Re-export the core vocabulary a facade caller needs
pub use atelier_core::{
    DocumentEvent, EntityKind, Error, Limits, Observer, Result, SessionId, SubscriberId,
};
