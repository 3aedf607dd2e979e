//! Atelier: shared-workspace synchronization engine
//!
//! Per-user document/folder workspaces exposed over a transport-agnostic
//! remote-call surface, with session management, change notifications to
//! attached observers, and cross-user folder sharing backed by mirrored
//! snapshot copies.
//!
//! # Quick Start
//!
//! ```ignore
//! use atelier::{Atelier, AtelierConfig, AuthApi, DocumentApi};
//!
//! let service = Atelier::open(AtelierConfig::new("/var/lib/atelier"))?;
//!
//! service.register("alice", "s3cret")?;
//! let token = service.login("alice", "s3cret")?.expect("valid credentials");
//!
//! service.create_document(token, "notes")?;
//! service.save_document(token, "notes", "hello")?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the facade traits implemented by [`Atelier`].
//! Internal layers (storage, engine) are not re-exported here; a
//! transport binding only needs the facade surface.

pub use atelier_api::*;
