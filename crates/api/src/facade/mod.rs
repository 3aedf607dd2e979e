//! Facade API: the transport-agnostic remote-call surface
//!
//! One trait per concern, all implemented by [`Atelier`](crate::Atelier).
//! Every operation other than `register`/`login` takes a session token and
//! fails fast with `SessionInvalid` before touching any state. The traits
//! are what a transport binding (RPC server, REST handler, message
//! consumer) programs against.
//!
//! ## Module Structure
//!
//! - `auth`: registration, login/logout, session validation
//! - `docs`: document CRUD
//! - `folders`: folder CRUD and membership
//! - `share`: folder sharing and mirror synchronization
//! - `observe`: observer attach/detach

pub mod auth;
pub mod docs;
pub mod folders;
pub mod observe;
pub mod share;

mod impl_;

pub use auth::AuthApi;
pub use docs::DocumentApi;
pub use folders::FolderApi;
pub use observe::ObserverApi;
pub use share::ShareApi;
