//! tramita-core: the session-gated application layer of the gestiones
//! admin console.
//!
//! Owns the flow from "no session" to "authenticated and serving live
//! data": token persistence, identity validation gating every data load,
//! auth-vs-data error classification, the per-session catalog cache, and
//! the filtered/paginated record listing.

pub mod catalogs;
pub mod console;
pub mod error;
pub mod gestiones;
pub mod list;
pub mod session;
pub mod users;

pub use catalogs::Catalogs;
pub use console::{Console, SessionState};
pub use error::CoreError;
pub use gestiones::GestionDraft;
pub use list::ListState;
pub use session::{IdentityProvider, MemoryStore, SessionStore, StaticTokenProvider};
