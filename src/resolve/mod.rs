//! Request-to-response resolution.
//!
//! ```text
//! raw path ─▶ PathResolver ─▶ AccessGuard ─▶ root / file checks ─▶ MimeTable
//!                 │                │                 │
//!            canonical path    Forbidden          NotFound      Ok{content, mime}
//! ```
//!
//! Everything here is read-only after construction and safe to share
//! between connections.

pub mod context;
pub mod guard;
pub mod outcome;
pub mod path;
pub mod resolver;

pub use context::RequestContext;
pub use guard::{Access, AccessGuard};
pub use outcome::ResponseOutcome;
pub use path::PathResolver;
pub use resolver::ResponseResolver;
