//! HTTP/1.1 transport.
//!
//! - **`connection`**: per-connection request/response state machine
//! - **`parser`**: parses requests out of a byte buffer
//! - **`request`**: request representation, path decoding
//! - **`response`**: response representation with builder pattern
//! - **`writer`**: serializes and writes responses
//! - **`mime`**: content types by file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (malformed → 400, close)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve path, log outcome
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
