//! Request body decoding for the API.
//!
//! - [`new_redirection`] - Strict decoder for `POST /api/new`

pub mod new_redirection;

pub use new_redirection::{DecodeError, decode_new_redirection};
