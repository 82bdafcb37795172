//! HTTP request handlers.

pub mod create;
pub mod redirect;

pub use create::{create_redirection_handler, method_not_allowed_handler};
pub use redirect::redirect_handler;
