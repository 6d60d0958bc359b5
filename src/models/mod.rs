//! Data models for sessions and submitted forms.

pub mod form;
pub mod session;

pub use form::*;
pub use session::*;
