//! Request middleware: correlation logging and session authentication.

pub mod auth;
pub mod logging;
