//! Transport-neutral request handlers.

pub mod login;

pub use login::LoginController;
