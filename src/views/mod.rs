pub mod admin;
pub mod components;
pub mod layout;
pub mod public;

pub use layout::{admin_page, page, titled};
