//! HTTP routes.

mod accounts;
mod chat;
mod health;
mod pages;

pub use accounts::account_routes;
pub use chat::chat_routes;
pub use health::health_routes;
pub use pages::page_routes;
