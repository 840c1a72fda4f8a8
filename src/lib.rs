pub mod app;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod inbox;
pub mod logging;
pub mod ui;
