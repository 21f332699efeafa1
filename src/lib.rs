pub mod app;
pub mod config;
pub mod intake;
pub mod shared;
pub mod submission;
pub mod tui;
