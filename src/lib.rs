//! Salary dashboard: load salary records, filter them along four categorical
//! dimensions, aggregate metrics and chart tables, and draw them with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
