pub mod api;
pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod history;
pub mod paths;
pub mod persistence;
pub mod plain;
pub mod profile;
pub mod reply;
pub mod session;
