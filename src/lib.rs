pub mod config;
pub mod database;
pub mod logging;
pub mod models;
pub mod services;
pub mod web;
