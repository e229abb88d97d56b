// src/lib.rs
pub mod config;
pub mod draw;
pub mod engine;
pub mod markup;
pub mod models;
pub mod render;
pub mod scenes;
pub mod services;
