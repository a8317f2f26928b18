pub mod app;
pub mod components;
pub mod config;
pub mod screens;
pub mod timer;
