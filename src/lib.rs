pub mod app;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod menubar;
pub mod sprites;
pub mod surface;
pub mod term;
pub mod types;
