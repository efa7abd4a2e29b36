pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod render;
