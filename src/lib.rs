pub mod cli;
pub mod config;
pub mod console;
pub mod export;
pub mod fetch;
pub mod model;
pub mod pages;
pub mod pipeline;
pub mod reference;
pub mod render;
pub mod route;
pub mod state;
