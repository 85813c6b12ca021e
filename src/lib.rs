pub mod config;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
