pub mod args;
pub mod cli;
pub mod config;
pub mod manager;
pub mod report;
pub mod sales;
pub mod terminal;
