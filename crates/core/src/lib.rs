#![deny(rust_2018_idioms)]

pub mod commands;
pub mod config;
pub mod keys;
pub mod permissions;
pub mod pets;
pub mod plugin;
pub mod server;
pub mod text;
