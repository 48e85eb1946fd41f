pub mod config;
pub mod controller;
pub mod datasets;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod ws;

#[cfg(test)]
mod test;
