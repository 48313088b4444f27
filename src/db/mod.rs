// src/db/mod.rs
pub mod mongodb;

pub use mongodb::{MongoRepo, Reserva};
