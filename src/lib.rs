//! # Reservas Restaurante
//!
//! Backend CRUD de reservas de restaurante sobre Actix Web y MongoDB.
//!
//! ```text
//! Frontend (HTML/CSS/JS)
//!     ↓ HTTP/JSON
//! API REST (Actix Web)
//!     ↓ MongoDB Driver
//! MongoDB Database
//! ```

pub mod api;
pub mod config;
pub mod db;

pub use config::Config;
