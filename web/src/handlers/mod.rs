//! HTTP request handlers.

pub mod health;
pub mod hotels;

pub use health::health_check;
pub use hotels::{get_hotel, get_hotels};
