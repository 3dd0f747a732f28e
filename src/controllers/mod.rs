pub mod audio;
pub mod auth;
pub mod health;
pub mod languages;
pub mod phrases;
pub mod progress;
