pub mod audio;
pub mod auth;
pub mod language;
pub mod phrases;
pub mod shared;
pub mod translation;
