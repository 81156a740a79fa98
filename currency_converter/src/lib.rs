pub mod config;
pub mod converter;
pub mod error;
pub mod handler;
pub mod rates;
pub mod response;
pub mod source;
