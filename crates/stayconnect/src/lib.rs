//! Core matching engine and shared service plumbing for the StayConnect
//! home-stay platform.

pub mod config;
pub mod error;
pub mod matching;
pub mod seed;
pub mod telemetry;

pub use error::AppError;
