//! Standalone proxy in front of a local completion backend, serving short
//! guest-facing text for the home-stay platform.

mod config;
mod routes;
mod server;
mod upstream;

pub use server::ServeError;

pub async fn run() -> Result<(), ServeError> {
    server::run().await
}
