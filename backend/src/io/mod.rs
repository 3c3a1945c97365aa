//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain services. It turns
//! requests into domain commands, runs them against the services held in
//! [`AppState`](crate::AppState) and renders the results as JSON.
//!
//! - **Web Framework**: Axum, with services injected through router state
//! - **Serialization**: Serde DTOs from the `shared` crate
//! - **Error Handling**: `{"error", "code"}` bodies with matching status codes

pub mod rest;

pub use rest::router;
