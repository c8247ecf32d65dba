//! HTTP surface of the Aegis session credential service.
//!
//! Routes, request/response bodies, the bearer authentication and role
//! middleware, and the mapping from domain errors to JSON error responses.
//! All token logic lives in `aegis_core`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
