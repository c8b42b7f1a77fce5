//! This module contains the API endpoints for the server.
pub mod auth;
pub mod retire;
pub mod routes;
pub mod state;
