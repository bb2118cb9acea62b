//! HTTP API exposing the session actions to a front-end

pub mod handlers;
pub mod routes;
