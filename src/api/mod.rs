// JSON HTTP API over the matching engine

pub mod handlers;
pub mod models;
pub mod routes;
