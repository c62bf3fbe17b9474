// Read-only JSON API over a fitted recommender

pub mod handlers;
pub mod models;
pub mod routes;
