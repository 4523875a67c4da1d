// HTTP layer: actix-web server, route table, page handlers

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::{prepare_dashboard, DashboardServer};
