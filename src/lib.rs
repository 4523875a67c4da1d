//! Video-game sales dashboard: loads `vgsales.csv` once, aggregates it, and
//! serves fixed HTML pages with tables and charts over actix-web.

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod pages;
pub mod render;

pub mod util {
    pub mod env;
}
