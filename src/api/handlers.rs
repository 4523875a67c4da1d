// HTTP request handlers for the dashboard pages

use crate::pages::Dashboard;
use crate::render::RenderPage;
use actix_web::{http::header::ContentType, web, HttpResponse, Result};

fn html(page: &impl RenderPage) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page.render())
}

/// Genre cards
pub async fn index(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.index))
}

pub async fn most_sold(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.most_sold))
}

pub async fn most_played(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.most_played))
}

/// Top five per year
pub async fn top_games(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.top_games))
}

pub async fn publishers(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.publishers))
}

/// Interactive charts by year, platform and genre
pub async fn statistics(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.statistics))
}

/// Top five of one genre; an unknown genre renders an empty table
pub async fn genre(
    path: web::Path<String>,
    dashboard: web::Data<Dashboard>,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    let page = dashboard.genre(&name);
    if page.games.is_empty() {
        tracing::debug!(genre = %name, "genre has no records");
    }
    Ok(html(&page))
}

/// Composite summary
pub async fn data(dashboard: web::Data<Dashboard>) -> Result<HttpResponse> {
    Ok(html(&dashboard.data))
}
