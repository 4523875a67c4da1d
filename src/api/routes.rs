// Route table for the dashboard

use crate::api::handlers;
use crate::render::STATIC_PREFIX;
use actix_files::Files;
use actix_web::web;
use std::path::Path;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/most_sold", web::get().to(handlers::most_sold))
        .route("/most_played", web::get().to(handlers::most_played))
        .route("/top_games", web::get().to(handlers::top_games))
        .route("/publishers", web::get().to(handlers::publishers))
        .route("/statistics", web::get().to(handlers::statistics))
        .route("/genre/{name}", web::get().to(handlers::genre))
        .route("/data", web::get().to(handlers::data));
}

/// Static assets. The plots directory is mounted first so it can live outside
/// the static directory.
pub fn configure_static(cfg: &mut web::ServiceConfig, static_dir: &Path, plots_dir: &Path) {
    cfg.service(Files::new(&format!("{STATIC_PREFIX}/plots"), plots_dir))
        .service(Files::new(STATIC_PREFIX, static_dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;
    use crate::pages::Dashboard;
    use actix_web::{http::StatusCode, test, App};

    async fn get(uri: &str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Dashboard::build(&sample())))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn every_page_renders() {
        for uri in [
            "/",
            "/most_sold",
            "/most_played",
            "/top_games",
            "/publishers",
            "/statistics",
            "/data",
            "/genre/Sports",
        ] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.starts_with("<!DOCTYPE html>"), "{uri}");
        }
    }

    #[actix_web::test]
    async fn genre_page_lists_top_records() {
        let (_, body) = get("/genre/Sports").await;
        assert!(body.contains("<td>Wii Sports</td>"));
        assert!(body.contains("<td>Wii Sports Resort</td>"));
        assert!(!body.contains("<td>Tetris</td>"));
    }

    #[actix_web::test]
    async fn unknown_genre_is_an_empty_table_not_an_error() {
        let (status, body) = get("/genre/Nonexistent").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<th>Name</th>"));
        assert!(!body.contains("<td>"));
    }

    #[actix_web::test]
    async fn hyphenated_genre_names_match() {
        let (status, body) = get("/genre/Role-Playing").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Pokemon Red/Pokemon Blue"));
    }

    #[actix_web::test]
    async fn unmatched_path_is_not_found() {
        let (status, _) = get("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn static_files_and_plots_are_served() {
        let tmp = tempfile::tempdir().unwrap();
        let static_dir = tmp.path().join("static");
        let plots_dir = tmp.path().join("plots");
        std::fs::create_dir_all(static_dir.join("js")).unwrap();
        std::fs::create_dir_all(&plots_dir).unwrap();
        std::fs::write(static_dir.join("js/scripts.js"), "// js").unwrap();
        std::fs::write(plots_dir.join("summary.png"), b"png").unwrap();

        let app = test::init_service(
            App::new().configure(|cfg| configure_static(cfg, &static_dir, &plots_dir)),
        )
        .await;
        for uri in ["/static/js/scripts.js", "/static/plots/summary.png"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }
    }
}
