use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::application::ElectionDataUseCase;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

pub struct HttpState {
    pub election: Arc<ElectionDataUseCase>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    primed: bool,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[get("/candidates.json")]
async fn candidates(data: web::Data<HttpState>) -> impl Responder {
    match data.election.candidate_table().await {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => {
            error!(error = %e, "Failed to build candidate table");
            error_response(&e)
        }
    }
}

#[get("/states.json")]
async fn states(data: web::Data<HttpState>) -> impl Responder {
    match data.election.state_table().await {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => {
            error!(error = %e, "Failed to build state table");
            error_response(&e)
        }
    }
}

#[get("/health")]
async fn health(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        primed: data.election.is_primed(),
    })
}

/// Upstream fetch failures are the sheet host's fault; everything else is ours.
fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::FetchError(_) => HttpResponse::BadGateway().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(candidates)
        .service(states)
        .service(health);
}

pub fn start_server(election: Arc<ElectionDataUseCase>, config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { election });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Read-only public data

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind_addr())?
    .run();

    Ok(server)
}
