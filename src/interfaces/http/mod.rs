use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::use_cases::card_reader::CardReader;
use crate::domain::card::{Card, DeckLoad};

pub mod page;

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub type SharedLogs = Arc<Mutex<Vec<LogEntry>>>;

pub struct HttpState {
    pub cards_path: PathBuf,
    pub title: String,
    pub logs: SharedLogs,
}

#[derive(Serialize)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
    pub error: Option<String>,
    pub skipped_rows: usize,
}

async fn load_deck(data: &web::Data<HttpState>) -> DeckLoad {
    let path = data.cards_path.clone();
    let logs = data.logs.clone();
    match web::block(move || CardReader::new(logs).read_cards(&path)).await {
        Ok(load) => load,
        Err(err) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Card read task failed: {}", err),
            );
            DeckLoad::ReadError(err.to_string())
        }
    }
}

#[get("/")]
async fn index(data: web::Data<HttpState>) -> impl Responder {
    let load = load_deck(&data).await;
    let error = load.user_error();
    let cards = load.cards();

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Rendering page (cards={} error={})",
            cards.len(),
            error.unwrap_or("none")
        ),
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render_page(&data.title, cards, error))
}

#[get("/cards")]
async fn list_cards(data: web::Data<HttpState>) -> impl Responder {
    let load = load_deck(&data).await;
    let error = load.user_error().map(str::to_string);
    let skipped_rows = load.skipped_rows();

    HttpResponse::Ok().json(CardsResponse {
        cards: load.into_cards(),
        error,
        skipped_rows,
    })
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(web::scope("/api").service(list_cards).service(get_logs));
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };

    match level {
        "ERROR" => tracing::error!(source = %source, "{}", message),
        "WARN" => tracing::warn!(source = %source, "{}", message),
        "DEBUG" => tracing::debug!(source = %source, "{}", message),
        _ => tracing::info!(source = %source, "{}", message),
    }

    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((host, port))?
        .run();

    Ok(server)
}
