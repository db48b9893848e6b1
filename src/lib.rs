pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::error::Error;

use crate::infrastructure::bootstrap;
use crate::interfaces::http::{add_log, start_server};

pub fn run() -> Result<(), Box<dyn Error>> {
    let bootstrap::Bootstrapped { config, state } = bootstrap::setup()?;

    add_log(
        &state.logs,
        "INFO",
        "HttpApi",
        &format!("Serving flashcards on http://{}:{}", config.host, config.port),
    );

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(state, &config.host, config.port)?;
        server.await
    })?;

    Ok(())
}
