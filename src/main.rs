use crate::app::App;
use crate::router::handle;
use astra::Server;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod domain;
mod errors;
mod fetcher;
mod mailer;
mod mailings;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Read configuration (.env first, then the process environment)
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Logging: RUST_LOG wins, DEALS_LOG_LEVEL otherwise
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let addr = config.bind_addr;
    let max_workers = config.max_workers;

    // 3️⃣ Build the data source and mail clients
    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    // 4️⃣ Start the server
    tracing::info!("starting server at http://{addr}");

    let server = Server::bind(addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
