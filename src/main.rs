mod api;
mod config;
mod farming;
mod network;
mod session;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use config::Settings;
use network::Fetcher;
use session::Session;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let fetcher = Fetcher::new(settings.pool_stats_url.clone(), settings.fetch_timeout)
        .map_err(|e| io::Error::other(format!("http client: {e}")))?;

    info!(
        "🌱 Starting farming calculator at http://{}:{} (stats from {})",
        settings.host, settings.port, settings.pool_stats_url
    );

    let session = web::Data::new(Session::new(fetcher, settings.refresh_min));

    HttpServer::new(move || {
        App::new()
            .app_data(session.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
