use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info};

use ndola_homes::config::Config;
use ndola_homes::db::init_db;
use ndola_homes::responses::error_to_response;
use ndola_homes::router::{handle, App};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let app = App::new(config);

    if let Err(e) = init_db(&app.db, "sql/schema.sql") {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr: SocketAddr = match format!("0.0.0.0:{}", app.config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("bad listen address: {e}");
            std::process::exit(1);
        }
    };

    info!("{} listening on http://{addr}", app.config.site_name);

    let server = Server::bind(&addr).max_workers(8);
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            if matches!(
                err,
                ndola_homes::errors::ServerError::DbError(_)
                    | ndola_homes::errors::ServerError::InternalError
            ) {
                error!("request failed: {err}");
            }
            error_to_response(err)
        }
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
