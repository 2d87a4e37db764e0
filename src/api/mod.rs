mod health;
mod inputs;
mod metrics;
pub mod models;
mod plot_sizes;
mod snapshot;

use actix_web::web::{self, ServiceConfig};

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(plot_sizes::get_plot_sizes)
            .service(inputs::get_inputs)
            .service(inputs::put_inputs)
            .service(snapshot::get_snapshot)
            .service(snapshot::refresh)
            .service(metrics::get_metrics)
            .service(metrics::get_chance),
    );
}
