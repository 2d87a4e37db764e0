use actix_web::{HttpResponse, Responder, get, web};

use super::models::{ChanceResponse, InputsResponse, MetricsResponse};
use crate::farming::DerivedMetrics;
use crate::farming::reward::halving_era;
use crate::session::Session;

/// Projections for the current farm against the latest snapshot.
/// Figures that depend on missing network data are `null`.
#[get("/metrics/")]
pub async fn get_metrics(session: web::Data<Session>) -> impl Responder {
    session.load_if_needed().await;

    let snapshot = session.snapshot();
    let inputs = session.inputs();
    let metrics = DerivedMetrics::derive(snapshot.as_deref(), &inputs);

    HttpResponse::Ok().json(MetricsResponse {
        inputs: InputsResponse::from(inputs),
        last_updated: snapshot.as_ref().map(|s| s.fetched_at),
        halving_era: snapshot
            .as_ref()
            .and_then(|s| s.current_block_height)
            .map(halving_era),
        metrics,
    })
}

#[get("/chance/{hours}/")]
pub async fn get_chance(session: web::Data<Session>, path: web::Path<(f64,)>) -> impl Responder {
    let hours = path.into_inner().0;
    if !hours.is_finite() || hours < 0.0 {
        return HttpResponse::BadRequest().body("hours must be a finite, non-negative number");
    }

    session.load_if_needed().await;
    HttpResponse::Ok().json(ChanceResponse {
        hours,
        chance: session.chance_to_win_within(hours),
    })
}
