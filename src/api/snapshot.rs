use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{ErrorDescriptor, RefreshResponse, SnapshotResponse};
use crate::session::{RefreshOutcome, Session};

/// Current network snapshot plus refresh state. Triggers the first load.
#[get("/snapshot/")]
pub async fn get_snapshot(session: web::Data<Session>) -> impl Responder {
    session.load_if_needed().await;
    let status = session.status();
    HttpResponse::Ok().json(SnapshotResponse::from(&status))
}

/// Fetch fresh network stats. On failure the previous snapshot is kept and
/// the error is returned with a 502.
#[post("/refresh/")]
pub async fn refresh(session: web::Data<Session>) -> impl Responder {
    match session.refresh().await {
        Ok(outcome) => {
            let status = session.status();
            HttpResponse::Ok().json(RefreshResponse {
                published: outcome == RefreshOutcome::Published,
                status: SnapshotResponse::from(&status),
            })
        }
        Err(e) => {
            let status = session.status();
            let mut body = SnapshotResponse::from(&status);
            // report this attempt's error even if a newer refresh masked it
            body.error = Some(ErrorDescriptor::from(&e));
            HttpResponse::BadGateway().json(RefreshResponse {
                published: false,
                status: body,
            })
        }
    }
}
