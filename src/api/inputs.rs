use actix_web::{HttpResponse, Responder, get, put, web};
use log::info;

use super::models::{InputsResponse, UpdateInputsRequest};
use crate::session::Session;

#[get("/inputs/")]
pub async fn get_inputs(session: web::Data<Session>) -> impl Responder {
    HttpResponse::Ok().json(InputsResponse::from(session.inputs()))
}

/// Update the farm description. Unit counts below 1 are clamped to 1;
/// unknown proof sizes or compression levels are rejected by the extractor.
#[put("/inputs/")]
pub async fn put_inputs(
    session: web::Data<Session>,
    body: web::Json<UpdateInputsRequest>,
) -> impl Responder {
    let req = body.into_inner();
    let inputs = session.update_inputs(|inputs| {
        if let Some(count) = req.unit_count {
            inputs.set_unit_count(count);
        }
        if let Some(size) = req.proof_size {
            inputs.proof_size = size;
        }
        if let Some(level) = req.compression_level {
            inputs.compression_level = level;
        }
    });

    info!(
        "INPUTS - {} plots {} {}",
        inputs.unit_count(),
        inputs.proof_size,
        inputs.compression_level
    );
    HttpResponse::Ok().json(InputsResponse::from(inputs))
}
