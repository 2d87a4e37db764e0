use actix_web::{HttpResponse, Responder, get};

use super::models::{PlotSizeRow, PlotSizesResponse};
use crate::farming::plot::footprint_gib;
use crate::farming::{CompressionLevel, ProofSize};

#[get("/plot-sizes/")]
pub async fn get_plot_sizes() -> impl Responder {
    let plots = ProofSize::ALL
        .iter()
        .flat_map(|&size| {
            CompressionLevel::ALL.iter().map(move |&level| PlotSizeRow {
                proof_size: size,
                compression_level: level,
                label: format!("{size} {level}"),
                size_gib: footprint_gib(size, level),
            })
        })
        .collect();

    HttpResponse::Ok().json(PlotSizesResponse {
        proof_sizes: ProofSize::ALL.to_vec(),
        compression_levels: CompressionLevel::ALL.to_vec(),
        plots,
    })
}
