use crate::models::*;
use crate::services::GiftService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use futures_util::StreamExt;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/gifts",
    tag = "gifts",
    responses(
        (status = 200, description = "Gifts, newest first", body = GiftListApiResponse)
    )
)]
pub async fn list_gifts(gift_service: web::Data<GiftService>) -> Result<HttpResponse> {
    match gift_service.list_gifts().await {
        Ok(gifts) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": gifts
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Formats one server-sent event carrying a full snapshot.
pub fn snapshot_event(gifts: &[Gift]) -> Result<web::Bytes, serde_json::Error> {
    let payload = serde_json::to_string(gifts)?;
    Ok(web::Bytes::from(format!("event: snapshot\ndata: {payload}\n\n")))
}

#[utoipa::path(
    get,
    path = "/gifts/stream",
    tag = "gifts",
    responses(
        (status = 200, description = "text/event-stream of `snapshot` events, one per change")
    )
)]
pub async fn stream_gifts(gift_service: web::Data<GiftService>) -> HttpResponse {
    let subscription = gift_service.subscriptions().subscribe();

    let events = subscription.into_stream().map(|snapshot| {
        let gifts = snapshot.map_err(|e| {
            log::error!("Failed to load gift snapshot: {e}");
            actix_web::error::ErrorInternalServerError("snapshot unavailable")
        })?;
        snapshot_event(&gifts).map_err(actix_web::error::ErrorInternalServerError)
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(events)
}

#[utoipa::path(
    post,
    path = "/gifts/{gift_id}/claim",
    tag = "gifts",
    params(
        ("gift_id" = String, Path, description = "Gift id")
    ),
    request_body = ClaimGiftRequest,
    responses(
        (status = 200, description = "Gift claimed", body = GiftApiResponse),
        (status = 400, description = "Blank name or name already on the list"),
        (status = 404, description = "Unknown gift")
    )
)]
pub async fn claim_gift(
    gift_service: web::Data<GiftService>,
    path: web::Path<String>,
    request: web::Json<ClaimGiftRequest>,
) -> Result<HttpResponse> {
    let gift_id = path.into_inner();

    match gift_service.claim_gift(&gift_id, request.into_inner()).await {
        Ok(gift) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": gift,
            "message": "Gift claimed successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn gift_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gifts")
            .route("", web::get().to(list_gifts))
            .route("/stream", web::get().to(stream_gifts))
            .route("/{gift_id}/claim", web::post().to(claim_gift)),
    );
}
