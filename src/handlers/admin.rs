use crate::models::*;
use crate::services::{AuthService, GiftService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/session",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Session opened", body = AdminSessionApiResponse),
        (status = 400, description = "Empty password"),
        (status = 401, description = "Incorrect password")
    )
)]
pub async fn open_session(
    auth_service: web::Data<AuthService>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(request.into_inner()) {
        Ok(session) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": session
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/gifts",
    tag = "admin",
    operation_id = "admin_list_gifts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (
            status = 200,
            description = "Gifts with photo and link counts",
            body = AdminGiftListApiResponse
        ),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn list_gifts(gift_service: web::Data<GiftService>) -> Result<HttpResponse> {
    match gift_service.list_gifts().await {
        Ok(gifts) => {
            let rows: Vec<AdminGiftResponse> =
                gifts.into_iter().map(AdminGiftResponse::from).collect();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": rows
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/gifts",
    tag = "admin",
    request_body = GiftInput,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Gift created", body = GiftApiResponse),
        (status = 400, description = "Missing required field or malformed URL"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn create_gift(
    gift_service: web::Data<GiftService>,
    request: web::Json<GiftInput>,
) -> Result<HttpResponse> {
    match gift_service.create_gift(request.into_inner()).await {
        Ok(gift) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": gift,
            "message": "Gift added successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/gifts/{gift_id}",
    tag = "admin",
    params(
        ("gift_id" = String, Path, description = "Gift id")
    ),
    request_body = GiftInput,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Gift updated", body = GiftApiResponse),
        (status = 400, description = "Missing required field or malformed URL"),
        (status = 404, description = "Unknown gift")
    )
)]
pub async fn update_gift(
    gift_service: web::Data<GiftService>,
    path: web::Path<String>,
    request: web::Json<GiftInput>,
) -> Result<HttpResponse> {
    let gift_id = path.into_inner();

    match gift_service.update_gift(&gift_id, request.into_inner()).await {
        Ok(gift) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": gift,
            "message": "Gift updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/gifts/{gift_id}",
    tag = "admin",
    params(
        ("gift_id" = String, Path, description = "Gift id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Gift deleted"),
        (status = 404, description = "Unknown gift")
    )
)]
pub async fn delete_gift(
    gift_service: web::Data<GiftService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let gift_id = path.into_inner();

    match gift_service.delete_gift(&gift_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Gift deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/session", web::post().to(open_session))
            .route("/gifts", web::get().to(list_gifts))
            .route("/gifts", web::post().to(create_gift))
            .route("/gifts/{gift_id}", web::put().to(update_gift))
            .route("/gifts/{gift_id}", web::delete().to(delete_gift)),
    );
}
