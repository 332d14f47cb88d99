use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::gift::list_gifts,
        handlers::gift::stream_gifts,
        handlers::gift::claim_gift,
        handlers::admin::open_session,
        handlers::admin::list_gifts,
        handlers::admin::create_gift,
        handlers::admin::update_gift,
        handlers::admin::delete_gift,
    ),
    components(
        schemas(
            Gift,
            GiftInput,
            ClaimGiftRequest,
            AdminGiftResponse,
            AdminLoginRequest,
            AdminSessionResponse,
            ApiError,
            GiftApiResponse,
            GiftListApiResponse,
            AdminGiftListApiResponse,
            AdminSessionApiResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "gifts", description = "Public gift list and claims"),
        (name = "admin", description = "Gift catalog management"),
    ),
    info(
        title = "Gift Registry API",
        version = "1.0.0",
        description = "Baby shower gift registry REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
