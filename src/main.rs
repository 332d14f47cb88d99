use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use chrono::Local; // timestamp in log lines
use std::io::Write; // for env_logger custom formatter

use gift_registry_backend::{
    config::Config,
    database::open_store,
    handlers,
    middlewares::{AdminSessionMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    if config.admin.uses_default_password() {
        log::warn!(
            "ADMIN_PASSWORD is not set; the admin panel accepts the built-in default password"
        );
    }

    if config.jwt.uses_default_secret() {
        log::warn!("JWT_SECRET is not set; admin sessions are signed with the built-in key");
    }
    config
        .ensure_session_secret()
        .expect("Refusing to start with the built-in session key");

    let store = open_store(&config.database)
        .await
        .expect("Failed to open gift store");

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.session_expires_in);

    let subscription_service =
        SubscriptionService::new(store.clone(), config.realtime.channel_capacity);
    let gift_service = GiftService::new(store, subscription_service);
    let auth_service = AuthService::new(jwt_service.clone(), config.admin.secret());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .wrap(AdminSessionMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(gift_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::gift_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
