//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            // Blog routes - all require a valid bearer token
            .service(
                web::scope("/blog")
                    .route("", web::get().to(blog::list))
                    .route("", web::post().to(blog::create))
                    .route("/{id}", web::get().to(blog::detail))
                    .route("/{id}", web::put().to(blog::update))
                    .route("/{id}", web::delete().to(blog::remove)),
            ),
    );
}
