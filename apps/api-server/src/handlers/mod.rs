//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod upload;

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
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me))
                    .route("/status", web::put().to(auth::update_status)),
            )
            // Feed routes
            .service(
                web::scope("/feed")
                    .route("/posts", web::post().to(feed::create_post))
                    .route("/posts", web::get().to(feed::list_posts))
                    .route("/posts/{id}", web::get().to(feed::get_post))
                    .route("/posts/{id}", web::put().to(feed::update_post))
                    .route("/posts/{id}", web::delete().to(feed::delete_post))
                    .route("/post-image", web::put().to(upload::upload_image)),
            ),
    );
}
