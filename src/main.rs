use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_actix_web::TracingLogger;

use mercato::config::Config;
use mercato::middleware::JwtAuth;
use mercato::modules::auth::controllers::{auth_controller, user_controller};
use mercato::modules::auth::{AuthService, UserRepository, UserService};
use mercato::modules::categories::controllers::category_controller;
use mercato::modules::categories::{CategoryRepository, CategoryService};
use mercato::modules::products::controllers::product_controller;
use mercato::modules::products::{ProductRepository, ProductService};
use mercato::modules::tags::controllers::tag_controller;
use mercato::modules::tags::{TagRepository, TagService};
use mercato::modules::types::controllers::type_controller;
use mercato::modules::types::{TypeRepository, TypeService};
use mercato::modules::wishlists::controllers::wishlist_controller;
use mercato::modules::wishlists::{WishlistRepository, WishlistService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mercato=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Mercato catalog backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Apply pending migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Repositories are cheap pool handles; services compose them
    let user_repository = UserRepository::new(db_pool.clone());
    let type_repository = TypeRepository::new(db_pool.clone());
    let product_repository = ProductRepository::new(db_pool.clone());

    let auth_service = web::Data::new(AuthService::new(
        user_repository.clone(),
        config.auth.clone(),
    ));
    let user_service = web::Data::new(UserService::new(
        user_repository,
        config.auth.role_filter_mode,
    ));
    let type_service = web::Data::new(TypeService::new(type_repository.clone()));
    let category_service = web::Data::new(CategoryService::new(
        CategoryRepository::new(db_pool.clone()),
        type_repository.clone(),
    ));
    let tag_service = web::Data::new(TagService::new(
        TagRepository::new(db_pool.clone()),
        type_repository.clone(),
    ));
    let product_service = web::Data::new(ProductService::new(
        product_repository.clone(),
        type_repository,
    ));
    let wishlist_service = web::Data::new(WishlistService::new(
        WishlistRepository::new(db_pool.clone()),
        product_repository,
    ));

    let pool_data = web::Data::new(db_pool.clone());
    let auth_config = web::Data::new(config.auth.clone());

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let jwt_pool = db_pool.clone();
    let jwt_config = config.auth.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(pool_data.clone())
            .app_data(auth_config.clone())
            .app_data(auth_service.clone())
            .app_data(user_service.clone())
            .app_data(type_service.clone())
            .app_data(category_service.clone())
            .app_data(tag_service.clone())
            .app_data(product_service.clone())
            .app_data(wishlist_service.clone())
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
            .service(
                web::scope("/api/v1")
                    // public routes: auth + catalog reads (writes gate per-handler)
                    .configure(auth_controller::configure)
                    .configure(type_controller::configure)
                    .configure(category_controller::configure)
                    .configure(tag_controller::configure)
                    .configure(product_controller::configure)
                    // authenticated sub-tree
                    .service(
                        web::scope("")
                            .wrap(JwtAuth::new(jwt_pool.clone(), jwt_config.clone()))
                            .configure(user_controller::configure)
                            .configure(wishlist_controller::configure),
                    ),
            )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mercato"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Mercato Catalog Backend",
        "version": "0.1.0",
        "status": "running"
    }))
}
