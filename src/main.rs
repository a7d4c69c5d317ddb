use poem::session::{CookieConfig, MemoryStorage, ServerSession};
use poem::{listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use std::sync::Arc;

use shoplist_backend::api::{HealthApi, ListApi, UserApi};
use shoplist_backend::app_data::AppData;
use shoplist_backend::config::{self, Settings};
use shoplist_backend::policy::AccessPolicy;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env();

    let db = config::init_database(&settings)
        .await
        .expect("Failed to connect to database");

    config::migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    let policy = AccessPolicy::from_file(settings.roles_config_path())
        .expect("Failed to load role access configuration");

    let app_data = Arc::new(AppData::init(db, policy));

    let user_api = UserApi::new(app_data.user_service.clone(), app_data.policy.clone());
    let list_api = ListApi::new(app_data.list_service.clone(), app_data.policy.clone());

    let api_service = OpenApiService::new(
        (HealthApi, user_api, list_api),
        "Shoplist API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.server_address()));

    let ui = api_service.swagger_ui();

    // Sessions are cookie-backed with server-side state; every request
    // carries the session cookie, and login stores the identity in it.
    let session_middleware = ServerSession::new(
        CookieConfig::default().name("shoplist_session"),
        MemoryStorage::new(),
    );

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(session_middleware);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await
}
