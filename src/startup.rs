use std::{net::TcpListener, time::Duration};

use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use secrecy::{ExposeSecret, SecretString};
use tracing_actix_web::TracingLogger;

use crate::{auth::jwt::Tokenizer, configuration::{BootstrapAdminSettings, DatabaseSettings, Settings}, db_interaction::insert_admin_if_missing, domain::Username, password::{hash_password, validate_password}, routes::{self, health_check, login, ApiError}, telemetry::spawn_blocking_with_tracing, utils::{get_pooled_connection, DbPool}};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;
        run_migrations(&pool).await?;

        if let Some(admin) = &settings.bootstrap_admin {
            seed_admin(&pool, admin).await?;
        }

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
            .context("Failed to bind application address")?;
        let port = listener.local_addr()?.port();

        let tokenizer = Tokenizer::new(&settings.jwt);
        let server = run(listener, pool, tokenizer, settings.application.allowed_origins)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<PgConnection>::new(settings.get_database_table_url());

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .context("Failed to build database connection pool")
}

#[tracing::instrument(
    "Running database migrations",
    skip_all
)]
pub async fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = get_pooled_connection(pool).await?;

    let applied = spawn_blocking_with_tracing(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))
    })
    .await
    .context("Failed due to threadpool error")??;

    tracing::info!(applied, "Database migrations are up to date");
    Ok(())
}

#[tracing::instrument(
    "Seeding bootstrap administrator",
    skip_all,
    fields(username = %admin.username)
)]
async fn seed_admin(pool: &DbPool, admin: &BootstrapAdminSettings) -> Result<(), anyhow::Error>{
    let username = Username::parse(admin.username.clone()).map_err(|e| anyhow::anyhow!(e))?;
    validate_password(&admin.password).map_err(|e| anyhow::anyhow!(e))?;

    let password_hash = hash_password(SecretString::from(admin.password.expose_secret().to_string())).await?;
    let conn = get_pooled_connection(pool).await?;

    let inserted = insert_admin_if_missing(conn, username.inner(), password_hash.expose_secret().to_string())
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    if inserted {
        tracing::info!("Bootstrap administrator created");
    }

    Ok(())
}

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        allowed_origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

fn run(listener: TcpListener, pool: DbPool, tokenizer: Tokenizer, allowed_origins: Vec<String>) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors(&allowed_origins))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::FormConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _| {
                ApiError::NotFound(err.to_string()).into()
            }))
            .route("/health", web::get().to(health_check))
            .route("/login", web::post().to(login))
            .service(routes::customers::scope())
            .service(routes::restaurant_owners::scope())
            .service(routes::delivery_personnel::scope())
            .service(routes::admins::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
