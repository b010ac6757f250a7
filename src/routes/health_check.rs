use actix_web::{web, HttpResponse};

use crate::utils::{get_pooled_connection, DbPool};

#[tracing::instrument(
    "Checking if api is online",
    skip(pool)
)]
pub async fn health_check(pool: web::Data<DbPool>) -> HttpResponse{
    match get_pooled_connection(&pool).await {
        Ok(_) => HttpResponse::Ok().body("Working"),
        Err(e) => {
            tracing::error!("{:?}", e);
            HttpResponse::ServiceUnavailable().body("Database unavailable")
        }
    }
}
