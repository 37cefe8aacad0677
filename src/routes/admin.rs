use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppError;
use crate::export;
use crate::models::rsvp::{Rsvp, RsvpStats};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/rsvps", get(dashboard))
        .route("/api/admin/rsvps/export", get(export_csv))
}

#[derive(Serialize)]
struct AdminDashboard {
    rsvps: Vec<Rsvp>,
    stats: RsvpStats,
}

async fn fetch_all(db: &PgPool) -> Result<Vec<Rsvp>, AppError> {
    let rsvps = sqlx::query_as::<_, Rsvp>(
        "SELECT id, name, email, attending, guests, dietary_restrictions, message, created_at
         FROM rsvps ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await?;
    Ok(rsvps)
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<AdminDashboard>, AppError> {
    let rsvps = fetch_all(&state.db).await?;

    // Guests only count toward the total when the party is attending.
    let stats = sqlx::query_as::<_, RsvpStats>(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE attending) AS attending,
                COALESCE(SUM(guests) FILTER (WHERE attending), 0) AS total_guests
         FROM rsvps",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(AdminDashboard { rsvps, stats }))
}

async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rsvps = fetch_all(&state.db).await?;
    let body = export::rsvps_to_csv(&rsvps)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rsvps.csv\"",
            ),
        ],
        body,
    ))
}
