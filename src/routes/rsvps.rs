use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::models::rsvp::{Rsvp, RsvpForm};
use crate::AppState;

/// How many entries the public page shows.
const RECENT_LIMIT: i64 = 10;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/rsvps", get(list_recent).post(submit))
}

#[derive(Serialize)]
struct RsvpList {
    rsvps: Vec<Rsvp>,
}

async fn list_recent(State(state): State<AppState>) -> Result<Json<RsvpList>, AppError> {
    let rsvps = sqlx::query_as::<_, Rsvp>(
        "SELECT id, name, email, attending, guests, dietary_restrictions, message, created_at
         FROM rsvps ORDER BY created_at DESC LIMIT $1",
    )
    .bind(RECENT_LIMIT)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(RsvpList { rsvps }))
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<RsvpForm>,
) -> Result<(StatusCode, Json<Rsvp>), AppError> {
    let new = form.validate()?;

    let rsvp = sqlx::query_as::<_, Rsvp>(
        "INSERT INTO rsvps (name, email, attending, guests, dietary_restrictions, message)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, name, email, attending, guests, dietary_restrictions, message, created_at",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(new.attending)
    .bind(new.guests)
    .bind(&new.dietary_restrictions)
    .bind(&new.message)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(id = rsvp.id, attending = rsvp.attending, "rsvp recorded");

    Ok((StatusCode::CREATED, Json(rsvp)))
}
