use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::models::{ActivityListing, MessageResponse};
use crate::services::activities_service::{self, DirectoryError};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct ParticipantQuery {
    pub email: String,
}

pub async fn activities_handler(
    State(state): State<AppState>,
) -> Result<Json<ActivityListing>, DirectoryError> {
    activities_service::list_activities(&*state.store)
        .await
        .map(Json)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, DirectoryError> {
    activities_service::signup_for_activity(
        &*state.store,
        state.signup_rules,
        &activity_name,
        &query.email,
    )
    .await
    .map(Json)
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, DirectoryError> {
    activities_service::unregister_from_activity(
        &*state.store,
        &activity_name,
        &query.email,
    )
    .await
    .map(Json)
}
