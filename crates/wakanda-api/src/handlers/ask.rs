//! Character question handlers
//!
//! Two routes share one request path and differ only in how the
//! character/question pair arrives and which chain entry point answers it.

use crate::error::{
    AppError, BODY_FAILURE_MESSAGE, INVALID_BODY_MESSAGE, MISSING_FIELDS_MESSAGE,
    QUERY_FAILURE_MESSAGE,
};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use wakanda_core::CharacterQuery;

/// JSON body for `POST /api/wakanda`
#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    /// Character to answer as
    #[schema(example = "T'Challa")]
    pub character: Option<String>,

    /// Question for the character
    #[schema(example = "What is vibranium?")]
    pub question: Option<String>,
}

/// Query parameters for `GET /api/wakanda-ai`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AskParams {
    /// Character to answer as
    pub character: Option<String>,

    /// Question for the character
    pub question: Option<String>,
}

/// How the question reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// JSON request body, answered by `get_wakanda_ai_response`
    Body,
    /// Query string, answered by `run`
    QueryString,
}

impl Entry {
    fn failure_message(self) -> &'static str {
        match self {
            Entry::Body => BODY_FAILURE_MESSAGE,
            Entry::QueryString => QUERY_FAILURE_MESSAGE,
        }
    }

    fn route(self) -> &'static str {
        match self {
            Entry::Body => "/api/wakanda",
            Entry::QueryString => "/api/wakanda-ai",
        }
    }
}

/// Validate the pair, call the chain, and map its outcome to a response
async fn answer(
    state: &AppState,
    entry: Entry,
    character: Option<String>,
    question: Option<String>,
) -> Result<Json<Value>, AppError> {
    let query = CharacterQuery::from_parts(character, question).map_err(|e| {
        tracing::debug!(route = entry.route(), reason = %e, "Rejected question");
        AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())
    })?;

    let result = match entry {
        Entry::Body => {
            state
                .chain
                .get_wakanda_ai_response(query.character(), query.question())
                .await
        }
        Entry::QueryString => state.chain.run(query.character(), query.question()).await,
    };

    match result {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            state.record_failure();
            tracing::error!(
                route = entry.route(),
                character = query.character(),
                error = %e,
                "Answer chain failed"
            );
            Err(AppError::Internal(entry.failure_message().to_string()))
        }
    }
}

/// Answer a question sent as a JSON body
#[utoipa::path(
    post,
    path = "/api/wakanda",
    tag = "wakanda",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer returned by the chain unchanged"),
        (status = 400, description = "Missing character or question", body = crate::error::ApiError),
        (status = 500, description = "Answer chain failed", body = crate::error::ApiError)
    )
)]
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    state.increment_requests();

    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })?;

    answer(&state, Entry::Body, req.character, req.question).await
}

/// Answer a question sent as query parameters
#[utoipa::path(
    get,
    path = "/api/wakanda-ai",
    tag = "wakanda",
    params(AskParams),
    responses(
        (status = 200, description = "Answer returned by the chain unchanged"),
        (status = 400, description = "Missing character or question", body = crate::error::ApiError),
        (status = 500, description = "Answer chain failed", body = crate::error::ApiError)
    )
)]
pub async fn ask_query_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AskParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    state.increment_requests();

    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
        AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())
    })?;

    answer(&state, Entry::QueryString, params.character, params.question).await
}
