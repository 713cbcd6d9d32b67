use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use hello_database::Message;
use tracing::debug;
use uuid::Uuid;

use crate::{
    routes::models::{MessageAddEditViewModel, MessageViewModel},
    validation::validate_content,
    ApiError, AppState,
};

const MESSAGE_NOT_FOUND: &str = "Message not found";

// Unparseable ids cannot name a message.
fn parse_external_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found(MESSAGE_NOT_FOUND))
}

async fn find_message(state: &AppState, id: &str) -> Result<Message, ApiError> {
    let external_id = parse_external_id(id)?;
    state
        .messages()
        .get_message(external_id)
        .await?
        .ok_or_else(|| ApiError::not_found(MESSAGE_NOT_FOUND))
}

fn content_from(
    payload: Result<Json<MessageAddEditViewModel>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(payload) = payload?;
    Ok(validate_content(payload.content)?)
}

// List every message
#[utoipa::path(
    get,
    path = "/messages",
    tag = "Messages",
    responses(
        (status = 200, description = "All messages", body = [MessageViewModel]),
        (status = 500, description = "Failed to list messages", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageViewModel>>, ApiError> {
    let messages = state.messages().list_messages().await?;
    debug!(count = messages.len(), "listing messages");
    Ok(Json(messages.into_iter().map(MessageViewModel::from).collect()))
}

// Add a new message
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    request_body = MessageAddEditViewModel,
    responses(
        (status = 201, description = "Message added", body = MessageViewModel,
            headers(("Location" = String, description = "URL of the new message"))),
        (status = 400, description = "Invalid message payload", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to add message", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_message(
    State(state): State<AppState>,
    payload: Result<Json<MessageAddEditViewModel>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let content = content_from(payload)?;

    let added = state
        .messages()
        .add_message(Some(Message::new(content)))
        .await?;

    let view = MessageViewModel::from(added);
    let location = view.location();
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(view)))
}

// Get a single message
#[utoipa::path(
    get,
    path = "/messages/{id}",
    tag = "Messages",
    params(
        ("id" = Uuid, Path, description = "Message external identifier")
    ),
    responses(
        (status = 200, description = "The message", body = MessageViewModel),
        (status = 404, description = "Message not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to fetch message", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageViewModel>, ApiError> {
    let message = find_message(&state, &id).await?;
    Ok(Json(MessageViewModel::from(message)))
}

// Replace a message's content
#[utoipa::path(
    put,
    path = "/messages/{id}",
    tag = "Messages",
    params(
        ("id" = Uuid, Path, description = "Message external identifier")
    ),
    request_body = MessageAddEditViewModel,
    responses(
        (status = 200, description = "Message edited", body = MessageViewModel),
        (status = 400, description = "Invalid message payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Message not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Message changed concurrently", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to edit message", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MessageAddEditViewModel>, JsonRejection>,
) -> Result<Json<MessageViewModel>, ApiError> {
    let content = content_from(payload)?;

    let mut message = find_message(&state, &id).await?;
    message.content = content;

    let edited = state.messages().edit_message(Some(message)).await?;
    Ok(Json(MessageViewModel::from(edited)))
}

// Remove a message
#[utoipa::path(
    delete,
    path = "/messages/{id}",
    tag = "Messages",
    params(
        ("id" = Uuid, Path, description = "Message external identifier")
    ),
    responses(
        (status = 204, description = "Message removed"),
        (status = 404, description = "Message not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Message changed concurrently", body = crate::error::ErrorResponse),
        (status = 500, description = "Failed to remove message", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let message = find_message(&state, &id).await?;
    state.messages().remove_message(Some(message)).await?;
    Ok(StatusCode::NO_CONTENT)
}
