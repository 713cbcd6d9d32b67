use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "HelloWorld API", description = "Message CRUD service"),
    paths(
        crate::routes::health::health_check,
        crate::routes::messages::list_messages,
        crate::routes::messages::add_message,
        crate::routes::messages::get_message,
        crate::routes::messages::edit_message,
        crate::routes::messages::remove_message
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::MessageViewModel,
            crate::routes::models::MessageAddEditViewModel
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Messages", description = "Message CRUD")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
