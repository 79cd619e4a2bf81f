use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Items API",
        version = "0.1.0",
        description = "API for creating, reading, updating and deleting items"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_items::ITEMS_URL, api = domain_items::ApiDoc)
    )
)]
pub struct ApiDoc;
