//! Contacts API (v1)
//!
//! In-memory contact book, documented with utoipa and registered as a
//! [`DocumentedApi`](api_docs::DocumentedApi).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ErrorResponse,
    errors::responses::{InternalServerErrorResponse, NotFoundResponse},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

/// OpenAPI documentation for Contacts API
#[derive(OpenApi)]
#[openapi(
    paths(list_contacts, create_contact, get_contact),
    components(
        schemas(ContactSchema, CreateContactSchema, ErrorResponse),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Contacts", description = "Contact book endpoints")
    )
)]
pub struct ApiDoc;

/// A stored contact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSchema {
    pub id: u32,
    pub name: String,
    pub email: Option<String>,
}

/// Input for creating a contact
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContactSchema {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Default)]
pub struct ContactStore {
    contacts: RwLock<Vec<ContactSchema>>,
}

impl ContactStore {
    async fn list(&self) -> Vec<ContactSchema> {
        self.contacts.read().await.clone()
    }

    async fn get(&self, id: u32) -> Option<ContactSchema> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
    }

    async fn insert(&self, input: CreateContactSchema) -> ContactSchema {
        let mut contacts = self.contacts.write().await;
        let id = contacts.iter().map(|contact| contact.id).max().unwrap_or(0) + 1;
        let contact = ContactSchema {
            id,
            name: input.name,
            email: input.email,
        };
        contacts.push(contact.clone());
        contact
    }
}

/// Create the contacts router
pub fn router(store: Arc<ContactStore>) -> Router {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/{id}", get(get_contact))
        .with_state(store)
}

/// List all contacts
#[utoipa::path(
    get,
    path = "",
    tag = "Contacts",
    responses(
        (status = 200, description = "List of contacts", body = Vec<ContactSchema>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_contacts(State(store): State<Arc<ContactStore>>) -> Json<Vec<ContactSchema>> {
    Json(store.list().await)
}

/// Create a contact
#[utoipa::path(
    post,
    path = "",
    tag = "Contacts",
    request_body = CreateContactSchema,
    responses(
        (status = 201, description = "Contact created", body = ContactSchema),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_contact(
    State(store): State<Arc<ContactStore>>,
    Json(input): Json<CreateContactSchema>,
) -> impl IntoResponse {
    let contact = store.insert(input).await;
    info!(contact_id = contact.id, "Created contact");
    (StatusCode::CREATED, Json(contact))
}

/// Get a contact by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contacts",
    params(
        ("id" = u32, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact found", body = ContactSchema),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_contact(
    State(store): State<Arc<ContactStore>>,
    Path(id): Path<u32>,
) -> Result<Json<ContactSchema>, AppError> {
    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))
}
