//! A small pet store document used as the exporter's default source and in
//! tests. Tags carry the handler module path so `base-package` can select
//! on them.

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: i64,
    pub city: String,
    /// Pets currently housed at the store.
    pub residents: Vec<Pet>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Request-scoped principal. Framework plumbing that should stay out of
/// published docs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub subject: String,
}

pub mod pets {
    use super::{Pet, Principal};

    #[utoipa::path(
        get,
        path = "/pets",
        tag = "petstore::pets",
        params(
            ("limit" = Option<i32>, Query, description = "Page size"),
            ("principal" = Principal, Query, description = "Injected principal"),
        ),
        responses((status = 200, description = "All pets", body = [Pet]))
    )]
    pub fn list_pets() {}

    #[utoipa::path(
        post,
        path = "/pets",
        tag = "petstore::pets",
        request_body = Pet,
        responses((status = 201, description = "Pet created", body = Pet))
    )]
    pub fn create_pet() {}

    #[utoipa::path(
        get,
        path = "/pets/{id}",
        tag = "petstore::pets",
        params(("id" = i64, Path, description = "Pet id")),
        responses(
            (status = 200, description = "One pet", body = Pet),
            (status = 404, description = "No such pet")
        )
    )]
    pub fn get_pet() {}
}

pub mod stores {
    use super::Store;

    #[utoipa::path(
        get,
        path = "/stores",
        tag = "petstore::stores",
        responses((status = 200, description = "All stores", body = [Store]))
    )]
    pub fn list_stores() {}

    #[utoipa::path(
        delete,
        path = "/stores/{id}",
        tag = "petstore::stores",
        params(("id" = i64, Path, description = "Store id")),
        responses((status = 204, description = "Store removed"))
    )]
    pub fn delete_store() {}
}

pub mod internal {
    #[utoipa::path(
        get,
        path = "/internal/health",
        tag = "petstore::internal",
        responses((status = 200, description = "Healthy"))
    )]
    pub fn health() {}
}

#[derive(OpenApi)]
#[openapi(
    paths(
        pets::list_pets,
        pets::create_pet,
        pets::get_pet,
        stores::list_stores,
        stores::delete_store,
        internal::health,
    ),
    components(schemas(Pet, Store, ErrorBody, Principal)),
    tags(
        (name = "petstore::pets", description = "Pet inventory"),
        (name = "petstore::stores", description = "Store locations"),
        (name = "petstore::internal", description = "Operational endpoints"),
    ),
    info(title = "Pet Store", version = "0.1.0")
)]
pub struct ApiDoc;
