// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    Json,
};

use crate::{
    auth::Claims,
    error::ApiError,
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, DrinkSummariesResponse, DrinksResponse,
        UpdateDrinkRequest,
    },
    state::AppState,
};

fn drink_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::not_found())
}

fn body<T>(json: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    json.map(|Json(value)| value).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        ApiError::unprocessable()
    })
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, body = DrinkSummariesResponse))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Json<DrinkSummariesResponse> {
    let store = state.store.read().await;
    Json(DrinkSummariesResponse {
        success: true,
        drinks: store.list_drinks().iter().map(|drink| drink.short()).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires get:drinks-detail")
    )
)]
pub async fn drinks_detail(
    Claims(claims): Claims,
    State(state): State<AppState>,
) -> Json<DrinksResponse> {
    tracing::debug!(subject = ?claims.sub, "listing drink details");
    let store = state.store.read().await;
    Json(DrinksResponse {
        success: true,
        drinks: store.list_drinks(),
    })
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    tag = "Drinks",
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires post:drinks"),
        (status = 422, description = "Invalid body or duplicate title")
    )
)]
pub async fn create_drink(
    Claims(claims): Claims,
    State(state): State<AppState>,
    request: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let request = body(request)?;
    let mut store = state.store.write().await;
    let drink = store.create_drink(request)?;
    tracing::info!(subject = ?claims.sub, drink_id = drink.id, "drink created");
    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

#[utoipa::path(
    patch,
    path = "/drinks/{drink_id}",
    params(
        ("drink_id" = u64, Path, description = "Identifier of the drink to update")
    ),
    request_body = UpdateDrinkRequest,
    tag = "Drinks",
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires patch:drinks"),
        (status = 404, description = "Drink not found"),
        (status = 422, description = "Invalid body or duplicate title")
    )
)]
pub async fn update_drink(
    Claims(claims): Claims,
    path: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
    request: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let id = drink_id(path)?;
    let mut store = state.store.write().await;
    if !store.contains_drink(id) {
        return Err(ApiError::not_found());
    }
    let request = body(request)?;
    let drink = store.update_drink(id, request)?;
    tracing::info!(subject = ?claims.sub, drink_id = id, "drink updated");
    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

#[utoipa::path(
    delete,
    path = "/drinks/{drink_id}",
    params(
        ("drink_id" = u64, Path, description = "Identifier of the drink to delete")
    ),
    tag = "Drinks",
    responses(
        (status = 200, body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires delete:drinks"),
        (status = 404, description = "Drink not found")
    )
)]
pub async fn delete_drink(
    Claims(claims): Claims,
    path: Result<Path<u64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    let id = drink_id(path)?;
    let mut store = state.store.write().await;
    store.delete_drink(id)?;
    tracing::info!(subject = ?claims.sub, drink_id = id, "drink deleted");
    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: id,
    }))
}
