// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{permission, protect},
    error::ApiError,
    models::{
        CreateDrinkRequest, DeleteDrinkResponse, Drink, DrinkSummariesResponse, DrinkSummary,
        DrinksResponse, Ingredient, IngredientSummary, RecipeInput, UpdateDrinkRequest,
    },
    state::AppState,
};

pub mod drinks;
pub mod health;

pub fn router(state: AppState) -> Router {
    let verifier = state.verifier.clone();

    let routes = Router::new()
        .route(
            "/drinks",
            get(drinks::list_drinks).merge(protect(
                post(drinks::create_drink),
                verifier.clone(),
                permission::POST_DRINKS,
            )),
        )
        .route(
            "/drinks-detail",
            protect(
                get(drinks::drinks_detail),
                verifier.clone(),
                permission::GET_DRINKS_DETAIL,
            ),
        )
        .route(
            "/drinks/{drink_id}",
            protect(
                patch(drinks::update_drink),
                verifier.clone(),
                permission::PATCH_DRINKS,
            )
            .merge(protect(
                delete(drinks::delete_drink),
                verifier,
                permission::DELETE_DRINKS,
            )),
        )
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        drinks::list_drinks,
        drinks::drinks_detail,
        drinks::create_drink,
        drinks::update_drink,
        drinks::delete_drink,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Drink,
            DrinkSummary,
            Ingredient,
            IngredientSummary,
            RecipeInput,
            CreateDrinkRequest,
            UpdateDrinkRequest,
            DrinksResponse,
            DrinkSummariesResponse,
            DeleteDrinkResponse
        )
    ),
    tags(
        (name = "Drinks", description = "Drink catalog"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
