//! # Customer Handlers
//!
//! Mirrors the instructor handlers: the same duplicate-name soft warning and
//! confirmation flow, plus the class balance every new customer starts with.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use studiohub_core::{
    errors::StudioError,
    models::class::NextIdResponse,
    models::customer::{
        CreateCustomerRequest, CreateCustomerResponse, CustomerRecord, CustomerSummary,
        DeleteCustomerResponse, DuplicateCustomerResponse,
    },
};
use studiohub_db::repositories;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct CustomerSearchQuery {
    pub first_name: String,
}

#[axum::debug_handler]
pub async fn create_customer(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Response, AppError> {
    let record = validated_record(&payload)?;

    // Duplicate-name screen: same trimmed first + last name
    let existing = repositories::customer::find_customer_by_name(
        &state.db_pool,
        &record.first_name,
        &record.last_name,
    )
    .await
    .map_err(StudioError::Database)?;

    if let Some(existing) = existing {
        let response = DuplicateCustomerResponse {
            message: "Customer with this name already exists".to_string(),
            existing_customer: existing.into_record(),
        };
        return Ok((StatusCode::CONFLICT, Json(response)).into_response());
    }

    persist_customer(state.as_ref(), record).await
}

/// Creates the customer despite a previously reported duplicate name; the
/// caller has confirmed the warning.
#[axum::debug_handler]
pub async fn create_customer_confirmed(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Response, AppError> {
    let record = validated_record(&payload)?;
    persist_customer(state.as_ref(), record).await
}

async fn persist_customer(
    state: &ApiState,
    record: CustomerRecord,
) -> Result<Response, AppError> {
    let created = repositories::customer::create_customer(&state.db_pool, &record)
        .await
        .map_err(StudioError::Database)?
        .into_record();

    tracing::info!(
        "Confirmation sent to {}: welcome, your customer id is {}",
        created.email,
        created.customer_id
    );

    let response = CreateCustomerResponse {
        message: "Customer added successfully".to_string(),
        customer: created,
        confirmation_sent: true,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

fn validated_record(payload: &CreateCustomerRequest) -> Result<CustomerRecord, StudioError> {
    for (field, value) in [
        ("customer_id", &payload.customer_id),
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
        ("email", &payload.email),
        ("phone", &payload.phone),
    ] {
        if value.trim().is_empty() {
            return Err(StudioError::Validation(format!("{field} is required")));
        }
    }

    Ok(CustomerRecord {
        customer_id: payload.customer_id.trim().to_string(),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        senior: payload.senior,
        address: payload
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        preferred_contact: payload.preferred_contact.clone(),
        // Every new customer starts with an empty balance
        class_balance: 0,
    })
}

#[axum::debug_handler]
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerRecord>, AppError> {
    let customer = repositories::customer::get_customer_by_id(&state.db_pool, &customer_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Customer {customer_id} not found")))?;

    Ok(Json(customer.into_record()))
}

#[axum::debug_handler]
pub async fn search_customers(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CustomerSearchQuery>,
) -> Result<Json<CustomerRecord>, AppError> {
    let customer =
        repositories::customer::search_customers_by_first_name(&state.db_pool, &query.first_name)
            .await
            .map_err(StudioError::Database)?
            .ok_or_else(|| StudioError::NotFound("No customer found".to_string()))?;

    Ok(Json(customer.into_record()))
}

#[axum::debug_handler]
pub async fn list_customers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    let customers = repositories::customer::list_customers(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(customers))
}

#[axum::debug_handler]
pub async fn next_customer_id(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<NextIdResponse>, AppError> {
    let next_id = repositories::customer::next_customer_id(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(NextIdResponse { next_id }))
}

#[axum::debug_handler]
pub async fn delete_customer(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<DeleteCustomerResponse>, AppError> {
    let deleted = repositories::customer::delete_customer(&state.db_pool, &customer_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Customer {customer_id} not found")))?;

    Ok(Json(DeleteCustomerResponse {
        message: "Customer deleted".to_string(),
        customer_id: deleted,
    }))
}
