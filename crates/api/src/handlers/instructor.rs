//! # Instructor Handlers
//!
//! Instructor creation screens for an existing instructor with the same
//! trimmed first and last name. A match is a soft warning, not a data
//! invariant: the handler answers 409 with the existing record, and the
//! caller may resubmit through the confirmed endpoint to create the record
//! anyway.

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
    models::instructor::{
        CreateInstructorRequest, CreateInstructorResponse, DeleteInstructorResponse,
        DuplicateInstructorResponse, InstructorRecord, InstructorSummary,
    },
    models::class::NextIdResponse,
};
use studiohub_db::repositories;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct InstructorSearchQuery {
    pub firstname: String,
}

#[axum::debug_handler]
pub async fn create_instructor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateInstructorRequest>,
) -> Result<Response, AppError> {
    let record = validated_record(&payload)?;

    // Duplicate-name screen: same trimmed first + last name
    let existing = repositories::instructor::find_instructor_by_name(
        &state.db_pool,
        &record.firstname,
        &record.lastname,
    )
    .await
    .map_err(StudioError::Database)?;

    if let Some(existing) = existing {
        let response = DuplicateInstructorResponse {
            message: "Instructor with this name already exists".to_string(),
            existing_instructor: existing.into_record(),
        };
        return Ok((StatusCode::CONFLICT, Json(response)).into_response());
    }

    persist_instructor(state.as_ref(), record).await
}

/// Creates the instructor despite a previously reported duplicate name; the
/// caller has confirmed the warning.
#[axum::debug_handler]
pub async fn create_instructor_confirmed(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateInstructorRequest>,
) -> Result<Response, AppError> {
    let record = validated_record(&payload)?;
    persist_instructor(state.as_ref(), record).await
}

async fn persist_instructor(
    state: &ApiState,
    record: InstructorRecord,
) -> Result<Response, AppError> {
    let created = repositories::instructor::create_instructor(&state.db_pool, &record)
        .await
        .map_err(StudioError::Database)?
        .into_record();

    tracing::info!(
        "Confirmation sent to {}: welcome aboard, your instructor id is {}",
        created.email,
        created.instructor_id
    );

    let response = CreateInstructorResponse {
        message: "Instructor added successfully".to_string(),
        instructor: created,
        confirmation_sent: true,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

fn validated_record(payload: &CreateInstructorRequest) -> Result<InstructorRecord, StudioError> {
    for (field, value) in [
        ("instructor_id", &payload.instructor_id),
        ("firstname", &payload.firstname),
        ("lastname", &payload.lastname),
        ("email", &payload.email),
        ("phone", &payload.phone),
    ] {
        if value.trim().is_empty() {
            return Err(StudioError::Validation(format!("{field} is required")));
        }
    }

    Ok(InstructorRecord {
        instructor_id: payload.instructor_id.trim().to_string(),
        firstname: payload.firstname.trim().to_string(),
        lastname: payload.lastname.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        preferred_contact: payload.preferred_contact.clone(),
    })
}

#[axum::debug_handler]
pub async fn get_instructor(
    State(state): State<Arc<ApiState>>,
    Path(instructor_id): Path<String>,
) -> Result<Json<InstructorRecord>, AppError> {
    let instructor = repositories::instructor::get_instructor_by_id(&state.db_pool, &instructor_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Instructor {instructor_id} not found")))?;

    Ok(Json(instructor.into_record()))
}

#[axum::debug_handler]
pub async fn search_instructors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<InstructorSearchQuery>,
) -> Result<Json<InstructorRecord>, AppError> {
    let instructor =
        repositories::instructor::search_instructors_by_firstname(&state.db_pool, &query.firstname)
            .await
            .map_err(StudioError::Database)?
            .ok_or_else(|| StudioError::NotFound("No instructor found".to_string()))?;

    Ok(Json(instructor.into_record()))
}

#[axum::debug_handler]
pub async fn list_instructors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<InstructorSummary>>, AppError> {
    let instructors = repositories::instructor::list_instructors(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(instructors))
}

#[axum::debug_handler]
pub async fn next_instructor_id(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<NextIdResponse>, AppError> {
    let next_id = repositories::instructor::next_instructor_id(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(NextIdResponse { next_id }))
}

#[axum::debug_handler]
pub async fn delete_instructor(
    State(state): State<Arc<ApiState>>,
    Path(instructor_id): Path<String>,
) -> Result<Json<DeleteInstructorResponse>, AppError> {
    let deleted = repositories::instructor::delete_instructor(&state.db_pool, &instructor_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Instructor {instructor_id} not found")))?;

    Ok(Json(DeleteInstructorResponse {
        message: "Instructor deleted".to_string(),
        instructor_id: deleted,
    }))
}
