//! # Class Handlers
//!
//! Class creation runs the scheduling workflow from `studiohub-core`:
//! validation, instructor existence, conflict screening, persist. A detected
//! conflict is rendered as a 409 carrying the colliding class, the colliding
//! slot, and up to three conflict-free alternatives, so the caller can branch
//! into the override flow. The override endpoint persists unconditionally;
//! it is the caller's explicit acknowledgment of a previously reported
//! conflict and performs no re-check.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use studiohub_core::{
    errors::StudioError,
    models::class::{
        ClassRecord, ClassSummary, CreateClassRequest, CreateClassResponse,
        DeleteClassResponse, NextIdResponse, ScheduleConflictResponse, ScheduleEntry,
    },
    scheduling::{self, ClassOutcome, ConflictPolicy},
};
use studiohub_db::{
    repositories,
    store::{PgClassStore, PgInstructorDirectory},
};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_class(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<Response, AppError> {
    create_with_policy(&state, payload, ConflictPolicy::Screen).await
}

#[axum::debug_handler]
pub async fn create_class_override(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<Response, AppError> {
    create_with_policy(&state, payload, ConflictPolicy::Override).await
}

async fn create_with_policy(
    state: &ApiState,
    payload: CreateClassRequest,
    policy: ConflictPolicy,
) -> Result<Response, AppError> {
    let classes = PgClassStore::new(&state.db_pool);
    let instructors = PgInstructorDirectory::new(&state.db_pool);

    let outcome = scheduling::create_class(&classes, &instructors, payload, policy).await?;

    match outcome {
        ClassOutcome::Created { class, instructor } => {
            let message = match policy {
                ConflictPolicy::Screen => "Class added successfully",
                ConflictPolicy::Override => "Class added successfully with conflict override",
            };
            tracing::info!(
                "Confirmation sent to manager: class \"{}\" scheduled for {} {}",
                class.class_name,
                instructor.firstname,
                instructor.lastname
            );
            tracing::info!(
                "Confirmation sent to {}: you have been assigned to teach \"{}\" (class id {})",
                instructor.email,
                class.class_name,
                class.class_id
            );

            let response = CreateClassResponse {
                message: message.to_string(),
                class,
                confirmation_sent: true,
            };
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
        ClassOutcome::Conflict {
            class,
            slot,
            alternatives,
        } => {
            let response = ScheduleConflictResponse {
                message: "Schedule conflict detected".to_string(),
                conflicting_class: class,
                conflicting_slot: slot,
                suggested_alternatives: alternatives,
            };
            Ok((StatusCode::CONFLICT, Json(response)).into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn get_class(
    State(state): State<Arc<ApiState>>,
    Path(class_id): Path<String>,
) -> Result<Json<ClassRecord>, AppError> {
    let class = repositories::class::get_class_by_id(&state.db_pool, &class_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Class {class_id} not found")))?;

    Ok(Json(class))
}

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ClassSummary>>, AppError> {
    let classes = repositories::class::list_active_classes(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(classes))
}

#[axum::debug_handler]
pub async fn next_class_id(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<NextIdResponse>, AppError> {
    let next_id = repositories::class::next_class_id(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(NextIdResponse { next_id }))
}

/// Logical delete: flips `active` off so the class drops out of conflict
/// checks and the schedule while its record stays in storage.
#[axum::debug_handler]
pub async fn delete_class(
    State(state): State<Arc<ApiState>>,
    Path(class_id): Path<String>,
) -> Result<Json<DeleteClassResponse>, AppError> {
    let deactivated = repositories::class::deactivate_class(&state.db_pool, &class_id)
        .await
        .map_err(StudioError::Database)?
        .ok_or_else(|| StudioError::NotFound(format!("Class {class_id} not found")))?;

    Ok(Json(DeleteClassResponse {
        message: "Class deactivated".to_string(),
        class_id: deactivated,
    }))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScheduleEntry>>, AppError> {
    let schedule = repositories::class::get_schedule(&state.db_pool)
        .await
        .map_err(StudioError::Database)?;

    Ok(Json(schedule))
}
