//! # Schedule Conflict Engine
//!
//! This module contains the conflict-detection and alternative-time-suggestion
//! logic used when scheduling classes, plus the class-creation workflow that
//! ties the two together.
//!
//! ## Conflict Detection
//!
//! A proposed class carries an ordered list of weekly slots. Each slot is
//! checked against the store for an active class already occupying the same
//! (day, time); the scan stops at the first collision. Duration never
//! participates in the collision key, so a 60-minute class and a 90-minute
//! class starting at the same moment still collide.
//!
//! ## Alternative Suggestion
//!
//! When a slot collides, up to three substitute start times are proposed on
//! the same day, drawn from a fixed hourly grid (09:00 through 20:00). Each
//! candidate is screened individually through the same conflict check, in
//! ascending order, so the results are deterministic for a given store state.
//! The original start time is never proposed, even if it has since freed up.
//!
//! ## Consistency
//!
//! The check-then-persist sequence is not transactional: a class created by a
//! concurrent request between the conflict screen and the insert can produce
//! a stored double-booking, and the override path persists without
//! re-checking. The screen is a scheduling aid, not an enforced store
//! invariant.

use async_trait::async_trait;
use chrono::NaiveTime;

use crate::errors::{StudioError, StudioResult};
use crate::models::class::{ClassRecord, CreateClassRequest};
use crate::models::instructor::InstructorRecord;
use crate::models::slot::{ClassSlot, Weekday};

/// Maximum number of substitute slots proposed for a colliding slot.
pub const MAX_ALTERNATIVES: usize = 3;

const FIRST_CANDIDATE_HOUR: u32 = 9;
const LAST_CANDIDATE_HOUR: u32 = 20;

/// The fixed hourly grid of candidate start times, in ascending order.
pub fn candidate_start_times() -> impl Iterator<Item = NaiveTime> {
    (FIRST_CANDIDATE_HOUR..=LAST_CANDIDATE_HOUR)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
}

/// Read/write access to class records, as far as the scheduling engine is
/// concerned. Implemented over Postgres by the db crate and over in-memory
/// fixtures in tests.
#[async_trait]
pub trait ClassStore: Send + Sync {
    /// Finds an active class with a slot at exactly (day, time), skipping
    /// the class identified by `exclude_class_id` when present (so a class
    /// being updated does not collide with itself). When several active
    /// classes occupy the slot, any one of them may be returned.
    async fn find_active_by_slot(
        &self,
        day: Weekday,
        time: NaiveTime,
        exclude_class_id: Option<&str>,
    ) -> StudioResult<Option<ClassRecord>>;

    /// Persists a new class record.
    async fn insert(&self, record: &ClassRecord) -> StudioResult<()>;
}

/// Instructor lookup used to confirm references before persisting a class.
#[async_trait]
pub trait InstructorDirectory: Send + Sync {
    async fn find_by_id(
        &self,
        instructor_id: &str,
    ) -> StudioResult<Option<InstructorRecord>>;
}

/// A detected collision: the stored class occupying the slot, and the
/// *proposed* slot that collided with it (the stored class's own slot shares
/// the day and time but may have a different duration).
#[derive(Debug, Clone)]
pub struct SlotConflict {
    pub class: ClassRecord,
    pub slot: ClassSlot,
}

/// Checks the proposed slots, in order, against the store and returns the
/// first collision found, or `None` when every slot is free. Later slots are
/// not checked once a collision is found. Store errors propagate unchanged.
pub async fn check_conflict<S>(
    store: &S,
    slots: &[ClassSlot],
    exclude_class_id: Option<&str>,
) -> StudioResult<Option<SlotConflict>>
where
    S: ClassStore + ?Sized,
{
    for slot in slots {
        let existing = store
            .find_active_by_slot(slot.day, slot.time, exclude_class_id)
            .await?;

        if let Some(class) = existing {
            return Ok(Some(SlotConflict { class, slot: *slot }));
        }
    }

    Ok(None)
}

/// Scans the candidate grid on `day` and collects up to [`MAX_ALTERNATIVES`]
/// conflict-free start times, carrying `duration_minutes` through unchanged.
/// The original time is skipped outright. Fewer than three results, possibly
/// zero, is a normal outcome on a crowded day.
pub async fn suggest_alternatives<S>(
    store: &S,
    day: Weekday,
    original_time: NaiveTime,
    duration_minutes: u16,
) -> StudioResult<Vec<ClassSlot>>
where
    S: ClassStore + ?Sized,
{
    let mut alternatives = Vec::new();

    for time in candidate_start_times() {
        if time == original_time {
            continue;
        }

        let candidate = ClassSlot::new(day, time, duration_minutes);
        let conflict =
            check_conflict(store, std::slice::from_ref(&candidate), None).await?;

        if conflict.is_none() {
            alternatives.push(candidate);
            if alternatives.len() == MAX_ALTERNATIVES {
                break;
            }
        }
    }

    Ok(alternatives)
}

/// Whether class creation screens for schedule conflicts or persists
/// unconditionally. `Override` is the caller's explicit acknowledgment of a
/// previously reported conflict; no re-check is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    Screen,
    Override,
}

/// Result of the class-creation workflow. A conflict is a distinguished
/// outcome carrying remediation data, not an error.
#[derive(Debug)]
pub enum ClassOutcome {
    Created {
        class: ClassRecord,
        instructor: InstructorRecord,
    },
    Conflict {
        class: ClassRecord,
        slot: ClassSlot,
        alternatives: Vec<ClassSlot>,
    },
}

/// Class-creation workflow: Validate, ConflictCheck, Persist.
///
/// Validation failures surface as [`StudioError::Validation`], an unknown
/// instructor as [`StudioError::UnknownReference`]. Under
/// [`ConflictPolicy::Screen`], a collision short-circuits the workflow before
/// anything is persisted and returns [`ClassOutcome::Conflict`] with up to
/// three alternatives for the colliding slot. Under
/// [`ConflictPolicy::Override`] the conflict check is skipped entirely.
pub async fn create_class<C, I>(
    classes: &C,
    instructors: &I,
    request: CreateClassRequest,
    policy: ConflictPolicy,
) -> StudioResult<ClassOutcome>
where
    C: ClassStore + ?Sized,
    I: InstructorDirectory + ?Sized,
{
    validate_request(&request)?;

    let instructor = instructors
        .find_by_id(request.instructor_id.trim())
        .await?
        .ok_or_else(|| {
            StudioError::UnknownReference(format!(
                "Instructor {} does not exist",
                request.instructor_id.trim()
            ))
        })?;

    if policy == ConflictPolicy::Screen {
        if let Some(conflict) = check_conflict(classes, &request.slots, None).await? {
            let alternatives = suggest_alternatives(
                classes,
                conflict.slot.day,
                conflict.slot.time,
                conflict.slot.duration_minutes,
            )
            .await?;

            return Ok(ClassOutcome::Conflict {
                class: conflict.class,
                slot: conflict.slot,
                alternatives,
            });
        }
    }

    let record = ClassRecord {
        class_id: request.class_id.trim().to_string(),
        class_name: request.class_name.trim().to_string(),
        instructor_id: request.instructor_id.trim().to_string(),
        class_type: request.class_type,
        description: request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        slots: request.slots.clone(),
        pay_rate: request.pay_rate,
        active: true,
    };

    classes.insert(&record).await?;

    Ok(ClassOutcome::Created {
        class: record,
        instructor,
    })
}

fn validate_request(request: &CreateClassRequest) -> StudioResult<()> {
    if request.class_id.trim().is_empty() {
        return Err(StudioError::Validation("class_id is required".to_string()));
    }
    if request.class_name.trim().is_empty() {
        return Err(StudioError::Validation(
            "class_name is required".to_string(),
        ));
    }
    if request.instructor_id.trim().is_empty() {
        return Err(StudioError::Validation(
            "instructor_id is required".to_string(),
        ));
    }
    if request.slots.is_empty() {
        return Err(StudioError::Validation(
            "at least one slot is required".to_string(),
        ));
    }
    for slot in &request.slots {
        if !slot.duration_in_range() {
            return Err(StudioError::Validation(format!(
                "slot duration must be between {} and {} minutes, got {}",
                ClassSlot::MIN_DURATION_MINUTES,
                ClassSlot::MAX_DURATION_MINUTES,
                slot.duration_minutes
            )));
        }
    }
    if !request.pay_rate.is_finite() || request.pay_rate < 0.0 {
        return Err(StudioError::Validation(
            "pay_rate must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}
