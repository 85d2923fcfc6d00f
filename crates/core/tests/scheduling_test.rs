use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use studiohub_core::errors::{StudioError, StudioResult};
use studiohub_core::models::class::{ClassRecord, ClassType, CreateClassRequest};
use studiohub_core::models::instructor::InstructorRecord;
use studiohub_core::models::slot::{ClassSlot, Weekday};
use studiohub_core::scheduling::{
    self, ClassOutcome, ClassStore, ConflictPolicy, InstructorDirectory, MAX_ALTERNATIVES,
};

/// In-memory class store mirroring the query semantics the engine relies on:
/// active-only matching on (day, time) with optional id exclusion.
struct MemoryStore {
    classes: Mutex<Vec<ClassRecord>>,
    queries: AtomicUsize,
    offline: bool,
}

impl MemoryStore {
    fn new(classes: Vec<ClassRecord>) -> Self {
        Self {
            classes: Mutex::new(classes),
            queries: AtomicUsize::new(0),
            offline: false,
        }
    }

    fn offline() -> Self {
        Self {
            classes: Mutex::new(Vec::new()),
            queries: AtomicUsize::new(0),
            offline: true,
        }
    }

    fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn deactivate(&self, class_id: &str) {
        let mut classes = self.classes.lock().unwrap();
        for class in classes.iter_mut() {
            if class.class_id == class_id {
                class.active = false;
            }
        }
    }

    fn stored(&self, class_id: &str) -> Option<ClassRecord> {
        self.classes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.class_id == class_id)
            .cloned()
    }
}

#[async_trait]
impl ClassStore for MemoryStore {
    async fn find_active_by_slot(
        &self,
        day: Weekday,
        time: NaiveTime,
        exclude_class_id: Option<&str>,
    ) -> StudioResult<Option<ClassRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(StudioError::Database(eyre::eyre!("store offline")));
        }

        let classes = self.classes.lock().unwrap();
        Ok(classes
            .iter()
            .find(|c| {
                c.active
                    && exclude_class_id.is_none_or(|id| c.class_id != id)
                    && c.slots.iter().any(|s| s.day == day && s.time == time)
            })
            .cloned())
    }

    async fn insert(&self, record: &ClassRecord) -> StudioResult<()> {
        self.classes.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct MemoryDirectory {
    instructors: Vec<InstructorRecord>,
}

impl MemoryDirectory {
    fn with_instructor(instructor_id: &str) -> Self {
        Self {
            instructors: vec![InstructorRecord {
                instructor_id: instructor_id.to_string(),
                firstname: "Dana".to_string(),
                lastname: "Meyer".to_string(),
                email: "dana.meyer@example.com".to_string(),
                phone: "555-0117".to_string(),
                address: None,
                preferred_contact: Some("email".to_string()),
            }],
        }
    }

    fn empty() -> Self {
        Self {
            instructors: Vec::new(),
        }
    }
}

#[async_trait]
impl InstructorDirectory for MemoryDirectory {
    async fn find_by_id(
        &self,
        instructor_id: &str,
    ) -> StudioResult<Option<InstructorRecord>> {
        Ok(self
            .instructors
            .iter()
            .find(|i| i.instructor_id == instructor_id)
            .cloned())
    }
}

fn time(s: &str) -> NaiveTime {
    s.parse().expect("valid test time")
}

fn slot(day: Weekday, at: &str, duration_minutes: u16) -> ClassSlot {
    ClassSlot::new(day, time(at), duration_minutes)
}

fn class(class_id: &str, slots: Vec<ClassSlot>) -> ClassRecord {
    ClassRecord {
        class_id: class_id.to_string(),
        class_name: format!("Class {class_id}"),
        instructor_id: "I1".to_string(),
        class_type: ClassType::General,
        description: None,
        slots,
        pay_rate: 40.0,
        active: true,
    }
}

fn request(class_id: &str, slots: Vec<ClassSlot>) -> CreateClassRequest {
    CreateClassRequest {
        class_id: class_id.to_string(),
        class_name: format!("Class {class_id}"),
        instructor_id: "I1".to_string(),
        class_type: ClassType::General,
        description: Some("  Mat work  ".to_string()),
        slots,
        pay_rate: 40.0,
    }
}

#[tokio::test]
async fn no_overlap_reports_no_conflict() {
    let store = MemoryStore::new(vec![class(
        "A001",
        vec![slot(Weekday::Mon, "09:00:00", 60)],
    )]);

    let proposed = vec![
        slot(Weekday::Mon, "10:00:00", 60),
        slot(Weekday::Tue, "09:00:00", 60),
    ];
    let conflict = scheduling::check_conflict(&store, &proposed, None)
        .await
        .unwrap();

    assert!(conflict.is_none());
}

#[tokio::test]
async fn first_offending_slot_is_reported_in_input_order() {
    let store = MemoryStore::new(vec![
        class("A001", vec![slot(Weekday::Wed, "11:00:00", 90)]),
        class("A002", vec![slot(Weekday::Fri, "18:00:00", 60)]),
    ]);

    // Both the second and third proposed slots collide; the scan must stop
    // at the second one.
    let proposed = vec![
        slot(Weekday::Mon, "09:00:00", 60),
        slot(Weekday::Fri, "18:00:00", 45),
        slot(Weekday::Wed, "11:00:00", 45),
    ];
    let conflict = scheduling::check_conflict(&store, &proposed, None)
        .await
        .unwrap()
        .expect("conflict expected");

    assert_eq!(conflict.class.class_id, "A002");
    assert_eq!(conflict.slot, proposed[1]);
    // The proposed slot is reported, duration included, not the stored one.
    assert_eq!(conflict.slot.duration_minutes, 45);
}

#[tokio::test]
async fn check_short_circuits_after_first_conflict() {
    let store = MemoryStore::new(vec![class(
        "A001",
        vec![slot(Weekday::Tue, "10:00:00", 60)],
    )]);

    let proposed = vec![
        slot(Weekday::Mon, "09:00:00", 60),
        slot(Weekday::Tue, "10:00:00", 60),
        slot(Weekday::Wed, "11:00:00", 60),
        slot(Weekday::Thu, "12:00:00", 60),
    ];
    scheduling::check_conflict(&store, &proposed, None)
        .await
        .unwrap()
        .expect("conflict expected");

    // One query for the free slot, one for the colliding slot, none after.
    assert_eq!(store.query_count(), 2);
}

#[tokio::test]
async fn excluded_class_does_not_conflict_with_itself() {
    let own_slots = vec![
        slot(Weekday::Mon, "09:00:00", 60),
        slot(Weekday::Thu, "17:00:00", 60),
    ];
    let store = MemoryStore::new(vec![class("A001", own_slots.clone())]);

    let conflict = scheduling::check_conflict(&store, &own_slots, Some("A001"))
        .await
        .unwrap();

    assert!(conflict.is_none());
}

#[tokio::test]
async fn conflict_with_duplicate_bookings_reports_one_of_them() {
    // Two active classes already share the slot (a pre-existing
    // double-booking); either may be reported.
    let store = MemoryStore::new(vec![
        class("A001", vec![slot(Weekday::Sat, "10:00:00", 60)]),
        class("A002", vec![slot(Weekday::Sat, "10:00:00", 90)]),
    ]);

    let conflict = scheduling::check_conflict(
        &store,
        &[slot(Weekday::Sat, "10:00:00", 30)],
        None,
    )
    .await
    .unwrap()
    .expect("conflict expected");

    assert!(matches!(conflict.class.class_id.as_str(), "A001" | "A002"));
}

#[tokio::test]
async fn alternatives_respect_day_duration_and_bound() {
    let store = MemoryStore::new(vec![
        class("A001", vec![slot(Weekday::Mon, "09:00:00", 60)]),
        class("A002", vec![slot(Weekday::Mon, "10:00:00", 60)]),
    ]);

    let alternatives =
        scheduling::suggest_alternatives(&store, Weekday::Mon, time("09:00:00"), 75)
            .await
            .unwrap();

    assert_eq!(alternatives.len(), MAX_ALTERNATIVES);
    for alternative in &alternatives {
        assert_eq!(alternative.day, Weekday::Mon);
        assert_eq!(alternative.duration_minutes, 75);
        assert_ne!(alternative.time, time("09:00:00"));
    }
    // Ascending grid order: 10:00 is occupied, so 11:00 onward.
    assert_eq!(alternatives[0].time, time("11:00:00"));
    assert_eq!(alternatives[1].time, time("12:00:00"));
    assert_eq!(alternatives[2].time, time("13:00:00"));
}

#[tokio::test]
async fn original_time_is_excluded_even_when_free() {
    // Nothing in the store at all: the original time itself is free, yet it
    // must not be proposed.
    let store = MemoryStore::new(Vec::new());

    let alternatives =
        scheduling::suggest_alternatives(&store, Weekday::Tue, time("14:00:00"), 60)
            .await
            .unwrap();

    assert!(alternatives.iter().all(|a| a.time != time("14:00:00")));
    assert_eq!(alternatives.len(), MAX_ALTERNATIVES);
}

#[tokio::test]
async fn crowded_day_yields_fewer_or_zero_alternatives() {
    // Occupy the whole grid except 19:00 and 20:00.
    let occupied: Vec<ClassRecord> = scheduling::candidate_start_times()
        .filter(|t| *t < time("19:00:00"))
        .enumerate()
        .map(|(i, t)| {
            class(
                &format!("A{:03}", i + 1),
                vec![ClassSlot::new(Weekday::Sun, t, 60)],
            )
        })
        .collect();
    let store = MemoryStore::new(occupied);

    let alternatives =
        scheduling::suggest_alternatives(&store, Weekday::Sun, time("09:00:00"), 60)
            .await
            .unwrap();
    assert_eq!(
        alternatives.iter().map(|a| a.time).collect::<Vec<_>>(),
        vec![time("19:00:00"), time("20:00:00")]
    );

    // Fill the remaining two and the result is empty.
    let store = MemoryStore::new(
        scheduling::candidate_start_times()
            .enumerate()
            .map(|(i, t)| {
                class(
                    &format!("A{:03}", i + 1),
                    vec![ClassSlot::new(Weekday::Sun, t, 60)],
                )
            })
            .collect(),
    );
    let alternatives =
        scheduling::suggest_alternatives(&store, Weekday::Sun, time("09:00:00"), 60)
            .await
            .unwrap();
    assert!(alternatives.is_empty());
}

#[tokio::test]
async fn suggestion_scan_is_deterministic() {
    let store = MemoryStore::new(vec![
        class("A001", vec![slot(Weekday::Wed, "12:00:00", 60)]),
        class("A002", vec![slot(Weekday::Wed, "15:00:00", 60)]),
    ]);

    let first =
        scheduling::suggest_alternatives(&store, Weekday::Wed, time("12:00:00"), 60)
            .await
            .unwrap();
    let second =
        scheduling::suggest_alternatives(&store, Weekday::Wed, time("12:00:00"), 60)
            .await
            .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn candidate_grid_is_twelve_hourly_times() {
    let grid: Vec<NaiveTime> = scheduling::candidate_start_times().collect();

    assert_eq!(grid.len(), 12);
    assert_eq!(grid[0], time("09:00:00"));
    assert_eq!(grid[11], time("20:00:00"));
    assert!(grid.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn logically_deleted_class_drops_out_of_conflict_checks() {
    let slots = vec![slot(Weekday::Mon, "09:00:00", 60)];
    let store = MemoryStore::new(vec![class("A001", slots.clone())]);

    store.deactivate("A001");

    let conflict = scheduling::check_conflict(&store, &slots, None)
        .await
        .unwrap();
    assert!(conflict.is_none());
    // The record still exists in storage, only inactive.
    assert!(!store.stored("A001").unwrap().active);
}

#[tokio::test]
async fn store_errors_propagate_from_check_and_suggest() {
    let store = MemoryStore::offline();

    let check = scheduling::check_conflict(
        &store,
        &[slot(Weekday::Mon, "09:00:00", 60)],
        None,
    )
    .await;
    assert!(matches!(check, Err(StudioError::Database(_))));

    let suggest =
        scheduling::suggest_alternatives(&store, Weekday::Mon, time("09:00:00"), 60)
            .await;
    assert!(matches!(suggest, Err(StudioError::Database(_))));
    // The scan aborts on the first failing query.
    assert_eq!(store.query_count(), 2);
}

#[tokio::test]
async fn proposing_an_occupied_slot_reports_conflict_and_alternatives() {
    // End-to-end scenario: one active class at Mon 09:00.
    let store = MemoryStore::new(vec![class(
        "A001",
        vec![slot(Weekday::Mon, "09:00:00", 60)],
    )]);
    let directory = MemoryDirectory::with_instructor("I1");

    let outcome = scheduling::create_class(
        &store,
        &directory,
        request("A002", vec![slot(Weekday::Mon, "09:00:00", 60)]),
        ConflictPolicy::Screen,
    )
    .await
    .unwrap();

    match outcome {
        ClassOutcome::Conflict {
            class,
            slot: colliding,
            alternatives,
        } => {
            assert_eq!(class.class_id, "A001");
            assert_eq!(colliding, slot(Weekday::Mon, "09:00:00", 60));
            assert_eq!(
                alternatives.iter().map(|a| a.time).collect::<Vec<_>>(),
                vec![time("10:00:00"), time("11:00:00"), time("12:00:00")]
            );
        }
        other => panic!("expected conflict outcome, got {other:?}"),
    }
    // Nothing was persisted.
    assert!(store.stored("A002").is_none());
}

#[tokio::test]
async fn conflict_free_proposal_persists_active_record() {
    // End-to-end scenario: empty store, Tue 14:00.
    let store = MemoryStore::new(Vec::new());
    let directory = MemoryDirectory::with_instructor("I1");

    let outcome = scheduling::create_class(
        &store,
        &directory,
        request("A001", vec![slot(Weekday::Tue, "14:00:00", 60)]),
        ConflictPolicy::Screen,
    )
    .await
    .unwrap();

    match outcome {
        ClassOutcome::Created { class, instructor } => {
            assert_eq!(class.class_id, "A001");
            assert!(class.active);
            assert_eq!(class.description.as_deref(), Some("Mat work"));
            assert_eq!(instructor.instructor_id, "I1");
        }
        other => panic!("expected created outcome, got {other:?}"),
    }
    assert!(store.stored("A001").unwrap().active);
}

#[tokio::test]
async fn override_persists_despite_conflict_and_becomes_conflictable() {
    // End-to-end scenario: override after a reported conflict, then a third
    // class collides against the overridden one.
    let store = MemoryStore::new(vec![class(
        "A001",
        vec![slot(Weekday::Mon, "09:00:00", 60)],
    )]);
    let directory = MemoryDirectory::with_instructor("I1");

    let outcome = scheduling::create_class(
        &store,
        &directory,
        request("A002", vec![slot(Weekday::Mon, "09:00:00", 45)]),
        ConflictPolicy::Override,
    )
    .await
    .unwrap();
    assert!(matches!(outcome, ClassOutcome::Created { .. }));
    assert!(store.stored("A002").unwrap().active);

    // The overridden class now participates in conflict checks. Exclude the
    // original booking to observe the overridden one specifically.
    let conflict = scheduling::check_conflict(
        &store,
        &[slot(Weekday::Mon, "09:00:00", 60)],
        Some("A001"),
    )
    .await
    .unwrap()
    .expect("conflict against the overridden class expected");
    assert_eq!(conflict.class.class_id, "A002");
}

#[tokio::test]
async fn missing_required_fields_fail_validation() {
    let store = MemoryStore::new(Vec::new());
    let directory = MemoryDirectory::with_instructor("I1");

    let mut blank_name = request("A001", vec![slot(Weekday::Mon, "09:00:00", 60)]);
    blank_name.class_name = "   ".to_string();
    let result = scheduling::create_class(
        &store,
        &directory,
        blank_name,
        ConflictPolicy::Screen,
    )
    .await;
    assert!(matches!(result, Err(StudioError::Validation(_))));

    let no_slots = request("A001", Vec::new());
    let result =
        scheduling::create_class(&store, &directory, no_slots, ConflictPolicy::Screen)
            .await;
    assert!(matches!(result, Err(StudioError::Validation(_))));

    let bad_duration = request("A001", vec![slot(Weekday::Mon, "09:00:00", 10)]);
    let result = scheduling::create_class(
        &store,
        &directory,
        bad_duration,
        ConflictPolicy::Screen,
    )
    .await;
    assert!(matches!(result, Err(StudioError::Validation(_))));

    let mut bad_rate = request("A001", vec![slot(Weekday::Mon, "09:00:00", 60)]);
    bad_rate.pay_rate = -1.0;
    let result =
        scheduling::create_class(&store, &directory, bad_rate, ConflictPolicy::Screen)
            .await;
    assert!(matches!(result, Err(StudioError::Validation(_))));
}

#[tokio::test]
async fn unknown_instructor_is_a_reference_error() {
    let store = MemoryStore::new(Vec::new());
    let directory = MemoryDirectory::empty();

    let result = scheduling::create_class(
        &store,
        &directory,
        request("A001", vec![slot(Weekday::Mon, "09:00:00", 60)]),
        ConflictPolicy::Screen,
    )
    .await;

    assert!(matches!(result, Err(StudioError::UnknownReference(_))));
    assert!(store.stored("A001").is_none());
}
