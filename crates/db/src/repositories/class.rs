use crate::models::{DbClass, DbClassSlot, DbScheduleRow};
use chrono::NaiveTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use studiohub_core::models::class::{ClassRecord, ClassSummary, ScheduleEntry};
use studiohub_core::models::slot::Weekday;

pub async fn create_class(pool: &Pool<Postgres>, record: &ClassRecord) -> Result<()> {
    tracing::debug!(
        "Creating class: class_id={}, instructor_id={}, slots={}",
        record.class_id,
        record.instructor_id,
        record.slots.len()
    );

    sqlx::query(
        r#"
        INSERT INTO classes (class_id, class_name, instructor_id, class_type, description, pay_rate, active)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&record.class_id)
    .bind(&record.class_name)
    .bind(&record.instructor_id)
    .bind(record.class_type.as_str())
    .bind(&record.description)
    .bind(record.pay_rate)
    .bind(record.active)
    .execute(pool)
    .await?;

    for (position, slot) in record.slots.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO class_slots (class_id, position, day, start_time, duration_minutes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&record.class_id)
        .bind(position as i32)
        .bind(slot.day.as_str())
        .bind(slot.time)
        .bind(i32::from(slot.duration_minutes))
        .execute(pool)
        .await?;
    }

    tracing::debug!("Class created successfully: class_id={}", record.class_id);
    Ok(())
}

pub async fn get_class_by_id(
    pool: &Pool<Postgres>,
    class_id: &str,
) -> Result<Option<ClassRecord>> {
    tracing::debug!("Getting class by id: {}", class_id);

    let class = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT class_id, class_name, instructor_id, class_type, description, pay_rate, active, created_at
        FROM classes
        WHERE class_id = $1
        "#,
    )
    .bind(class_id)
    .fetch_optional(pool)
    .await?;

    let Some(class) = class else {
        tracing::debug!("Class not found: {}", class_id);
        return Ok(None);
    };

    let slots = get_slots(pool, class_id).await?;
    Ok(Some(class.into_record(slots)?))
}

/// Finds an active class with a slot at exactly (day, time), skipping
/// `exclude_class_id` when present. Returns the assembled record including
/// its slots.
pub async fn find_active_class_by_slot(
    pool: &Pool<Postgres>,
    day: Weekday,
    time: NaiveTime,
    exclude_class_id: Option<&str>,
) -> Result<Option<ClassRecord>> {
    tracing::debug!(
        "Probing slot: day={}, time={}, exclude={:?}",
        day,
        time,
        exclude_class_id
    );

    let class = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT c.class_id, c.class_name, c.instructor_id, c.class_type, c.description, c.pay_rate, c.active, c.created_at
        FROM classes c
        WHERE c.active
          AND ($3::text IS NULL OR c.class_id <> $3)
          AND EXISTS (
              SELECT 1
              FROM class_slots s
              WHERE s.class_id = c.class_id
                AND s.day = $1
                AND s.start_time = $2
          )
        LIMIT 1
        "#,
    )
    .bind(day.as_str())
    .bind(time)
    .bind(exclude_class_id)
    .fetch_optional(pool)
    .await?;

    let Some(class) = class else {
        return Ok(None);
    };

    let slots = get_slots(pool, &class.class_id).await?;
    Ok(Some(class.into_record(slots)?))
}

pub async fn list_active_classes(pool: &Pool<Postgres>) -> Result<Vec<ClassSummary>> {
    let summaries = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT class_id, class_name
        FROM classes
        WHERE active
        ORDER BY class_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries
        .into_iter()
        .map(|(class_id, class_name)| ClassSummary {
            class_id,
            class_name,
        })
        .collect())
}

/// Logical delete: the record stays in storage and drops out of conflict
/// checks and schedule listings. Returns the class id when a row was
/// deactivated.
pub async fn deactivate_class(
    pool: &Pool<Postgres>,
    class_id: &str,
) -> Result<Option<String>> {
    tracing::debug!("Deactivating class: {}", class_id);

    let deactivated = sqlx::query_scalar::<_, String>(
        r#"
        UPDATE classes
        SET active = FALSE
        WHERE class_id = $1
        RETURNING class_id
        "#,
    )
    .bind(class_id)
    .fetch_optional(pool)
    .await?;

    Ok(deactivated)
}

/// Active classes flattened per slot, joined with instructor names, ordered
/// by day-of-week then start time.
pub async fn get_schedule(pool: &Pool<Postgres>) -> Result<Vec<ScheduleEntry>> {
    let rows = sqlx::query_as::<_, DbScheduleRow>(
        r#"
        SELECT c.class_id, c.class_name, c.class_type,
               i.firstname, i.lastname,
               s.day, s.start_time, s.duration_minutes
        FROM classes c
        JOIN class_slots s ON s.class_id = c.class_id
        LEFT JOIN instructors i ON i.instructor_id = c.instructor_id
        WHERE c.active
        ORDER BY array_position(ARRAY['Mon','Tue','Wed','Thu','Fri','Sat','Sun'], s.day),
                 s.start_time ASC,
                 c.class_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(DbScheduleRow::into_entry).collect()
}

/// Draws the next value from the class id sequence and formats it into the
/// user-legible label (`A` + zero-padded number).
pub async fn next_class_id(pool: &Pool<Postgres>) -> Result<String> {
    let n = sqlx::query_scalar::<_, i64>("SELECT nextval('class_id_seq')")
        .fetch_one(pool)
        .await?;

    Ok(format_class_id(n))
}

pub fn format_class_id(n: i64) -> String {
    format!("A{n:03}")
}

async fn get_slots(pool: &Pool<Postgres>, class_id: &str) -> Result<Vec<DbClassSlot>> {
    let slots = sqlx::query_as::<_, DbClassSlot>(
        r#"
        SELECT class_id, position, day, start_time, duration_minutes
        FROM class_slots
        WHERE class_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(class_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
