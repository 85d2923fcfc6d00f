use crate::models::DbInstructor;
use eyre::Result;
use sqlx::{Pool, Postgres};
use studiohub_core::models::instructor::{InstructorRecord, InstructorSummary};

pub async fn create_instructor(
    pool: &Pool<Postgres>,
    record: &InstructorRecord,
) -> Result<DbInstructor> {
    tracing::debug!("Creating instructor: instructor_id={}", record.instructor_id);

    let instructor = sqlx::query_as::<_, DbInstructor>(
        r#"
        INSERT INTO instructors (instructor_id, firstname, lastname, email, phone, address, preferred_contact)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING instructor_id, firstname, lastname, email, phone, address, preferred_contact, created_at
        "#,
    )
    .bind(&record.instructor_id)
    .bind(&record.firstname)
    .bind(&record.lastname)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.address)
    .bind(&record.preferred_contact)
    .fetch_one(pool)
    .await?;

    Ok(instructor)
}

pub async fn get_instructor_by_id(
    pool: &Pool<Postgres>,
    instructor_id: &str,
) -> Result<Option<DbInstructor>> {
    tracing::debug!("Getting instructor by id: {}", instructor_id);

    let instructor = sqlx::query_as::<_, DbInstructor>(
        r#"
        SELECT instructor_id, firstname, lastname, email, phone, address, preferred_contact, created_at
        FROM instructors
        WHERE instructor_id = $1
        "#,
    )
    .bind(instructor_id)
    .fetch_optional(pool)
    .await?;

    Ok(instructor)
}

/// Exact match on trimmed first and last name, used by the duplicate-name
/// screen.
pub async fn find_instructor_by_name(
    pool: &Pool<Postgres>,
    firstname: &str,
    lastname: &str,
) -> Result<Option<DbInstructor>> {
    let instructor = sqlx::query_as::<_, DbInstructor>(
        r#"
        SELECT instructor_id, firstname, lastname, email, phone, address, preferred_contact, created_at
        FROM instructors
        WHERE firstname = $1 AND lastname = $2
        LIMIT 1
        "#,
    )
    .bind(firstname)
    .bind(lastname)
    .fetch_optional(pool)
    .await?;

    Ok(instructor)
}

/// Case-insensitive substring search on first name; returns the first match.
pub async fn search_instructors_by_firstname(
    pool: &Pool<Postgres>,
    firstname: &str,
) -> Result<Option<DbInstructor>> {
    let instructor = sqlx::query_as::<_, DbInstructor>(
        r#"
        SELECT instructor_id, firstname, lastname, email, phone, address, preferred_contact, created_at
        FROM instructors
        WHERE firstname ILIKE '%' || $1 || '%'
        ORDER BY instructor_id ASC
        LIMIT 1
        "#,
    )
    .bind(firstname)
    .fetch_optional(pool)
    .await?;

    Ok(instructor)
}

pub async fn list_instructors(pool: &Pool<Postgres>) -> Result<Vec<InstructorSummary>> {
    let summaries = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT instructor_id, firstname, lastname
        FROM instructors
        ORDER BY instructor_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries
        .into_iter()
        .map(|(instructor_id, firstname, lastname)| InstructorSummary {
            instructor_id,
            firstname,
            lastname,
        })
        .collect())
}

/// Hard delete; instructor records are not lifecycle-managed the way classes
/// are. Returns the id when a row was removed.
pub async fn delete_instructor(
    pool: &Pool<Postgres>,
    instructor_id: &str,
) -> Result<Option<String>> {
    tracing::debug!("Deleting instructor: {}", instructor_id);

    let deleted = sqlx::query_scalar::<_, String>(
        r#"
        DELETE FROM instructors
        WHERE instructor_id = $1
        RETURNING instructor_id
        "#,
    )
    .bind(instructor_id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

pub async fn next_instructor_id(pool: &Pool<Postgres>) -> Result<String> {
    let n = sqlx::query_scalar::<_, i64>("SELECT nextval('instructor_id_seq')")
        .fetch_one(pool)
        .await?;

    Ok(format_instructor_id(n))
}

pub fn format_instructor_id(n: i64) -> String {
    format!("I{n}")
}
