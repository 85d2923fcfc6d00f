use crate::models::DbCustomer;
use eyre::Result;
use sqlx::{Pool, Postgres};
use studiohub_core::models::customer::{CustomerRecord, CustomerSummary};

pub async fn create_customer(
    pool: &Pool<Postgres>,
    record: &CustomerRecord,
) -> Result<DbCustomer> {
    tracing::debug!("Creating customer: customer_id={}", record.customer_id);

    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        INSERT INTO customers (customer_id, first_name, last_name, email, phone, senior, address, preferred_contact, class_balance)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING customer_id, first_name, last_name, email, phone, senior, address, preferred_contact, class_balance, created_at
        "#,
    )
    .bind(&record.customer_id)
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(record.senior)
    .bind(&record.address)
    .bind(&record.preferred_contact)
    .bind(record.class_balance)
    .fetch_one(pool)
    .await?;

    Ok(customer)
}

pub async fn get_customer_by_id(
    pool: &Pool<Postgres>,
    customer_id: &str,
) -> Result<Option<DbCustomer>> {
    tracing::debug!("Getting customer by id: {}", customer_id);

    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT customer_id, first_name, last_name, email, phone, senior, address, preferred_contact, class_balance, created_at
        FROM customers
        WHERE customer_id = $1
        "#,
    )
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// Exact match on trimmed first and last name, used by the duplicate-name
/// screen.
pub async fn find_customer_by_name(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT customer_id, first_name, last_name, email, phone, senior, address, preferred_contact, class_balance, created_at
        FROM customers
        WHERE first_name = $1 AND last_name = $2
        LIMIT 1
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// Case-insensitive substring search on first name; returns the first match.
pub async fn search_customers_by_first_name(
    pool: &Pool<Postgres>,
    first_name: &str,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT customer_id, first_name, last_name, email, phone, senior, address, preferred_contact, class_balance, created_at
        FROM customers
        WHERE first_name ILIKE '%' || $1 || '%'
        ORDER BY customer_id ASC
        LIMIT 1
        "#,
    )
    .bind(first_name)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn list_customers(pool: &Pool<Postgres>) -> Result<Vec<CustomerSummary>> {
    let summaries = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT customer_id, first_name, last_name
        FROM customers
        ORDER BY customer_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(summaries
        .into_iter()
        .map(|(customer_id, first_name, last_name)| CustomerSummary {
            customer_id,
            first_name,
            last_name,
        })
        .collect())
}

/// Hard delete. Returns the id when a row was removed.
pub async fn delete_customer(
    pool: &Pool<Postgres>,
    customer_id: &str,
) -> Result<Option<String>> {
    tracing::debug!("Deleting customer: {}", customer_id);

    let deleted = sqlx::query_scalar::<_, String>(
        r#"
        DELETE FROM customers
        WHERE customer_id = $1
        RETURNING customer_id
        "#,
    )
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

pub async fn next_customer_id(pool: &Pool<Postgres>) -> Result<String> {
    let n = sqlx::query_scalar::<_, i64>("SELECT nextval('customer_id_seq')")
        .fetch_one(pool)
        .await?;

    Ok(format_customer_id(n))
}

pub fn format_customer_id(n: i64) -> String {
    format!("C{n}")
}
