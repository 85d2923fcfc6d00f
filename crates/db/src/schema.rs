use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create classes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            class_id VARCHAR(16) PRIMARY KEY,
            class_name VARCHAR(255) NOT NULL,
            instructor_id VARCHAR(16) NOT NULL,
            class_type VARCHAR(16) NOT NULL,
            description TEXT NULL,
            pay_rate DOUBLE PRECISION NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_pay_rate CHECK (pay_rate >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create class_slots table; position preserves the order slots were
    // submitted in
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS class_slots (
            class_id VARCHAR(16) NOT NULL REFERENCES classes(class_id),
            position INT NOT NULL,
            day VARCHAR(3) NOT NULL,
            start_time TIME NOT NULL,
            duration_minutes INT NOT NULL,
            PRIMARY KEY (class_id, position),
            CONSTRAINT valid_duration CHECK (duration_minutes BETWEEN 15 AND 180)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create instructors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instructors (
            instructor_id VARCHAR(16) PRIMARY KEY,
            firstname VARCHAR(255) NOT NULL,
            lastname VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            address TEXT NULL,
            preferred_contact VARCHAR(32) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create customers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            customer_id VARCHAR(16) PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            senior BOOLEAN NOT NULL DEFAULT FALSE,
            address TEXT NULL,
            preferred_contact VARCHAR(32) NULL,
            class_balance INT NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Conflict checks probe (day, start_time) on active classes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_class_slots_day_time
        ON class_slots (day, start_time);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_classes_active
        ON classes (active);
        "#,
    )
    .execute(pool)
    .await?;

    // Sequences backing user-legible id assignment
    for statement in [
        "CREATE SEQUENCE IF NOT EXISTS class_id_seq;",
        "CREATE SEQUENCE IF NOT EXISTS instructor_id_seq;",
        "CREATE SEQUENCE IF NOT EXISTS customer_id_seq;",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized");

    Ok(())
}
