//! Postgres bindings for the scheduling engine's store seams.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::PgPool;
use studiohub_core::errors::{StudioError, StudioResult};
use studiohub_core::models::class::ClassRecord;
use studiohub_core::models::instructor::InstructorRecord;
use studiohub_core::models::slot::Weekday;
use studiohub_core::scheduling::{ClassStore, InstructorDirectory};

use crate::repositories;

pub struct PgClassStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgClassStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassStore for PgClassStore<'_> {
    async fn find_active_by_slot(
        &self,
        day: Weekday,
        time: NaiveTime,
        exclude_class_id: Option<&str>,
    ) -> StudioResult<Option<ClassRecord>> {
        repositories::class::find_active_class_by_slot(self.pool, day, time, exclude_class_id)
            .await
            .map_err(StudioError::Database)
    }

    async fn insert(&self, record: &ClassRecord) -> StudioResult<()> {
        repositories::class::create_class(self.pool, record)
            .await
            .map_err(StudioError::Database)
    }
}

pub struct PgInstructorDirectory<'a> {
    pool: &'a PgPool,
}

impl<'a> PgInstructorDirectory<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstructorDirectory for PgInstructorDirectory<'_> {
    async fn find_by_id(
        &self,
        instructor_id: &str,
    ) -> StudioResult<Option<InstructorRecord>> {
        let instructor = repositories::instructor::get_instructor_by_id(self.pool, instructor_id)
            .await
            .map_err(StudioError::Database)?;

        Ok(instructor.map(|i| i.into_record()))
    }
}
