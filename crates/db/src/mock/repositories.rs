use chrono::NaiveTime;
use mockall::mock;

use crate::models::{DbCustomer, DbInstructor};
use studiohub_core::models::class::{ClassRecord, ClassSummary, ScheduleEntry};
use studiohub_core::models::customer::{CustomerRecord, CustomerSummary};
use studiohub_core::models::instructor::{InstructorRecord, InstructorSummary};
use studiohub_core::models::slot::Weekday;

// Mock repositories for testing
mock! {
    pub ClassRepo {
        pub async fn create_class(&self, record: ClassRecord) -> eyre::Result<()>;

        pub async fn get_class_by_id(
            &self,
            class_id: &'static str,
        ) -> eyre::Result<Option<ClassRecord>>;

        pub async fn find_active_class_by_slot(
            &self,
            day: Weekday,
            time: NaiveTime,
            exclude_class_id: Option<&'static str>,
        ) -> eyre::Result<Option<ClassRecord>>;

        pub async fn list_active_classes(&self) -> eyre::Result<Vec<ClassSummary>>;

        pub async fn deactivate_class(
            &self,
            class_id: &'static str,
        ) -> eyre::Result<Option<String>>;

        pub async fn get_schedule(&self) -> eyre::Result<Vec<ScheduleEntry>>;

        pub async fn next_class_id(&self) -> eyre::Result<String>;
    }
}

mock! {
    pub InstructorRepo {
        pub async fn create_instructor(
            &self,
            record: InstructorRecord,
        ) -> eyre::Result<DbInstructor>;

        pub async fn get_instructor_by_id(
            &self,
            instructor_id: &'static str,
        ) -> eyre::Result<Option<DbInstructor>>;

        pub async fn find_instructor_by_name(
            &self,
            firstname: &'static str,
            lastname: &'static str,
        ) -> eyre::Result<Option<DbInstructor>>;

        pub async fn search_instructors_by_firstname(
            &self,
            firstname: &'static str,
        ) -> eyre::Result<Option<DbInstructor>>;

        pub async fn list_instructors(&self) -> eyre::Result<Vec<InstructorSummary>>;

        pub async fn delete_instructor(
            &self,
            instructor_id: &'static str,
        ) -> eyre::Result<Option<String>>;

        pub async fn next_instructor_id(&self) -> eyre::Result<String>;
    }
}

mock! {
    pub CustomerRepo {
        pub async fn create_customer(
            &self,
            record: CustomerRecord,
        ) -> eyre::Result<DbCustomer>;

        pub async fn get_customer_by_id(
            &self,
            customer_id: &'static str,
        ) -> eyre::Result<Option<DbCustomer>>;

        pub async fn find_customer_by_name(
            &self,
            first_name: &'static str,
            last_name: &'static str,
        ) -> eyre::Result<Option<DbCustomer>>;

        pub async fn search_customers_by_first_name(
            &self,
            first_name: &'static str,
        ) -> eyre::Result<Option<DbCustomer>>;

        pub async fn list_customers(&self) -> eyre::Result<Vec<CustomerSummary>>;

        pub async fn delete_customer(
            &self,
            customer_id: &'static str,
        ) -> eyre::Result<Option<String>>;

        pub async fn next_customer_id(&self) -> eyre::Result<String>;
    }
}
