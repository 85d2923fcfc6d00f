use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRecord {
    pub instructor_id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstructorRequest {
    pub instructor_id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstructorResponse {
    pub message: String,
    pub instructor: InstructorRecord,
    pub confirmation_sent: bool,
}

/// 409 payload for the duplicate-name soft warning: the caller may resubmit
/// through the confirmed endpoint to create the record anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateInstructorResponse {
    pub message: String,
    pub existing_instructor: InstructorRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorSummary {
    pub instructor_id: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteInstructorResponse {
    pub message: String,
    pub instructor_id: String,
}
