use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub senior: bool,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
    pub class_balance: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub senior: bool,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerResponse {
    pub message: String,
    pub customer: CustomerRecord,
    pub confirmation_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCustomerResponse {
    pub message: String,
    pub existing_customer: CustomerRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCustomerResponse {
    pub message: String,
    pub customer_id: String,
}
