use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub hospital_id: String,
    pub rating: f32,
    pub reviews: u32,
    pub avatar_id: String,
}

impl Doctor {
    /// Initials of the first two name words after any "Dr." title.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter(|word| !word.ends_with('.'))
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub website: String,
    pub description: String,
    pub image_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorView {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub hospital_name: String,
    pub initials: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_name: String,
    pub avatar_id: String,
    pub initials: String,
    pub date_label: String,
    pub time_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub query: String,
    pub results: Vec<T>,
    pub total: usize,
    pub no_results: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsOverview {
    pub upcoming: Vec<AppointmentView>,
    pub past: Vec<AppointmentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub greeting_name: String,
    pub quick_actions: Vec<QuickAction>,
    pub upcoming_appointments: Vec<AppointmentView>,
    pub upcoming_total: usize,
}

#[derive(Error, Debug, PartialEq)]
pub enum DirectoryError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Hospital not found: {0}")]
    HospitalNotFound(String),

    #[error("{entity} {id} references unknown {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: String,
        target: &'static str,
        target_id: String,
    },
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DoctorNotFound(_) => AppError::NotFound("Doctor not found".to_string()),
            DirectoryError::HospitalNotFound(_) => AppError::NotFound("Hospital not found".to_string()),
            DirectoryError::DanglingReference { .. } => AppError::Internal(err.to_string()),
        }
    }
}
