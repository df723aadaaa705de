use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::notifications::model::Notification;

pub const REGISTRATION_COLUMNS: &str =
    "id, student_id, competition_id, student_cart, group_number, created_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub student_id: Uuid,
    pub competition_id: Uuid,
    pub student_cart: String,
    pub group_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationDto {
    pub competition_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub student_cart: String,
    #[validate(length(min = 1, max = 6))]
    pub group_number: String,
}

/// A registration together with the notifications posted on its competition.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub competition_id: Uuid,
    pub student_cart: String,
    pub group_number: String,
    pub created_at: DateTime<Utc>,
    pub notifications: Vec<Notification>,
}

impl RegistrationResponse {
    pub fn from_parts(registration: Registration, notifications: Vec<Notification>) -> Self {
        Self {
            id: registration.id,
            student_id: registration.student_id,
            competition_id: registration.competition_id,
            student_cart: registration.student_cart,
            group_number: registration.group_number,
            created_at: registration.created_at,
            notifications,
        }
    }
}

/// Attendance row for a teacher's competition.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AttendanceEntry {
    pub group_number: String,
    pub student_cart: String,
    pub full_name: String,
}
