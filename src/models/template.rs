use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ShiftType;

/// Reusable shift definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub shift_type: ShiftType,
    pub category: Option<String>,
    pub duration_minutes: u32,
    pub default_start_time: NaiveTime,
    pub default_end_time: NaiveTime,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTemplateInput {
    pub name: String,
    pub description: Option<String>,
    pub shift_type: ShiftType,
    pub category: Option<String>,
    pub duration_minutes: u32,
    pub default_start_time: NaiveTime,
    pub default_end_time: NaiveTime,
    pub tags: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneTemplateInput {
    pub name: String,
}
