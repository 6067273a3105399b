//! Wire shapes exchanged with the seating generation service.
//!
//! Requests are built from a stored [`Class`]; responses are accepted as
//! raw JSON and normalized here so nothing past this module ever sees the
//! generator's field casing.

use crate::config::PriorityWeights;
use crate::model::{Class, ClassConfig, DeskType, Pair, SeatAssignment, StudentId};
use crate::parser::parse_zero_based;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub id: StudentId,
    pub name: String,
    pub preferred_rows: Vec<i64>,
    pub preferred_columns: Vec<i64>,
    pub medical_preferred_rows: Vec<i64>,
    pub medical_preferred_columns: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRequest {
    pub rows: i64,
    /// Already doubled for double desks.
    pub columns: i64,
    pub desk_type: DeskType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeightsRequest {
    pub medical: f32,
    pub friends: f32,
    pub enemies: f32,
    pub preferences: f32,
    pub fill: f32,
}

impl From<PriorityWeights> for WeightsRequest {
    fn from(w: PriorityWeights) -> Self {
        Self {
            medical: w.medical,
            friends: w.friends,
            enemies: w.enemies,
            preferences: w.preferences,
            fill: w.fill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub students: Vec<StudentRequest>,
    pub preferences: Vec<[StudentId; 2]>,
    pub forbidden: Vec<[StudentId; 2]>,
    #[serde(rename = "classConfig")]
    pub class_config: GridRequest,
    #[serde(rename = "PriorityWeights")]
    pub priority_weights: WeightsRequest,
}

impl GenerationRequest {
    /// Normalizes a class for the generator: wishes become 0-based index
    /// lists and half-filled pairs are left out.
    pub fn from_class(class: &Class) -> Self {
        let config = class.class_config.unwrap_or_default();

        let students = class
            .students
            .iter()
            .map(|s| StudentRequest {
                id: s.id,
                name: s.name.clone(),
                preferred_rows: parse_zero_based(Some(s.preferred_rows.as_str())),
                preferred_columns: parse_zero_based(Some(s.preferred_columns.as_str())),
                medical_preferred_rows: parse_zero_based(Some(s.medical_preferred_row.as_str())),
                medical_preferred_columns: parse_zero_based(Some(
                    s.medical_preferred_column.as_str(),
                )),
            })
            .collect();

        Self {
            students,
            preferences: complete_pairs(&class.preferences),
            forbidden: complete_pairs(&class.forbidden),
            class_config: GridRequest::from(config),
            priority_weights: class.priorities.into(),
        }
    }
}

impl From<ClassConfig> for GridRequest {
    fn from(config: ClassConfig) -> Self {
        Self {
            rows: config.rows,
            columns: config.effective_columns(),
            desk_type: config.desk_type,
        }
    }
}

fn complete_pairs(pairs: &[Pair]) -> Vec<[StudentId; 2]> {
    pairs
        .iter()
        .filter_map(|p| p.ids().map(|(a, b)| [a, b]))
        .collect()
}

/// Builds a pair from two typed names. `None` unless both resolve.
pub fn resolve_named_pair(class: &Class, first: &str, second: &str) -> Option<Pair> {
    let a = class.student_id_by_name(first)?;
    let b = class.student_id_by_name(second)?;
    Some(Pair::new(a, b))
}

/// A generator answer after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    pub seating: Vec<SeatAssignment>,
    pub fitness: Option<f64>,
    pub date: Option<i64>,
    pub id: Option<String>,
    /// Wishes the generator could not honour, passed through untouched.
    pub ignored: Vec<Value>,
}

impl GenerationResponse {
    /// Accepts either a full response object or a bare seat array.
    /// Returns `None` when the seating is not a list of seats.
    pub fn from_value(value: &Value) -> Option<Self> {
        let payload = value.get("Seating").unwrap_or(value);
        let Value::Array(items) = payload else {
            return None;
        };

        let seating = items
            .iter()
            .map(SeatAssignment::deserialize)
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        let id = match value.get("ID") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Some(Self {
            seating,
            fitness: value.get("Fitness").and_then(Value::as_f64),
            date: value
                .get("Date")
                .and_then(Value::as_i64)
                .filter(|&d| d > 0),
            id,
            ignored: value
                .get("Ignored")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        })
    }
}
