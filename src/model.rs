use crate::config::PriorityWeights;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

pub type StudentId = i64;
pub type ClassId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    // Raw comma-separated text, 1-based. See `parser`.
    pub preferred_rows: String,
    pub preferred_columns: String,
    pub medical_preferred_row: String,
    pub medical_preferred_column: String,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeskType {
    #[default]
    Single,
    /// Two seats per desk, each addressed by its own column index.
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassConfig {
    pub rows: i64,
    pub columns: i64,
    pub desk_type: DeskType,
}

impl ClassConfig {
    pub fn new(rows: i64, columns: i64, desk_type: DeskType) -> Self {
        Self {
            rows,
            columns,
            desk_type,
        }
    }

    /// Column count as seen by range checks and the generator.
    #[inline]
    pub fn effective_columns(&self) -> i64 {
        match self.desk_type {
            DeskType::Double => self.columns.saturating_mul(2),
            DeskType::Single => self.columns,
        }
    }
}

/// One side of a pair as the editor stores it. `Blank` is a row the user
/// has not filled in yet (`""`); `Null` is a side that is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Id(StudentId),
    Blank,
    #[default]
    Null,
}

impl Side {
    pub fn id(self) -> Option<StudentId> {
        match self {
            Side::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_null(self) -> bool {
        self == Side::Null
    }
}

impl From<StudentId> for Side {
    fn from(id: StudentId) -> Self {
        Side::Id(id)
    }
}

impl From<Option<StudentId>> for Side {
    fn from(id: Option<StudentId>) -> Self {
        id.map_or(Side::Null, Side::Id)
    }
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Side::Id(id) => serializer.serialize_i64(*id),
            Side::Blank => serializer.serialize_str(""),
            Side::Null => serializer.serialize_none(),
        }
    }
}

/// Order-independent identity of a pair: the two sides sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(Side, Side);

impl PairKey {
    pub fn new(a: impl Into<Side>, b: impl Into<Side>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// Two students who should (preferences) or must not (forbidden) sit
/// together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPair")]
pub struct Pair(pub Side, pub Side);

impl Pair {
    pub fn new(a: StudentId, b: StudentId) -> Self {
        Self(Side::Id(a), Side::Id(b))
    }

    /// Fresh editor row, both sides `""`.
    pub fn blank() -> Self {
        Self(Side::Blank, Side::Blank)
    }

    pub fn empty() -> Self {
        Self(Side::Null, Side::Null)
    }

    /// `Some` when neither side is null. Blank sides still key.
    pub fn key(&self) -> Option<PairKey> {
        if self.0.is_null() || self.1.is_null() {
            None
        } else {
            Some(PairKey::new(self.0, self.1))
        }
    }

    /// Both ids, when the pair is completely filled in.
    pub fn ids(&self) -> Option<(StudentId, StudentId)> {
        Some((self.0.id()?, self.1.id()?))
    }

    pub fn has_empty_side(&self) -> bool {
        self.ids().is_none()
    }

    /// The side paired with itself, if it is not null.
    pub fn self_pair(&self) -> Option<Side> {
        (self.0 == self.1 && !self.0.is_null()).then_some(self.0)
    }
}

// Stored pairs come from an editor that writes ids, numeric strings,
// `""` and `null` interchangeably. Text that is not an id reads as blank.
#[derive(Deserialize)]
#[serde(transparent)]
struct RawPair(Vec<Option<RawSide>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSide {
    Id(StudentId),
    Text(String),
}

fn side_from_raw(raw: Option<RawSide>) -> Side {
    match raw {
        None => Side::Null,
        Some(RawSide::Id(id)) => Side::Id(id),
        Some(RawSide::Text(s)) => s.trim().parse().map_or(Side::Blank, Side::Id),
    }
}

impl From<RawPair> for Pair {
    fn from(raw: RawPair) -> Self {
        let mut sides = raw.0.into_iter().map(side_from_raw);
        let first = sides.next().unwrap_or_default();
        let second = sides.next().unwrap_or_default();
        Pair(first, second)
    }
}

/// One occupied seat. Serialized in the native casing; the generator's
/// `Row`/`Column`/`StudentID` casing is accepted on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSeat")]
pub struct SeatAssignment {
    pub row: i64,
    pub col: i64,
    #[serde(rename = "studentId")]
    pub student_id: StudentId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeat {
    Native {
        row: i64,
        col: i64,
        #[serde(rename = "studentId")]
        student_id: StudentId,
    },
    Generator {
        #[serde(rename = "Row")]
        row: i64,
        #[serde(rename = "Column")]
        column: i64,
        #[serde(rename = "StudentID")]
        student_id: StudentId,
    },
}

impl From<RawSeat> for SeatAssignment {
    fn from(raw: RawSeat) -> Self {
        match raw {
            RawSeat::Native {
                row,
                col,
                student_id,
            } => Self {
                row,
                col,
                student_id,
            },
            RawSeat::Generator {
                row,
                column,
                student_id,
            } => Self {
                row,
                col: column,
                student_id,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeatingEntry {
    pub seating: Vec<SeatAssignment>,
    #[serde(default)]
    pub rows: i64,
    #[serde(default)]
    pub columns: i64,
    #[serde(default)]
    pub desk_type: DeskType,
    /// Unix seconds.
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub fitness: f64,
    #[serde(rename = "ID", default)]
    pub id: String,
}

impl SeatingEntry {
    /// An entry known only by its seats; every other field is zero.
    pub fn bare(seating: Vec<SeatAssignment>) -> Self {
        Self {
            seating,
            rows: 0,
            columns: 0,
            desk_type: DeskType::Single,
            date: 0,
            fitness: 0.0,
            id: String::new(),
        }
    }
}

// Old histories hold some entries as a plain seat array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Full(SeatingEntry),
    Bare(Vec<SeatAssignment>),
}

fn deserialize_seatings<'de, D>(deserializer: D) -> Result<Vec<SeatingEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawEntry>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|e| match e {
            RawEntry::Full(entry) => entry,
            RawEntry::Bare(seating) => SeatingEntry::bare(seating),
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub preferences: Vec<Pair>,
    #[serde(default)]
    pub forbidden: Vec<Pair>,
    /// Newest first.
    #[serde(default, deserialize_with = "deserialize_seatings")]
    pub seatings: Vec<SeatingEntry>,
    #[serde(default)]
    pub priorities: PriorityWeights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_config: Option<ClassConfig>,
}

impl Class {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            students: Vec::new(),
            preferences: Vec::new(),
            forbidden: Vec::new(),
            seatings: Vec::new(),
            priorities: PriorityWeights::default(),
            class_config: None,
        }
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Name shown in tables; unnamed students read as "Student <id>".
    pub fn display_name(&self, id: StudentId) -> String {
        match self.student(id) {
            Some(s) if !s.name.is_empty() => s.name.clone(),
            Some(s) => format!("Student {}", s.id),
            None => String::new(),
        }
    }

    /// Resolves a typed name (whitespace-insensitive at the ends) back to
    /// a student id. The display fallback "Student <id>" also matches.
    pub fn student_id_by_name(&self, name: &str) -> Option<StudentId> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return None;
        }
        self.students
            .iter()
            .find(|s| {
                if s.name.is_empty() {
                    format!("Student {}", s.id) == wanted
                } else {
                    s.name.trim() == wanted
                }
            })
            .map(|s| s.id)
    }

    pub fn next_student_id(&self) -> StudentId {
        self.students.iter().map(|s| s.id).max().map_or(1, |m| m + 1)
    }
}
