//! Consistency checks run on a class before it is sent for generation.
//!
//! [`validate`] never fails; it returns every problem it finds as a
//! human-readable line, in a fixed order:
//!
//! 1. grid dimensions
//! 2. per-student row/desk wishes (regular, then medical)
//! 3. unnamed students
//! 4. duplicate pairs (preferences, then forbidden)
//! 5. self pairs (preferences, then forbidden)
//! 6. blank preference pairs
//! 7. pairs that are both wanted and forbidden

use crate::model::{Class, ClassConfig, Pair, PairKey, Side, Student, StudentId};
use crate::parser::parse_comma_list;
use std::collections::{HashMap, HashSet};

const UNKNOWN_STUDENT: &str = "?";

pub fn validate(class: &Class) -> Vec<String> {
    // Nothing to check until the grid has been set up.
    let Some(config) = class.class_config else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    let names = NameIndex::new(&class.students);

    check_grid(&config, &mut errors);
    for student in &class.students {
        check_student_ranges(student, &config, &mut errors);
    }
    check_names(&class.students, &mut errors);

    check_duplicates(&class.preferences, "preferences", &names, &mut errors);
    check_duplicates(&class.forbidden, "forbidden", &names, &mut errors);

    for side in class.preferences.iter().filter_map(Pair::self_pair) {
        errors.push(format!(
            "{} cannot want to sit with themself",
            names.get(side)
        ));
    }
    for side in class.forbidden.iter().filter_map(Pair::self_pair) {
        errors.push(format!(
            "{} cannot be forbidden from sitting with themself",
            names.get(side)
        ));
    }

    for pair in &class.preferences {
        if pair.has_empty_side() {
            errors.push("preference pair cannot contain empty values".to_string());
        }
    }

    check_contradictions(&class.preferences, &class.forbidden, &names, &mut errors);

    errors
}

pub fn has_errors(class: &Class) -> bool {
    !validate(class).is_empty()
}

struct NameIndex<'a>(HashMap<StudentId, &'a str>);

impl<'a> NameIndex<'a> {
    fn new(students: &'a [Student]) -> Self {
        // Later entries win on a repeated id, matching roster order.
        Self(students.iter().map(|s| (s.id, s.name.as_str())).collect())
    }

    fn get(&self, side: Side) -> &'a str {
        side.id()
            .and_then(|id| self.0.get(&id).copied())
            .unwrap_or(UNKNOWN_STUDENT)
    }
}

fn check_grid(config: &ClassConfig, errors: &mut Vec<String>) {
    if config.rows <= 0 {
        errors.push("row count must be a positive integer".to_string());
    }
    if config.columns <= 0 {
        errors.push("desk count must be a positive integer".to_string());
    }
}

// Bounds are `> rows` / `> max_col`: the value equal to the count passes.
fn check_student_ranges(student: &Student, config: &ClassConfig, errors: &mut Vec<String>) {
    let max_col = config.effective_columns();
    let name = &student.name;

    for row in parse_comma_list(Some(student.preferred_rows.as_str())) {
        if row < 0 || row > config.rows {
            errors.push(format!("invalid row {} for student {}", row, name));
        }
    }
    for col in parse_comma_list(Some(student.preferred_columns.as_str())) {
        if col < 0 || col > max_col {
            errors.push(format!("invalid desk {} for student {}", col, name));
        }
    }
    for col in parse_comma_list(Some(student.medical_preferred_column.as_str())) {
        if col < 0 || col > max_col {
            errors.push(format!(
                "invalid desk {} for student {} in medical preferences",
                col, name
            ));
        }
    }
    for row in parse_comma_list(Some(student.medical_preferred_row.as_str())) {
        if row < 0 || row > config.rows {
            errors.push(format!(
                "invalid row {} for student {} in medical preferences",
                row, name
            ));
        }
    }
}

fn check_names(students: &[Student], errors: &mut Vec<String>) {
    for (index, student) in students.iter().enumerate() {
        if student.name.trim().is_empty() {
            errors.push(format!("student #{} has no name", index + 1));
        }
    }
}

/// Every repeat after the first sighting reports again. Blank rows count.
fn check_duplicates(pairs: &[Pair], label: &str, names: &NameIndex, errors: &mut Vec<String>) {
    let mut seen: HashSet<PairKey> = HashSet::new();
    for pair in pairs {
        let Some(key) = pair.key() else {
            continue;
        };
        if !seen.insert(key) {
            errors.push(format!(
                "duplicate pair in {}: {} and {}",
                label,
                names.get(pair.0),
                names.get(pair.1)
            ));
        }
    }
}

fn check_contradictions(
    preferences: &[Pair],
    forbidden: &[Pair],
    names: &NameIndex,
    errors: &mut Vec<String>,
) {
    let wanted: HashSet<PairKey> = preferences.iter().filter_map(Pair::key).collect();

    for pair in forbidden {
        let Some(key) = pair.key() else {
            continue;
        };
        if wanted.contains(&key) {
            errors.push(format!(
                "contradiction: pair {} and {} is in both preferences and forbidden",
                names.get(pair.0),
                names.get(pair.1)
            ));
        }
    }
}
