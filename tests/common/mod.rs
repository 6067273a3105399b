#![allow(dead_code)]

use seatforge::model::{Class, ClassConfig, DeskType, Pair, SeatAssignment, Student};

/// Builder for Class fixtures
pub struct ClassBuilder {
    class: Class,
}

impl ClassBuilder {
    pub fn new() -> Self {
        let mut class = Class::new(1, "7A");
        class.class_config = Some(ClassConfig::new(3, 3, DeskType::Single));
        Self { class }
    }

    pub fn grid(mut self, rows: i64, columns: i64, desk_type: DeskType) -> Self {
        self.class.class_config = Some(ClassConfig::new(rows, columns, desk_type));
        self
    }

    pub fn no_grid(mut self) -> Self {
        self.class.class_config = None;
        self
    }

    pub fn student(mut self, id: i64, name: &str) -> Self {
        self.class.students.push(Student::new(id, name));
        self
    }

    /// Adds a student with raw wish text: rows, desks, medical rows, medical desks.
    pub fn student_wishes(mut self, id: i64, name: &str, wishes: [&str; 4]) -> Self {
        let mut s = Student::new(id, name);
        s.preferred_rows = wishes[0].to_string();
        s.preferred_columns = wishes[1].to_string();
        s.medical_preferred_row = wishes[2].to_string();
        s.medical_preferred_column = wishes[3].to_string();
        self.class.students.push(s);
        self
    }

    pub fn prefer(self, a: Option<i64>, b: Option<i64>) -> Self {
        self.prefer_pair(Pair(a.into(), b.into()))
    }

    pub fn forbid(self, a: Option<i64>, b: Option<i64>) -> Self {
        self.forbid_pair(Pair(a.into(), b.into()))
    }

    pub fn prefer_pair(mut self, pair: Pair) -> Self {
        self.class.preferences.push(pair);
        self
    }

    pub fn forbid_pair(mut self, pair: Pair) -> Self {
        self.class.forbidden.push(pair);
        self
    }

    pub fn build(self) -> Class {
        self.class
    }
}

pub fn seat(row: i64, col: i64, student_id: i64) -> SeatAssignment {
    SeatAssignment {
        row,
        col,
        student_id,
    }
}
