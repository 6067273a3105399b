use crate::model::SeatAssignment;
use std::fmt;

const SEPARATOR: &str = "|";

/// Canonical text form of a seating: one `row-col-student` triple per seat,
/// sorted, so two seatings compare equal regardless of seat order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(seating: &[SeatAssignment]) -> Self {
        let mut triples: Vec<String> = seating
            .iter()
            .map(|s| format!("{}-{}-{}", s.row, s.col, s.student_id))
            .collect();
        triples.sort_unstable();
        Self(triples.join(SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn fingerprint(seating: &[SeatAssignment]) -> Fingerprint {
    Fingerprint::of(seating)
}
