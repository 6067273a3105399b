use crate::blob::BlobStore;
use crate::error::SfResult;
use crate::fingerprint::Fingerprint;
use crate::model::{Class, ClassConfig, ClassId, Pair, SeatingEntry};
use crate::protocol::GenerationResponse;
use crate::validator;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use strum::Display;
use tracing::{debug, info, warn};

/// Blob key under which the class list lives.
pub const CLASSES_KEY: &str = "Classes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SaveOutcome {
    Success,
    ClassNotFound,
    InvalidData,
    Duplicate,
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Success)
    }
}

/// Owns every class and its seating history. Each mutation rewrites the
/// whole blob before returning; write errors are handed back untouched.
pub struct HistoryStore<B: BlobStore> {
    blob: B,
    classes: Vec<Class>,
}

impl<B: BlobStore> HistoryStore<B> {
    /// Creates the store and loads whatever the blob already holds.
    pub fn open(blob: B) -> SfResult<Self> {
        let mut store = Self {
            blob,
            classes: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> SfResult<()> {
        self.classes = match self.blob.read(CLASSES_KEY)? {
            Some(content) => serde_json::from_str(&content)?,
            None => Vec::new(),
        };
        debug!("Loaded {} classes", self.classes.len());
        Ok(())
    }

    pub fn save(&self) -> SfResult<()> {
        let content = serde_json::to_string(&self.classes)?;
        self.blob.write(CLASSES_KEY, &content)
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn find(&self, id: ClassId) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    pub fn add_class(&mut self, name: &str) -> SfResult<ClassId> {
        let id = self.fresh_class_id();
        self.classes.push(Class::new(id, name));
        self.save()?;
        info!("Added class '{}' ({})", name, id);
        Ok(id)
    }

    /// Returns `false` (and writes nothing) when the id is unknown.
    pub fn delete_class(&mut self, id: ClassId) -> SfResult<bool> {
        let Some(idx) = self.classes.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let removed = self.classes.remove(idx);
        self.save()?;
        info!("Deleted class '{}' ({})", removed.name, id);
        Ok(true)
    }

    /// Applies `edit` to the class and persists. `None` if the id is unknown.
    pub fn modify_class<R, F>(&mut self, id: ClassId, edit: F) -> SfResult<Option<R>>
    where
        F: FnOnce(&mut Class) -> R,
    {
        let Some(class) = self.classes.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        let result = edit(class);
        self.save()?;
        Ok(Some(result))
    }

    /// Appends a blank preference row for the editor to fill in.
    pub fn add_preference(&mut self, id: ClassId) -> SfResult<bool> {
        Ok(self
            .modify_class(id, |c| c.preferences.push(Pair::blank()))?
            .is_some())
    }

    /// `None` for an empty name or unknown class, otherwise whether some
    /// student carries exactly that name.
    pub fn check_name(&self, id: ClassId, name: &str) -> Option<bool> {
        if name.is_empty() {
            return None;
        }
        let class = self.find(id)?;
        Some(class.students.iter().any(|s| s.name == name))
    }

    pub fn validation_errors(&self, id: ClassId) -> Option<Vec<String>> {
        self.find(id).map(validator::validate)
    }

    /// Unknown classes have no errors.
    pub fn has_errors(&self, id: ClassId) -> bool {
        self.find(id).is_some_and(validator::has_errors)
    }

    /// Records a generator result unless an identical seating is already
    /// on file for the class. New entries go to the front.
    pub fn save_seating(
        &mut self,
        id: ClassId,
        response: &Value,
        config: Option<&ClassConfig>,
    ) -> SfResult<SaveOutcome> {
        let Some(class) = self.classes.iter_mut().find(|c| c.id == id) else {
            return Ok(SaveOutcome::ClassNotFound);
        };

        let Some(response) = GenerationResponse::from_value(response) else {
            return Ok(SaveOutcome::InvalidData);
        };

        let incoming = Fingerprint::of(&response.seating);
        if class
            .seatings
            .iter()
            .any(|old| Fingerprint::of(&old.seating) == incoming)
        {
            warn!("Seating already on record for class {}", id);
            return Ok(SaveOutcome::Duplicate);
        }

        let config = config.copied().unwrap_or_default();
        let entry = SeatingEntry {
            seating: response.seating,
            rows: config.rows,
            columns: config.columns,
            desk_type: config.desk_type,
            date: response.date.unwrap_or_else(unix_seconds),
            fitness: response.fitness.unwrap_or(0.0),
            id: response.id.unwrap_or_else(fresh_entry_id),
        };
        info!(
            "Saving seating {} for class {} (fitness {:.3})",
            entry.id, id, entry.fitness
        );
        class.seatings.insert(0, entry);

        self.save()?;
        Ok(SaveOutcome::Success)
    }

    // Millisecond timestamps, bumped past any id already taken.
    fn fresh_class_id(&self) -> ClassId {
        let now = unix_millis();
        match self.classes.iter().map(|c| c.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn unix_seconds() -> i64 {
    unix_millis() / 1000
}

fn fresh_entry_id() -> String {
    let suffix: String = std::iter::repeat_with(fastrand::alphanumeric)
        .take(6)
        .collect();
    format!("{}-{}", unix_millis(), suffix)
}
