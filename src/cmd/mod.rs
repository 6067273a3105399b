use seatforge::blob::FileBlobStore;
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::model::{Class, ClassId};
use seatforge::store::HistoryStore;

pub mod classes;
pub mod generate;
pub mod history;
pub mod validate;

pub type Store = HistoryStore<FileBlobStore>;

pub fn require_class(store: &Store, id: ClassId) -> SfResult<&Class> {
    store
        .find(id)
        .ok_or_else(|| SeatForgeError::Validation(format!("class {} not found", id)))
}
