pub mod board;
pub mod publisher;
pub mod store;

pub use board::BoardView;
pub use publisher::{AnnouncementDraft, AnnouncementPublisher};
pub use store::{FileAnnouncementStore, InMemoryAnnouncementStore};

use crate::error::Result;
use crate::models::AnnouncementDocument;

/// Trait for the announcement document store.
///
/// Holds at most one document; every write replaces it.
pub trait AnnouncementStore: Send + Sync {
    /// Replace the stored document
    fn write(&self, document: &AnnouncementDocument) -> Result<()>;

    /// Current document, or `None` if nothing has been published
    fn read(&self) -> Result<Option<AnnouncementDocument>>;
}
