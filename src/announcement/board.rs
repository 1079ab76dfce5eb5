use crate::announcement::AnnouncementStore;
use crate::error::Result;
use crate::models::AnnouncementDocument;
use std::fmt;

/// What viewers see on the public board
#[derive(Debug, Clone, PartialEq)]
pub enum BoardView {
    /// Nothing has been published yet
    Empty,

    /// The latest published document
    Published(AnnouncementDocument),
}

impl BoardView {
    /// Read the store; an absent document is the empty board, a malformed one is an error
    pub fn load(store: &dyn AnnouncementStore) -> Result<Self> {
        Ok(match store.read()? {
            Some(document) => BoardView::Published(document),
            None => BoardView::Empty,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BoardView::Empty)
    }

    pub fn document(&self) -> Option<&AnnouncementDocument> {
        match self {
            BoardView::Empty => None,
            BoardView::Published(document) => Some(document),
        }
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = match self {
            BoardView::Empty => return writeln!(f, "No announcement available yet."),
            BoardView::Published(document) => document,
        };

        writeln!(f, "Last updated: {}", document.last_updated)?;
        for entry in &document.announcements {
            writeln!(f)?;
            writeln!(
                f,
                "{} Alert level: {}",
                entry.risk_level.marker(),
                entry.risk_level.display_name()
            )?;
            writeln!(f, "Region: {}", entry.region)?;
            writeln!(f, "{}", entry.message)?;
            if !entry.tips.is_empty() {
                writeln!(f, "Safety tips:")?;
                for tip in &entry.tips {
                    writeln!(f, "- {}", tip)?;
                }
            }
        }
        Ok(())
    }
}
