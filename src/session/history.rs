use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use super::SessionId;

pub const SUMMARY_GRAPHEMES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedSession {
    id: SessionId,
    archived_at: OffsetDateTime,
    content: String,
}

impl ArchivedSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn archived_at(&self) -> OffsetDateTime {
        self.archived_at
    }

    pub fn archived_at_rfc3339(&self) -> String {
        self.archived_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.archived_at.unix_timestamp().to_string())
    }

    /// Session lines joined by `\n`.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    /// First `limit` graphemes, with `...` appended when truncated.
    pub fn summary(&self, limit: usize) -> String {
        let mut graphemes = self.content.graphemes(true);
        let head: String = graphemes.by_ref().take(limit).collect();
        if graphemes.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

/// Append-only list of archived sessions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionHistory {
    entries: Vec<ArchivedSession>,
}

impl SessionHistory {
    /// Appends an entry unless `id` is already archived. Returns whether an
    /// entry was added.
    pub fn archive(
        &mut self,
        id: SessionId,
        archived_at: OffsetDateTime,
        content: impl Into<String>,
    ) -> bool {
        if self.get(id).is_some() {
            return false;
        }

        self.entries.push(ArchivedSession {
            id,
            archived_at,
            content: content.into(),
        });
        true
    }

    pub fn get(&self, id: SessionId) -> Option<&ArchivedSession> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[ArchivedSession] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ArchivedSession> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
