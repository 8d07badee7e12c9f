use crate::document::Document;
use crate::entry::Payload;
use crate::error::Result;
use crate::format::escape_name;
use crate::kind::{marker, EntryKind};
use crate::view::{EntryMut, SequenceView};

use super::Host;

/// Holds free-text `<Comment>` entries.
pub trait CommentHost: Host {
    /// Append a comment. The text is always written quoted.
    fn append_comment(&mut self, text: &str) -> Result<EntryMut<'_, marker::Comment>> {
        let (doc, parent) = self.host_mut();
        let payload = Payload::Text(escape_name(text, true));
        let id = doc.attach(parent, EntryKind::Comment, None, None, payload)?;
        Ok(EntryMut::new(doc, id))
    }

    /// Comments in the order they were appended.
    fn comments(&self) -> SequenceView<'_, marker::Comment> {
        self.host_ref().sequence()
    }
}

impl CommentHost for Document {}
