/// Forward iteration over a document's live lines.
use std::iter::FusedIterator;

use super::Document;
use crate::history::LineId;

/// Iterator over the live lines of a [`Document`], front to back.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    doc: &'a Document,
    cursor: Option<LineId>,
    remaining: usize,
}

impl<'a> Lines<'a> {
    pub(super) fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            cursor: doc.head,
            remaining: doc.len,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.doc.entry(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some(entry.text.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Lines<'_> {}

impl FusedIterator for Lines<'_> {}
