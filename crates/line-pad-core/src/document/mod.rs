//! Line sequence backed by an arena of entries.
//!
//! A `Document` is a doubly linked chain of line entries. Entries are stored
//! in an arena and addressed by [`LineId`], so an entry can be unlinked from
//! the live chain, held by the undo history, and linked back later without
//! ever being copied. Iteration lives in the `lines` submodule.

mod lines;

pub use lines::Lines;

use crate::history::LineId;

/// One stored line plus its links to the neighbouring entries.
#[derive(Debug, Clone)]
struct LineEntry {
    text: String,
    prev: Option<LineId>,
    next: Option<LineId>,
    /// Whether the entry is part of the live chain.
    attached: bool,
}

/// An ordered, mutable sequence of text lines.
#[derive(Debug, Default)]
pub struct Document {
    /// Arena slots. `None` marks a released slot awaiting reuse.
    slots: Vec<Option<LineEntry>>,
    /// Indices of released slots.
    free: Vec<usize>,
    head: Option<LineId>,
    tail: Option<LineId>,
    /// Number of attached entries.
    len: usize,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines in the live sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the live sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First line of the live sequence.
    pub fn head(&self) -> Option<LineId> {
        self.head
    }

    /// Last line of the live sequence.
    pub fn tail(&self) -> Option<LineId> {
        self.tail
    }

    /// Number of entries held by the arena, attached or detached.
    pub fn entry_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Appends a new line at the end and returns its handle.
    pub fn append_line(&mut self, text: &str) -> LineId {
        let id = self.alloc(text);
        self.link_before(id, None);
        id
    }

    /// Unlinks the last line and returns its handle.
    ///
    /// The entry stays in the arena, detached. Returns `None` if the
    /// document is empty.
    pub fn remove_last_line(&mut self) -> Option<LineId> {
        let tail = self.tail?;
        self.detach(tail)?;
        Some(tail)
    }

    /// Links a detached entry back on as the new last line.
    ///
    /// Returns false if `id` is unknown or already attached.
    pub fn reattach_at_end(&mut self, id: LineId) -> bool {
        self.attach_at(id, self.len)
    }

    /// Unlinks an attached entry from anywhere in the chain.
    ///
    /// Returns the 0-indexed position the entry occupied, or `None` if `id`
    /// is unknown or already detached.
    pub fn detach(&mut self, id: LineId) -> Option<usize> {
        if !self.is_attached(id) {
            return None;
        }
        let position = self.position_of(id)?;

        let (prev, next) = {
            let entry = self.entry_mut(id)?;
            let links = (entry.prev, entry.next);
            entry.prev = None;
            entry.next = None;
            entry.attached = false;
            links
        };

        match prev {
            Some(p) => {
                if let Some(e) = self.entry_mut(p) {
                    e.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(e) = self.entry_mut(n) {
                    e.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        self.len -= 1;
        Some(position)
    }

    /// Links a detached entry so that it occupies `position`.
    ///
    /// Positions past the end are clamped to the end. Returns false if `id`
    /// is unknown or already attached.
    pub fn attach_at(&mut self, id: LineId, position: usize) -> bool {
        match self.entry(id) {
            Some(entry) if !entry.attached => {}
            _ => return false,
        }

        let before = if position >= self.len {
            None
        } else {
            self.nth_id(position)
        };
        self.link_before(id, before);
        true
    }

    /// Frees a detached entry's slot. Attached entries are never released.
    ///
    /// Returns true if the slot was freed.
    pub fn release(&mut self, id: LineId) -> bool {
        match self.slots.get(id.0) {
            Some(Some(entry)) if !entry.attached => {}
            _ => return false,
        }
        self.slots[id.0] = None;
        self.free.push(id.0);
        true
    }

    /// Whether `id` refers to an entry in the live chain.
    pub fn is_attached(&self, id: LineId) -> bool {
        self.entry(id).is_some_and(|e| e.attached)
    }

    /// Text of the entry `id`, attached or detached.
    pub fn line(&self, id: LineId) -> Option<&str> {
        self.entry(id).map(|e| e.text.as_str())
    }

    /// Text of the 0-indexed `n`-th live line.
    pub fn nth(&self, n: usize) -> Option<&str> {
        self.nth_id(n).and_then(|id| self.line(id))
    }

    /// Handle of the 0-indexed `n`-th live line.
    pub fn nth_id(&self, n: usize) -> Option<LineId> {
        if n >= self.len {
            return None;
        }
        if n == self.len - 1 {
            return self.tail;
        }
        let mut cursor = self.head;
        for _ in 0..n {
            cursor = cursor.and_then(|id| self.entry(id)).and_then(|e| e.next);
        }
        cursor
    }

    /// 0-indexed position of an attached entry.
    pub fn position_of(&self, id: LineId) -> Option<usize> {
        if !self.is_attached(id) {
            return None;
        }
        if self.tail == Some(id) {
            return Some(self.len - 1);
        }
        let mut cursor = self.head;
        let mut index = 0;
        while let Some(current) = cursor {
            if current == id {
                return Some(index);
            }
            cursor = self.entry(current).and_then(|e| e.next);
            index += 1;
        }
        None
    }

    /// Lazy front-to-back traversal of the live lines.
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(self)
    }

    /// Rewrites live lines in place.
    ///
    /// `f` returns `Some(new_text)` for lines that change. Returns the number
    /// of lines that changed.
    pub fn map_lines<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut changed = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(entry) = self.entry_mut(id) else {
                break;
            };
            if let Some(text) = f(&entry.text) {
                entry.text = text;
                changed += 1;
            }
            cursor = entry.next;
        }
        changed
    }

    /// Destroys every entry, attached or detached, and resets to empty.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Checks the chain invariants: linear, head/tail consistent, and
    /// exactly `len` attached entries reachable from head.
    pub fn is_consistent(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() || self.head.is_none() != (self.len == 0) {
            return false;
        }
        if let Some(head) = self.head {
            if self.entry(head).map_or(true, |e| e.prev.is_some()) {
                return false;
            }
        }
        if let Some(tail) = self.tail {
            if self.entry(tail).map_or(true, |e| e.next.is_some()) {
                return false;
            }
        }

        let mut steps = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(entry) = self.entry(id) else {
                return false;
            };
            if !entry.attached || entry.prev != prev || steps >= self.len {
                return false;
            }
            steps += 1;
            prev = Some(id);
            cursor = entry.next;
        }

        let attached = self.slots.iter().flatten().filter(|e| e.attached).count();
        steps == self.len && prev == self.tail && attached == self.len
    }

    fn entry(&self, id: LineId) -> Option<&LineEntry> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: LineId) -> Option<&mut LineEntry> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Allocates a detached entry, reusing a released slot if any.
    fn alloc(&mut self, text: &str) -> LineId {
        let entry = LineEntry {
            text: text.to_string(),
            prev: None,
            next: None,
            attached: false,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(entry);
                LineId(index)
            }
            None => {
                self.slots.push(Some(entry));
                LineId(self.slots.len() - 1)
            }
        }
    }

    /// Links detached entry `id` in front of `before`, or at the end when
    /// `before` is `None`.
    fn link_before(&mut self, id: LineId, before: Option<LineId>) {
        let prev = match before {
            Some(b) => self.entry(b).and_then(|e| e.prev),
            None => self.tail,
        };

        if let Some(entry) = self.entry_mut(id) {
            entry.prev = prev;
            entry.next = before;
            entry.attached = true;
        }
        match prev {
            Some(p) => {
                if let Some(e) = self.entry_mut(p) {
                    e.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        match before {
            Some(b) => {
                if let Some(e) = self.entry_mut(b) {
                    e.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }

        self.len += 1;
    }
}
