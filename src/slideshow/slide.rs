//! Slides and the lazy-load window.

use crate::types::MemoryEntry;

/// Whether a slide's media element holds its real source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    /// Source kept aside; nothing is fetched.
    Deferred,
    Loaded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub index: usize,
    pub entry: MemoryEntry,
    pub media: MediaSlot,
    pub active: bool,
}

impl Slide {
    pub fn new(index: usize, entry: MemoryEntry) -> Self {
        Self {
            index,
            entry,
            media: MediaSlot::Deferred,
            active: false,
        }
    }

    /// The media URL, once loaded.
    pub fn src(&self) -> Option<&str> {
        match self.media {
            MediaSlot::Loaded => Some(&self.entry.path),
            MediaSlot::Deferred => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.media == MediaSlot::Loaded
    }
}

/// Indices that hold a real source while `index` is shown: the slide itself
/// and its neighbours, wrapping at both ends. Fewer than three for tiny
/// slideshows.
pub fn window_indices(index: usize, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let index = index % len;
    let mut window = vec![index, (index + len - 1) % len, (index + 1) % len];
    window.sort_unstable();
    window.dedup();
    window
}
