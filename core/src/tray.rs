use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrayOutcome {
    Added,
    /// Same image is already in the tray.
    Duplicate,
    Full,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrayBatch {
    /// Batch is larger than the free slots, nothing was added.
    Rejected { remaining: usize },
    Added { added: usize, duplicates: usize },
}

impl TrayBatch {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Added { added, .. } if added > 0)
    }
}

/// Images chosen before a round, bounded by the difficulty's upload limit.
#[derive(Clone, Debug)]
pub struct ImageTray {
    capacity: usize,
    images: Vec<ImageRef>,
    seen: HashSet<ImageRef>,
}

impl ImageTray {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            images: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn for_preset(preset: DifficultyPreset) -> Self {
        Self::new(preset.max_user_images())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.images.len())
    }

    pub fn try_add(&mut self, image: ImageRef) -> TrayOutcome {
        if self.seen.contains(&image) {
            return TrayOutcome::Duplicate;
        }
        if self.remaining() == 0 {
            return TrayOutcome::Full;
        }
        self.seen.insert(image.clone());
        self.images.push(image);
        TrayOutcome::Added
    }

    /// Adds a whole selection, or none of it when it has more entries than free slots.
    pub fn add_batch(&mut self, batch: Vec<ImageRef>) -> TrayBatch {
        let remaining = self.remaining();
        if batch.len() > remaining {
            log::debug!(
                "rejecting {} images, only {} slots left",
                batch.len(),
                remaining
            );
            return TrayBatch::Rejected { remaining };
        }

        let mut added = 0;
        let mut duplicates = 0;
        for image in batch {
            match self.try_add(image) {
                TrayOutcome::Added => added += 1,
                TrayOutcome::Duplicate => duplicates += 1,
                TrayOutcome::Full => break,
            }
        }
        TrayBatch::Added { added, duplicates }
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageRef> {
        if index >= self.images.len() {
            return None;
        }
        let image = self.images.remove(index);
        self.seen.remove(&image);
        Some(image)
    }

    pub fn into_images(self) -> Vec<ImageRef> {
        self.images
    }
}
