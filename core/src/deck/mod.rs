use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use shuffled::*;

mod shuffled;

pub trait DeckGenerator {
    fn generate(self, pair_count: PairCount, pool: &ImagePool) -> Vec<Card>;
}

/// Images a deck can be dealt from. User images take priority over the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagePool {
    user: Vec<ImageRef>,
    defaults: Vec<ImageRef>,
}

impl ImagePool {
    pub fn new(user: Vec<ImageRef>, defaults: Vec<ImageRef>) -> Result<Self> {
        if user.is_empty() && defaults.is_empty() {
            return Err(GameError::EmptyImagePool);
        }
        Ok(Self { user, defaults })
    }

    pub fn user_images(&self) -> &[ImageRef] {
        &self.user
    }

    pub fn default_images(&self) -> &[ImageRef] {
        &self.defaults
    }

    /// Picks one image per pair.
    ///
    /// Each user image is used at most once, in order. Missing pairs are filled from the default pool, cycling it when
    /// it is too short. Without any defaults the user images are cycled instead, so the result always has exactly
    /// `pair_count` entries.
    pub fn pair_images(&self, pair_count: PairCount) -> Vec<ImageRef> {
        let wanted = usize::from(pair_count);
        let mut images: Vec<ImageRef> = self.user.iter().take(wanted).cloned().collect();
        let missing = wanted - images.len();
        if missing == 0 {
            return images;
        }

        let filler = if self.defaults.is_empty() {
            log::warn!(
                "No default images, repeating {} user images to fill {} pairs",
                self.user.len(),
                wanted
            );
            &self.user
        } else {
            if missing > self.defaults.len() {
                log::warn!(
                    "Default pool cycled, needed {} pairs but only has {} images",
                    missing,
                    self.defaults.len()
                );
            }
            &self.defaults
        };
        images.extend(filler.iter().cycle().take(missing).cloned());
        images
    }
}
