use serde::{Deserialize, Serialize};

use crate::*;

/// One dealt card, `id` is its position in the shuffled deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardIndex,
    pub image: ImageRef,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub fn new(id: CardIndex, image: ImageRef) -> Self {
        Self {
            id,
            image,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the image side is showing, matched cards stay face up.
    pub const fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    pub fn pairs_with(&self, other: &Card) -> bool {
        self.image == other.image
    }
}
