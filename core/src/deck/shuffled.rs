use super::*;

/// Deals every picked image twice and shuffles the whole deck with a seeded rng.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, pair_count: PairCount, pool: &ImagePool) -> Vec<Card> {
        use rand::prelude::*;

        let mut entries: Vec<ImageRef> = pool
            .pair_images(pair_count)
            .into_iter()
            .flat_map(|image| [image.clone(), image])
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        entries.shuffle(&mut rng);

        log::debug!("Dealt {} cards for {} pairs", entries.len(), pair_count);
        entries
            .into_iter()
            .enumerate()
            .map(|(id, image)| Card::new(id, image))
            .collect()
    }
}
