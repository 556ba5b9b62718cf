use crate::error::{InvaderError, Result};
use crate::game::config::GameConfig;
use crate::model::card::Card;
use crate::model::stage::Stage;
use crate::model::terrain::Terrain;
use crate::rules::ActiveRules;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Terrain to likelihood. Terrains that can no longer appear are absent.
pub type Prediction = BTreeMap<Terrain, f64>;

/// Stage III cards carrying any one standard terrain.
const STAGE_III_CARDS_PER_TERRAIN: usize = 3;

/// Revealed invader cards, per stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InvaderCardpool {
    revealed: [BTreeSet<Card>; 3],
}

impl InvaderCardpool {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rules(ActiveRules::resolve(config))
    }

    pub fn with_rules(rules: ActiveRules) -> Self {
        let mut pool = Self::default();
        if rules.reveals_coastal_lands() {
            pool.reveal(Card::STAGE_II_COASTAL)
                .expect("coastal lands is a catalog card");
        }
        pool
    }

    /// Excludes `card` from future predictions. Revealing a card twice is fine.
    pub fn reveal(&mut self, card: Card) -> Result<()> {
        if !card.is_catalog() {
            return Err(InvaderError::InvalidCard);
        }
        if self.revealed[Self::slot(card.stage())].insert(card) {
            debug!(%card, "revealed invader card");
        }
        Ok(())
    }

    pub fn revealed(&self, stage: Stage) -> impl Iterator<Item = Card> + '_ {
        self.revealed[Self::slot(stage)].iter().copied()
    }

    pub fn revealed_count(&self, stage: Stage) -> usize {
        self.revealed[Self::slot(stage)].len()
    }

    pub fn is_revealed(&self, card: Card) -> bool {
        self.revealed[Self::slot(card.stage())].contains(&card)
    }

    /// Predicts the next terrain for stage 1, 2 or 3.
    pub fn predict(&self, stage: u8) -> Result<Prediction> {
        let stage = Stage::try_from(stage)?;
        Ok(self.forecast(stage))
    }

    pub fn forecast(&self, stage: Stage) -> Prediction {
        match stage {
            Stage::I => self.uniform_over(stage, &Terrain::STANDARD),
            Stage::II => self.uniform_over(stage, &Terrain::ALL),
            Stage::III => self.stage_three(),
        }
    }

    fn uniform_over(&self, stage: Stage, terrains: &[Terrain]) -> Prediction {
        let remaining: Vec<Terrain> = terrains
            .iter()
            .copied()
            .filter(|&terrain| !self.revealed(stage).any(|card| card.carries(terrain)))
            .collect();
        let share = 1.0 / remaining.len() as f64;
        remaining.into_iter().map(|terrain| (terrain, share)).collect()
    }

    // Remaining copies of the terrain over unrevealed stage III cards. Each
    // card carries two terrains, so the values do not sum to one.
    fn stage_three(&self) -> Prediction {
        let revealed = &self.revealed[Self::slot(Stage::III)];
        let unrevealed = (Card::catalog_for(Stage::III).len() - revealed.len()) as f64;
        Terrain::STANDARD
            .iter()
            .filter_map(|&terrain| {
                let appearances = revealed.iter().filter(|card| card.carries(terrain)).count();
                let left = STAGE_III_CARDS_PER_TERRAIN.checked_sub(appearances)?;
                (left > 0).then(|| (terrain, left as f64 / unrevealed))
            })
            .collect()
    }

    const fn slot(stage: Stage) -> usize {
        stage as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::InvaderCardpool;
    use crate::error::InvaderError;
    use crate::game::config::GameConfig;
    use crate::model::adversary::Adversary;
    use crate::model::card::Card;
    use crate::model::stage::Stage;
    use crate::model::terrain::Terrain;

    fn fresh() -> InvaderCardpool {
        InvaderCardpool::new(&GameConfig::default())
    }

    fn approx(actual: Option<&f64>, expected: f64) {
        let actual = actual.copied().expect("terrain present");
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut pool = fresh();
        pool.reveal(Card::STAGE_I_JUNGLE).unwrap();
        let once = pool.clone();
        pool.reveal(Card::STAGE_I_JUNGLE).unwrap();
        assert_eq!(pool, once);
        assert_eq!(pool.revealed_count(Stage::I), 1);
    }

    #[test]
    fn reveal_rejects_non_catalog_cards() {
        let mut pool = fresh();
        for card in [Card::STAGE_I_UNKNOWN, Card::STAGE_II_SALT_DEPOSITS] {
            assert_eq!(pool.reveal(card), Err(InvaderError::InvalidCard));
        }
        assert_eq!(pool, fresh());
    }

    #[test]
    fn every_catalog_card_can_be_revealed() {
        let mut pool = fresh();
        for &card in Card::catalog() {
            pool.reveal(card).unwrap();
            assert!(pool.is_revealed(card));
        }
        for stage in Stage::ALL {
            assert_eq!(pool.revealed_count(stage), Card::catalog_for(stage).len());
            assert!(pool.forecast(stage).is_empty());
        }
    }

    #[test]
    fn predict_rejects_unknown_stages() {
        let pool = fresh();
        assert_eq!(pool.predict(0), Err(InvaderError::InvalidCard));
        assert_eq!(pool.predict(4), Err(InvaderError::InvalidCard));
    }

    #[test]
    fn base_predictions() {
        let pool = fresh();
        let stage1 = pool.predict(1).unwrap();
        assert_eq!(stage1.len(), 4);
        assert!(stage1.values().all(|&p| p == 0.25));
        assert!(!stage1.contains_key(&Terrain::CoastalLands));

        let stage2 = pool.predict(2).unwrap();
        assert_eq!(stage2.len(), 5);
        assert!(stage2.values().all(|&p| p == 0.20));

        let stage3 = pool.predict(3).unwrap();
        assert_eq!(stage3.len(), 4);
        assert!(stage3.values().all(|&p| p == 0.50));
    }

    #[test]
    fn coastal_adversaries_reveal_coastal_lands() {
        for config in [
            GameConfig::led_by(Adversary::Scotland, 2),
            GameConfig::default().with_supporting(Adversary::HabsburgMines, 4),
        ] {
            let pool = InvaderCardpool::new(&config);
            assert!(pool.is_revealed(Card::STAGE_II_COASTAL));
            let stage1 = pool.predict(1).unwrap();
            assert_eq!(stage1.get(&Terrain::Jungle), Some(&0.25));
            let stage2 = pool.predict(2).unwrap();
            assert_eq!(stage2.get(&Terrain::Jungle), Some(&0.25));
            assert!(!stage2.contains_key(&Terrain::CoastalLands));
        }

        let below = InvaderCardpool::new(&GameConfig::led_by(Adversary::HabsburgMines, 3));
        assert!(!below.is_revealed(Card::STAGE_II_COASTAL));
    }

    #[test]
    fn stage_one_reveals_remove_terrains() {
        let mut pool = fresh();
        pool.reveal(Card::STAGE_I_JUNGLE).unwrap();
        let prediction = pool.predict(1).unwrap();
        assert!(!prediction.contains_key(&Terrain::Jungle));

        // Other stages do not count.
        pool.reveal(Card::STAGE_II_WETLAND).unwrap();
        approx(pool.predict(1).unwrap().get(&Terrain::Wetland), 1.0 / 3.0);

        pool.reveal(Card::STAGE_I_WETLAND).unwrap();
        let prediction = pool.predict(1).unwrap();
        assert!(!prediction.contains_key(&Terrain::Wetland));
        assert_eq!(prediction.get(&Terrain::Sands), Some(&0.5));

        for &card in Card::catalog_for(Stage::I) {
            pool.reveal(card).unwrap();
        }
        assert!(pool.predict(1).unwrap().is_empty());
    }

    #[test]
    fn stage_three_exhausted_terrain_is_absent() {
        let mut pool = fresh();
        for card in [
            Card::STAGE_III_JUNGLE_MOUNTAIN,
            Card::STAGE_III_JUNGLE_SANDS,
            Card::STAGE_III_JUNGLE_WETLAND,
        ] {
            pool.reveal(card).unwrap();
        }
        assert!(!pool.predict(3).unwrap().contains_key(&Terrain::Jungle));
    }

    #[test]
    fn stage_three_untouched_terrain_is_certain() {
        let mut pool = fresh();
        for card in [
            Card::STAGE_III_JUNGLE_MOUNTAIN,
            Card::STAGE_III_JUNGLE_SANDS,
            Card::STAGE_III_MOUNTAIN_SANDS,
        ] {
            pool.reveal(card).unwrap();
        }
        assert_eq!(pool.predict(3).unwrap().get(&Terrain::Wetland), Some(&1.0));
    }

    #[test]
    fn stage_three_decreases_with_appearances() {
        let mut pool = fresh();

        pool.reveal(Card::STAGE_III_JUNGLE_MOUNTAIN).unwrap();
        assert_eq!(pool.predict(3).unwrap().get(&Terrain::Jungle), Some(&0.4));

        pool.reveal(Card::STAGE_III_MOUNTAIN_SANDS).unwrap();
        assert_eq!(pool.predict(3).unwrap().get(&Terrain::Jungle), Some(&0.5));

        pool.reveal(Card::STAGE_III_MOUNTAIN_WETLAND).unwrap();
        approx(pool.predict(3).unwrap().get(&Terrain::Jungle), 2.0 / 3.0);

        pool.reveal(Card::STAGE_III_SANDS_WETLAND).unwrap();
        assert_eq!(pool.predict(3).unwrap().get(&Terrain::Jungle), Some(&1.0));

        pool.reveal(Card::STAGE_III_JUNGLE_MOUNTAIN).unwrap();
        assert_eq!(pool.predict(3).unwrap().get(&Terrain::Jungle), Some(&1.0));
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let mut pool = fresh();
        pool.reveal(Card::STAGE_III_SANDS_WETLAND).unwrap();
        assert_eq!(pool.predict(3), pool.predict(3));
        assert_eq!(pool.predict(2), pool.predict(2));
    }
}
