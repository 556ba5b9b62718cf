use crate::deck::InvaderDeck;
use crate::game::config::GameConfig;
use crate::pool::InvaderCardpool;
use crate::rules::ActiveRules;

/// State containers for one game. The card pool and the deck are fed
/// independently; drawing a card does not reveal it.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    rules: ActiveRules,
    cardpool: InvaderCardpool,
    deck: InvaderDeck,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let rules = ActiveRules::resolve(&config);
        Self {
            cardpool: InvaderCardpool::with_rules(rules),
            deck: InvaderDeck::with_rules(&config, rules),
            config,
            rules,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> ActiveRules {
        self.rules
    }

    pub fn cardpool(&self) -> &InvaderCardpool {
        &self.cardpool
    }

    pub fn cardpool_mut(&mut self) -> &mut InvaderCardpool {
        &mut self.cardpool
    }

    pub fn deck(&self) -> &InvaderDeck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut InvaderDeck {
        &mut self.deck
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::game::config::GameConfig;
    use crate::model::adversary::Adversary;
    use crate::model::card::Card;
    use crate::model::stage::Stage;

    #[test]
    fn new_session_shares_one_rule_resolution() {
        let session = Session::new(GameConfig::led_by(Adversary::Scotland, 4));
        assert!(session.rules().reveals_coastal_lands());
        assert!(session.cardpool().is_revealed(Card::STAGE_II_COASTAL));
        assert_eq!(session.deck().undrawn_layout(), "11-2*2*-3*-C*2-3333");
    }

    #[test]
    fn drawing_does_not_reveal() {
        let mut session = Session::new(GameConfig::default());
        session.deck_mut().draw(Card::STAGE_I_SANDS).unwrap();
        assert_eq!(session.cardpool().revealed_count(Stage::I), 0);

        session.cardpool_mut().reveal(Card::STAGE_I_SANDS).unwrap();
        assert_eq!(session.cardpool().revealed_count(Stage::I), 1);
        assert_eq!(session.deck().drawn().len(), 1);
    }
}
