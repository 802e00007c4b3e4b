use crate::combat::{BattleOutcome, PlayerAction};

/// Where the battle loop is.
///
/// `Setup → CheckOutcome → AwaitingPlayerAction → ResolvingPlayerAction →
/// MonsterTurn → CheckOutcome → ...` until one of the terminal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Setup,
    AwaitingPlayerAction,
    ResolvingPlayerAction(PlayerAction),
    MonsterTurn,
    CheckOutcome,
    Victory,
    Defeat,
    Aborted,
}

impl BattlePhase {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            Self::Victory => Some(BattleOutcome::Victory),
            Self::Defeat => Some(BattleOutcome::Defeat),
            Self::Aborted => Some(BattleOutcome::Aborted),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

impl From<BattleOutcome> for BattlePhase {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Victory => Self::Victory,
            BattleOutcome::Defeat => Self::Defeat,
            BattleOutcome::Aborted => Self::Aborted,
        }
    }
}
