//! Combat tracker state, owned exclusively by the combat page.

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatState {
    pub active: bool,
    /// Index into the ordered character list.
    pub current_turn: usize,
    pub round: u32,
    /// Participants that already acted this round, in acting order.
    pub acted_this_round: Vec<CharacterId>,
}
