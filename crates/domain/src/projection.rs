//! Role-based projection of the document.
//!
//! Every payload a restricted participant receives passes through here:
//! full syncs, single-character events and history replays alike.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::character::{Character, CharacterId, CharacterKind};
use crate::combat::CombatState;
use crate::game_state::GameState;
use crate::history::PageStacks;
use crate::page::Page;
use crate::role::Role;

/// Project the document for a participant with `role`.
///
/// The DM gets the canonical state by reference. Anyone else gets a copy
/// without hidden monsters, with history entries filtered the same way, and
/// with the monsters page history emptied (monster abilities are DM-only
/// content regardless of individual reveal flags). Hidden ids are also
/// dropped from the combat tracker's acted list.
pub fn project<'a>(state: &'a GameState, role: &Role) -> Cow<'a, GameState> {
    if role.is_dm() {
        return Cow::Borrowed(state);
    }

    let visible = visible_ids(&state.characters);
    let mut projected = GameState {
        characters: project_characters(&state.characters, role),
        combat_state: project_combat(&state.combat_state, &state.characters, role),
        monster_database: state.monster_database.clone(),
        history: state.history.clone(),
        redo: state.redo.clone(),
    };
    filter_stacks(&mut projected.history, &visible);
    filter_stacks(&mut projected.redo, &visible);
    Cow::Owned(projected)
}

/// Characters `role` is allowed to see, in document order.
pub fn project_characters(characters: &[Character], role: &Role) -> Vec<Character> {
    characters
        .iter()
        .filter(|c| c.is_visible_to(role))
        .cloned()
        .collect()
}

/// A single character for `role`, or `None` if it must be withheld entirely.
pub fn project_character(character: &Character, role: &Role) -> Option<Character> {
    character.is_visible_to(role).then(|| character.clone())
}

/// Combat state for `role`; restricted roles do not see hidden ids in the
/// acted list.
pub fn project_combat(combat: &CombatState, characters: &[Character], role: &Role) -> CombatState {
    let mut projected = combat.clone();
    if role.is_restricted() {
        let visible = visible_ids(characters);
        projected
            .acted_this_round
            .retain(|id| visible.contains(id));
    }
    projected
}

fn visible_ids(characters: &[Character]) -> HashSet<&CharacterId> {
    characters
        .iter()
        .filter(|c| c.is_visible_to_players())
        .map(|c| &c.id)
        .collect()
}

/// Scoped snapshots carry no reveal flag, so monsters in history are checked
/// against the live document. Monsters that no longer exist stay hidden.
fn filter_stacks(stacks: &mut PageStacks, visible: &HashSet<&CharacterId>) {
    stacks.clear(Page::Monsters);
    for entry in stacks.entries_mut() {
        let mut kept = HashSet::new();
        entry.characters.retain(|scoped| {
            let keep = match scoped.kind {
                CharacterKind::Player => true,
                CharacterKind::Monster => visible.contains(&scoped.id),
                CharacterKind::Other(_) => false,
            };
            if keep {
                kept.insert(scoped.id.clone());
            }
            keep
        });
        if let Some(combat) = entry.combat_state.as_mut() {
            combat
                .acted_this_round
                .retain(|id| kept.contains(id) || visible.contains(id));
        }
    }
}
