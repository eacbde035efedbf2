//! Docket generation.
//!
//! Each turn offers 1-3 criminals drawn from a danger band that shifts with
//! the turn number, skipping anyone already executed. Detectives are dealt
//! from the front of the detective list so no two criminals on the same
//! docket share one.

use std::ops::RangeInclusive;

use tracing::{trace, warn};

use crate::cases::{Criminal, CriminalProfile, Roster};
use crate::core::{Dice, Docket, GameState, JudgeConfig};

/// Detectives are only ever dealt from this many names at the front of the
/// available list.
const DETECTIVE_WINDOW: usize = 5;

/// Criminals offered when every name in the roster has been executed.
const EXHAUSTED_FALLBACK: usize = 3;

/// Danger levels eligible on `turn`.
///
/// ```
/// use the_judge::rules::pool::danger_band;
///
/// assert_eq!(danger_band(3), 1..=5);
/// assert_eq!(danger_band(9), 2..=8);
/// assert_eq!(danger_band(17), 3..=10);
/// ```
#[must_use]
pub fn danger_band(turn: u32) -> RangeInclusive<u8> {
    match turn {
        0..=5 => 1..=5,
        6..=12 => 2..=8,
        _ => 3..=10,
    }
}

/// Build the docket for the state's current turn.
///
/// Turn 1 is the tutorial: the first roster criminal with the first
/// detective. Later turns sample from [`danger_band`].
pub fn generate_docket(
    state: &GameState,
    roster: &Roster,
    config: &JudgeConfig,
    dice: &mut impl Dice,
) -> Docket {
    if state.turn <= 1 {
        return tutorial_docket(roster);
    }

    let count = config.docket_size(state.turn);
    let candidates = eligible_profiles(state, roster, count);
    let selected = sample(&candidates, count, dice);

    let mut detectives = available_detectives(state, roster, count);
    let mut docket = Docket::new();

    for profile in selected {
        let detective = if profile.danger >= config.high_profile_danger
            && dice.chance(config.unassigned_chance)
        {
            None
        } else {
            deal_detective(&mut detectives, dice)
        };
        docket.push(Criminal::from_profile(profile, detective));
    }

    dice.shuffle(&mut docket);

    trace!(
        turn = state.turn,
        count = docket.len(),
        names = ?docket.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "docket generated"
    );

    docket
}

fn tutorial_docket(roster: &Roster) -> Docket {
    let mut docket = Docket::new();
    if let Some(first) = roster.criminals().first() {
        docket.push(Criminal::from_profile(first, roster.detectives().first().cloned()));
    }
    docket
}

/// Unexecuted profiles in the turn's band, widened to the whole roster when
/// the band can't fill the docket.
fn eligible_profiles<'r>(
    state: &GameState,
    roster: &'r Roster,
    count: usize,
) -> Vec<&'r CriminalProfile> {
    let band = danger_band(state.turn);
    let in_band: Vec<_> = roster
        .find(|c| band.contains(&c.danger) && !state.is_executed(&c.name))
        .collect();
    if in_band.len() >= count {
        return in_band;
    }

    let remaining: Vec<_> = roster.find(|c| !state.is_executed(&c.name)).collect();
    if !remaining.is_empty() {
        return remaining;
    }

    warn!(turn = state.turn, "every criminal executed, recycling the roster");
    roster.criminals().iter().take(EXHAUSTED_FALLBACK).collect()
}

/// Pick `count` distinct entries uniformly (partial Fisher-Yates).
fn sample<'a, T>(items: &[&'a T], count: usize, dice: &mut impl Dice) -> Vec<&'a T> {
    let mut pool = items.to_vec();
    let take = count.min(pool.len());
    for i in 0..take {
        let j = i + dice.index(pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// Living detectives, or the full list again when too few remain.
fn available_detectives<'r>(state: &GameState, roster: &'r Roster, count: usize) -> Vec<&'r str> {
    let living: Vec<_> = roster
        .detectives()
        .iter()
        .map(String::as_str)
        .filter(|d| !state.is_executed(d))
        .collect();
    if living.len() >= count {
        return living;
    }
    roster.detectives().iter().map(String::as_str).collect()
}

fn deal_detective(available: &mut Vec<&str>, dice: &mut impl Dice) -> Option<String> {
    if available.is_empty() {
        return None;
    }
    let window = available.len().min(DETECTIVE_WINDOW);
    let picked = available.remove(dice.index(window));
    Some(picked.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use std::collections::HashSet;

    fn state_at(turn: u32) -> GameState {
        let mut state = GameState::new(&JudgeConfig::default());
        state.turn = turn;
        state
    }

    #[test]
    fn test_turn_one_is_tutorial() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let docket = generate_docket(&state_at(1), &roster, &config, &mut rng);

            assert_eq!(docket.len(), 1);
            assert_eq!(docket[0].name, "Marcus Webb");
            assert_eq!(docket[0].danger, 1);
            assert_eq!(docket[0].detective.as_deref(), Some("Detective Sarah Chen"));
        }
    }

    #[test]
    fn test_docket_sizes() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();
        let mut rng = GameRng::new(42);

        assert_eq!(generate_docket(&state_at(2), &roster, &config, &mut rng).len(), 2);
        assert_eq!(generate_docket(&state_at(4), &roster, &config, &mut rng).len(), 2);
        assert_eq!(generate_docket(&state_at(5), &roster, &config, &mut rng).len(), 3);
        assert_eq!(generate_docket(&state_at(20), &roster, &config, &mut rng).len(), 3);
    }

    #[test]
    fn test_docket_respects_band() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();

        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            for turn in [2, 5, 6, 12, 13, 20] {
                let band = danger_band(turn);
                let docket = generate_docket(&state_at(turn), &roster, &config, &mut rng);
                for c in &docket {
                    assert!(band.contains(&c.danger), "turn {turn}: {} danger {}", c.name, c.danger);
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_names_or_detectives() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();

        for seed in 0..100 {
            let mut rng = GameRng::new(seed);
            let docket = generate_docket(&state_at(8), &roster, &config, &mut rng);

            let names: HashSet<_> = docket.iter().map(|c| &c.name).collect();
            assert_eq!(names.len(), docket.len());

            let detectives: Vec<_> = docket.iter().filter_map(|c| c.detective.as_ref()).collect();
            let unique: HashSet<_> = detectives.iter().collect();
            assert_eq!(unique.len(), detectives.len());
        }
    }

    #[test]
    fn test_executed_criminals_are_excluded() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();
        let mut state = state_at(3);
        // Leave exactly two low-danger criminals alive
        for c in roster.find(|c| c.danger <= 5) {
            if c.name != "Victor Crane" && c.name != "Tina Brooks" {
                state.mark_executed(c.name.clone());
            }
        }

        let mut rng = GameRng::new(7);
        let docket = generate_docket(&state, &roster, &config, &mut rng);
        let names: HashSet<_> = docket.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, HashSet::from(["Victor Crane", "Tina Brooks"]));
    }

    #[test]
    fn test_band_exhaustion_widens_to_whole_roster() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();
        let mut state = state_at(3);
        for c in roster.find(|c| c.danger <= 5) {
            state.mark_executed(c.name.clone());
        }

        let mut rng = GameRng::new(3);
        let docket = generate_docket(&state, &roster, &config, &mut rng);

        assert_eq!(docket.len(), 2);
        assert!(docket.iter().all(|c| c.danger >= 6));
    }

    #[test]
    fn test_full_exhaustion_recycles_first_three() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();
        let mut state = state_at(10);
        for c in roster.criminals() {
            state.mark_executed(c.name.clone());
        }

        let mut rng = GameRng::new(3);
        let docket = generate_docket(&state, &roster, &config, &mut rng);
        let names: HashSet<_> = docket.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            HashSet::from(["Marcus Webb", "Danny 'Snake' Morrison", "Victor Crane"])
        );
    }

    #[test]
    fn test_detectives_dealt_from_front_window() {
        let roster = Roster::standard();
        let config = JudgeConfig::default().with_unassigned_chance(0.0);
        let window: HashSet<_> = roster.detectives()[..7].iter().map(String::as_str).collect();

        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let docket = generate_docket(&state_at(9), &roster, &config, &mut rng);
            for c in &docket {
                let d = c.detective.as_deref().unwrap();
                // 3 deals from a window of 5 that slides as picks are removed
                assert!(window.contains(d), "{d} outside the front of the list");
            }
        }
    }

    #[test]
    fn test_executed_detectives_skipped() {
        let roster = Roster::standard();
        let config = JudgeConfig::default().with_unassigned_chance(0.0);
        let mut state = state_at(6);
        for d in &roster.detectives()[..5] {
            state.mark_executed(d.clone());
        }

        for seed in 0..30 {
            let mut rng = GameRng::new(seed);
            let docket = generate_docket(&state, &roster, &config, &mut rng);
            for c in &docket {
                let d = c.detective.as_deref().unwrap();
                assert!(!state.is_executed(d));
            }
        }
    }

    #[test]
    fn test_detective_pool_resets_when_exhausted() {
        let roster = Roster::standard();
        let config = JudgeConfig::default().with_unassigned_chance(0.0);
        let mut state = state_at(7);
        for d in &roster.detectives()[..13] {
            state.mark_executed(d.clone());
        }

        let mut rng = GameRng::new(11);
        let docket = generate_docket(&state, &roster, &config, &mut rng);

        // Only 2 living detectives for 3 criminals: the full list is used again
        assert_eq!(docket.len(), 3);
        assert!(docket.iter().all(|c| c.detective.is_some()));
    }

    #[test]
    fn test_high_profile_can_be_unassigned() {
        let roster = Roster::standard();
        let always = JudgeConfig::default().with_unassigned_chance(1.0);
        let never = JudgeConfig::default().with_unassigned_chance(0.0);

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            for c in generate_docket(&state_at(15), &roster, &always, &mut rng) {
                assert_eq!(c.detective.is_none(), c.danger >= 7);
            }
            for c in generate_docket(&state_at(15), &roster, &never, &mut rng) {
                assert!(c.detective.is_some());
            }
        }
    }

    #[test]
    fn test_same_seed_same_docket() {
        let roster = Roster::standard();
        let config = JudgeConfig::default();

        let a = generate_docket(&state_at(9), &roster, &config, &mut GameRng::new(5));
        let b = generate_docket(&state_at(9), &roster, &config, &mut GameRng::new(5));

        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_roster_gives_empty_docket() {
        let roster = Roster::new(vec![], vec![]).unwrap();
        let config = JudgeConfig::default();
        let mut rng = GameRng::new(1);

        assert!(generate_docket(&state_at(1), &roster, &config, &mut rng).is_empty());
        assert!(generate_docket(&state_at(6), &roster, &config, &mut rng).is_empty());
    }
}
