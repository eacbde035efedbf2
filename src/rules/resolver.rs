//! Turn resolution arithmetic.
//!
//! ## Execution
//!
//! 1. The criminal (and optionally their detective) goes in the notebook.
//! 2. Capture risk moves by the criminal's risk plus the detective's risk,
//!    as a single net change.
//! 3. Effectiveness and popularity rise with danger.
//! 4. High popularity shaves 15 off capture risk (protection).
//! 5. Both gauges clamp once; a full capture gauge is an arrest.
//! 6. Breaking news may shift the gauges again; arrest is re-checked.
//! 7. The turn advances; passing the last turn is a win.
//!
//! ## Skip
//!
//! Capture risk -10, popularity -5, one skip spent, turn advances.
//!
//! These functions assume the action was already validated by
//! [`JudgeRules`](super::JudgeRules).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::GameResult;
use crate::cases::Criminal;
use crate::core::{Dice, GameState, Gauge, JudgeConfig};

/// Breaking news that can follow an execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomEvent {
    /// Online following grows.
    FollowingGrows,
    /// Police almost caught a lead.
    NearMiss,
    /// A celebrity praises the Judge.
    CelebrityPraise,
    /// A rival detective agency takes over the case.
    RivalAgency,
}

impl RandomEvent {
    /// All events, equally likely.
    pub const ALL: [RandomEvent; 4] = [
        RandomEvent::FollowingGrows,
        RandomEvent::NearMiss,
        RandomEvent::CelebrityPraise,
        RandomEvent::RivalAgency,
    ];

    /// Popularity change.
    #[must_use]
    pub const fn popularity_delta(self) -> i32 {
        match self {
            RandomEvent::FollowingGrows | RandomEvent::CelebrityPraise => 20,
            RandomEvent::NearMiss | RandomEvent::RivalAgency => 0,
        }
    }

    /// Capture risk change. Popularity surges also cool the investigation.
    #[must_use]
    pub const fn capture_risk_delta(self) -> i32 {
        match self {
            RandomEvent::FollowingGrows | RandomEvent::CelebrityPraise => -13,
            RandomEvent::NearMiss => -10,
            RandomEvent::RivalAgency => 15,
        }
    }

    /// News ticker text.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            RandomEvent::FollowingGrows => {
                "Your online following has grown significantly! (+20 Popularity)"
            }
            RandomEvent::NearMiss => "Police almost caught a lead! (-10 Capture Risk)",
            RandomEvent::CelebrityPraise => {
                "A famous celebrity praised your actions! (+20 Popularity)"
            }
            RandomEvent::RivalAgency => {
                "A rival detective agency takes over the case! (+15 Capture Risk)"
            }
        }
    }
}

/// What happened when a name went in the notebook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Turn the execution happened on.
    pub turn: u32,

    /// The executed criminal.
    pub criminal: String,

    /// The detective executed alongside, if any.
    pub detective: Option<String>,

    /// Effectiveness gained.
    pub effectiveness_gain: i64,

    /// Popularity gained before clamping.
    pub popularity_gain: i32,

    /// Capture risk from the criminal alone.
    pub criminal_risk: i32,

    /// Capture risk from the detective kill. Negative is good.
    pub detective_risk: Option<i32>,

    /// Public support lowered capture risk this turn.
    pub protected: bool,

    /// Breaking news, if any.
    pub event: Option<RandomEvent>,

    /// Set when this execution ended the game.
    pub result: Option<GameResult>,
}

impl ExecutionReport {
    /// Criminal and detective risk combined.
    #[must_use]
    pub fn net_risk(&self) -> i32 {
        self.criminal_risk + self.detective_risk.unwrap_or(0)
    }
}

/// What happened when the Judge lay low.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipReport {
    /// Turn that was skipped.
    pub turn: u32,

    /// Capture risk removed (before clamping).
    pub risk_reduction: i32,

    /// Popularity lost (before clamping).
    pub popularity_penalty: i32,

    /// Skips left afterwards.
    pub skips_remaining: u32,

    /// Set when this skip ended the game.
    pub result: Option<GameResult>,
}

/// Outcome of one applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnReport {
    /// A criminal was executed.
    Execution(ExecutionReport),
    /// The turn was skipped.
    Skip(SkipReport),
}

impl TurnReport {
    /// Turn the action was taken on.
    #[must_use]
    pub fn turn(&self) -> u32 {
        match self {
            TurnReport::Execution(r) => r.turn,
            TurnReport::Skip(r) => r.turn,
        }
    }

    /// Set when the action ended the game.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            TurnReport::Execution(r) => r.result,
            TurnReport::Skip(r) => r.result,
        }
    }
}

/// Capture risk from executing `criminal`, before protection.
pub fn criminal_risk(criminal: &Criminal, config: &JudgeConfig, dice: &mut impl Dice) -> i32 {
    let detective_bonus = if criminal.has_detective() {
        config.detective_bonus
    } else {
        0
    };
    criminal.danger_value() * 2 + detective_bonus + dice.roll(-5, 10)
}

/// Capture risk from killing a detective.
///
/// The first kill always helps: the police haven't made the connection.
/// After that it's a coin flip between helping and hurting.
pub fn detective_risk(prior_kills: u32, dice: &mut impl Dice) -> i32 {
    if prior_kills == 0 {
        return -dice.roll(20, 40);
    }
    if dice.chance(0.5) {
        -dice.roll(15, 30)
    } else {
        dice.roll(10, 30)
    }
}

/// Resolve an execution against `state`.
///
/// `with_detective` must only be set when the criminal's detective is
/// targetable.
pub fn resolve_execution(
    state: &mut GameState,
    config: &JudgeConfig,
    criminal: &Criminal,
    with_detective: bool,
    dice: &mut impl Dice,
) -> ExecutionReport {
    let turn = state.turn;
    state.mark_executed(criminal.name.clone());

    let detective = criminal.detective.clone().filter(|_| with_detective);
    let detective_delta = detective.as_ref().map(|name| {
        let delta = detective_risk(state.killed_detectives, dice);
        state.mark_executed(name.clone());
        state.killed_detectives += 1;
        delta
    });

    let criminal_delta = criminal_risk(criminal, config, dice);
    let effectiveness_gain = i64::from(criminal.danger) * 2;
    let popularity_gain = criminal.danger_value() * 3 + dice.roll(5, 15);

    state.effectiveness += effectiveness_gain;

    let raw_popularity = state.popularity.get() + popularity_gain;
    let mut raw_risk = state.capture_risk.get() + criminal_delta + detective_delta.unwrap_or(0);
    let protected = raw_popularity >= config.protection_threshold;
    if protected {
        raw_risk -= config.protection_bonus;
    }

    state.popularity = Gauge::settle(raw_popularity);
    state.capture_risk = Gauge::settle(raw_risk);

    let mut report = ExecutionReport {
        turn,
        criminal: criminal.name.clone(),
        detective,
        effectiveness_gain,
        popularity_gain,
        criminal_risk: criminal_delta,
        detective_risk: detective_delta,
        protected,
        event: None,
        result: None,
    };

    if state.capture_risk.is_full() {
        report.result = Some(capture(state));
        return report;
    }

    if dice.chance(config.random_event_chance) {
        let event = RandomEvent::ALL[dice.index(RandomEvent::ALL.len())];
        state.popularity = state.popularity.shifted(event.popularity_delta());
        state.capture_risk = state.capture_risk.shifted(event.capture_risk_delta());
        report.event = Some(event);

        if state.capture_risk.is_full() {
            report.result = Some(capture(state));
            return report;
        }
    }

    report.result = advance_turn(state, config);

    debug!(
        turn,
        criminal = %report.criminal,
        detective = ?report.detective,
        net_risk = report.net_risk(),
        protected,
        event = ?report.event,
        popularity = state.popularity.get(),
        capture_risk = state.capture_risk.get(),
        "execution resolved"
    );

    report
}

/// Resolve a skip against `state`.
///
/// Requires [`GameState::can_skip`].
pub fn resolve_skip(state: &mut GameState, config: &JudgeConfig) -> SkipReport {
    let turn = state.turn;

    state.capture_risk = state.capture_risk.shifted(-config.skip_risk_reduction);
    state.popularity = state.popularity.shifted(-config.skip_popularity_penalty);
    state.skips_remaining = state.skips_remaining.saturating_sub(1);

    let result = advance_turn(state, config);

    debug!(
        turn,
        skips_remaining = state.skips_remaining,
        popularity = state.popularity.get(),
        capture_risk = state.capture_risk.get(),
        "turn skipped"
    );

    SkipReport {
        turn,
        risk_reduction: config.skip_risk_reduction,
        popularity_penalty: config.skip_popularity_penalty,
        skips_remaining: state.skips_remaining,
        result,
    }
}

fn capture(state: &mut GameState) -> GameResult {
    state.game_over = true;
    state.won = false;
    GameResult::Captured
}

fn advance_turn(state: &mut GameState, config: &JudgeConfig) -> Option<GameResult> {
    state.turn += 1;
    if state.turn > config.max_turns {
        state.game_over = true;
        state.won = true;
        return Some(GameResult::Won);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Dice that replay scripted values.
    ///
    /// Rolls are taken verbatim (the caller scripts in-range values),
    /// chances and indices come from their own queues.
    #[derive(Default)]
    struct Scripted {
        rolls: VecDeque<i32>,
        chances: VecDeque<bool>,
        indices: VecDeque<usize>,
    }

    impl Scripted {
        fn rolls(mut self, values: &[i32]) -> Self {
            self.rolls.extend(values);
            self
        }
        fn chances(mut self, values: &[bool]) -> Self {
            self.chances.extend(values);
            self
        }
        fn indices(mut self, values: &[usize]) -> Self {
            self.indices.extend(values);
            self
        }
    }

    impl Dice for Scripted {
        fn roll(&mut self, low: i32, high: i32) -> i32 {
            let v = self.rolls.pop_front().expect("unscripted roll");
            assert!((low..=high).contains(&v), "{v} outside {low}..={high}");
            v
        }
        fn chance(&mut self, _probability: f64) -> bool {
            self.chances.pop_front().unwrap_or(false)
        }
        fn index(&mut self, len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0) % len
        }
    }

    fn fresh() -> (GameState, JudgeConfig) {
        let config = JudgeConfig::default();
        (GameState::new(&config), config)
    }

    fn crane() -> Criminal {
        Criminal::new("Victor Crane", "Assault and robbery", 2).with_detective("Detective David Kim")
    }

    #[test]
    fn test_plain_execution_arithmetic() {
        let (mut state, config) = fresh();
        // criminal risk roll, popularity roll; no event
        let mut dice = Scripted::default().rolls(&[3, 7]);

        let report = resolve_execution(&mut state, &config, &crane(), false, &mut dice);

        assert_eq!(report.effectiveness_gain, 4);
        assert_eq!(report.popularity_gain, 2 * 3 + 7);
        assert_eq!(report.criminal_risk, 2 * 2 + 10 + 3);
        assert_eq!(report.detective_risk, None);
        assert!(!report.protected);
        assert_eq!(report.result, None);

        assert_eq!(state.effectiveness, 4);
        assert_eq!(state.popularity.get(), 13);
        assert_eq!(state.capture_risk.get(), 17);
        assert_eq!(state.turn, 2);
        assert!(state.is_executed("Victor Crane"));
        assert!(!state.is_executed("Detective David Kim"));
    }

    #[test]
    fn test_no_detective_means_no_bonus() {
        let (mut state, config) = fresh();
        let loner = Criminal::new("Kingpin Zero", "Shadow ruler", 10);
        let mut dice = Scripted::default().rolls(&[-5, 5]);

        let report = resolve_execution(&mut state, &config, &loner, false, &mut dice);

        assert_eq!(report.criminal_risk, 20 - 5);
    }

    #[test]
    fn test_first_detective_kill_always_helps() {
        let (mut state, config) = fresh();
        // detective roll first, then criminal risk, then popularity
        let mut dice = Scripted::default().rolls(&[25, 10, 5]);

        let report = resolve_execution(&mut state, &config, &crane(), true, &mut dice);

        assert_eq!(report.detective_risk, Some(-25));
        assert_eq!(report.net_risk(), -25 + 24);
        assert_eq!(state.capture_risk.get(), 0);
        assert_eq!(state.killed_detectives, 1);
        assert!(state.is_executed("Detective David Kim"));
        assert_eq!(state.executed_count(), 2);
    }

    #[test]
    fn test_later_detective_kill_coin_flip() {
        let mut dice = Scripted::default().chances(&[true]).rolls(&[15]);
        assert_eq!(detective_risk(1, &mut dice), -15);

        let mut dice = Scripted::default().chances(&[false]).rolls(&[30]);
        assert_eq!(detective_risk(2, &mut dice), 30);
    }

    #[test]
    fn test_protection_applies_on_unclamped_sum() {
        let (mut state, config) = fresh();
        state.popularity = Gauge::settle(55);
        state.capture_risk = Gauge::settle(95);
        // risk 95 + 14 = 109, minus 15 protection = 94
        let mut dice = Scripted::default().rolls(&[0, 5]);

        let report = resolve_execution(&mut state, &config, &crane(), false, &mut dice);

        assert!(report.protected);
        assert_eq!(state.capture_risk.get(), 94);
        assert_eq!(report.result, None);
    }

    #[test]
    fn test_full_gauge_is_capture() {
        let (mut state, config) = fresh();
        state.capture_risk = Gauge::settle(90);
        let mut dice = Scripted::default().rolls(&[0, 5]).chances(&[true]);

        let report = resolve_execution(&mut state, &config, &crane(), false, &mut dice);

        assert_eq!(report.result, Some(GameResult::Captured));
        assert_eq!(report.event, None);
        assert!(state.game_over);
        assert!(!state.won);
        assert_eq!(state.capture_risk.get(), 100);
        // turn does not advance on arrest
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_random_event_shifts_gauges() {
        let (mut state, config) = fresh();
        state.capture_risk = Gauge::settle(40);
        let mut dice = Scripted::default()
            .rolls(&[0, 5])
            .chances(&[true])
            .indices(&[2]);

        let report = resolve_execution(&mut state, &config, &crane(), false, &mut dice);

        assert_eq!(report.event, Some(RandomEvent::CelebrityPraise));
        assert_eq!(state.popularity.get(), 11 + 20);
        assert_eq!(state.capture_risk.get(), 54 - 13);
    }

    #[test]
    fn test_rival_agency_can_cause_capture() {
        let (mut state, config) = fresh();
        state.capture_risk = Gauge::settle(80);
        // 80 + 14 = 94, then +15 from the event
        let mut dice = Scripted::default()
            .rolls(&[0, 5])
            .chances(&[true])
            .indices(&[3]);

        let report = resolve_execution(&mut state, &config, &crane(), false, &mut dice);

        assert_eq!(report.event, Some(RandomEvent::RivalAgency));
        assert_eq!(report.result, Some(GameResult::Captured));
        assert!(state.game_over);
    }

    #[test]
    fn test_last_turn_execution_wins() {
        let (mut state, config) = fresh();
        state.turn = config.max_turns;
        let mut dice = Scripted::default().rolls(&[25, 0, 5]);

        // Detective path checks the win too
        let report = resolve_execution(&mut state, &config, &crane(), true, &mut dice);

        assert_eq!(report.result, Some(GameResult::Won));
        assert!(state.game_over && state.won);
        assert_eq!(state.turn, config.max_turns + 1);
    }

    #[test]
    fn test_skip() {
        let (mut state, config) = fresh();
        state.capture_risk = Gauge::settle(62);
        state.popularity = Gauge::settle(3);

        let report = resolve_skip(&mut state, &config);

        assert_eq!(report.risk_reduction, 10);
        assert_eq!(report.popularity_penalty, 5);
        assert_eq!(report.skips_remaining, 4);
        assert_eq!(state.capture_risk.get(), 52);
        assert_eq!(state.popularity.get(), 0);
        assert_eq!(state.turn, 2);
        assert_eq!(report.result, None);
    }

    #[test]
    fn test_skip_on_last_turn_wins() {
        let (mut state, config) = fresh();
        state.turn = config.max_turns;
        state.capture_risk = Gauge::settle(70);

        let report = resolve_skip(&mut state, &config);

        assert_eq!(report.result, Some(GameResult::Won));
        assert!(state.won);
    }

    #[test]
    fn test_event_table() {
        let total_pop: i32 = RandomEvent::ALL.iter().map(|e| e.popularity_delta()).sum();
        assert_eq!(total_pop, 40);
        assert_eq!(RandomEvent::NearMiss.capture_risk_delta(), -10);
        assert!(RandomEvent::RivalAgency.headline().contains("+15"));
    }
}
