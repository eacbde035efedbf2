//! News headlines.
//!
//! Headlines draw from their own RNG stream so flavor text never shifts the
//! rolls that decide the game.

use crate::core::{Dice, GameRng, GameState};

const LOW_POPULARITY: &[&str] = &[
    "MYSTERIOUS DEATHS CONTINUE - Police baffled by 'natural causes'",
    "'THE JUDGE' - Internet sleuths debate vigilante identity",
    "Another 'impossible' death rocks the criminal underworld",
    "Conspiracy theories swirl as deaths defy explanation",
    "Police admit they're 'completely stumped' by the deaths",
    "Is this the work of a serial killer? Experts debate",
    "Deaths linked to 'A Silent Judge' in online conspiracy circles",
    "Skeptics claim murders are just coincidental heart attacks",
];

const MEDIUM_POPULARITY: &[&str] = &[
    "Online community forms cult around 'The Judge' figure",
    "'THE JUDGE' - Public divided on vigilante justice",
    "More victims fall to 'impossible' deaths",
    "Support groups form both for and against The Judge",
    "Criminal underworld trembles at The Judge's power",
    "Is The Judge a hero? Online poll shows 50/50 split",
    "Police struggle to find leads in 'Judge' case",
    "Former criminals praise The Judge's work",
];

const HIGH_POPULARITY: &[&str] = &[
    "People worship 'The Judge' as a god!",
    "'THE JUDGE' - Is this the end of crime as we know it?",
    "The Judge is untouchable - internet declares victory",
    "Entire criminal organizations surrender to authorities out of fear",
    "World leaders discuss The Judge's 'clean-up' of society",
    "The Judge has become an international phenomenon",
    "Could The Judge really be unstoppable? World wonders",
    "Police beginning to admit defeat - The Judge is winning",
];

const UNSTOPPABLE: &[&str] = &[
    "ANALYSIS: Is The Judge UNSTOPPABLE? Experts say yes",
    "The Judge has operated for so long, experts wonder if they'll EVER be caught",
    "Has The Judge transcended mortal law? Philosophers weigh in",
    "Police resources drained - The Judge continues unchecked",
    "The world considers the idea of The Judge as a permanent fixture",
    "Forget Sherlock Holmes - The Judge is the perfect criminal",
    "Is The Judge a ghost? No body, no evidence, no arrests",
    "The Judge's reign appears ETERNAL - officials begin to give up hope",
];

const QUIET_NEWS: &[&str] = &[
    "The Judge seems to have gone quiet...",
    "Is The Judge done? Internet debates intensify.",
    "Police celebrate what they think is a victory.",
];

/// Popularity that counts as a "popular" turn for the unstoppable streak.
const POPULAR_TURN: i32 = 50;
/// Popular turns needed before unstoppable headlines can run.
const UNSTOPPABLE_STREAK: u32 = 5;
const UNSTOPPABLE_CHANCE: f64 = 0.4;
const UNSTOPPABLE_MAX_RISK: i32 = 30;
const HIGH_POPULARITY_FROM: i32 = 60;
const MEDIUM_POPULARITY_FROM: i32 = 30;
const QUIET_NEWS_CHANCE: f64 = 0.15;

/// Picks headlines and tracks how long the Judge has been popular.
#[derive(Clone, Debug)]
pub struct Newsroom {
    rng: GameRng,
    popular_turns: u32,
}

impl Newsroom {
    /// Create a newsroom with its own stream derived from the game RNG.
    #[must_use]
    pub fn new(game_rng: &GameRng) -> Self {
        Self {
            rng: game_rng.for_context("news"),
            popular_turns: 0,
        }
    }

    /// Turns (so far) that opened with popularity of at least 50%.
    #[must_use]
    pub fn popular_turns(&self) -> u32 {
        self.popular_turns
    }

    /// Headline for the start of a turn. Call once per displayed turn.
    pub fn headline(&mut self, state: &GameState) -> &'static str {
        let popularity = state.popularity.get();
        if popularity >= POPULAR_TURN {
            self.popular_turns += 1;
        }

        let untouchable = popularity >= HIGH_POPULARITY_FROM
            && state.capture_risk.get() <= UNSTOPPABLE_MAX_RISK
            && self.popular_turns >= UNSTOPPABLE_STREAK;

        let pool = if untouchable && self.rng.chance(UNSTOPPABLE_CHANCE) {
            UNSTOPPABLE
        } else if popularity >= HIGH_POPULARITY_FROM {
            HIGH_POPULARITY
        } else if popularity >= MEDIUM_POPULARITY_FROM {
            MEDIUM_POPULARITY
        } else {
            LOW_POPULARITY
        };
        pool[self.rng.index(pool.len())]
    }

    /// Occasional line after a skipped turn.
    pub fn quiet_news(&mut self) -> Option<&'static str> {
        if self.rng.chance(QUIET_NEWS_CHANCE) {
            Some(QUIET_NEWS[self.rng.index(QUIET_NEWS.len())])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Gauge, JudgeConfig};

    fn state_with(popularity: i32, risk: i32) -> GameState {
        let mut state = GameState::new(&JudgeConfig::default());
        state.popularity = Gauge::settle(popularity);
        state.capture_risk = Gauge::settle(risk);
        state
    }

    #[test]
    fn test_pool_follows_popularity() {
        let mut news = Newsroom::new(&GameRng::new(1));

        assert!(LOW_POPULARITY.contains(&news.headline(&state_with(10, 0))));
        assert!(MEDIUM_POPULARITY.contains(&news.headline(&state_with(30, 0))));
        assert!(HIGH_POPULARITY.contains(&news.headline(&state_with(60, 90))));
    }

    #[test]
    fn test_streak_counts_popular_turns() {
        let mut news = Newsroom::new(&GameRng::new(1));

        news.headline(&state_with(49, 0));
        news.headline(&state_with(50, 0));
        news.headline(&state_with(80, 0));

        assert_eq!(news.popular_turns(), 2);
    }

    #[test]
    fn test_unstoppable_needs_streak() {
        let mut news = Newsroom::new(&GameRng::new(9));
        let adored = state_with(90, 10);

        for _ in 0..4 {
            assert!(HIGH_POPULARITY.contains(&news.headline(&adored)));
        }

        let mut saw_unstoppable = false;
        for _ in 0..50 {
            let h = news.headline(&adored);
            assert!(HIGH_POPULARITY.contains(&h) || UNSTOPPABLE.contains(&h));
            saw_unstoppable |= UNSTOPPABLE.contains(&h);
        }
        assert!(saw_unstoppable);
    }

    #[test]
    fn test_news_stream_is_separate() {
        let game = GameRng::new(3);
        let mut a = Newsroom::new(&game);
        let mut b = Newsroom::new(&game);
        let state = state_with(40, 20);

        for _ in 0..10 {
            assert_eq!(a.headline(&state), b.headline(&state));
        }
    }

    #[test]
    fn test_quiet_news_is_occasional() {
        let mut news = Newsroom::new(&GameRng::new(5));
        let lines: Vec<_> = (0..200).filter_map(|_| news.quiet_news()).collect();

        assert!(!lines.is_empty());
        assert!(lines.len() < 100);
        assert!(lines.iter().all(|l| QUIET_NEWS.contains(l)));
    }
}
