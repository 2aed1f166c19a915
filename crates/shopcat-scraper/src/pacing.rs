//! Pacing policy for interactions with the storefront.
//!
//! Sleeps between interactions give lazily loaded content time to render
//! and keep request cadence irregular. They are not needed for correctness,
//! so the policy is injectable and [`NoPacing`] turns it off entirely.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

/// The moments at which the engine pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Between infinite-scroll steps on one listing page.
    Scroll,
    /// After clicking through to the next listing page.
    PageTurn,
    /// After scrolling the load-more control into view, before clicking it.
    BeforeLoadMoreClick,
    /// After clicking the load-more control.
    AfterLoadMoreClick,
    /// Between sold-out sections.
    Section,
    /// Between the available and sold-out phases.
    PhaseBreak,
}

impl Pause {
    /// Delay range in seconds drawn from by [`RandomPacer`].
    #[must_use]
    pub fn range_secs(self) -> RangeInclusive<f64> {
        match self {
            Pause::Scroll => 2.0..=3.0,
            Pause::PageTurn | Pause::Section => 1.0..=10.0,
            Pause::BeforeLoadMoreClick => 1.5..=2.5,
            Pause::AfterLoadMoreClick => 2.5..=3.5,
            Pause::PhaseBreak => 8.0..=12.0,
        }
    }
}

/// Chooses how long to sleep at each [`Pause`].
pub trait Pacer {
    fn delay_for(&self, pause: Pause) -> Duration;
}

/// Uniformly random delays within each pause's range.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPacer;

impl Pacer for RandomPacer {
    fn delay_for(&self, pause: Pause) -> Duration {
        let secs = rand::rng().random_range(pause.range_secs());
        Duration::from_secs_f64(secs)
    }
}

/// Zero delay everywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn delay_for(&self, _pause: Pause) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Pause; 6] = [
        Pause::Scroll,
        Pause::PageTurn,
        Pause::BeforeLoadMoreClick,
        Pause::AfterLoadMoreClick,
        Pause::Section,
        Pause::PhaseBreak,
    ];

    #[test]
    fn random_delays_stay_within_range() {
        let pacer = RandomPacer;
        for pause in ALL {
            let range = pause.range_secs();
            for _ in 0..50 {
                let secs = pacer.delay_for(pause).as_secs_f64();
                assert!(
                    range.contains(&secs),
                    "{pause:?} produced {secs}s outside {range:?}"
                );
            }
        }
    }

    #[test]
    fn page_turn_range_is_wider_than_scroll_range() {
        let scroll = Pause::Scroll.range_secs();
        let turn = Pause::PageTurn.range_secs();
        assert!(turn.end() - turn.start() > scroll.end() - scroll.start());
    }

    #[test]
    fn no_pacing_is_always_zero() {
        for pause in ALL {
            assert_eq!(NoPacing.delay_for(pause), Duration::ZERO);
        }
    }
}
