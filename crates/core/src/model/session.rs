use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::model::StudyItem;
use crate::shuffle::shuffled;

/// Points awarded for the first reveal of an item.
pub const SCORE_PER_REVEAL: u32 = 10;

/// A streak milestone is reported every this many consecutive first reveals.
pub const STREAK_MILESTONE_INTERVAL: u32 = 5;

//
// ─── OUTCOMES & EVENTS ─────────────────────────────────────────────────────────
//

/// Completion thresholds, each reported at most once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Milestone {
    Quarter,
    Half,
    ThreeQuarters,
    Complete,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::Quarter,
        Milestone::Half,
        Milestone::ThreeQuarters,
        Milestone::Complete,
    ];

    #[must_use]
    pub fn percent(self) -> u32 {
        match self {
            Milestone::Quarter => 25,
            Milestone::Half => 50,
            Milestone::ThreeQuarters => 75,
            Milestone::Complete => 100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Milestone::Quarter => "Quarter Master!",
            Milestone::Half => "Halfway Hero!",
            Milestone::ThreeQuarters => "Almost There!",
            Milestone::Complete => "Master Completed!",
        }
    }

    /// True when `studied / total` is exactly this threshold.
    fn reached_exactly(self, studied: usize, total: usize) -> bool {
        total > 0 && studied * 100 == self.percent() as usize * total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The item at `index` was revealed for the first time; `streak` is the
    /// streak count after the reveal.
    FirstReveal { index: usize, streak: u32 },
    /// The item was already revealed; no counters changed.
    Repeat { index: usize },
    /// The session has no items.
    Empty,
}

impl RevealOutcome {
    #[must_use]
    pub fn is_first(&self) -> bool {
        matches!(self, RevealOutcome::FirstReveal { .. })
    }

    /// Streak count to celebrate, if this reveal landed on a multiple of
    /// `STREAK_MILESTONE_INTERVAL`.
    #[must_use]
    pub fn streak_milestone(&self) -> Option<u32> {
        match self {
            RevealOutcome::FirstReveal { streak, .. }
                if *streak > 0 && streak % STREAK_MILESTONE_INTERVAL == 0 =>
            {
                Some(*streak)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Advanced { position: usize },
    Retreated { position: usize },
    AtEnd,
    AtStart,
}

impl NavigationOutcome {
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Advanced { .. } | NavigationOutcome::Retreated { .. }
        )
    }
}

/// Read-only view of session progress for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// 1-based card number; 0 when the session is empty.
    pub current: usize,
    pub total: usize,
    pub studied: usize,
    pub score: u32,
    pub streak: u32,
    pub percentage: f64,
}

/// Final statistics reported when study mode is exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub studied: usize,
    pub total: usize,
    pub score: u32,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Everything the presentation layer may need to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum StudyEvent {
    Started { total: usize },
    Revealed(RevealOutcome),
    Navigated(NavigationOutcome),
    StreakMilestone(u32),
    CompletionMilestone(Milestone),
    SessionReset,
    Finished(SessionSummary),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Progress through an ordered set of study items.
///
/// Holds no display state. Navigation saturates at both ends and every
/// operation on an empty session is a no-op that reports a boundary outcome.
#[derive(Debug, Clone)]
pub struct StudySession {
    items: Vec<StudyItem>,
    position: usize,
    revealed: BTreeSet<usize>,
    streak: u32,
    milestones: BTreeSet<Milestone>,
    started_at: DateTime<Utc>,
}

impl StudySession {
    /// Create a session over `items` in the given order.
    #[must_use]
    pub fn new(items: Vec<StudyItem>, started_at: DateTime<Utc>) -> Self {
        Self {
            items,
            position: 0,
            revealed: BTreeSet::new(),
            streak: 0,
            milestones: BTreeSet::new(),
            started_at,
        }
    }

    /// Create a session over a shuffled copy of `items`.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(
        items: &[StudyItem],
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::new(shuffled(items, rng), started_at)
    }

    #[must_use]
    pub fn items(&self) -> &[StudyItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&StudyItem> {
        self.items.get(self.position)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    #[must_use]
    pub fn studied(&self) -> usize {
        self.revealed.len()
    }

    /// Always `SCORE_PER_REVEAL` times the number of revealed items.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.revealed.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(SCORE_PER_REVEAL)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn fired_milestones(&self) -> impl Iterator<Item = Milestone> + '_ {
        self.milestones.iter().copied()
    }

    /// Mark the current item as revealed.
    pub fn reveal(&mut self) -> RevealOutcome {
        if self.items.is_empty() {
            return RevealOutcome::Empty;
        }
        let index = self.position;
        if !self.revealed.insert(index) {
            return RevealOutcome::Repeat { index };
        }
        self.streak = self.streak.saturating_add(1);
        RevealOutcome::FirstReveal {
            index,
            streak: self.streak,
        }
    }

    pub fn next(&mut self) -> NavigationOutcome {
        if self.position + 1 < self.items.len() {
            self.position += 1;
            NavigationOutcome::Advanced {
                position: self.position,
            }
        } else {
            NavigationOutcome::AtEnd
        }
    }

    pub fn previous(&mut self) -> NavigationOutcome {
        if self.position > 0 && !self.items.is_empty() {
            self.position -= 1;
            NavigationOutcome::Retreated {
                position: self.position,
            }
        } else {
            NavigationOutcome::AtStart
        }
    }

    /// Pure progress read.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let total = self.items.len();
        let studied = self.revealed.len();
        #[allow(clippy::cast_precision_loss)]
        let percentage = if total == 0 {
            0.0
        } else {
            (studied as f64 / total as f64) * 100.0
        };

        ProgressSnapshot {
            current: if total == 0 { 0 } else { self.position + 1 },
            total,
            studied,
            score: self.score(),
            streak: self.streak,
            percentage,
        }
    }

    /// Progress read that also fires a completion milestone.
    ///
    /// A threshold fires only when the studied fraction equals it exactly and
    /// it has not fired yet this session; sizes that never land on a
    /// threshold never fire it.
    pub fn check_progress(&mut self) -> (ProgressSnapshot, Option<Milestone>) {
        let snapshot = self.snapshot();
        let hit = Milestone::ALL.into_iter().find(|m| {
            !self.milestones.contains(m) && m.reached_exactly(snapshot.studied, snapshot.total)
        });
        if let Some(milestone) = hit {
            self.milestones.insert(milestone);
        }
        (snapshot, hit)
    }

    /// Replace the working set with a shuffled copy of `new_items` and clear
    /// every counter.
    pub fn reset<R: Rng + ?Sized>(&mut self, new_items: &[StudyItem], rng: &mut R) {
        self.items = shuffled(new_items, rng);
        self.position = 0;
        self.revealed.clear();
        self.streak = 0;
        self.milestones.clear();
    }

    #[must_use]
    pub fn summary(&self, completed_at: DateTime<Utc>) -> SessionSummary {
        let total = self.items.len();
        let studied = self.revealed.len();
        let percentage = if total == 0 {
            0
        } else {
            u32::try_from((studied * 100 + total / 2) / total).unwrap_or(100)
        };

        SessionSummary {
            studied,
            total,
            score: self.score(),
            percentage,
            started_at: self.started_at,
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(n: usize) -> Vec<StudyItem> {
        (0..n)
            .map(|i| {
                StudyItem::new(format!("T{i}"), format!("D{i}"), "", "Cat").unwrap()
            })
            .collect()
    }

    fn assert_score_invariant(session: &StudySession) {
        assert_eq!(
            session.score(),
            SCORE_PER_REVEAL * u32::try_from(session.studied()).unwrap()
        );
        assert!(session.revealed.iter().all(|i| *i < session.len()));
    }

    #[test]
    fn repeat_reveal_changes_nothing() {
        let mut session = StudySession::new(items(3), fixed_now());
        assert!(!session.is_revealed(0));
        let first = session.reveal();
        assert!(first.is_first());
        assert_eq!(first, RevealOutcome::FirstReveal { index: 0, streak: 1 });
        assert!(session.is_revealed(0));
        assert!(!session.is_revealed(1));

        let before = session.snapshot();
        let repeat = session.reveal();
        assert!(!repeat.is_first());
        assert_eq!(repeat, RevealOutcome::Repeat { index: 0 });
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.score(), 10);
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn navigation_saturates() {
        let mut session = StudySession::new(items(2), fixed_now());
        assert_eq!(session.previous(), NavigationOutcome::AtStart);
        assert_eq!(session.position(), 0);
        assert_eq!(session.next(), NavigationOutcome::Advanced { position: 1 });
        assert_eq!(session.next(), NavigationOutcome::AtEnd);
        assert_eq!(session.position(), 1);
        assert_eq!(session.previous(), NavigationOutcome::Retreated { position: 0 });
    }

    #[test]
    fn empty_session_is_inert() {
        let mut session = StudySession::new(Vec::new(), fixed_now());
        assert_eq!(session.reveal(), RevealOutcome::Empty);
        assert_eq!(session.next(), NavigationOutcome::AtEnd);
        assert_eq!(session.previous(), NavigationOutcome::AtStart);
        let (snapshot, milestone) = session.check_progress();
        assert_eq!(snapshot.current, 0);
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.percentage.abs() < f64::EPSILON);
        assert!(milestone.is_none());
        assert!(session.current_item().is_none());
        assert_eq!(session.summary(fixed_now()).percentage, 0);
    }

    #[test]
    fn streak_milestones_every_five() {
        let mut session = StudySession::new(items(16), fixed_now());
        let mut fired = Vec::new();
        for _ in 0..16 {
            let outcome = session.reveal();
            fired.extend(outcome.streak_milestone());
            // repeat reveals never fire
            assert!(session.reveal().streak_milestone().is_none());
            session.next();
            assert_score_invariant(&session);
        }
        assert_eq!(fired, vec![5, 10, 15]);
    }

    #[test]
    fn four_items_complete_fires_once() {
        let mut session = StudySession::new(items(4), fixed_now());
        let mut fired = Vec::new();
        for step in 0..4 {
            session.reveal();
            let (_, milestone) = session.check_progress();
            fired.push((step, milestone));
            session.next();
        }
        assert_eq!(
            fired,
            vec![
                (0, Some(Milestone::Quarter)),
                (1, Some(Milestone::Half)),
                (2, Some(Milestone::ThreeQuarters)),
                (3, Some(Milestone::Complete)),
            ]
        );

        let (snapshot, again) = session.check_progress();
        assert!(again.is_none());
        assert_eq!(snapshot.studied, 4);
        assert_eq!(snapshot.total, 4);
        assert_eq!(snapshot.score, 40);
        assert!((snapshot.percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn thresholds_skipped_when_size_does_not_divide() {
        let mut session = StudySession::new(items(3), fixed_now());
        let mut fired = Vec::new();
        for _ in 0..3 {
            session.reveal();
            fired.extend(session.check_progress().1);
            session.next();
        }
        assert_eq!(fired, vec![Milestone::Complete]);
    }

    #[test]
    fn reset_clears_counters_and_keeps_multiset() {
        let source = items(6);
        let mut session = StudySession::new(source.clone(), fixed_now());
        session.reveal();
        session.next();
        session.reveal();
        session.check_progress();

        let mut rng = StdRng::seed_from_u64(11);
        session.reset(&source, &mut rng);

        assert_eq!(session.position(), 0);
        assert_eq!(session.studied(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.fired_milestones().count(), 0);

        let mut got: Vec<_> = session.items().iter().map(|i| i.term().to_owned()).collect();
        let mut want: Vec<_> = source.iter().map(|i| i.term().to_owned()).collect();
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn summary_rounds_percentage() {
        let mut session = StudySession::new(items(3), fixed_now());
        session.reveal();
        let summary = session.summary(fixed_now());
        assert_eq!(summary.studied, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.score, 10);
        assert_eq!(summary.percentage, 33);

        session.next();
        session.reveal();
        assert_eq!(session.summary(fixed_now()).percentage, 67);
    }
}
