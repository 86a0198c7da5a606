use std::sync::Arc;

use glossary_core::model::{Catalog, Milestone, StudyEvent, StudyItem};
use glossary_core::time::{fixed_clock, fixed_now};
use services::{StudyError, StudyModeService};

fn four_term_catalog() -> Catalog {
    Catalog::from_items(
        ["Alpha", "Beta", "Gamma", "Delta"]
            .into_iter()
            .map(|t| StudyItem::new(t, format!("{t} definition"), "", "Greek").unwrap())
            .collect(),
    )
}

#[test]
fn full_session_reaches_completion_once() {
    let mut svc =
        StudyModeService::new(fixed_clock(), Arc::new(four_term_catalog())).with_rng_seed(9);
    svc.start().unwrap();

    let mut complete_events = 0;
    for step in 0..4 {
        let update = svc.reveal().unwrap();
        assert_eq!(update.snapshot.score, 10 * (step + 1));
        let fired = update.completion_milestones();
        if step == 3 {
            assert_eq!(fired, vec![Milestone::Complete]);
        }
        complete_events += fired.iter().filter(|m| **m == Milestone::Complete).count();
        svc.next().unwrap();
    }

    let progress = svc.reveal().unwrap();
    assert!(progress.completion_milestones().is_empty());
    assert_eq!(progress.snapshot.studied, 4);
    assert_eq!(progress.snapshot.total, 4);
    assert_eq!(progress.snapshot.score, 40);
    assert!((progress.snapshot.percentage - 100.0).abs() < f64::EPSILON);
    assert_eq!(complete_events, 1);

    let summary = svc.exit().unwrap().expect("studied terms produce a summary");
    assert_eq!(summary.studied, 4);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.score, 40);
    assert_eq!(summary.percentage, 100);
    assert_eq!(summary.started_at, fixed_now());
}

#[test]
fn last_card_reports_at_end() {
    let mut svc =
        StudyModeService::new(fixed_clock(), Arc::new(four_term_catalog())).with_rng_seed(1);
    svc.start().unwrap();
    for _ in 0..3 {
        svc.next().unwrap();
    }
    let update = svc.next().unwrap();
    assert_eq!(
        update.events,
        vec![StudyEvent::Navigated(glossary_core::model::NavigationOutcome::AtEnd)]
    );
    assert_eq!(update.snapshot.current, 4);
    assert!(!update.card.unwrap().can_go_forward);
}

#[test]
fn reset_starts_fresh_and_refires_milestones() {
    let mut svc =
        StudyModeService::new(fixed_clock(), Arc::new(four_term_catalog())).with_rng_seed(2);
    svc.start().unwrap();
    assert_eq!(svc.reveal().unwrap().completion_milestones(), vec![Milestone::Quarter]);

    let reset = svc.reset().unwrap();
    assert_eq!(reset.events, vec![StudyEvent::SessionReset]);
    assert_eq!(reset.snapshot.score, 0);
    assert_eq!(reset.snapshot.streak, 0);
    assert_eq!(reset.snapshot.current, 1);

    assert_eq!(svc.reveal().unwrap().completion_milestones(), vec![Milestone::Quarter]);
}

#[test]
fn streak_milestone_at_five() {
    let mut svc =
        StudyModeService::new(fixed_clock(), Arc::new(Catalog::builtin())).with_rng_seed(4);
    svc.start().unwrap();

    let mut streaks = Vec::new();
    for _ in 0..10 {
        streaks.extend(svc.reveal().unwrap().streak_milestones());
        streaks.extend(svc.reveal().unwrap().streak_milestones());
        svc.next().unwrap();
    }
    assert_eq!(streaks, vec![5, 10]);
}

#[test]
fn filter_during_session_applies_on_reset() {
    let mut svc =
        StudyModeService::new(fixed_clock(), Arc::new(Catalog::builtin())).with_rng_seed(3);
    let started = svc.start().unwrap();
    assert_eq!(started.snapshot.total, 12);

    svc.set_filter("RSI", None);
    assert_eq!(svc.current().unwrap().snapshot.total, 12);

    let reset = svc.reset().unwrap();
    assert_eq!(reset.snapshot.total, 1);
    assert_eq!(reset.card.unwrap().term, "RSI (Relative Strength Index)");

    svc.set_filter("no such term", None);
    assert_eq!(svc.reset().unwrap_err(), StudyError::EmptyCatalog);
    assert_eq!(svc.current().unwrap().snapshot.total, 1);
}
