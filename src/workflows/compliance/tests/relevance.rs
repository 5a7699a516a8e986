use super::common::*;
use crate::workflows::compliance::relevance::SignalWindow;

#[test]
fn ranking_is_a_permutation_of_the_catalog() {
    let catalog = catalog();
    let ranked = ranker().rank(catalog.entries(), &neutral_context(), date(2025, 8, 6));

    assert_eq!(ranked.len(), catalog.len());
    let mut catalog_ids: Vec<&str> = catalog
        .entries()
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    let mut ranked_ids: Vec<&str> = ranked
        .iter()
        .map(|entry| entry.service.id.as_str())
        .collect();
    catalog_ids.sort_unstable();
    ranked_ids.sort_unstable();
    assert_eq!(catalog_ids, ranked_ids);
}

#[test]
fn empty_catalog_ranks_to_an_empty_list() {
    let ranked = ranker().rank(&[], &neutral_context(), date(2025, 8, 6));
    assert!(ranked.is_empty());
}

#[test]
fn dissolution_override_ranks_reinstatement_first() {
    let catalog = catalog();
    let mut context = neutral_context();
    context.is_dissolved = true;
    // Give a competing service every other boost to show the override wins.
    context.recent_view_signals.record("documents");
    context
        .historical_action_patterns
        .push("annual_report".to_string());

    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));

    assert_eq!(ranked[0].service.action, "reinstatement");
    assert!(ranked[0].relevance_score >= 1000);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let catalog = catalog();
    // Past the deadline only the annual-report service scores; everything
    // else ties at zero and must keep its catalog position.
    let ranked = ranker().rank(catalog.entries(), &neutral_context(), date(2025, 8, 6));

    assert_eq!(ranked[0].service.id, "annual-report");
    let remaining: Vec<&str> = ranked[1..]
        .iter()
        .map(|entry| entry.service.id.as_str())
        .collect();
    let expected: Vec<&str> = catalog
        .entries()
        .iter()
        .map(|entry| entry.id.as_str())
        .filter(|id| *id != "annual-report")
        .collect();
    assert_eq!(remaining, expected);
}

#[test]
fn statutory_bands_are_alternatives_not_additive() {
    let catalog = catalog();
    let context = neutral_context();

    // 61 days out: outside the 60-day window, no boost.
    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 3, 1));
    assert_eq!(score_of(&ranked, "annual-report"), 0);

    // 59 days out: inside the window.
    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 3, 3));
    assert_eq!(score_of(&ranked, "annual-report"), 100);

    // Deadline day and beyond: the overdue band replaces the window boost.
    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 5, 1));
    assert_eq!(score_of(&ranked, "annual-report"), 150);
    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 6, 15));
    assert_eq!(score_of(&ranked, "annual-report"), 150);
}

#[test]
fn young_entities_surface_corrections() {
    let catalog = catalog();
    let mut context = neutral_context();
    context.entity_age_days = 10;

    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));
    assert_eq!(score_of(&ranked, "articles-of-correction"), 80);

    context.entity_age_days = 15;
    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));
    assert_eq!(score_of(&ranked, "articles-of-correction"), 0);
}

#[test]
fn document_views_boost_verification_services() {
    let catalog = catalog();
    let mut context = neutral_context();
    context.recent_view_signals.record("documents");

    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));

    assert_eq!(score_of(&ranked, "certified-copies"), 50);
    assert_eq!(score_of(&ranked, "good-standing"), 50);
    assert_eq!(score_of(&ranked, "statement-of-change"), 0);
}

#[test]
fn previously_invoked_actions_are_boosted() {
    let catalog = catalog();
    let mut context = neutral_context();
    context
        .historical_action_patterns
        .push("statement_of_change".to_string());

    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));
    assert_eq!(score_of(&ranked, "statement-of-change"), 40);
}

#[test]
fn boosts_accumulate_across_rules() {
    let catalog = catalog();
    let context = crate::workflows::compliance::relevance::UserContext {
        entity_age_days: 400,
        recent_view_signals: SignalWindow::new(),
        historical_action_patterns: vec!["reinstatement".to_string()],
        is_dissolved: true,
    };

    let ranked = ranker().rank(catalog.entries(), &context, date(2025, 8, 6));
    assert_eq!(score_of(&ranked, "reinstatement"), 1040);
}

#[test]
fn ranking_does_not_mutate_the_catalog() {
    let catalog = catalog();
    let before = catalog.clone();
    let _ = ranker().rank(catalog.entries(), &neutral_context(), date(2025, 8, 6));
    assert_eq!(catalog, before);
}
