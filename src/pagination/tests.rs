//! Tests for pagination module

use super::*;
use test_case::test_case;

// ============================================================================
// PageState Tests
// ============================================================================

#[test]
fn test_page_state_first() {
    let state = PageState::first("jobs");
    assert_eq!(state.endpoint, "jobs");
    assert_eq!(state.page, 1);
}

#[test]
fn test_page_state_next_keeps_endpoint() {
    let state = PageState::first("applicants2jobs").next().next();
    assert_eq!(state.endpoint, "applicants2jobs");
    assert_eq!(state.page, 3);
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_continue() {
    let next = NextPage::Continue(PageState::first("users").next());
    assert_eq!(next.state().map(|s| s.page), Some(2));
}

#[test]
fn test_next_page_done() {
    let next = NextPage::Done;
    assert_eq!(next.state(), None);
}

// ============================================================================
// FullPagePaginator Tests
// ============================================================================

#[test]
fn test_default_page_size() {
    assert_eq!(FullPagePaginator::new().page_size, 100);
    assert_eq!(PAGE_SIZE, 100);
}

#[test_case(0, false ; "empty page stops")]
#[test_case(1, false ; "single record stops")]
#[test_case(50, false ; "half page stops")]
#[test_case(99, false ; "one short stops")]
#[test_case(100, true ; "full page continues")]
#[test_case(101, false ; "oversized page stops")]
fn test_page_was_full(count: usize, expected: bool) {
    assert_eq!(FullPagePaginator::new().page_was_full(count), expected);
}

#[test]
fn test_process_full_page_advances() {
    let paginator = FullPagePaginator::new();
    let state = PageState::first("tasks");

    let next = paginator.process_page(state, 100);
    assert_eq!(next, NextPage::Continue(PageState { endpoint: "tasks", page: 2 }));
}

#[test]
fn test_process_short_page_finishes() {
    let paginator = FullPagePaginator::new();
    let state = PageState { endpoint: "tasks", page: 7 };

    assert_eq!(paginator.process_page(state, 42), NextPage::Done);
    assert_eq!(paginator.process_page(state, 0), NextPage::Done);
}

#[test]
fn test_custom_page_size() {
    let paginator = FullPagePaginator::with_page_size(2);
    assert!(paginator.page_was_full(2));
    assert!(!paginator.page_was_full(1));
}

#[test]
fn test_page_sequence_full_then_empty() {
    // 100 records then 0: the empty second page ends the run
    let paginator = FullPagePaginator::new();
    let mut state = Some(PageState::first("hires"));
    let mut requested = Vec::new();

    for count in [100, 0] {
        let current = state.expect("pager stopped early");
        requested.push(current.page);
        state = paginator.process_page(current, count).state();
    }

    assert_eq!(requested, vec![1, 2]);
    assert_eq!(state, None);
}
