//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::config::ChatConfig;
use crate::rules::{Topic, CHAT_RULES};
use crate::transcript::Speaker;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ChatContext {
    ChatContext::new("test-session", &ChatConfig::default())
}

fn message(text: &str, reply_id: String) -> Event {
    Event::UserMessage {
        text: text.to_string(),
        origin: Origin::ChatInput,
        reply_id,
    }
}

fn appended(effects: &[Effect], who: Speaker) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AppendTurn { speaker, text, .. } if *speaker == who => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Feed events through `transition`, collecting every effect
fn run(events: Vec<Event>) -> (ChatState, Vec<Effect>) {
    let context = test_context();
    let mut state = ChatState::Idle;
    let mut effects = Vec::new();
    for event in events {
        let result = transition(&state, &context, event);
        state = result.new_state;
        effects.extend(result.effects);
    }
    (state, effects)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

const PHRASES: &[&str] = &[
    "experience",
    "years",
    "skills",
    "expertise",
    "project",
    "results",
    "seo",
    "pagespeed",
    "backlinks",
    "hello",
    "what is this",
];

fn arb_phrase() -> impl Strategy<Value = String> {
    proptest::sample::select(PHRASES).prop_map(str::to_string)
}

fn arb_noise() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    proptest::collection::vec(arb_phrase(), 0..4).prop_map(|texts| {
        let events = texts
            .iter()
            .enumerate()
            .map(|(i, text)| message(text, format!("r{i}")))
            .collect();
        run(events).0
    })
}

/// Submissions followed by their timers firing in an arbitrary order
fn arb_submissions_and_timer_order() -> impl Strategy<Value = (Vec<String>, Vec<usize>)> {
    proptest::collection::vec(arb_phrase(), 1..8).prop_flat_map(|texts| {
        let order: Vec<usize> = (0..texts.len()).collect();
        (Just(texts), Just(order).prop_shuffle())
    })
}

proptest! {
    // Invariant 1: blank input never changes state or produces effects
    #[test]
    fn prop_blank_input_is_noop(state in arb_state(), text in arb_blank()) {
        let result = transition(&state, &test_context(), message(&text, "blank".to_string()));
        prop_assert_eq!(result.new_state, state);
        prop_assert!(result.effects.is_empty());
    }

    // Invariant 2: input containing "experience" or "years" gets the Experience reply
    #[test]
    fn prop_experience_keyword_wins(
        prefix in arb_noise(),
        keyword in prop_oneof![Just("experience"), Just("years"), Just("EXPERIENCE")],
        suffix in arb_noise(),
    ) {
        let text = format!("{prefix}{keyword}{suffix}");
        prop_assert_eq!(CHAT_RULES.resolve(&text).topic, Topic::Experience);
    }

    // Invariant 3: "skill"/"expertise" gets Skills unless experience matched first
    #[test]
    fn prop_skills_keyword_below_experience(
        prefix in arb_noise(),
        keyword in prop_oneof![Just("skill"), Just("expertise")],
        suffix in arb_noise(),
    ) {
        let text = format!("{prefix}{keyword}{suffix}");
        let expected = if text.contains("experience") || text.contains("years") {
            Topic::Experience
        } else {
            Topic::Skills
        };
        prop_assert_eq!(CHAT_RULES.resolve(&text).topic, expected);
    }

    // Invariant 4: every non-blank message appends exactly one user turn and
    // schedules exactly one reply
    #[test]
    fn prop_message_appends_user_turn(state in arb_state(), text in arb_phrase(), noise in arb_noise()) {
        let text = format!("{noise} {text} ");
        let result = transition(&state, &test_context(), message(&text, "new".to_string()));

        prop_assert_eq!(appended(&result.effects, Speaker::User), vec![text.trim().to_string()]);
        let scheduled = result.effects.iter().filter(|e| matches!(e, Effect::ScheduleReply { .. })).count();
        prop_assert_eq!(scheduled, 1);
        prop_assert_eq!(result.new_state.pending_count(), state.pending_count() + 1);
        prop_assert!(result.new_state.is_composing());
    }

    // Invariant 5: reset always lands in Idle and cancels timers
    #[test]
    fn prop_reset_always_idle(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::Reset);
        prop_assert_eq!(result.new_state, ChatState::Idle);
        prop_assert!(result.effects.contains(&Effect::CancelReplies));
        prop_assert!(result.effects.contains(&Effect::ResetTranscript));
        prop_assert!(appended(&result.effects, Speaker::Assistant).is_empty());
    }

    // Invariant 6: replies are appended in submission order no matter which
    // timer fires first
    #[test]
    fn prop_replies_follow_submission_order((texts, order) in arb_submissions_and_timer_order()) {
        let mut events: Vec<Event> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| message(text, format!("r{i}")))
            .collect();
        events.extend(order.iter().map(|i| Event::ReplyDue { reply_id: format!("r{i}") }));

        let (state, effects) = run(events);

        let expected: Vec<String> = texts
            .iter()
            .map(|text| CHAT_RULES.resolve(text).text.to_string())
            .collect();
        prop_assert_eq!(appended(&effects, Speaker::Assistant), expected);
        prop_assert_eq!(state, ChatState::Idle);
    }

    // Invariant 7: the composing flag turns on once and off once per busy period
    #[test]
    fn prop_composing_notifications_pair_up((texts, order) in arb_submissions_and_timer_order()) {
        let mut events: Vec<Event> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| message(text, format!("r{i}")))
            .collect();
        events.extend(order.iter().map(|i| Event::ReplyDue { reply_id: format!("r{i}") }));

        let (_, effects) = run(events);
        let flags: Vec<bool> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::NotifyComposing { composing } => Some(*composing),
                _ => None,
            })
            .collect();
        prop_assert_eq!(flags, vec![true, false]);
    }

    // Invariant 8: after a reset, timers from before it append nothing
    #[test]
    fn prop_timers_after_reset_are_ignored(texts in proptest::collection::vec(arb_phrase(), 1..5)) {
        let mut events: Vec<Event> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| message(text, format!("r{i}")))
            .collect();
        events.push(Event::Reset);
        events.extend((0..texts.len()).map(|i| Event::ReplyDue { reply_id: format!("r{i}") }));

        let (state, effects) = run(events);
        prop_assert!(appended(&effects, Speaker::Assistant).is_empty());
        prop_assert_eq!(state, ChatState::Idle);
    }
}
