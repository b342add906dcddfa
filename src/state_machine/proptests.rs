//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::script;
use super::transition::*;
use super::*;
use crate::places::{LookupError, Provider};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_symptom_label() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(Symptom::labels()).prop_map(String::from),
        1 => Just("fever".to_string()),
        1 => Just("  ".to_string()),
        1 => "[A-Z][a-z]{3,8}",
    ]
}

fn arb_location() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Seattle".to_string()),
        Just("Tacoma".to_string()),
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn arb_provider() -> impl Strategy<Value = Provider> {
    ("[A-Za-z ]{1,20}", "[A-Za-z0-9 ,]{1,30}").prop_map(|(name, address)| Provider::new(name, address))
}

fn arb_lookup_error() -> impl Strategy<Value = LookupError> {
    prop_oneof![
        Just(LookupError::configuration("Google API key not found")),
        "[a-z ]{1,20}".prop_map(LookupError::network),
        "[a-z ]{1,20}".prop_map(LookupError::timeout),
        "[a-z ]{1,20}".prop_map(LookupError::service),
        "[a-z ]{1,20}".prop_map(LookupError::invalid_response),
    ]
}

fn arb_outcome() -> impl Strategy<Value = Result<Vec<Provider>, LookupError>> {
    prop_oneof![
        proptest::collection::vec(arb_provider(), 0..4).prop_map(Ok),
        arb_lookup_error().prop_map(Err),
    ]
}

fn arb_input_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Render),
        proptest::collection::vec(arb_symptom_label(), 0..4)
            .prop_map(|symptoms| Event::SubmitSymptoms { symptoms }),
        any::<bool>().prop_map(|search| Event::AnswerSearch { search }),
        arb_location().prop_map(|location| Event::SubmitLocation { location }),
        (arb_location(), arb_outcome())
            .prop_map(|(location, outcome)| Event::LookupComplete { location, outcome }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        9 => arb_input_event(),
        1 => Just(Event::Reset),
    ]
}

/// Run events from a fresh session, skipping rejected ones
fn run(events: Vec<Event>, seed: u64) -> Session {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new();
    for event in events {
        if let Ok(result) = transition(&session, event, &mut rng) {
            session = result.new_session;
        }
    }
    session
}

fn count(session: &Session, content: &str) -> usize {
    session
        .messages
        .iter()
        .filter(|m| m.content == content)
        .count()
}

fn diagnosis_messages(session: &Session) -> usize {
    session
        .messages
        .iter()
        .filter(|m| m.content.starts_with("Based on your symptoms"))
        .count()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: step never moves backwards and the log never shrinks,
    // except through reset
    #[test]
    fn prop_progress_is_monotonic(
        events in proptest::collection::vec(arb_event(), 0..30),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new();

        for event in events {
            let is_reset = matches!(event, Event::Reset);
            if let Ok(result) = transition(&session, event, &mut rng) {
                let next = result.new_session;
                prop_assert!(Step::ALL.contains(&next.step));
                prop_assert!([0, 1, 2, 3, 4, -1].contains(&next.step.code()));
                if is_reset {
                    prop_assert_eq!(&next, &Session::default());
                } else {
                    prop_assert!(next.step >= session.step, "{:?} -> {:?}", session.step, next.step);
                    prop_assert!(next.messages.starts_with(&session.messages));
                }
                session = next;
            }
        }
    }

    // Invariant 2: entry prompts are emitted at most once per session
    #[test]
    fn prop_entry_messages_never_repeat(
        events in proptest::collection::vec(arb_input_event(), 0..30),
        seed in any::<u64>()
    ) {
        let session = run(events, seed);

        prop_assert!(count(&session, script::GREETING) <= 1);
        prop_assert!(count(&session, script::SYMPTOM_QUESTION) <= 1);
        prop_assert!(count(&session, script::PROVIDER_PROMPT) <= 1);
        prop_assert!(count(&session, script::CLOSING) <= 1);
        prop_assert!(diagnosis_messages(&session) <= 1);
    }

    // Invariant 3: rendering a reached state again changes nothing
    #[test]
    fn prop_render_is_idempotent(
        events in proptest::collection::vec(arb_event(), 0..30),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let once = transition(&run(events, seed), Event::Render, &mut rng).unwrap();
        let twice = transition(&once.new_session, Event::Render, &mut rng).unwrap();

        prop_assert!(twice.effects.is_empty(), "Second render emitted {:?}", twice.effects);
        prop_assert_eq!(twice.new_session, once.new_session);
    }

    // Invariant 4: resting states never include the transient steps
    #[test]
    fn prop_transient_steps_never_rest(
        events in proptest::collection::vec(arb_event(), 1..30),
        seed in any::<u64>()
    ) {
        let mut events = events;
        events.insert(0, Event::Render);
        let session = run(events, seed);

        prop_assert_ne!(session.step, Step::Diagnosis);
    }

    // Invariant 5: samples are distinct catalog members
    #[test]
    fn prop_sampled_diagnoses_distinct(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sample = sample_diagnoses(&mut rng);

        prop_assert_eq!(sample.len(), DIAGNOSIS_SAMPLE_SIZE);
        for (i, diagnosis) in sample.iter().enumerate() {
            prop_assert!(Diagnosis::ALL.contains(diagnosis));
            prop_assert!(!sample[i + 1..].contains(diagnosis));
        }
    }

    // Invariant 6: blank selections never leave the selection step
    #[test]
    fn prop_blank_selection_stays(blanks in proptest::collection::vec("[ \t]{0,3}", 0..4)) {
        let mut rng = StdRng::seed_from_u64(0);
        let session = transition(&Session::new(), Event::Render, &mut rng).unwrap().new_session;
        let result = transition(&session, Event::SubmitSymptoms { symptoms: blanks }, &mut rng).unwrap();

        prop_assert_eq!(&result.new_session, &session);
        prop_assert_eq!(result.warnings().count(), 1);
    }

    // Invariant 7: every lookup outcome ends the conversation
    #[test]
    fn prop_lookup_outcome_always_finishes(outcome in arb_outcome(), seed in any::<u64>()) {
        let session = run(
            vec![
                Event::Render,
                Event::SubmitSymptoms { symptoms: vec!["Headache".to_string()] },
                Event::AnswerSearch { search: true },
                Event::SubmitLocation { location: "Seattle".to_string() },
            ],
            seed,
        );
        prop_assert_eq!(session.pending_lookup.as_deref(), Some("Seattle"));

        let mut rng = StdRng::seed_from_u64(seed);
        let result = transition(
            &session,
            Event::LookupComplete { location: "Seattle".to_string(), outcome },
            &mut rng,
        ).unwrap();

        prop_assert_eq!(result.new_session.step, Step::Finished);
        prop_assert_eq!(result.messages().count(), 2);
        prop_assert_eq!(
            result.new_session.messages.last().map(|m| m.content.as_str()),
            Some(script::CLOSING)
        );
    }

    // Invariant 8: reachable sessions survive a JSON round trip
    #[test]
    fn prop_session_is_serializable(
        events in proptest::collection::vec(arb_event(), 0..30),
        seed in any::<u64>()
    ) {
        let session = run(events, seed);
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored, session);
    }
}
