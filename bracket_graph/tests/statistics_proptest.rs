/// Property-based tests for derived participant statistics using proptest
///
/// These tests generate random brackets (including inconsistent matches) and
/// verify the invariants the resolver must hold for any input.
use bracket_graph::graph::{MatchFilter, MatchId, MatchState, ParticipantId, resolve};
use bracket_graph::wire::{MatchRecord, ParticipantRecord, TournamentPayload};
use proptest::prelude::*;
use std::collections::HashSet;

// Strategy to generate a match state
fn state_strategy() -> impl Strategy<Value = MatchState> {
    prop_oneof![
        Just(MatchState::Pending),
        Just(MatchState::Open),
        Just(MatchState::Complete),
    ]
}

// Participant ids 1..=8 exist; 9 and 10 never do
fn player_strategy() -> impl Strategy<Value = Option<ParticipantId>> {
    prop::option::weighted(0.9, 1i64..=10)
}

// Strategy to generate a single match record with a given id
fn match_strategy(id: MatchId) -> impl Strategy<Value = MatchRecord> {
    (
        state_strategy(),
        player_strategy(),
        player_strategy(),
        0u8..4,
        0i64..5,
        0i64..5,
    )
        .prop_map(move |(state, one, two, winner_pick, s1, s2)| {
            let winner_id = match winner_pick {
                0 => one,
                1 => two,
                2 => None,
                _ => Some(7),
            };
            MatchRecord {
                player_one_id: one,
                player_two_id: two,
                winner_id,
                scores_csv: Some(format!("{}-{}", s1, s2)),
                ..MatchRecord::new(id, state)
            }
        })
}

// Strategy to generate a whole payload with 8 participants
fn payload_strategy() -> impl Strategy<Value = TournamentPayload> {
    (0usize..24)
        .prop_flat_map(|len| {
            (0..len)
                .map(|i| match_strategy(i as MatchId + 100))
                .collect::<Vec<_>>()
        })
        .prop_map(|records| {
            let mut payload = TournamentPayload::new(1, "Random", "random");
            for id in 1..=8 {
                payload.push_participant(ParticipantRecord::new(id, format!("p{}", id)));
            }
            for record in records {
                payload.push_match(record);
            }
            payload
        })
}

proptest! {
    #[test]
    fn test_wins_plus_losses_equals_completed_matches(payload in payload_strategy()) {
        let resolution = resolve(payload);
        let tournament = &resolution.tournament;
        let failed: HashSet<MatchId> = resolution.issues.iter().map(|e| e.match_id()).collect();

        for participant in tournament.participants() {
            let completed = tournament
                .matches()
                .iter()
                .filter(|m| {
                    m.is_complete() && !failed.contains(&m.id) && m.involves(participant.id)
                })
                .count() as u32;
            prop_assert_eq!(participant.wins + participant.losses, completed);
        }
    }

    #[test]
    fn test_resolution_is_idempotent(payload in payload_strategy()) {
        let first = resolve(payload.clone());
        let second = resolve(payload);
        prop_assert_eq!(first.tournament.participants(), second.tournament.participants());
        prop_assert_eq!(&first.issues, &second.issues);

        let mut recomputed = first.tournament.clone();
        let issues = recomputed.recompute();
        prop_assert_eq!(recomputed.participants(), first.tournament.participants());
        prop_assert_eq!(issues, first.issues);
    }

    #[test]
    fn test_non_complete_matches_have_no_references(payload in payload_strategy()) {
        let tournament = resolve(payload).into_tournament();
        for m in tournament.matches() {
            if !m.is_complete() {
                prop_assert!(m.resolved().is_none());
            }
        }
    }

    #[test]
    fn test_open_listing_is_subset_and_partition(payload in payload_strategy()) {
        let tournament = resolve(payload).into_tournament();
        let all: Vec<MatchId> = tournament.list_matches(MatchFilter::All).map(|m| m.id).collect();
        let open: Vec<MatchId> = tournament.list_matches(MatchFilter::Open).map(|m| m.id).collect();

        let all_set: HashSet<MatchId> = all.iter().copied().collect();
        prop_assert!(open.iter().all(|id| all_set.contains(id)));

        let not_open: Vec<MatchId> = tournament
            .list_matches(MatchFilter::All)
            .filter(|m| m.state != MatchState::Open)
            .map(|m| m.id)
            .collect();
        prop_assert_eq!(open.len() + not_open.len(), all.len());
    }

    #[test]
    fn test_total_wins_equal_total_losses(payload in payload_strategy()) {
        let tournament = resolve(payload).into_tournament();
        let wins: u32 = tournament.participants().iter().map(|p| p.wins).sum();
        let losses: u32 = tournament.participants().iter().map(|p| p.losses).sum();
        prop_assert_eq!(wins, losses);
    }
}
