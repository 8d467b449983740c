//! Positional comparison of two match snapshots.
//!
//! Both snapshots are expected in the same stable wire order. Comparison is
//! index-aligned, not by id, and stops at the shorter snapshot.

use super::models::{Match, MatchId, MatchState};

/// State change of a single match between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub match_id: MatchId,
    pub from: MatchState,
    pub to: MatchState,
}

/// Matches of `after` whose state differs from the match at the same position in `before`
pub fn diff_matches<'a>(before: &[Match], after: &'a [Match]) -> Vec<&'a Match> {
    aligned(before, after)
        .filter(|(old, new)| old.state != new.state)
        .map(|(_, new)| new)
        .collect()
}

/// Same comparison as [`diff_matches`], reported as transitions
pub fn state_transitions(before: &[Match], after: &[Match]) -> Vec<StateTransition> {
    aligned(before, after)
        .filter(|(old, new)| old.state != new.state)
        .map(|(old, new)| StateTransition {
            match_id: new.id,
            from: old.state,
            to: new.state,
        })
        .collect()
}

fn aligned<'a, 'b>(
    before: &'a [Match],
    after: &'b [Match],
) -> impl Iterator<Item = (&'a Match, &'b Match)> {
    if before.len() != after.len() {
        log::debug!(
            "Snapshot length mismatch ({} vs {}), comparing first {}",
            before.len(),
            after.len(),
            before.len().min(after.len())
        );
    }
    before.iter().zip(after.iter())
}
