//! Relation resolver.
//!
//! Turns a flattened [`TournamentPayload`] into a cross-referenced
//! [`Tournament`] and derives participant statistics from completed matches.
//! Statistics are always recomputed from zero, so resolving or recomputing
//! any number of times gives the same counters.

use super::errors::{ConsistencyError, Entity, GraphError, GraphResult};
use super::models::{
    Match, MatchId, Participant, ParticipantId, ResolvedPlayers, Tournament, TournamentState,
    parse_scores_csv,
};
use crate::wire::{MatchRecord, TournamentPayload};
use std::collections::HashMap;

/// Outcome of resolving a payload.
///
/// Inconsistent matches stay in the tournament (so positional order is
/// preserved) but carry no resolved references and contribute no statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tournament: Tournament,
    pub issues: Vec<ConsistencyError>,
}

impl Resolution {
    /// Whether every match resolved cleanly
    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues reported for a given match
    pub fn issues_for(&self, match_id: MatchId) -> impl Iterator<Item = &ConsistencyError> {
        self.issues.iter().filter(move |err| err.match_id() == match_id)
    }

    /// Drop the issue list and keep the tournament
    pub fn into_tournament(self) -> Tournament {
        self.tournament
    }

    /// Fail with the first issue, if any
    pub fn into_consistent(self) -> GraphResult<Tournament> {
        match self.issues.into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(self.tournament),
        }
    }

    /// Confirm a start/finalize round-trip moved the tournament to `expected`
    pub fn expect_state(self, expected: TournamentState) -> GraphResult<Self> {
        let actual = self.tournament.state;
        if actual != expected {
            return Err(GraphError::UnexpectedState { expected, actual });
        }
        log::info!(
            "Tournament {} '{}' is now {}",
            self.tournament.id,
            self.tournament.name,
            actual
        );
        Ok(self)
    }
}

/// Resolve a decoded payload into an entity graph
pub fn resolve(payload: TournamentPayload) -> Resolution {
    let (mut tournament, participant_items, match_items) = payload.into_parts();

    tournament.participants = participant_items
        .into_iter()
        .map(|item| item.participant.into_participant())
        .collect();

    let tournament_id = tournament.id;
    tournament.matches = match_items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let record = item.and_then(|item| item.record);
            if record.is_none() {
                log::debug!(
                    "Tournament {}: skipping empty match item at position {}",
                    tournament_id,
                    position
                );
            }
            record.map(MatchRecord::into_match)
        })
        .collect();

    let issues = tournament.recompute();

    log::debug!(
        "Resolved tournament {}: {} participants, {} matches, {} issues",
        tournament.id,
        tournament.participants.len(),
        tournament.matches.len(),
        issues.len()
    );

    Resolution { tournament, issues }
}

impl Tournament {
    /// Rebuild match references and participant statistics from scratch.
    ///
    /// Counters are reset before any match is visited. Returns the
    /// inconsistencies found, one per failing match.
    pub fn recompute(&mut self) -> Vec<ConsistencyError> {
        self.reindex_participants();
        for participant in &mut self.participants {
            participant.reset_statistics();
        }

        let mut issues = Vec::new();
        for idx in 0..self.matches.len() {
            let m = &self.matches[idx];
            let (match_id, scores) = (m.id, (m.player_one_score, m.player_two_score));
            let outcome = resolve_match(&self.participant_index, m)
                .and_then(|resolved| self.attribute(match_id, scores, resolved));
            match outcome {
                Ok(resolved) => self.matches[idx].resolved = resolved,
                Err(err) => {
                    log::warn!("Tournament {}: {}", self.id, err);
                    self.matches[idx].resolved = None;
                    issues.push(err);
                }
            }
        }
        issues
    }

    /// Credit a resolved match to its players.
    ///
    /// Both score totals are checked before any counter changes, so an
    /// overflowing match contributes nothing.
    fn attribute(
        &mut self,
        match_id: MatchId,
        (one_score, two_score): (i64, i64),
        resolved: Option<ResolvedPlayers>,
    ) -> Result<Option<ResolvedPlayers>, ConsistencyError> {
        let Some(players) = resolved else {
            return Ok(None);
        };

        let add = |idx: usize, score: i64| {
            let participant = &self.participants[idx];
            participant
                .total_score
                .checked_add(score)
                .ok_or(ConsistencyError::ScoreOverflow {
                    match_id,
                    participant_id: participant.id,
                })
        };
        let one_total = add(players.player_one, one_score)?;
        let two_total = add(players.player_two, two_score)?;

        self.participants[players.player_one].total_score = one_total;
        self.participants[players.player_two].total_score = two_total;
        self.participants[players.winner].wins += 1;
        self.participants[players.loser()].losses += 1;
        Ok(Some(players))
    }

    /// Replace a match with the copy returned by a score submission.
    ///
    /// Returns the inconsistencies found by the following recomputation.
    pub fn apply_match_update(&mut self, updated: Match) -> GraphResult<Vec<ConsistencyError>> {
        let slot = self
            .matches
            .iter_mut()
            .find(|m| m.id == updated.id)
            .ok_or_else(|| GraphError::not_found(Entity::Match, updated.id))?;
        log::debug!(
            "Tournament {}: match {} {} -> {}",
            self.id,
            updated.id,
            slot.state,
            updated.state
        );
        *slot = updated;
        Ok(self.recompute())
    }

    /// Add (or replace, on id collision) a participant returned by the service
    pub fn apply_participant_added(&mut self, participant: Participant) -> Vec<ConsistencyError> {
        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
        self.participants_count = self.participants.len() as u32;
        self.recompute()
    }

    /// Drop a participant the service confirmed as removed
    pub fn apply_participant_removed(
        &mut self,
        participant_id: ParticipantId,
    ) -> GraphResult<Vec<ConsistencyError>> {
        let position = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| GraphError::not_found(Entity::Participant, participant_id))?;
        self.participants.remove(position);
        self.participants_count = self.participants.len() as u32;
        Ok(self.recompute())
    }
}

/// Validate one match against the participant index.
///
/// `Ok(None)` means the match is consistent but not complete.
pub(crate) fn resolve_match(
    index: &HashMap<ParticipantId, usize>,
    m: &Match,
) -> Result<Option<ResolvedPlayers>, ConsistencyError> {
    let lookup = |id: Option<ParticipantId>| match id {
        None => Ok(None),
        Some(participant_id) => index.get(&participant_id).copied().map(Some).ok_or(
            ConsistencyError::UnknownParticipant {
                match_id: m.id,
                participant_id,
            },
        ),
    };

    let player_one = lookup(m.player_one_id)?;
    let player_two = lookup(m.player_two_id)?;
    lookup(m.winner_id)?;

    if let (Some(one), Some(two)) = (m.player_one_id, m.player_two_id) {
        if one == two {
            return Err(ConsistencyError::DuplicatePlayer {
                match_id: m.id,
                participant_id: one,
            });
        }
    }

    if !m.is_complete() {
        return Ok(None);
    }

    let player_one = player_one.ok_or(ConsistencyError::MissingPlayer {
        match_id: m.id,
        slot: 1,
    })?;
    let player_two = player_two.ok_or(ConsistencyError::MissingPlayer {
        match_id: m.id,
        slot: 2,
    })?;
    let winner_id = m
        .winner_id
        .ok_or(ConsistencyError::MissingWinner { match_id: m.id })?;

    let winner = if m.player_one_id == Some(winner_id) {
        player_one
    } else if m.player_two_id == Some(winner_id) {
        player_two
    } else {
        return Err(ConsistencyError::WinnerNotPlayer {
            match_id: m.id,
            winner_id,
        });
    };

    if parse_scores_csv(&m.scores_csv).is_none() {
        return Err(ConsistencyError::MalformedScores {
            match_id: m.id,
            scores: m.scores_csv.clone(),
        });
    }

    Ok(Some(ResolvedPlayers {
        player_one,
        player_two,
        winner,
    }))
}
