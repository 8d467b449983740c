//! Read-only lookups over a resolved tournament.

use super::errors::{Entity, GraphError, GraphResult};
use super::models::{
    Match, MatchId, MatchState, Participant, ParticipantId, ResolvedPlayers, Tournament,
    TournamentState,
};
use super::resolver::resolve_match;
use std::cmp::Reverse;
use std::ops::Deref;

/// Key to look a participant up by.
///
/// Names and tags are not unique; lookups return the first match in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKey<'a> {
    Id(ParticipantId),
    Name(&'a str),
    /// The free-form `misc` field
    Tag(&'a str),
}

impl std::fmt::Display for ParticipantKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantKey::Id(id) => write!(f, "id {}", id),
            ParticipantKey::Name(name) => write!(f, "name {:?}", name),
            ParticipantKey::Tag(tag) => write!(f, "tag {:?}", tag),
        }
    }
}

/// Match listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFilter {
    All,
    /// Only matches whose state is exactly `open`
    Open,
}

impl MatchFilter {
    fn accepts(&self, m: &Match) -> bool {
        match self {
            MatchFilter::All => true,
            MatchFilter::Open => m.state == MatchState::Open,
        }
    }
}

/// A match together with its owning tournament, giving access to the
/// participants it references.
#[derive(Debug, Clone, Copy)]
pub struct MatchView<'a> {
    tournament: &'a Tournament,
    record: &'a Match,
}

impl<'a> MatchView<'a> {
    /// The underlying match
    pub fn record(&self) -> &'a Match {
        self.record
    }

    /// Resolved references, looked up again from the current participant
    /// set when the match was completed after the last recomputation.
    pub fn players(&self) -> Option<ResolvedPlayers> {
        if !self.record.is_complete() {
            return None;
        }
        self.record
            .resolved
            .or_else(|| resolve_match(&self.tournament.participant_index, self.record).ok()?)
    }

    pub fn player_one(&self) -> Option<&'a Participant> {
        self.participant(self.players()?.player_one)
    }

    pub fn player_two(&self) -> Option<&'a Participant> {
        self.participant(self.players()?.player_two)
    }

    pub fn winner(&self) -> Option<&'a Participant> {
        self.participant(self.players()?.winner)
    }

    pub fn loser(&self) -> Option<&'a Participant> {
        self.participant(self.players()?.loser())
    }

    fn participant(&self, idx: usize) -> Option<&'a Participant> {
        self.tournament.participants.get(idx)
    }
}

impl Deref for MatchView<'_> {
    type Target = Match;

    fn deref(&self) -> &Match {
        self.record
    }
}

impl Tournament {
    /// Look a participant up by id, name or tag
    pub fn find_participant(&self, key: ParticipantKey<'_>) -> GraphResult<&Participant> {
        let found = match key {
            ParticipantKey::Id(id) => self
                .participant_index(id)
                .and_then(|idx| self.participants.get(idx)),
            ParticipantKey::Name(name) => self.participants.iter().find(|p| p.name == name),
            ParticipantKey::Tag(tag) => self.participants.iter().find(|p| p.misc == tag),
        };
        found.ok_or_else(|| GraphError::not_found(Entity::Participant, key))
    }

    /// Position of a participant in [`Tournament::participants`]
    pub fn participant_index(&self, id: ParticipantId) -> Option<usize> {
        self.participant_index.get(&id).copied()
    }

    /// Matches in wire order, filtered by state
    pub fn list_matches(&self, filter: MatchFilter) -> impl Iterator<Item = MatchView<'_>> {
        self.matches
            .iter()
            .filter(move |m| filter.accepts(m))
            .map(|record| self.view(record))
    }

    /// Look a match up by id
    pub fn get_match(&self, id: MatchId) -> GraphResult<MatchView<'_>> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .map(|record| self.view(record))
            .ok_or_else(|| GraphError::not_found(Entity::Match, id))
    }

    /// The participant's earliest open match, if any.
    ///
    /// Elimination brackets give a participant at most one open match at a
    /// time; this is assumed, not checked.
    pub fn open_match_for(&self, participant: &Participant) -> Option<MatchView<'_>> {
        self.list_matches(MatchFilter::Open)
            .find(|view| view.involves(participant.id))
    }

    /// Every match the participant occupies a slot in
    pub fn matches_for(
        &self,
        participant_id: ParticipantId,
    ) -> impl Iterator<Item = MatchView<'_>> {
        self.list_matches(MatchFilter::All)
            .filter(move |view| view.involves(participant_id))
    }

    /// Whether all matches have been played
    pub fn is_completed(&self) -> bool {
        matches!(
            self.state,
            TournamentState::Complete | TournamentState::AwaitingReview
        )
    }

    /// Participants ordered by final rank, then wins, then total score.
    ///
    /// Unranked participants come after ranked ones; ties keep wire order.
    pub fn standings(&self) -> Vec<&Participant> {
        let mut standings: Vec<&Participant> = self.participants.iter().collect();
        standings.sort_by_key(|p| {
            (
                p.final_rank.unwrap_or(u32::MAX),
                Reverse(p.wins),
                Reverse(p.total_score),
            )
        });
        standings
    }

    fn view<'a>(&'a self, record: &'a Match) -> MatchView<'a> {
        MatchView {
            tournament: self,
            record,
        }
    }
}
