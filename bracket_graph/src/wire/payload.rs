//! Flattened wire structures as decoded from the tournament service.
//!
//! The service wraps every nested entity in a single-key object
//! (`{"participant": {...}}`, `{"match": {...}}`). These types mirror that
//! shape; the resolver unwraps them into the entity graph.

use crate::graph::models::{
    Match, MatchId, MatchState, Participant, ParticipantId, Tournament, TournamentId,
    TournamentState, TournamentType, parse_scores_csv,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament as received, before relationship resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPayload {
    pub id: TournamentId,
    pub name: String,
    pub url: String,
    #[serde(default, rename = "full_challonge_url")]
    pub full_url: Option<String>,
    pub state: TournamentState,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub participants_count: Option<u32>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tournament_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub progress_meter: Option<u8>,
    #[serde(default, rename = "participants")]
    pub participant_items: Vec<ParticipantItem>,
    #[serde(default, rename = "matches")]
    pub match_items: Vec<Option<MatchItem>>,
}

impl TournamentPayload {
    /// Minimal payload with no participants or matches
    pub fn new(id: TournamentId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            full_url: None,
            state: TournamentState::Pending,
            subdomain: None,
            participants_count: None,
            started_at: None,
            updated_at: None,
            tournament_type: None,
            description: None,
            game_name: None,
            progress_meter: None,
            participant_items: Vec::new(),
            match_items: Vec::new(),
        }
    }

    /// Append a wrapped participant
    pub fn push_participant(&mut self, participant: ParticipantRecord) {
        self.participant_items.push(ParticipantItem { participant });
    }

    /// Append a wrapped match
    pub fn push_match(&mut self, record: MatchRecord) {
        self.match_items.push(Some(MatchItem {
            record: Some(record),
        }));
    }

    /// Separate the scalar header from the wrapped collections
    pub(crate) fn into_parts(self) -> (Tournament, Vec<ParticipantItem>, Vec<Option<MatchItem>>) {
        let tournament_type = self.tournament_type.as_deref().and_then(|name| {
            let parsed = TournamentType::from_name(name);
            if parsed.is_none() {
                log::debug!("Tournament {}: unknown tournament type {:?}", self.id, name);
            }
            parsed
        });

        let mut tournament = Tournament::new(self.id, self.name, self.url);
        tournament.full_url = self.full_url.unwrap_or_default();
        tournament.state = self.state;
        tournament.subdomain = self.subdomain.filter(|s| !s.is_empty());
        tournament.participants_count = self
            .participants_count
            .unwrap_or(self.participant_items.len() as u32);
        tournament.started_at = self.started_at;
        tournament.updated_at = self.updated_at;
        tournament.tournament_type = tournament_type;
        tournament.description = self.description.unwrap_or_default();
        tournament.game_name = self.game_name;
        tournament.progress_meter = self.progress_meter.unwrap_or(0);

        (tournament, self.participant_items, self.match_items)
    }
}

/// `{"participant": {...}}` wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantItem {
    pub participant: ParticipantRecord,
}

/// Participant fields as sent by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    #[serde(default, rename = "display_name")]
    pub name: String,
    /// Registered name, used when `display_name` is missing
    #[serde(default, rename = "name", skip_serializing_if = "Option::is_none")]
    pub registered_name: Option<String>,
    #[serde(default)]
    pub misc: Option<String>,
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub final_rank: Option<u32>,
}

impl ParticipantRecord {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            registered_name: None,
            misc: None,
            seed: None,
            final_rank: None,
        }
    }

    /// Unwrap into an entity with zeroed statistics
    pub fn into_participant(self) -> Participant {
        let name = match self.registered_name {
            Some(registered) if self.name.is_empty() => registered,
            _ => self.name,
        };
        let mut participant = Participant::new(self.id, name)
            .with_misc(self.misc.unwrap_or_default())
            .with_seed(self.seed.unwrap_or(0));
        participant.final_rank = self.final_rank;
        participant
    }
}

/// `{"match": {...}}` wrapper; the inner value may be `null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    #[serde(rename = "match")]
    pub record: Option<MatchRecord>,
}

/// Match fields as sent by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    #[serde(default)]
    pub identifier: Option<String>,
    pub state: MatchState,
    #[serde(default)]
    pub round: i32,
    #[serde(default, rename = "player1_id")]
    pub player_one_id: Option<ParticipantId>,
    #[serde(default, rename = "player2_id")]
    pub player_two_id: Option<ParticipantId>,
    #[serde(default, rename = "player1_prereq_match_id")]
    pub player_one_prereq_match_id: Option<MatchId>,
    #[serde(default, rename = "player2_prereq_match_id")]
    pub player_two_prereq_match_id: Option<MatchId>,
    #[serde(default)]
    pub winner_id: Option<ParticipantId>,
    #[serde(default)]
    pub scores_csv: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn new(id: MatchId, state: MatchState) -> Self {
        Self {
            id,
            identifier: None,
            state,
            round: 1,
            player_one_id: None,
            player_two_id: None,
            player_one_prereq_match_id: None,
            player_two_prereq_match_id: None,
            winner_id: None,
            scores_csv: None,
            updated_at: None,
        }
    }

    pub fn with_players(mut self, player_one: ParticipantId, player_two: ParticipantId) -> Self {
        self.player_one_id = Some(player_one);
        self.player_two_id = Some(player_two);
        self
    }

    pub fn with_winner(mut self, winner: ParticipantId) -> Self {
        self.winner_id = Some(winner);
        self
    }

    pub fn with_scores(mut self, scores_csv: impl Into<String>) -> Self {
        self.scores_csv = Some(scores_csv.into());
        self
    }

    /// Unwrap into an entity. Zero ids count as absent.
    ///
    /// Unparsable scores leave both totals at zero; the resolver reports them
    /// when the match is complete.
    pub fn into_match(self) -> Match {
        let scores_csv = self.scores_csv.unwrap_or_default();
        let (player_one_score, player_two_score) = parse_scores_csv(&scores_csv).unwrap_or((0, 0));

        let mut m = Match::new(self.id, self.state).with_round(self.round);
        m.identifier = self.identifier.unwrap_or_default();
        m.player_one_id = non_zero(self.player_one_id);
        m.player_two_id = non_zero(self.player_two_id);
        m.player_one_prereq_match_id = non_zero(self.player_one_prereq_match_id);
        m.player_two_prereq_match_id = non_zero(self.player_two_prereq_match_id);
        m.winner_id = non_zero(self.winner_id);
        m.scores_csv = scores_csv;
        m.player_one_score = player_one_score;
        m.player_two_score = player_two_score;
        m.updated_at = self.updated_at;
        m
    }
}

fn non_zero(id: Option<i64>) -> Option<i64> {
    id.filter(|&id| id != 0)
}

/// `{"tournament": {...}}` wrapper used by the index endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentItem {
    pub tournament: TournamentPayload,
}
