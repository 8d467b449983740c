//! Entity graph data models: tournaments, participants and matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tournament ID type
pub type TournamentId = i64;

/// Participant ID type
pub type ParticipantId = i64;

/// Match ID type
pub type MatchId = i64;

/// Tournament lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Accepting participants, bracket not generated yet
    Pending,
    /// Bracket generated and matches being played
    #[serde(alias = "in_progress")]
    Underway,
    /// All matches played, waiting for the organizer to finalize
    AwaitingReview,
    /// Finalized
    Complete,
}

impl std::fmt::Display for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentState::Pending => write!(f, "pending"),
            TournamentState::Underway => write!(f, "underway"),
            TournamentState::AwaitingReview => write!(f, "awaiting_review"),
            TournamentState::Complete => write!(f, "complete"),
        }
    }
}

/// Match state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    /// One or both players still undetermined
    Pending,
    /// Both players known, result not reported
    Open,
    /// Result reported
    Complete,
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchState::Pending => write!(f, "pending"),
            MatchState::Open => write!(f, "open"),
            MatchState::Complete => write!(f, "complete"),
        }
    }
}

/// Bracket format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentType {
    #[serde(rename = "single elimination")]
    SingleElimination,
    #[serde(rename = "double elimination")]
    DoubleElimination,
    #[serde(rename = "round robin")]
    RoundRobin,
    #[serde(rename = "swiss")]
    Swiss,
}

impl TournamentType {
    /// Name used by the service for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentType::SingleElimination => "single elimination",
            TournamentType::DoubleElimination => "double elimination",
            TournamentType::RoundRobin => "round robin",
            TournamentType::Swiss => "swiss",
        }
    }

    /// Parse a format from its short or full name (`"double"`, `"double elimination"`, ...)
    ///
    /// An empty string selects single elimination, the service default.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "single" | "single elimination" | "single_elimination" => {
                Some(TournamentType::SingleElimination)
            }
            "double" | "double elimination" | "double_elimination" => {
                Some(TournamentType::DoubleElimination)
            }
            "round robin" | "round_robin" => Some(TournamentType::RoundRobin),
            "swiss" => Some(TournamentType::Swiss),
            _ => None,
        }
    }
}

impl std::fmt::Display for TournamentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tournament entrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// Free-form tag, used as an alternate lookup key
    pub misc: String,
    pub seed: u32,
    /// Final placement, only known once the tournament is complete
    pub final_rank: Option<u32>,
    /// Derived from completed matches
    pub wins: u32,
    /// Derived from completed matches
    pub losses: u32,
    /// Sum of this participant's reported scores over completed matches
    pub total_score: i64,
}

impl Participant {
    /// Create a participant with zeroed statistics
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            misc: String::new(),
            seed: 0,
            final_rank: None,
            wins: 0,
            losses: 0,
            total_score: 0,
        }
    }

    /// Set the misc tag
    pub fn with_misc(mut self, misc: impl Into<String>) -> Self {
        self.misc = misc.into();
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Number of completed matches counted for this participant
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub(crate) fn reset_statistics(&mut self) {
        self.wins = 0;
        self.losses = 0;
        self.total_score = 0;
    }
}

/// Resolved, non-owning player references of a completed match.
///
/// Values are indices into the owning tournament's participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPlayers {
    pub player_one: usize,
    pub player_two: usize,
    pub winner: usize,
}

impl ResolvedPlayers {
    /// Index of the participant that lost the match
    pub fn loser(&self) -> usize {
        if self.winner == self.player_one {
            self.player_two
        } else {
            self.player_one
        }
    }
}

/// A single bracket match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: MatchId,
    /// Bracket label, e.g. `"A"`
    pub identifier: String,
    pub state: MatchState,
    pub round: i32,
    pub player_one_id: Option<ParticipantId>,
    pub player_two_id: Option<ParticipantId>,
    /// Match whose result feeds the first slot
    pub player_one_prereq_match_id: Option<MatchId>,
    /// Match whose result feeds the second slot
    pub player_two_prereq_match_id: Option<MatchId>,
    pub winner_id: Option<ParticipantId>,
    /// Per-set results as reported, e.g. `"3-1,2-3"`
    pub scores_csv: String,
    pub player_one_score: i64,
    pub player_two_score: i64,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub(crate) resolved: Option<ResolvedPlayers>,
}

impl Match {
    /// Create a match with no players assigned yet
    pub fn new(id: MatchId, state: MatchState) -> Self {
        Self {
            id,
            identifier: String::new(),
            state,
            round: 1,
            player_one_id: None,
            player_two_id: None,
            player_one_prereq_match_id: None,
            player_two_prereq_match_id: None,
            winner_id: None,
            scores_csv: String::new(),
            player_one_score: 0,
            player_two_score: 0,
            updated_at: None,
            resolved: None,
        }
    }

    /// Assign both players
    pub fn with_players(mut self, player_one: ParticipantId, player_two: ParticipantId) -> Self {
        self.player_one_id = Some(player_one);
        self.player_two_id = Some(player_two);
        self
    }

    /// Set the winner
    pub fn with_winner(mut self, winner: ParticipantId) -> Self {
        self.winner_id = Some(winner);
        self
    }

    /// Set a single-set score, keeping `scores_csv` in sync
    pub fn with_scores(mut self, player_one: i64, player_two: i64) -> Self {
        self.scores_csv = format!("{player_one}-{player_two}");
        self.player_one_score = player_one;
        self.player_two_score = player_two;
        self
    }

    /// Set the round number
    pub fn with_round(mut self, round: i32) -> Self {
        self.round = round;
        self
    }

    /// Set the prerequisite matches feeding each slot
    pub fn with_prerequisites(mut self, one: Option<MatchId>, two: Option<MatchId>) -> Self {
        self.player_one_prereq_match_id = one;
        self.player_two_prereq_match_id = two;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.state == MatchState::Complete
    }

    pub fn is_open(&self) -> bool {
        self.state == MatchState::Open
    }

    /// Whether the participant occupies either slot
    pub fn involves(&self, participant_id: ParticipantId) -> bool {
        self.player_one_id == Some(participant_id) || self.player_two_id == Some(participant_id)
    }

    /// Matches feeding this one (bracket edges)
    pub fn prerequisites(&self) -> impl Iterator<Item = MatchId> {
        self.player_one_prereq_match_id
            .into_iter()
            .chain(self.player_two_prereq_match_id)
    }

    /// Resolved player references, present only on completed matches
    pub fn resolved(&self) -> Option<ResolvedPlayers> {
        self.resolved
    }
}

/// Parse a scores CSV into per-player totals.
///
/// Each comma-separated set is `"<one>-<two>"`; either side may be negative
/// (`"-1-3"`, `"3--1"`). An empty string is `0-0`.
pub fn parse_scores_csv(csv: &str) -> Option<(i64, i64)> {
    let csv = csv.trim();
    if csv.is_empty() {
        return Some((0, 0));
    }

    let mut totals = (0i64, 0i64);
    for set in csv.split(',') {
        let set = set.trim();
        // Skip a leading sign so it isn't taken as the separator
        let split = set.get(1..)?.find('-')? + 1;
        let one: i64 = set[..split].trim().parse().ok()?;
        let two: i64 = set[split + 1..].trim().parse().ok()?;
        totals.0 = totals.0.checked_add(one)?;
        totals.1 = totals.1.checked_add(two)?;
    }
    Some(totals)
}

/// A resolved tournament owning its participants and matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Slug-like URL component
    pub url: String,
    pub full_url: String,
    pub subdomain: Option<String>,
    /// Key the tournament was requested by, if it was fetched
    pub sub_url: Option<String>,
    pub state: TournamentState,
    pub tournament_type: Option<TournamentType>,
    pub description: String,
    pub game_name: Option<String>,
    pub progress_meter: u8,
    pub participants_count: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub(crate) participants: Vec<Participant>,
    pub(crate) matches: Vec<Match>,
    #[serde(skip)]
    pub(crate) participant_index: HashMap<ParticipantId, usize>,
}

impl Tournament {
    /// Create an empty tournament
    pub fn new(id: TournamentId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            full_url: String::new(),
            subdomain: None,
            sub_url: None,
            state: TournamentState::Pending,
            tournament_type: None,
            description: String::new(),
            game_name: None,
            progress_meter: 0,
            participants_count: 0,
            started_at: None,
            updated_at: None,
            participants: Vec::new(),
            matches: Vec::new(),
            participant_index: HashMap::new(),
        }
    }

    /// Key the service routes this tournament by: `"<subdomain>-<url>"` or `"<url>"`
    pub fn url_key(&self) -> String {
        match self.subdomain.as_deref() {
            Some(subdomain) if !subdomain.is_empty() => format!("{}-{}", subdomain, self.url),
            _ => self.url.clone(),
        }
    }

    /// Participants in wire order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Matches in wire order
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Rebuild the id lookup; the first participant wins on duplicate ids
    pub(crate) fn reindex_participants(&mut self) {
        self.participant_index.clear();
        for (idx, participant) in self.participants.iter().enumerate() {
            if self.participant_index.contains_key(&participant.id) {
                log::warn!(
                    "Tournament {}: duplicate participant id {}, keeping first",
                    self.id,
                    participant.id
                );
                continue;
            }
            self.participant_index.insert(participant.id, idx);
        }
    }
}
