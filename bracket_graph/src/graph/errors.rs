//! Entity graph error types.

use super::models::{MatchId, ParticipantId, TournamentState};
use thiserror::Error;

/// Data inconsistency found while resolving a single match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// A player or winner id has no participant in the tournament
    #[error("Match {match_id} references unknown participant {participant_id}")]
    UnknownParticipant {
        match_id: MatchId,
        participant_id: ParticipantId,
    },

    /// Both slots hold the same participant
    #[error("Match {match_id} has participant {participant_id} in both slots")]
    DuplicatePlayer {
        match_id: MatchId,
        participant_id: ParticipantId,
    },

    /// Complete match with an empty player slot
    #[error("Match {match_id} is complete but player slot {slot} is empty")]
    MissingPlayer { match_id: MatchId, slot: u8 },

    /// Complete match without a winner
    #[error("Match {match_id} is complete but has no winner")]
    MissingWinner { match_id: MatchId },

    /// Winner is neither of the two players
    #[error("Match {match_id} winner {winner_id} is not one of its players")]
    WinnerNotPlayer {
        match_id: MatchId,
        winner_id: ParticipantId,
    },

    /// Scores CSV could not be parsed
    #[error("Match {match_id} has malformed scores: {scores:?}")]
    MalformedScores { match_id: MatchId, scores: String },

    /// Adding the match's score would overflow a participant's total
    #[error("Match {match_id} overflows the total score of participant {participant_id}")]
    ScoreOverflow {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
}

impl ConsistencyError {
    /// The match the inconsistency was found on
    pub fn match_id(&self) -> MatchId {
        match self {
            ConsistencyError::UnknownParticipant { match_id, .. }
            | ConsistencyError::DuplicatePlayer { match_id, .. }
            | ConsistencyError::MissingPlayer { match_id, .. }
            | ConsistencyError::MissingWinner { match_id }
            | ConsistencyError::WinnerNotPlayer { match_id, .. }
            | ConsistencyError::MalformedScores { match_id, .. }
            | ConsistencyError::ScoreOverflow { match_id, .. } => *match_id,
        }
    }
}

/// Kind of entity a lookup was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Participant,
    Match,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Participant => write!(f, "Participant"),
            Entity::Match => write!(f, "Match"),
        }
    }
}

/// Entity graph errors
#[derive(Debug, Error)]
pub enum GraphError {
    /// Inconsistent match data
    #[error("Data consistency error: {0}")]
    DataConsistency(#[from] ConsistencyError),

    /// Lookup found nothing
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    /// The service answered with a non-empty errors list
    #[error("Remote rejected request: {0}")]
    RemoteRejection(String),

    /// Decoded response matched none of the known shapes
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The service did not move the tournament to the requested state
    #[error("Tournament not in expected state: expected {expected}, got {actual}")]
    UnexpectedState {
        expected: TournamentState,
        actual: TournamentState,
    },

    /// JSON decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn not_found(entity: Entity, key: impl ToString) -> Self {
        GraphError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound { .. })
    }
}

/// Result type for entity graph operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_error_match_id() {
        let err = ConsistencyError::UnknownParticipant {
            match_id: 10,
            participant_id: 99,
        };
        assert_eq!(err.match_id(), 10);
        assert_eq!(
            err.to_string(),
            "Match 10 references unknown participant 99"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = GraphError::not_found(Entity::Participant, "alice");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Participant not found: alice");
    }

    #[test]
    fn test_consistency_converts_into_graph_error() {
        let err: GraphError = ConsistencyError::MissingWinner { match_id: 3 }.into();
        assert!(matches!(err, GraphError::DataConsistency(_)));
        assert!(!err.is_not_found());
    }
}
