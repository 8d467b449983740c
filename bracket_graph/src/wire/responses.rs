//! Decoded service responses and how they feed back into the graph.
//!
//! A response carrying a non-empty `errors` list is an authoritative failure
//! and short-circuits before anything is resolved.

use super::payload::{
    MatchRecord, ParticipantItem, ParticipantRecord, TournamentItem, TournamentPayload,
};
use crate::graph::{GraphError, GraphResult, Match, Participant, Resolution, Tournament, resolve};
use serde::Deserialize;
use serde_json::Value;

/// Single-entity response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub tournament: Option<TournamentPayload>,
    #[serde(default)]
    pub participant: Option<ParticipantRecord>,
    #[serde(default, rename = "match")]
    pub match_record: Option<MatchRecord>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiResponse {
    /// Decode a response body
    pub fn from_json(body: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Fail with the first reported error, if any
    pub fn check(&self) -> GraphResult<()> {
        match self.errors.first() {
            Some(message) => {
                log::debug!("Response had errors: {:?}", self.errors);
                Err(GraphError::RemoteRejection(message.clone()))
            }
            None => Ok(()),
        }
    }

    /// Resolve the returned tournament
    pub fn into_resolution(self) -> GraphResult<Resolution> {
        self.check()?;
        self.tournament
            .map(resolve)
            .ok_or_else(|| GraphError::UnexpectedShape("response has no tournament".to_string()))
    }

    /// The returned participant, with zeroed statistics
    pub fn into_participant(self) -> GraphResult<Participant> {
        self.check()?;
        self.participant
            .map(ParticipantRecord::into_participant)
            .ok_or_else(|| GraphError::UnexpectedShape("response has no participant".to_string()))
    }

    /// The returned match, unresolved until applied to a tournament
    pub fn into_match(self) -> GraphResult<Match> {
        self.check()?;
        self.match_record
            .map(MatchRecord::into_match)
            .ok_or_else(|| GraphError::UnexpectedShape("response has no match".to_string()))
    }
}

/// Response of the randomize-participants endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomizeResponse {
    /// Participants in their new seed order
    Participants(Vec<ParticipantItem>),
    /// Error map returned instead of a list
    Errors(Vec<String>),
}

impl RandomizeResponse {
    /// Classify a decoded JSON value
    pub fn from_value(value: Value) -> GraphResult<Self> {
        match list_or_errors(value)? {
            ListOrErrors::List(items) => Ok(RandomizeResponse::Participants(decode_items(items)?)),
            ListOrErrors::Errors(errors) => Ok(RandomizeResponse::Errors(errors)),
        }
    }

    /// Participants on success, the first error otherwise
    pub fn into_participants(self) -> GraphResult<Vec<Participant>> {
        match self {
            RandomizeResponse::Participants(items) => Ok(items
                .into_iter()
                .map(|item| item.participant.into_participant())
                .collect()),
            RandomizeResponse::Errors(errors) => Err(first_error(errors)),
        }
    }
}

/// Response of the tournament index endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentListing {
    pub items: Vec<TournamentItem>,
}

impl TournamentListing {
    /// Classify a decoded JSON value; an error map becomes a rejection
    pub fn from_value(value: Value) -> GraphResult<Self> {
        match list_or_errors(value)? {
            ListOrErrors::List(items) => Ok(TournamentListing {
                items: decode_items(items)?,
            }),
            ListOrErrors::Errors(errors) => Err(first_error(errors)),
        }
    }

    /// Resolve every listed tournament
    pub fn into_tournaments(self) -> Vec<Tournament> {
        self.items
            .into_iter()
            .map(|item| resolve(item.tournament).into_tournament())
            .collect()
    }
}

enum ListOrErrors {
    List(Vec<Value>),
    Errors(Vec<String>),
}

fn list_or_errors(value: Value) -> GraphResult<ListOrErrors> {
    match value {
        Value::Array(items) => Ok(ListOrErrors::List(items)),
        Value::Object(mut map) => match map.remove("errors") {
            Some(Value::Array(errors)) => Ok(ListOrErrors::Errors(
                errors
                    .into_iter()
                    .map(|err| match err {
                        Value::String(message) => message,
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Some(other) => Err(GraphError::UnexpectedShape(format!(
                "errors field is not a list: {}",
                other
            ))),
            None => Err(GraphError::UnexpectedShape(
                "object without an errors field".to_string(),
            )),
        },
        other => Err(GraphError::UnexpectedShape(format!(
            "expected a list or an error map, got {}",
            other
        ))),
    }
}

fn decode_items<T: for<'de> Deserialize<'de>>(items: Vec<Value>) -> GraphResult<Vec<T>> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|err| GraphError::UnexpectedShape(format!("list item: {}", err)))
        })
        .collect()
}

fn first_error(errors: Vec<String>) -> GraphError {
    match errors.into_iter().next() {
        Some(message) => GraphError::RemoteRejection(message),
        None => GraphError::UnexpectedShape("empty errors list".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_short_circuit() {
        let response = ApiResponse {
            errors: vec!["Tournament not started".to_string(), "other".to_string()],
            tournament: Some(TournamentPayload::new(1, "Cup", "cup")),
            ..Default::default()
        };
        match response.into_resolution() {
            Err(GraphError::RemoteRejection(message)) => {
                assert_eq!(message, "Tournament not started")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_entity_is_unexpected_shape() {
        let err = ApiResponse::default().into_match().unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedShape(_)));

        let err = ApiResponse::default().into_participant().unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedShape(_)));
    }

    #[test]
    fn test_randomize_list() {
        let value = json!([
            {"participant": {"id": 2, "display_name": "bob", "seed": 1}},
            {"participant": {"id": 1, "display_name": "alice", "seed": 2}}
        ]);
        let participants = RandomizeResponse::from_value(value)
            .unwrap()
            .into_participants()
            .unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].name, "bob");
        assert_eq!(participants[0].seed, 1);
    }

    #[test]
    fn test_randomize_error_map() {
        let value = json!({"errors": ["Participants cannot be randomized once started"]});
        let response = RandomizeResponse::from_value(value).unwrap();
        assert_eq!(
            response,
            RandomizeResponse::Errors(vec![
                "Participants cannot be randomized once started".to_string()
            ])
        );
        assert!(matches!(
            response.into_participants(),
            Err(GraphError::RemoteRejection(_))
        ));
    }

    #[test]
    fn test_randomize_unknown_shapes() {
        for value in [json!("ok"), json!(42), json!(null), json!({"status": "ok"})] {
            let err = RandomizeResponse::from_value(value).unwrap_err();
            assert!(matches!(err, GraphError::UnexpectedShape(_)));
        }

        let err = RandomizeResponse::from_value(json!([{"nope": 1}])).unwrap_err();
        assert!(matches!(err, GraphError::UnexpectedShape(_)));
    }

    #[test]
    fn test_empty_error_list_is_unexpected() {
        let response = RandomizeResponse::from_value(json!({"errors": []})).unwrap();
        assert!(matches!(
            response.into_participants(),
            Err(GraphError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_listing() {
        let value = json!([
            {"tournament": {"id": 1, "name": "A", "url": "a", "state": "pending"}},
            {"tournament": {"id": 2, "name": "B", "url": "b", "state": "complete"}}
        ]);
        let tournaments = TournamentListing::from_value(value)
            .unwrap()
            .into_tournaments();
        assert_eq!(tournaments.len(), 2);
        assert!(tournaments[1].is_completed());
    }

    #[test]
    fn test_listing_rejection() {
        let err = TournamentListing::from_value(json!({"errors": ["bad key"]})).unwrap_err();
        assert!(matches!(err, GraphError::RemoteRejection(m) if m == "bad key"));
    }
}
