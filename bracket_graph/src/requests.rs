//! Outbound requests for remote reads and mutations.
//!
//! The library never talks to the network. Each builder produces a
//! [`RemoteRequest`]: the HTTP verb, the resource path relative to the API
//! root, and the parameter map. The caller adds host, API version, format
//! suffix and credentials, sends it, and feeds the decoded response back
//! through [`crate::wire::ApiResponse`].

use crate::config::RequestDefaults;
use crate::graph::{
    ConsistencyError, Entity, GraphError, GraphResult, MatchId, ParticipantId, ParticipantKey,
    Tournament, TournamentType,
};
use std::collections::BTreeMap;

/// Request parameters, sent as query-string or form fields
pub type Params = BTreeMap<String, String>;

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request for the caller to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `tournaments/cup/start`
    pub resource: String,
    pub params: Params,
}

impl RemoteRequest {
    fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            params: Params::new(),
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    fn with_includes(mut self, defaults: &RequestDefaults) -> Self {
        if defaults.include_participants {
            self = self.param("include_participants", "1");
        }
        if defaults.include_matches {
            self = self.param("include_matches", "1");
        }
        self
    }
}

/// State filter of the tournament index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    All,
    Pending,
    InProgress,
    Ended,
}

impl ListState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListState::All => "all",
            ListState::Pending => "pending",
            ListState::InProgress => "in_progress",
            ListState::Ended => "ended",
        }
    }
}

/// Filter for [`list_tournaments`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TournamentListFilter {
    pub state: ListState,
    pub tournament_type: Option<TournamentType>,
    pub subdomain: Option<String>,
}

/// List tournaments of the account
pub fn list_tournaments(filter: &TournamentListFilter) -> RemoteRequest {
    let mut request =
        RemoteRequest::new(Method::Get, "tournaments").param("state", filter.state.as_str());
    if let Some(tournament_type) = filter.tournament_type {
        request = request.param("type", tournament_type.as_str());
    }
    if let Some(subdomain) = filter.subdomain.as_deref().filter(|s| !s.is_empty()) {
        request = request.param("subdomain", subdomain);
    }
    request
}

/// Fetch a single tournament by its URL key
pub fn show_tournament(url_key: &str, defaults: &RequestDefaults) -> RemoteRequest {
    RemoteRequest::new(Method::Get, format!("tournaments/{}", url_key)).with_includes(defaults)
}

/// Fields of a tournament to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournament {
    pub name: String,
    /// Slug-like URL component
    pub url: String,
    pub description: String,
    /// Falls back to [`RequestDefaults::tournament_type`]
    pub tournament_type: Option<TournamentType>,
    /// Falls back to [`RequestDefaults::subdomain`]
    pub subdomain: Option<String>,
    /// Falls back to [`RequestDefaults::open_signup`]
    pub open_signup: Option<bool>,
}

impl NewTournament {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
            tournament_type: None,
            subdomain: None,
            open_signup: None,
        }
    }
}

/// Create a tournament
pub fn create_tournament(new: &NewTournament, defaults: &RequestDefaults) -> RemoteRequest {
    let tournament_type = new.tournament_type.unwrap_or(defaults.tournament_type);
    let open_signup = new.open_signup.unwrap_or(defaults.open_signup);
    let subdomain = new
        .subdomain
        .as_deref()
        .or(defaults.subdomain.as_deref())
        .unwrap_or_default();

    RemoteRequest::new(Method::Post, "tournaments")
        .param("tournament[name]", new.name.as_str())
        .param("tournament[url]", new.url.as_str())
        .param("tournament[open_signup]", open_signup.to_string())
        .param("tournament[subdomain]", subdomain)
        .param("tournament[description]", new.description.as_str())
        .param("tournament[tournament_type]", tournament_type.as_str())
}

/// Result to submit for a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub winner_id: ParticipantId,
    /// Per-set scores, player one first
    pub sets: Vec<(i64, i64)>,
}

impl MatchReport {
    /// Single-set report
    pub fn new(winner_id: ParticipantId, player_one: i64, player_two: i64) -> Self {
        Self {
            winner_id,
            sets: vec![(player_one, player_two)],
        }
    }

    /// Append another set
    pub fn with_set(mut self, player_one: i64, player_two: i64) -> Self {
        self.sets.push((player_one, player_two));
        self
    }

    /// Scores in the service's CSV form, e.g. `"3-1,2-3"`
    pub fn scores_csv(&self) -> String {
        self.sets
            .iter()
            .map(|(one, two)| format!("{}-{}", one, two))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Tournament {
    fn resource(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("tournaments/{}", self.url_key())
        } else {
            format!("tournaments/{}/{}", self.url_key(), suffix)
        }
    }

    /// Start the tournament; confirm with `Resolution::expect_state(Underway)`
    pub fn start_request(&self, defaults: &RequestDefaults) -> RemoteRequest {
        RemoteRequest::new(Method::Post, self.resource("start")).with_includes(defaults)
    }

    /// Finalize results; confirm with `Resolution::expect_state(Complete)`
    pub fn finalize_request(&self, defaults: &RequestDefaults) -> RemoteRequest {
        RemoteRequest::new(Method::Post, self.resource("finalize")).with_includes(defaults)
    }

    /// Reset the bracket back to pending
    pub fn reset_request(&self, defaults: &RequestDefaults) -> RemoteRequest {
        RemoteRequest::new(Method::Post, self.resource("reset")).with_includes(defaults)
    }

    /// Delete the tournament
    pub fn destroy_request(&self) -> RemoteRequest {
        RemoteRequest::new(Method::Delete, self.resource(""))
    }

    /// Shuffle seeds; decode the answer with `RandomizeResponse::from_value`
    pub fn randomize_request(&self) -> RemoteRequest {
        RemoteRequest::new(Method::Post, self.resource("participants/randomize"))
    }

    /// Submit a match result.
    ///
    /// The winner must occupy one of the match's slots.
    pub fn report_match(
        &self,
        match_id: MatchId,
        report: &MatchReport,
    ) -> GraphResult<RemoteRequest> {
        let m = self
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| GraphError::not_found(Entity::Match, match_id))?;

        if !m.involves(report.winner_id) {
            return Err(ConsistencyError::WinnerNotPlayer {
                match_id,
                winner_id: report.winner_id,
            }
            .into());
        }

        Ok(
            RemoteRequest::new(Method::Put, self.resource(&format!("matches/{}", match_id)))
                .param("match[scores_csv]", report.scores_csv())
                .param("match[winner_id]", report.winner_id.to_string()),
        )
    }

    /// Add a participant; apply the answer with `apply_participant_added`
    pub fn add_participant_request(&self, name: &str, misc: &str) -> RemoteRequest {
        RemoteRequest::new(Method::Post, self.resource("participants"))
            .param("participant[name]", name)
            .param("participant[misc]", misc)
    }

    /// Remove a participant looked up by key
    pub fn remove_participant_request(
        &self,
        key: ParticipantKey<'_>,
    ) -> GraphResult<RemoteRequest> {
        let participant = self.find_participant(key)?;
        Ok(RemoteRequest::new(
            Method::Delete,
            self.resource(&format!("participants/{}", participant.id)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tournaments_params() {
        let request = list_tournaments(&TournamentListFilter::default());
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.resource, "tournaments");
        assert_eq!(request.params.get("state").map(String::as_str), Some("all"));
        assert!(!request.params.contains_key("type"));
        assert!(!request.params.contains_key("subdomain"));

        let request = list_tournaments(&TournamentListFilter {
            state: ListState::InProgress,
            tournament_type: Some(TournamentType::Swiss),
            subdomain: Some("league".to_string()),
        });
        assert_eq!(request.params["state"], "in_progress");
        assert_eq!(request.params["type"], "swiss");
        assert_eq!(request.params["subdomain"], "league");
    }

    #[test]
    fn test_show_tournament_includes() {
        let request = show_tournament("league-cup", &RequestDefaults::default());
        assert_eq!(request.resource, "tournaments/league-cup");
        assert_eq!(request.params["include_participants"], "1");
        assert_eq!(request.params["include_matches"], "1");

        let defaults = RequestDefaults {
            include_matches: false,
            ..RequestDefaults::default()
        };
        let request = show_tournament("cup", &defaults);
        assert!(!request.params.contains_key("include_matches"));
    }

    #[test]
    fn test_create_tournament_fallbacks() {
        let defaults = RequestDefaults {
            subdomain: Some("league".to_string()),
            ..RequestDefaults::default()
        };
        let request = create_tournament(&NewTournament::new("Weekly", "weekly_1"), &defaults);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.params["tournament[name]"], "Weekly");
        assert_eq!(request.params["tournament[url]"], "weekly_1");
        assert_eq!(request.params["tournament[open_signup]"], "false");
        assert_eq!(request.params["tournament[subdomain]"], "league");
        assert_eq!(
            request.params["tournament[tournament_type]"],
            "single elimination"
        );

        let new = NewTournament {
            tournament_type: Some(TournamentType::DoubleElimination),
            open_signup: Some(true),
            ..NewTournament::new("Major", "major")
        };
        let request = create_tournament(&new, &RequestDefaults::default());
        assert_eq!(
            request.params["tournament[tournament_type]"],
            "double elimination"
        );
        assert_eq!(request.params["tournament[open_signup]"], "true");
        assert_eq!(request.params["tournament[subdomain]"], "");
    }

    #[test]
    fn test_match_report_csv() {
        let report = MatchReport::new(1, 3, 1).with_set(-1, 2);
        assert_eq!(report.scores_csv(), "3-1,-1-2");
    }

    #[test]
    fn test_lifecycle_requests() {
        let mut tournament = Tournament::new(1, "Cup", "cup");
        tournament.subdomain = Some("league".to_string());
        let defaults = RequestDefaults::default();

        let start = tournament.start_request(&defaults);
        assert_eq!(start.method, Method::Post);
        assert_eq!(start.resource, "tournaments/league-cup/start");
        assert_eq!(start.params.len(), 2);

        assert_eq!(
            tournament.finalize_request(&defaults).resource,
            "tournaments/league-cup/finalize"
        );
        assert_eq!(
            tournament.reset_request(&defaults).resource,
            "tournaments/league-cup/reset"
        );

        let destroy = tournament.destroy_request();
        assert_eq!(destroy.method, Method::Delete);
        assert_eq!(destroy.resource, "tournaments/league-cup");

        assert_eq!(
            tournament.randomize_request().resource,
            "tournaments/league-cup/participants/randomize"
        );
    }

    #[test]
    fn test_add_participant_request() {
        let tournament = Tournament::new(1, "Cup", "cup");
        let request = tournament.add_participant_request("alice", "team-a");
        assert_eq!(request.resource, "tournaments/cup/participants");
        assert_eq!(request.params["participant[name]"], "alice");
        assert_eq!(request.params["participant[misc]"], "team-a");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
