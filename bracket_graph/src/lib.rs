//! # Bracket Graph
//!
//! Client-side model for a bracket-tournament service.
//!
//! The service sends tournaments with their participants and matches
//! flattened into per-item wrappers. This library turns such a payload into a
//! cross-referenced in-memory graph, derives per-participant statistics from
//! completed matches, answers lookups over the result and compares match
//! snapshots taken at different times.
//!
//! Transport is left to the caller: the library consumes decoded responses
//! and produces [`requests::RemoteRequest`] values to send. All operations
//! take the tournament explicitly; there is no shared client state.
//!
//! ## Core Modules
//!
//! - [`wire`]: Wire payloads and response envelopes
//! - [`graph`]: Entity models, relation resolver, queries and snapshot diffing
//! - [`requests`]: Parameter maps for remote reads and mutations
//! - [`config`]: Request defaults loaded from the environment
//!
//! ## Example
//!
//! ```
//! use bracket_graph::{ParticipantKey, wire::ApiResponse};
//!
//! let body = r#"{"tournament": {
//!     "id": 7, "name": "Weekly", "url": "weekly_7", "state": "underway",
//!     "participants": [
//!         {"participant": {"id": 1, "display_name": "alice"}},
//!         {"participant": {"id": 2, "display_name": "bob"}}
//!     ],
//!     "matches": [
//!         {"match": {"id": 10, "state": "complete", "round": 1,
//!                    "player1_id": 1, "player2_id": 2,
//!                    "winner_id": 1, "scores_csv": "3-1"}}
//!     ]
//! }}"#;
//!
//! let resolution = ApiResponse::from_json(body)?.into_resolution()?;
//! assert!(resolution.is_consistent());
//!
//! let bob = resolution.tournament.find_participant(ParticipantKey::Name("bob"))?;
//! assert_eq!((bob.wins, bob.losses, bob.total_score), (0, 1, 1));
//! # Ok::<(), bracket_graph::GraphError>(())
//! ```

/// Request defaults configuration.
pub mod config;

/// Entity graph, resolver, queries and snapshot diffing.
pub mod graph;

/// Outbound request builders.
pub mod requests;

/// Wire payloads exchanged with the tournament service.
pub mod wire;

pub use config::{ConfigError, RequestDefaults};
pub use graph::{
    ConsistencyError, GraphError, GraphResult, Match, MatchFilter, MatchState, MatchView,
    Participant, ParticipantKey, Resolution, Tournament, TournamentState, TournamentType,
    diff_matches, resolve,
};
pub use requests::{MatchReport, Method, RemoteRequest};
