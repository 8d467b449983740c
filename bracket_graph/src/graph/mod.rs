//! Entity graph of tournaments, participants and matches.
//!
//! This module provides:
//! - The normalized entity models and their cross-references
//! - Relationship resolution with derived participant statistics
//! - Lookup and filtering over a resolved tournament
//! - Positional diffing of match snapshots
//!
//! ## Example
//!
//! ```
//! use bracket_graph::graph::{MatchFilter, MatchState, ParticipantKey, resolve};
//! use bracket_graph::wire::{MatchRecord, ParticipantRecord, TournamentPayload};
//!
//! let mut payload = TournamentPayload::new(1, "Weekly", "weekly_12");
//! payload.push_participant(ParticipantRecord::new(1, "alice"));
//! payload.push_participant(ParticipantRecord::new(2, "bob"));
//! payload.push_match(
//!     MatchRecord::new(10, MatchState::Complete)
//!         .with_players(1, 2)
//!         .with_winner(1)
//!         .with_scores("3-1"),
//! );
//!
//! let tournament = resolve(payload).into_tournament();
//! let alice = tournament.find_participant(ParticipantKey::Name("alice")).unwrap();
//! assert_eq!(alice.wins, 1);
//! assert_eq!(tournament.list_matches(MatchFilter::Open).count(), 0);
//! ```

pub mod diff;
pub mod errors;
pub mod models;
pub mod query;
pub mod resolver;

pub use diff::{StateTransition, diff_matches, state_transitions};
pub use errors::{ConsistencyError, Entity, GraphError, GraphResult};
pub use models::{
    Match, MatchId, MatchState, Participant, ParticipantId, ResolvedPlayers, Tournament,
    TournamentId, TournamentState, TournamentType, parse_scores_csv,
};
pub use query::{MatchFilter, MatchView, ParticipantKey};
pub use resolver::{Resolution, resolve};
