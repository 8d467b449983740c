//! Wire formats exchanged with the tournament service.
//!
//! Decoding happens at this boundary: unknown state strings are rejected by
//! serde before the resolver ever runs.

pub mod payload;
pub mod responses;

pub use payload::{
    MatchItem, MatchRecord, ParticipantItem, ParticipantRecord, TournamentItem, TournamentPayload,
};
pub use responses::{ApiResponse, RandomizeResponse, TournamentListing};
