//! Core engine types: players, session state, randomness, configuration.
//!
//! These are plain values with no I/O. The session manager in
//! `crate::session` owns one `SessionState` and replaces it wholesale on
//! every operation.

pub mod player;
pub mod shuffle;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, BOOST_COST, FULFILL_REWARD, MAX_BOOST_POINTS, STARTING_BOOST_POINTS};
pub use shuffle::shuffled;
pub use rng::GameRng;
pub use config::{SessionConfig, DEFAULT_SNAPSHOT_KEY};
pub use state::{validate_setup, GameMode, InvariantViolation, Phase, SessionState, SetupError};
