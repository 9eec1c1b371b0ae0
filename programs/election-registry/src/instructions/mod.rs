pub mod add_candidate;
pub mod configure_registry;
pub mod create_election;
pub mod finalize_election;
pub mod initialize_registry;
pub mod pause;
pub mod queries;
pub mod start_election;
pub mod vote;
pub mod whitelist_voters;
