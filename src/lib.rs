// Moodwall - mood journal with emotion classification and comfort replies
// Library exports

// Core modules
pub mod comfort; // Static comfort message bank
pub mod conversation; // Assistant dialogue sessions
pub mod crisis; // Crisis terms and delayed supportive messages
pub mod emotion; // Keyword emotion classifier
pub mod journal; // Entries, persistence, statistics
pub mod providers; // Chat-completion API clients
pub mod responder; // Reply generation with fallback

// Surfaces and ambient
pub mod cli;
pub mod config;
pub mod errors;
pub mod server; // Local HTTP API

mod sync;
