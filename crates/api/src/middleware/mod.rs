//! Request extractors guarding mutating routes.
//!
//! - [`passphrase::RequirePassphrase`] -- Requires the shared admin passphrase.

pub mod passphrase;
