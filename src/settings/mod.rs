//! Configuration loading and resolution.
//!
//! [`load`] layers default files, explicit `--config` files, `HERO_SEARCH__*`
//! environment variables and CLI flags, in that order, and returns a validated
//! [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
