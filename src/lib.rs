//! Starscroll game core library crate.
//!
//! The runtime control core of a small demo: it sequences the
//! asynchronous load of a level collection, spawns a bounded pool of star
//! entities into it, and scrolls them across the screen once per host
//! tick. Everything engine-shaped lives behind the [`host::Host`] trait.

pub mod constants;
pub mod context;
pub mod error;
pub mod game;
pub mod host;
pub mod loader;
pub mod movement;
pub mod pool;
pub mod sim;
pub mod spawner;
