//! Cache engine tests.


/// Victim selection observed through a live cache.
pub mod policies;
