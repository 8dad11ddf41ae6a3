//! Ephemeral display state.

/// Everything the widget currently shows.
///
/// Created on startup, mutated only by local timers and signup responses,
/// discarded on teardown. Never persisted.
#[derive(Debug, Clone)]
pub struct DisplayState {
    /// The count currently painted on the surface.
    pub displayed_count: u64,
    /// The count the animation is converging toward.
    pub target_count: u64,
    /// Whether a counter interpolation is in flight.
    pub animating: bool,
    /// Current fake transaction hash (`0x` + 64 hex chars).
    pub tx_hash: String,
    /// Current simulated block height.
    pub block_height: u64,
}

impl DisplayState {
    /// Fresh state with the given starting block height.
    #[must_use]
    pub const fn new(block_height: u64) -> Self {
        Self {
            displayed_count: 0,
            target_count: 0,
            animating: false,
            tx_hash: String::new(),
            block_height,
        }
    }
}
