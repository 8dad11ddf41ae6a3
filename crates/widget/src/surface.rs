//! Rendering seam.
//!
//! The widget pushes display updates through [`Surface`] instead of owning
//! a UI toolkit. Hosts implement it for their renderer; tests implement it
//! with a recorder.

/// Sink for widget display updates.
pub trait Surface: Send + Sync {
    /// Paint the signup counter.
    fn set_count(&self, count: u64);

    /// Paint the fake transaction hash.
    fn set_tx_hash(&self, hash: &str);

    /// Paint the simulated block height.
    fn set_block_height(&self, height: u64);

    /// Show a transitory status string, or clear it with `None`.
    fn set_status(&self, status: Option<&str>);

    /// Trigger the brief highlight played when the counter lands.
    fn pulse(&self);

    /// Show the transitory error style, or clear it.
    fn set_error(&self, active: bool);
}

/// Surface that discards every update. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_count(&self, _count: u64) {}
    fn set_tx_hash(&self, _hash: &str) {}
    fn set_block_height(&self, _height: u64) {}
    fn set_status(&self, _status: Option<&str>) {}
    fn pulse(&self) {}
    fn set_error(&self, _active: bool) {}
}
