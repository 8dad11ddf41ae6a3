//! The animated activity widget.
//!
//! Owns the [`DisplayState`] and drives every visual behavior: the one-time
//! count seed, the eased counter animation after a signup, the fake hash
//! refresh, the block-height timer, and the transitory network-status
//! flashes. All values are decorative; the server's stored count is the
//! only authoritative number and is read exactly once at startup.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;

use crate::display::DisplayState;
use crate::easing::animation_frames;
use crate::hash::random_tx_hash;
use crate::source::CountSource;
use crate::surface::Surface;

/// Count shown when the seed fetch fails.
pub const FALLBACK_COUNT: u64 = 1247;

/// Block height shown at startup.
pub const INITIAL_BLOCK_HEIGHT: u64 = 847_291;

/// Wall time of a full counter animation.
pub const ANIMATION_DURATION: Duration = Duration::from_secs(2);

/// How long the error style stays on.
pub const ERROR_FLASH: Duration = Duration::from_secs(3);

/// How long a network-status string stays on.
pub const STATUS_FLASH: Duration = Duration::from_secs(2);

/// Chance that an activity tick shows a status string at all.
pub const ACTIVITY_PROBABILITY: f64 = 0.3;

/// Strings flashed by the activity timer.
pub const ACTIVITY_MESSAGES: [&str; 4] = [
    "Processing transactions...",
    "Network Active",
    "Validating blocks...",
    "Syncing with peers...",
];

const ANIMATION_STEPS: u32 = 60;
const BLOCK_INTERVAL_SECS: std::ops::Range<u64> = 12..16;
const ACTIVITY_INTERVAL_SECS: std::ops::Range<u64> = 5..11;

/// The widget. Cheap to clone via [`Arc`]; all mutation goes through the
/// internal lock so timers and signup responses never interleave badly.
pub struct CounterWidget {
    state: Mutex<DisplayState>,
    source: Arc<dyn CountSource>,
    surface: Arc<dyn Surface>,
}

impl CounterWidget {
    #[must_use]
    pub fn new(source: Arc<dyn CountSource>, surface: Arc<dyn Surface>) -> Self {
        Self {
            state: Mutex::new(DisplayState::new(INITIAL_BLOCK_HEIGHT)),
            source,
            surface,
        }
    }

    /// One-time startup paint: seed the counter from the server (falling
    /// back to [`FALLBACK_COUNT`] if the fetch fails), draw a fresh hash,
    /// and show the initial block height.
    pub async fn seed(&self) {
        let count = match self.source.fetch_count().await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, "count seed failed, using fallback");
                FALLBACK_COUNT
            }
        };

        let hash = random_tx_hash();
        let mut state = self.state.lock().await;
        state.displayed_count = count;
        state.target_count = count;
        state.tx_hash.clone_from(&hash);

        self.surface.set_count(count);
        self.surface.set_tx_hash(&hash);
        self.surface.set_block_height(state.block_height);
    }

    /// React to a successful signup: bump the target to the server's new
    /// count, draw a fresh hash, and ease the counter up to the target.
    pub async fn apply_signup_success(&self, new_count: u64) {
        let hash = random_tx_hash();
        {
            let mut state = self.state.lock().await;
            state.target_count = new_count;
            state.tx_hash.clone_from(&hash);
            self.surface.set_tx_hash(&hash);
        }
        self.animate_to_target().await;
    }

    /// React to a failed signup: flash the error style, then clear it.
    /// The counter is left untouched.
    pub async fn flash_error(&self) {
        self.surface.set_error(true);
        tokio::time::sleep(ERROR_FLASH).await;
        self.surface.set_error(false);
    }

    /// Ease `displayed_count` toward `target_count` over
    /// [`ANIMATION_DURATION`], pulsing the surface when it lands.
    ///
    /// If the target moves while a frame sleep is in flight the remaining
    /// frames are recomputed, so the counter always lands on the latest
    /// target.
    pub async fn animate_to_target(&self) {
        let frame_delay = ANIMATION_DURATION / ANIMATION_STEPS;
        loop {
            let (from, to) = {
                let mut state = self.state.lock().await;
                if state.displayed_count == state.target_count {
                    state.animating = false;
                    break;
                }
                state.animating = true;
                (state.displayed_count, state.target_count)
            };

            for frame in animation_frames(from, to, ANIMATION_STEPS) {
                tokio::time::sleep(frame_delay).await;
                let mut state = self.state.lock().await;
                if state.target_count != to {
                    // Retarget mid-flight; restart from wherever we are.
                    break;
                }
                state.displayed_count = frame;
                self.surface.set_count(frame);
            }
        }
        self.surface.pulse();
    }

    /// One block-timer tick: increment the height and repaint it.
    pub async fn advance_block(&self) {
        let mut state = self.state.lock().await;
        state.block_height += 1;
        self.surface.set_block_height(state.block_height);
    }

    /// One activity-timer tick: with probability
    /// [`ACTIVITY_PROBABILITY`], flash a random status string for
    /// [`STATUS_FLASH`], then clear it.
    pub async fn activity_tick(&self) {
        let Some(message) = pick_activity_message() else {
            return;
        };
        self.surface.set_status(Some(message));
        tokio::time::sleep(STATUS_FLASH).await;
        self.surface.set_status(None);
    }

    /// Current state snapshot.
    pub async fn snapshot(&self) -> DisplayState {
        self.state.lock().await.clone()
    }

    /// Spawn the two background simulation loops. They run until the
    /// runtime shuts down; the widget has no teardown beyond being
    /// dropped with its tasks.
    pub fn spawn_simulation(self: &Arc<Self>) {
        let widget = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let delay = next_block_delay();
                tokio::time::sleep(delay).await;
                widget.advance_block().await;
            }
        });

        let widget = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let delay = next_activity_delay();
                tokio::time::sleep(delay).await;
                widget.activity_tick().await;
            }
        });
    }
}

// Random draws happen outside the async bodies: ThreadRng is not Send.

fn next_block_delay() -> Duration {
    Duration::from_secs(rand::rng().random_range(BLOCK_INTERVAL_SECS))
}

fn next_activity_delay() -> Duration {
    Duration::from_secs(rand::rng().random_range(ACTIVITY_INTERVAL_SECS))
}

fn pick_activity_message() -> Option<&'static str> {
    let mut rng = rand::rng();
    if rng.random_range(0.0..1.0) >= ACTIVITY_PROBABILITY {
        return None;
    }
    let index = rng.random_range(0..ACTIVITY_MESSAGES.len());
    Some(ACTIVITY_MESSAGES[index])
}
