/// Web-layer timing and interaction tuning constants.
///
/// These express intended behavior (polling cadences, debounce windows,
/// cooldowns) and keep magic numbers out of the wiring code.
// Proximity polling cadence per input kind (ms)
pub const POLL_MS_POINTER: i32 = 20;
pub const POLL_MS_TOUCH: i32 = 30;

// Out-of-viewport recovery check cadence (ms)
pub const VIEWPORT_CHECK_MS: i32 = 500;

// Settle cooldown after a flee animation completes (seconds)
pub const SETTLE_SEC_POINTER: f32 = 0.05;
pub const SETTLE_SEC_TOUCH: f32 = 0.10;

// Minimum gap between touch-initiated flees (ms)
pub const TOUCH_DEBOUNCE_MS: f64 = 200.0;

// Haptic patterns (ms)
pub const HAPTIC_FLEE_MS: i32 = 30;
pub const HAPTIC_TAP_PATTERN: [i32; 3] = [20, 10, 20];

// Celebration pacing (seconds between spawns)
pub const CONFETTI_BURST_EVERY: f32 = 0.8;
pub const HEART_SPAWN_EVERY: f32 = 0.4;
pub const CONFETTI_BURST_COUNT: usize = 24;

// localStorage key for the remembered partner name
pub const SAVED_NAME_KEY: &str = "valentinePartnerName";
