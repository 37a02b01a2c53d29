//! Fixed game constants and tick-derived timers.

/// Width and height of one maze cell, in pixels.
pub const CELL_SIZE: i32 = 25;
/// Pixels the player moves per tick.
pub const PLAYER_SPEED: i32 = 2;
/// Pixels a ghost moves per tick.
pub const GHOST_SPEED: i32 = 1;
/// Axis-aligned reach within which the player eats a dot.
pub const DOT_RADIUS: i32 = 8;
/// Axis-aligned reach within which a ghost catches the player.
pub const CATCH_RADIUS: i32 = 10;

pub const DEFAULT_TICK_HZ: u32 = 30;
pub const RESPAWN_DELAY_SECS: u32 = 5;
pub const SPAWN_INTERVAL_SECS: u32 = 5;
/// Mouth open/close flips per second.
pub const MOUTH_TOGGLES_PER_SEC: u32 = 3;

/// Timers expressed in ticks at a fixed tick rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick_hz: u32,
    pub respawn_delay: u64,
    pub spawn_interval: u64,
    pub mouth_period: u64,
}

impl Timing {
    pub fn from_tick_rate(tick_hz: u32) -> Self {
        let hz = u64::from(tick_hz.max(1));
        Self {
            tick_hz: tick_hz.max(1),
            respawn_delay: hz * u64::from(RESPAWN_DELAY_SECS),
            spawn_interval: hz * u64::from(SPAWN_INTERVAL_SECS),
            mouth_period: (hz / u64::from(MOUTH_TOGGLES_PER_SEC)).max(1),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_tick_rate(DEFAULT_TICK_HZ)
    }
}
