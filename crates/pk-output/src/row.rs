//! Plain data row types written by output backends.

/// Marker for "no space" in [`BotSnapshotRow::target_space`].
pub const NO_SPACE: u32 = u32::MAX;

/// One bot's pose and state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotSnapshotRow {
    pub bot_id:       u32,
    pub tick:         u64,
    pub x:            f32,
    pub y:            f32,
    /// `north`, `east`, `south` or `west`.
    pub heading:      &'static str,
    /// `searching`, `parking`, `exiting` or `parked`.
    pub state:        &'static str,
    /// The space a parking bot is heading for or a parked bot holds;
    /// [`NO_SPACE`] otherwise.
    pub target_space: u32,
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub elapsed_ms:  u64,
    pub active_bots: u64,
    pub parked_bots: u64,
    pub free_spaces: u64,
    pub spawned:     u64,
    pub vacated:     u64,
    pub parked:      u64,
    pub departed:    u64,
}
