// src/constants.rs

/// First Android SDK level with the usage-stats API (Lollipop).
pub const MIN_USAGE_STATS_SDK: u32 = 21;

/// Lookback windows for the foreground scan, smallest first.
///
/// Short windows are cheap and usually enough; the wider ones cover events
/// missed around process start or small OS timing gaps.
pub const LOOKBACK_WINDOWS_MS: [i64; 4] = [
    1_000,      // 1 second
    60_000,     // 1 minute
    3_600_000,  // 1 hour
    43_200_000, // 12 hours
];

/// Maximum framed message size on the bridge channel (1 MiB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;
