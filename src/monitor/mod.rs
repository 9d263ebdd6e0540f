use crate::constants::{LOOKBACK_WINDOWS_MS, MIN_USAGE_STATS_SDK};
use crate::platform::{UsageEventKind, UsagePlatform};

/// Find the package currently in the foreground by scanning the OS
/// usage-event stream.
///
/// Each lookback window is tried in ascending order over `[now - window, now)`.
/// Within a window the chronologically last moved-to-foreground event wins;
/// the window yields a result only when that event carries a non-empty
/// package, and the first window that does short-circuits the rest. Every
/// call re-scans from scratch; nothing is memoized.
///
/// Returns `None` when no window holds a foreground event, or unconditionally
/// on devices below the usage-stats SDK floor.
pub fn current_foreground_app(platform: &dyn UsagePlatform, now_ms: i64) -> Option<String> {
    if platform.sdk_version() < MIN_USAGE_STATS_SDK {
        return None;
    }

    for window_ms in LOOKBACK_WINDOWS_MS {
        let begin_ms = now_ms - window_ms;

        let events = match platform.query_usage_events(begin_ms, now_ms) {
            Ok(events) => events,
            Err(e) => {
                // A failed query reads as an empty window; the wider windows
                // still get their chance.
                log::warn!("Usage-event query over {}ms failed: {}", window_ms, e);
                continue;
            }
        };

        // Every foreground event overwrites the tracked value, so a trailing
        // package-less event (surfaced as "") masks earlier hits in this
        // window. The non-empty filter applies to the final value only.
        let mut package: Option<String> = None;
        for event in events {
            if event.kind == UsageEventKind::MovedToForeground {
                package = Some(event.package);
            }
        }

        match package {
            Some(p) if !p.is_empty() => return Some(p),
            _ => {}
        }
    }

    None
}
