//! Shared test utilities for the usage bridge.
//!
//! Provides a configurable fake of the OS capability seam so bridge and scan
//! tests run without an Android device.

#![cfg(test)]

use crate::error::{PlatformError, PlatformResult};
use crate::platform::{PermissionMode, UsageEvent, UsageEventKind, UsagePlatform};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fake `UsagePlatform` for tests.
///
/// Events are stored with absolute timestamps; queries return the ones inside
/// the requested range, preserving insertion order (the fake stands in for the
/// OS, which delivers events chronologically).
pub struct FakePlatform {
    pub sdk: u32,
    pub mode: PermissionMode,
    pub fail_permission_query: bool,
    pub events: Vec<UsageEvent>,
    /// Event queries spanning less than this many milliseconds fail, to
    /// exercise the scan's fallback to wider windows.
    pub fail_spans_below_ms: Option<i64>,
    pub settings_launches: AtomicUsize,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            sdk: 34,
            mode: PermissionMode::Allowed,
            fail_permission_query: false,
            events: Vec::new(),
            fail_spans_below_ms: None,
            settings_launches: AtomicUsize::new(0),
        }
    }

    pub fn with_sdk(sdk: u32) -> Self {
        Self { sdk, ..Self::new() }
    }

    pub fn launches(&self) -> usize {
        self.settings_launches.load(Ordering::SeqCst)
    }
}

impl UsagePlatform for FakePlatform {
    fn sdk_version(&self) -> u32 {
        self.sdk
    }

    fn query_permission_mode(&self) -> PlatformResult<PermissionMode> {
        if self.fail_permission_query {
            return Err(PlatformError::ServiceUnavailable("appops".to_string()));
        }
        Ok(self.mode)
    }

    fn launch_usage_settings(&self) -> PlatformResult<()> {
        self.settings_launches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn query_usage_events(&self, begin_ms: i64, end_ms: i64) -> PlatformResult<Vec<UsageEvent>> {
        if let Some(min_span) = self.fail_spans_below_ms {
            if end_ms - begin_ms < min_span {
                return Err(PlatformError::ServiceUnavailable("usagestats".to_string()));
            }
        }
        Ok(self
            .events
            .iter()
            .filter(|e| e.timestamp_ms >= begin_ms && e.timestamp_ms < end_ms)
            .cloned()
            .collect())
    }
}

/// Shorthand for a moved-to-foreground event.
pub fn foreground_event(package: &str, timestamp_ms: i64) -> UsageEvent {
    UsageEvent {
        package: package.to_string(),
        timestamp_ms,
        kind: UsageEventKind::MovedToForeground,
    }
}

/// Shorthand for a moved-to-background event.
pub fn background_event(package: &str, timestamp_ms: i64) -> UsageEvent {
    UsageEvent {
        package: package.to_string(),
        timestamp_ms,
        kind: UsageEventKind::MovedToBackground,
    }
}
