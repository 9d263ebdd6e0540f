use crate::error::PlatformResult;

/// AppOps mode for the usage-stats operation, queried fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionMode {
    Allowed,
    Ignored,
    Errored,
    Default,
}

impl PermissionMode {
    /// Map a raw AppOpsManager mode code. Unknown codes read as errored.
    pub fn from_raw(mode: i32) -> Self {
        match mode {
            0 => PermissionMode::Allowed,
            1 => PermissionMode::Ignored,
            3 => PermissionMode::Default,
            _ => PermissionMode::Errored,
        }
    }

    pub fn is_allowed(self) -> bool {
        self == PermissionMode::Allowed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageEventKind {
    MovedToForeground,
    MovedToBackground,
    Other,
}

impl UsageEventKind {
    /// Map a raw UsageEvents.Event type code. Only the two move events matter;
    /// everything else is irrelevant to the scan.
    pub fn from_raw(event_type: i32) -> Self {
        match event_type {
            1 => UsageEventKind::MovedToForeground,
            2 => UsageEventKind::MovedToBackground,
            _ => UsageEventKind::Other,
        }
    }
}

/// A single entry from the OS usage-event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub package: String,
    pub timestamp_ms: i64,
    pub kind: UsageEventKind,
}

/// Narrow capability seam over the OS usage-stats services.
///
/// The bridge and the scan only ever talk to the OS through this trait, so
/// tests can substitute a fake. Implementations hold no state between calls.
pub trait UsagePlatform: Send + Sync {
    /// OS API level of the running device. Anything below
    /// [`crate::constants::MIN_USAGE_STATS_SDK`] resolves every bridge
    /// operation to its safe default.
    fn sdk_version(&self) -> u32;

    /// Read the usage-stats permission mode for the running process.
    fn query_permission_mode(&self) -> PlatformResult<PermissionMode>;

    /// Open the OS usage-access settings screen. Fire-and-forget: whether the
    /// user actually grants anything is never observed.
    fn launch_usage_settings(&self) -> PlatformResult<()>;

    /// Usage events in `[begin_ms, end_ms)`, in the chronological order the
    /// OS delivers them.
    fn query_usage_events(&self, begin_ms: i64, end_ms: i64) -> PlatformResult<Vec<UsageEvent>>;
}
