pub mod types;

pub use types::{PermissionMode, UsageEvent, UsageEventKind, UsagePlatform};

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "android")]
pub use android::AndroidPlatform as NativePlatform;

// Stub for development on non-Android hosts. It reports an SDK level below the
// usage-stats floor, so the bridge answers every call with its safe default.
#[cfg(not(target_os = "android"))]
pub struct NativePlatform;

#[cfg(not(target_os = "android"))]
impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_os = "android"))]
impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
impl UsagePlatform for NativePlatform {
    fn sdk_version(&self) -> u32 {
        0
    }

    fn query_permission_mode(&self) -> crate::error::PlatformResult<PermissionMode> {
        Err(crate::error::PlatformError::Unsupported)
    }

    fn launch_usage_settings(&self) -> crate::error::PlatformResult<()> {
        Err(crate::error::PlatformError::Unsupported)
    }

    fn query_usage_events(
        &self,
        _begin_ms: i64,
        _end_ms: i64,
    ) -> crate::error::PlatformResult<Vec<UsageEvent>> {
        Err(crate::error::PlatformError::Unsupported)
    }
}
