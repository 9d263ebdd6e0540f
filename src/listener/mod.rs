/// Accessibility event kinds the listener cares to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityEventKind {
    WindowStateChanged,
    Other,
}

impl AccessibilityEventKind {
    /// Map a raw AccessibilityEvent type code (TYPE_WINDOW_STATE_CHANGED = 32).
    pub fn from_raw(event_type: i32) -> Self {
        match event_type {
            32 => AccessibilityEventKind::WindowStateChanged,
            _ => AccessibilityEventKind::Other,
        }
    }
}

/// A window-state notification pushed by the OS accessibility service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityEvent {
    pub kind: AccessibilityEventKind,
    pub package: Option<String>,
}

/// Extract the newly foregrounded package from an event, if it carries one.
pub fn foreground_change(event: &AccessibilityEvent) -> Option<&str> {
    if event.kind != AccessibilityEventKind::WindowStateChanged {
        return None;
    }
    event.package.as_deref().filter(|p| !p.is_empty())
}

/// Pass-through accessibility callback.
///
/// Emits a diagnostic log line per window-state change and nothing else.
/// Foreground monitoring is done by the polling scan in `monitor`, not by
/// these callbacks, so their output is never consumed by the query path.
pub struct WindowEventListener;

impl WindowEventListener {
    pub fn new() -> Self {
        Self
    }

    /// OS callback for a delivered event. Absent events are a no-op.
    pub fn on_event(&self, event: Option<&AccessibilityEvent>) {
        let Some(event) = event else { return };
        if let Some(package) = foreground_change(event) {
            log::debug!("Foreground app: {}", package);
        }
    }

    /// OS callback once the accessibility service is bound.
    pub fn on_connected(&self) {
        log::debug!("Accessibility service connected");
    }

    /// OS callback when the service is interrupted.
    pub fn on_interrupt(&self) {
        log::debug!("Accessibility service interrupted");
    }
}

impl Default for WindowEventListener {
    fn default() -> Self {
        Self::new()
    }
}
