use thiserror::Error;

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Errors from the OS capability layer.
///
/// None of these reach the embedding application: the bridge maps a failed
/// permission query to "not granted" and a failed event query to an empty
/// window.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("usage access is not supported on this platform")]
    Unsupported,

    #[error("OS service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("JNI bridge error: {0}")]
    Jni(String),
}
