//! Android implementation of the usage-stats capability seam, plus the JNI
//! entry points the embedding application calls into.
//!
//! The embedding app hands over its application context once via `nativeInit`;
//! every capability call attaches to the VM and re-queries the OS from
//! scratch. Nothing is cached between calls.

use crate::error::{PlatformError, PlatformResult};
use crate::listener::{AccessibilityEvent, AccessibilityEventKind, WindowEventListener};
use crate::platform::types::{PermissionMode, UsageEvent, UsageEventKind, UsagePlatform};
use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{jboolean, jint, JNI_FALSE, JNI_TRUE};
use jni::{JNIEnv, JavaVM};
use std::sync::OnceLock;

/// AppOps operation name for the usage-stats permission.
const OPSTR_GET_USAGE_STATS: &str = "android:get_usage_stats";

/// Settings.ACTION_USAGE_ACCESS_SETTINGS.
const ACTION_USAGE_ACCESS_SETTINGS: &str = "android.settings.USAGE_ACCESS_SETTINGS";

/// Intent.FLAG_ACTIVITY_NEW_TASK. Required when starting an activity from an
/// application context rather than an activity.
const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

struct AndroidRuntime {
    vm: JavaVM,
    context: GlobalRef,
}

static RUNTIME: OnceLock<AndroidRuntime> = OnceLock::new();

impl From<jni::errors::Error> for PlatformError {
    fn from(e: jni::errors::Error) -> Self {
        PlatformError::Jni(e.to_string())
    }
}

/// Stow the JavaVM and application context and install the Android logger.
///
/// Java signature: `public static native boolean nativeInit(Context context);`
/// Call once from `Application.onCreate()`.
#[no_mangle]
pub extern "C" fn Java_com_usagebridge_UsageBridge_nativeInit(
    env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jboolean {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("UsageBridge"),
    );

    let vm = match env.get_java_vm() {
        Ok(vm) => vm,
        Err(e) => {
            log::error!("Failed to obtain JavaVM: {}", e);
            return JNI_FALSE;
        }
    };
    let context = match env.new_global_ref(&context) {
        Ok(global) => global,
        Err(e) => {
            log::error!("Failed to pin application context: {}", e);
            return JNI_FALSE;
        }
    };

    if RUNTIME.set(AndroidRuntime { vm, context }).is_err() {
        // Second init is harmless; keep the first context.
        log::warn!("Usage bridge already initialized");
    }
    JNI_TRUE
}

/// Accessibility callback forwarded from the service.
///
/// Java signature:
/// `public static native void nativeOnAccessibilityEvent(int eventType, String packageName);`
#[no_mangle]
pub extern "C" fn Java_com_usagebridge_AccessibilityBridge_nativeOnAccessibilityEvent(
    mut env: JNIEnv,
    _class: JClass,
    event_type: jint,
    package: JString,
) {
    let package: Option<String> = if package.is_null() {
        None
    } else {
        match env.get_string(&package) {
            Ok(s) => Some(s.into()),
            Err(e) => {
                log::error!("Failed to read package name from event: {}", e);
                None
            }
        }
    };

    let event = AccessibilityEvent {
        kind: AccessibilityEventKind::from_raw(event_type),
        package,
    };
    WindowEventListener::new().on_event(Some(&event));
}

/// Java signature: `public static native void nativeOnServiceConnected();`
#[no_mangle]
pub extern "C" fn Java_com_usagebridge_AccessibilityBridge_nativeOnServiceConnected(
    _env: JNIEnv,
    _class: JClass,
) {
    WindowEventListener::new().on_connected();
}

/// Java signature: `public static native void nativeOnInterrupt();`
#[no_mangle]
pub extern "C" fn Java_com_usagebridge_AccessibilityBridge_nativeOnInterrupt(
    _env: JNIEnv,
    _class: JClass,
) {
    WindowEventListener::new().on_interrupt();
}

fn runtime() -> PlatformResult<&'static AndroidRuntime> {
    RUNTIME
        .get()
        .ok_or_else(|| PlatformError::ServiceUnavailable("bridge not initialized".to_string()))
}

/// Look up a named system service on the application context.
fn system_service<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject,
    name: &str,
) -> PlatformResult<JObject<'local>> {
    let service_name = env.new_string(name)?;
    let service = env
        .call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&service_name)],
        )?
        .l()?;
    if service.is_null() {
        return Err(PlatformError::ServiceUnavailable(name.to_string()));
    }
    Ok(service)
}

/// `UsagePlatform` backed by the real OS services over JNI.
pub struct AndroidPlatform;

impl AndroidPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl UsagePlatform for AndroidPlatform {
    fn sdk_version(&self) -> u32 {
        let Ok(runtime) = runtime() else { return 0 };
        let mut env = match runtime.vm.attach_current_thread() {
            Ok(env) => env,
            Err(e) => {
                log::error!("Failed to attach to JVM: {}", e);
                return 0;
            }
        };
        match env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .and_then(|v| v.i())
        {
            Ok(sdk) => sdk.max(0) as u32,
            Err(e) => {
                log::error!("Could not read Build.VERSION.SDK_INT: {}", e);
                0
            }
        }
    }

    fn query_permission_mode(&self) -> PlatformResult<PermissionMode> {
        let runtime = runtime()?;
        let mut env = runtime.vm.attach_current_thread()?;
        let context = runtime.context.as_obj();

        let app_ops = system_service(&mut env, context, "appops")?;
        let uid = env
            .call_static_method("android/os/Process", "myUid", "()I", &[])?
            .i()?;
        let package = env
            .call_method(context, "getPackageName", "()Ljava/lang/String;", &[])?
            .l()?;
        let op = env.new_string(OPSTR_GET_USAGE_STATS)?;

        let mode = env
            .call_method(
                &app_ops,
                "checkOpNoThrow",
                "(Ljava/lang/String;ILjava/lang/String;)I",
                &[JValue::Object(&op), JValue::Int(uid), JValue::Object(&package)],
            )?
            .i()?;
        Ok(PermissionMode::from_raw(mode))
    }

    fn launch_usage_settings(&self) -> PlatformResult<()> {
        let runtime = runtime()?;
        let mut env = runtime.vm.attach_current_thread()?;
        let context = runtime.context.as_obj();

        let action = env.new_string(ACTION_USAGE_ACCESS_SETTINGS)?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&action)],
        )?;
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
        )?;
        env.call_method(
            context,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&intent)],
        )?;
        Ok(())
    }

    fn query_usage_events(&self, begin_ms: i64, end_ms: i64) -> PlatformResult<Vec<UsageEvent>> {
        let runtime = runtime()?;
        let mut env = runtime.vm.attach_current_thread()?;
        let context = runtime.context.as_obj();

        let manager = system_service(&mut env, context, "usagestats")?;
        let events = env
            .call_method(
                &manager,
                "queryEvents",
                "(JJ)Landroid/app/usage/UsageEvents;",
                &[JValue::Long(begin_ms), JValue::Long(end_ms)],
            )?
            .l()?;
        if events.is_null() {
            return Ok(Vec::new());
        }

        // Reused scratch object, filled in by getNextEvent.
        let event = env.new_object("android/app/usage/UsageEvents$Event", "()V", &[])?;

        let mut collected = Vec::new();
        while env.call_method(&events, "hasNextEvent", "()Z", &[])?.z()? {
            let advanced = env
                .call_method(
                    &events,
                    "getNextEvent",
                    "(Landroid/app/usage/UsageEvents$Event;)Z",
                    &[JValue::Object(&event)],
                )?
                .z()?;
            if !advanced {
                break;
            }

            let kind = UsageEventKind::from_raw(
                env.call_method(&event, "getEventType", "()I", &[])?.i()?,
            );
            let timestamp_ms = env.call_method(&event, "getTimeStamp", "()J", &[])?.j()?;
            let package_obj = env
                .call_method(&event, "getPackageName", "()Ljava/lang/String;", &[])?
                .l()?;
            let package: String = if package_obj.is_null() {
                String::new()
            } else {
                env.get_string(&JString::from(package_obj))?.into()
            };

            collected.push(UsageEvent {
                package,
                timestamp_ms,
                kind,
            });
        }

        Ok(collected)
    }
}
