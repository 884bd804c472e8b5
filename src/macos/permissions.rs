use crate::Result;
use anyhow::{anyhow, Context};
use std::process::Command;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub enum PrivacyPane {
    Accessibility,
    ScreenRecording,
}

impl PrivacyPane {
    fn url(self) -> &'static str {
        match self {
            PrivacyPane::Accessibility => {
                "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility"
            }
            PrivacyPane::ScreenRecording => {
                "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenCapture"
            }
        }
    }
}

/// Open the specified System Settings privacy pane to guide the user manually.
pub fn open_privacy_pane(pane: PrivacyPane) -> Result<()> {
    if !cfg!(target_os = "macos") {
        return Err(anyhow!(
            "opening System Settings is not supported on this platform"
        ));
    }

    let status = Command::new("open")
        .arg(pane.url())
        .status()
        .context("failed to open System Settings")?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("open command returned non-zero status: {status}"))
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use crate::Result;
    use core_foundation::base::TCFType;
    use core_foundation::boolean::CFBoolean;
    use core_foundation::dictionary::CFMutableDictionary;
    use core_foundation::string::CFString;
    use core_foundation_sys::dictionary::CFDictionaryRef;
    use core_foundation_sys::string::CFStringRef;

    #[link(name = "ApplicationServices", kind = "framework")]
    extern "C" {
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
        static kAXTrustedCheckOptionPrompt: CFStringRef;
        fn CGPreflightScreenCaptureAccess() -> bool;
        fn CGRequestScreenCaptureAccess() -> bool;
    }

    pub fn is_accessibility_permission_granted() -> Result<bool> {
        Ok(unsafe { AXIsProcessTrusted() })
    }

    pub fn prompt_accessibility_permission() -> Result<bool> {
        unsafe {
            let mut options = CFMutableDictionary::new();
            let key = CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt);
            let value = CFBoolean::true_value();
            options.set(key.clone(), value.clone());

            Ok(AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()))
        }
    }

    pub fn is_screen_recording_permission_granted() -> Result<bool> {
        Ok(unsafe { CGPreflightScreenCaptureAccess() })
    }

    pub fn prompt_screen_recording_permission() -> Result<bool> {
        Ok(unsafe { CGRequestScreenCaptureAccess() })
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use crate::Result;

    fn env_flag(name: &str) -> bool {
        std::env::var(name)
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn is_accessibility_permission_granted() -> Result<bool> {
        Ok(env_flag("FRAMESNAP_PERMISSION_ACCESSIBILITY"))
    }

    pub fn prompt_accessibility_permission() -> Result<bool> {
        Ok(env_flag("FRAMESNAP_PERMISSION_ACCESSIBILITY"))
    }

    pub fn is_screen_recording_permission_granted() -> Result<bool> {
        Ok(env_flag("FRAMESNAP_PERMISSION_SCREEN_RECORDING"))
    }

    pub fn prompt_screen_recording_permission() -> Result<bool> {
        Ok(env_flag("FRAMESNAP_PERMISSION_SCREEN_RECORDING"))
    }
}

pub use platform::{
    is_accessibility_permission_granted, is_screen_recording_permission_granted,
    prompt_accessibility_permission, prompt_screen_recording_permission,
};

/// Permission checks the resize engine needs before animating
pub trait PermissionProbe: Send + Sync {
    /// Whether screen recording (required for animated resizes) is granted
    fn screen_recording_granted(&self) -> bool;

    /// Ask the user for screen recording access; out of band, never blocks a resize
    fn request_screen_recording_access(&self);
}

/// Probe backed by the platform permission APIs
#[derive(Debug, Default)]
pub struct SystemPermissionProbe;

impl PermissionProbe for SystemPermissionProbe {
    fn screen_recording_granted(&self) -> bool {
        match is_screen_recording_permission_granted() {
            Ok(granted) => granted,
            Err(err) => {
                warn!("Screen recording permission check failed: {}", err);
                false
            }
        }
    }

    fn request_screen_recording_access(&self) {
        info!("Requesting screen recording access");
        match prompt_screen_recording_permission() {
            Ok(true) => debug!("Screen recording access granted"),
            Ok(false) => {
                if let Err(err) = open_privacy_pane(PrivacyPane::ScreenRecording) {
                    debug!("Could not open privacy pane: {}", err);
                }
            }
            Err(err) => warn!("Screen recording request failed: {}", err),
        }
    }
}

/// Probe with a fixed answer that counts access requests
#[derive(Debug, Default)]
pub struct InMemoryPermissionProbe {
    granted: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryPermissionProbe {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PermissionProbe for InMemoryPermissionProbe {
    fn screen_recording_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_screen_recording_access(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}
