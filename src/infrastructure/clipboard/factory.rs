//! Clipboard backend selection

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::application::ports::SystemClipboard;

use super::arboard::ArboardClipboard;
use super::wayland::WaylandClipboard;

/// User preference for the clipboard backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardBackend {
    /// wl-clipboard on a Wayland session with the tools installed, arboard otherwise
    #[default]
    Auto,
    /// Cross-platform arboard library
    Arboard,
    /// wl-paste / wl-copy
    Wayland,
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardBackend::Auto => write!(f, "auto"),
            ClipboardBackend::Arboard => write!(f, "arboard"),
            ClipboardBackend::Wayland => write!(f, "wayland"),
        }
    }
}

/// Error type for parsing a clipboard backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClipboardBackendError {
    pub value: String,
}

impl fmt::Display for ParseClipboardBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid clipboard backend '{}'. Valid options: {}",
            self.value,
            ClipboardBackend::VALID_OPTIONS
        )
    }
}

impl std::error::Error for ParseClipboardBackendError {}

impl ClipboardBackend {
    pub const VALID_OPTIONS: &'static str = "auto, arboard, wayland";
}

impl FromStr for ClipboardBackend {
    type Err = ParseClipboardBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ClipboardBackend::Auto),
            "arboard" => Ok(ClipboardBackend::Arboard),
            "wayland" | "wl-clipboard" => Ok(ClipboardBackend::Wayland),
            _ => Err(ParseClipboardBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if a binary is on PATH
fn is_tool_available(tool: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(tool).is_file()))
        .unwrap_or(false)
}

/// Resolve `Auto` to a concrete backend for this session
pub fn detect_backend() -> ClipboardBackend {
    let wayland_session = env::var_os("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
    if cfg!(target_os = "linux")
        && wayland_session
        && is_tool_available("wl-paste")
        && is_tool_available("wl-copy")
    {
        ClipboardBackend::Wayland
    } else {
        ClipboardBackend::Arboard
    }
}

/// Create a clipboard adapter for the given preference.
///
/// Returns the adapter and the backend actually used.
pub fn create_clipboard(backend: ClipboardBackend) -> (Box<dyn SystemClipboard>, ClipboardBackend) {
    let resolved = match backend {
        ClipboardBackend::Auto => detect_backend(),
        other => other,
    };

    tracing::debug!(requested = %backend, resolved = %resolved, "selected clipboard backend");

    let clipboard: Box<dyn SystemClipboard> = match resolved {
        ClipboardBackend::Wayland => Box::new(WaylandClipboard::new()),
        ClipboardBackend::Arboard | ClipboardBackend::Auto => Box::new(ArboardClipboard::new()),
    };
    (clipboard, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_display() {
        assert_eq!(ClipboardBackend::Auto.to_string(), "auto");
        assert_eq!(ClipboardBackend::Arboard.to_string(), "arboard");
        assert_eq!(ClipboardBackend::Wayland.to_string(), "wayland");
    }

    #[test]
    fn backend_from_str() {
        assert_eq!("auto".parse::<ClipboardBackend>().unwrap(), ClipboardBackend::Auto);
        assert_eq!(
            "ARBOARD".parse::<ClipboardBackend>().unwrap(),
            ClipboardBackend::Arboard
        );
        assert_eq!(
            "wl-clipboard".parse::<ClipboardBackend>().unwrap(),
            ClipboardBackend::Wayland
        );
    }

    #[test]
    fn backend_from_str_invalid() {
        let err = "x11".parse::<ClipboardBackend>().unwrap_err();
        assert_eq!(err.value, "x11");
        assert!(err.to_string().contains("auto, arboard, wayland"));
    }

    #[test]
    fn backend_default_is_auto() {
        assert_eq!(ClipboardBackend::default(), ClipboardBackend::Auto);
    }

    #[test]
    fn detection_never_returns_auto() {
        assert_ne!(detect_backend(), ClipboardBackend::Auto);
    }

    #[test]
    fn explicit_backend_is_kept() {
        let (_, used) = create_clipboard(ClipboardBackend::Arboard);
        assert_eq!(used, ClipboardBackend::Arboard);
    }
}
