use crate::models::{Point, Rect};
use crate::{FrameSnapError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// A display as seen by the resize engine
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenInfo {
    pub id: String,
    pub name: String,
    /// Full display bounds
    pub frame: Rect,
    /// Area available for windows, with the menu bar and dock excluded
    pub usable_frame: Rect,
    pub scale_factor: f64,
    pub is_primary: bool,
}

impl ScreenInfo {
    pub fn primary(id: impl Into<String>, usable_frame: Rect) -> Self {
        Self {
            id: id.into(),
            name: "Primary".to_string(),
            frame: usable_frame,
            usable_frame,
            scale_factor: 2.0,
            is_primary: true,
        }
    }

    pub fn usable_frame(&self) -> Rect {
        self.usable_frame
    }
}

/// Abstraction over Core Graphics display enumeration
pub trait DisplayProvider: Send + Sync {
    /// Snapshot all screens currently available
    fn list_screens(&self) -> Result<Vec<ScreenInfo>>;

    /// Query a screen by identifier
    fn get_screen(&self, id: &str) -> Result<Option<ScreenInfo>>;

    /// Screen whose full frame contains the point
    fn screen_containing(&self, point: Point) -> Result<Option<ScreenInfo>> {
        Ok(self
            .list_screens()?
            .into_iter()
            .find(|screen| screen.frame.contains(point)))
    }

    fn primary_screen(&self) -> Result<Option<ScreenInfo>> {
        let screens = self.list_screens()?;
        let primary = screens.iter().position(|screen| screen.is_primary);
        Ok(match primary {
            Some(index) => screens.into_iter().nth(index),
            None => screens.into_iter().next(),
        })
    }
}

/// Default system-backed display provider placeholder
#[derive(Debug, Default)]
pub struct SystemDisplayProvider;

impl SystemDisplayProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayProvider for SystemDisplayProvider {
    fn list_screens(&self) -> Result<Vec<ScreenInfo>> {
        Err(FrameSnapError::MacOSAPIError(
            "SystemDisplayProvider is not implemented in this environment".into(),
        )
        .into())
    }

    fn get_screen(&self, _id: &str) -> Result<Option<ScreenInfo>> {
        Err(FrameSnapError::MacOSAPIError(
            "SystemDisplayProvider is not implemented in this environment".into(),
        )
        .into())
    }
}

/// In-memory display provider for tests and offline simulation
#[derive(Debug, Default)]
pub struct InMemoryDisplayProvider {
    screens: RwLock<HashMap<String, ScreenInfo>>,
}

impl InMemoryDisplayProvider {
    pub fn new_with(screens: Vec<ScreenInfo>) -> Self {
        let mut map = HashMap::new();
        for screen in screens {
            map.insert(screen.id.clone(), screen);
        }
        Self {
            screens: RwLock::new(map),
        }
    }
}

impl DisplayProvider for InMemoryDisplayProvider {
    fn list_screens(&self) -> Result<Vec<ScreenInfo>> {
        let mut screens: Vec<ScreenInfo> = self
            .screens
            .read()
            .expect("poisoned lock")
            .values()
            .cloned()
            .collect();
        screens.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(screens)
    }

    fn get_screen(&self, id: &str) -> Result<Option<ScreenInfo>> {
        Ok(self.screens.read().expect("poisoned lock").get(id).cloned())
    }
}

/// Current mouse location in global display coordinates
#[cfg(target_os = "macos")]
pub fn pointer_location() -> Option<Point> {
    use ::core_graphics::event::CGEvent;
    use ::core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).ok()?;
    let event = CGEvent::new(source).ok()?;
    let location = event.location();
    Some(Point::new(location.x, location.y))
}

#[cfg(not(target_os = "macos"))]
pub fn pointer_location() -> Option<Point> {
    None
}
