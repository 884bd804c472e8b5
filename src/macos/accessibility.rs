use crate::macos::core_graphics::{self, ScreenInfo};
use crate::models::{Point, Rect, Size, WindowId};
use crate::{FrameSnapError, Result};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// One OS window the engine can move and resize.
///
/// Frame changes and minimum-size probes complete asynchronously on the OS
/// side, so they are futures here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Window: Send + Sync {
    /// Identity used as the history key
    fn id(&self) -> WindowId;

    /// False once the OS window has gone away
    fn is_valid(&self) -> bool;

    fn current_frame(&self) -> Result<Rect>;

    /// Move and resize, resolving once the OS confirms the change
    async fn set_frame(&self, frame: Rect, animate: bool) -> Result<()>;

    fn set_origin(&self, origin: Point) -> Result<()>;

    fn activate(&self) -> Result<()>;

    fn toggle_fullscreen(&self) -> Result<()>;

    fn set_fullscreen(&self, fullscreen: bool) -> Result<()>;

    fn toggle_hidden(&self) -> Result<()>;

    fn toggle_minimized(&self) -> Result<()>;

    /// Smallest size the owning app accepts for this window on `screen`
    async fn minimum_size(&self, screen: &ScreenInfo) -> Result<Size>;
}

/// Abstraction for locating windows through the macOS Accessibility APIs
pub trait WindowProvider: Send + Sync {
    /// Mouse location, if it can be read
    fn pointer_location(&self) -> Option<Point>;

    /// Direct accessibility hit-test for the window under a point
    fn element_at_position(&self, point: Point) -> Result<Option<Arc<dyn Window>>>;

    /// On-screen windows ordered front to back
    fn on_screen_windows(&self) -> Result<Vec<Arc<dyn Window>>>;

    /// Focused window of the active application
    fn frontmost_window(&self) -> Result<Option<Arc<dyn Window>>>;
}

/// Default system-backed provider placeholder
#[derive(Debug, Default)]
pub struct SystemWindowProvider;

impl SystemWindowProvider {
    pub fn new() -> Self {
        Self
    }
}

impl WindowProvider for SystemWindowProvider {
    fn pointer_location(&self) -> Option<Point> {
        core_graphics::pointer_location()
    }

    fn element_at_position(&self, _point: Point) -> Result<Option<Arc<dyn Window>>> {
        Err(FrameSnapError::MacOSAPIError(
            "SystemWindowProvider is not implemented in this environment".into(),
        )
        .into())
    }

    fn on_screen_windows(&self) -> Result<Vec<Arc<dyn Window>>> {
        Err(FrameSnapError::MacOSAPIError(
            "SystemWindowProvider is not implemented in this environment".into(),
        )
        .into())
    }

    fn frontmost_window(&self) -> Result<Option<Arc<dyn Window>>> {
        Err(FrameSnapError::MacOSAPIError(
            "SystemWindowProvider is not implemented in this environment".into(),
        )
        .into())
    }
}

/// Observable state of an [`InMemoryWindow`]
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryWindowState {
    pub frame: Rect,
    /// Sizes below this are refused, like apps with a fixed minimum content size
    pub minimum_size: Option<Size>,
    pub is_fullscreen: bool,
    pub is_hidden: bool,
    pub is_minimized: bool,
    pub is_focused: bool,
    pub is_valid: bool,
    pub set_frame_calls: usize,
    pub set_origin_calls: usize,
    pub last_animated: Option<bool>,
    /// Invalidate the window while the next `set_frame` is in flight
    pub close_during_next_set_frame: bool,
}

/// Simple in-memory window used for testing and offline simulation
#[derive(Debug)]
pub struct InMemoryWindow {
    id: WindowId,
    state: RwLock<InMemoryWindowState>,
}

impl InMemoryWindow {
    pub fn new(id: WindowId, frame: Rect) -> Self {
        Self {
            id,
            state: RwLock::new(InMemoryWindowState {
                frame,
                minimum_size: None,
                is_fullscreen: false,
                is_hidden: false,
                is_minimized: false,
                is_focused: false,
                is_valid: true,
                set_frame_calls: 0,
                set_origin_calls: 0,
                last_animated: None,
                close_during_next_set_frame: false,
            }),
        }
    }

    pub fn with_minimum_size(self, minimum_size: Size) -> Self {
        self.state.write().expect("poisoned lock").minimum_size = Some(minimum_size);
        self
    }

    pub fn snapshot(&self) -> InMemoryWindowState {
        self.state.read().expect("poisoned lock").clone()
    }

    pub fn frame(&self) -> Rect {
        self.state.read().expect("poisoned lock").frame
    }

    pub fn set_fullscreen_state(&self, fullscreen: bool) {
        self.state.write().expect("poisoned lock").is_fullscreen = fullscreen;
    }

    pub fn invalidate(&self) {
        self.state.write().expect("poisoned lock").is_valid = false;
    }

    pub fn close_during_next_set_frame(&self) {
        self.state
            .write()
            .expect("poisoned lock")
            .close_during_next_set_frame = true;
    }

    fn ensure_valid(&self, state: &InMemoryWindowState) -> Result<()> {
        if state.is_valid {
            Ok(())
        } else {
            Err(FrameSnapError::WindowInvalid(self.id).into())
        }
    }
}

#[async_trait]
impl Window for InMemoryWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn is_valid(&self) -> bool {
        self.state.read().expect("poisoned lock").is_valid
    }

    fn current_frame(&self) -> Result<Rect> {
        let state = self.state.read().expect("poisoned lock");
        self.ensure_valid(&state)?;
        Ok(state.frame)
    }

    async fn set_frame(&self, frame: Rect, animate: bool) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;

        let mut applied = frame;
        if let Some(minimum) = state.minimum_size {
            applied.size.width = applied.size.width.max(minimum.width);
            applied.size.height = applied.size.height.max(minimum.height);
        }

        state.frame = applied;
        state.set_frame_calls += 1;
        state.last_animated = Some(animate);
        if state.close_during_next_set_frame {
            state.close_during_next_set_frame = false;
            state.is_valid = false;
        }
        Ok(())
    }

    fn set_origin(&self, origin: Point) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.frame.origin = origin;
        state.set_origin_calls += 1;
        Ok(())
    }

    fn activate(&self) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.is_focused = true;
        Ok(())
    }

    fn toggle_fullscreen(&self) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.is_fullscreen = !state.is_fullscreen;
        Ok(())
    }

    fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.is_fullscreen = fullscreen;
        Ok(())
    }

    fn toggle_hidden(&self) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.is_hidden = !state.is_hidden;
        Ok(())
    }

    fn toggle_minimized(&self) -> Result<()> {
        let mut state = self.state.write().expect("poisoned lock");
        self.ensure_valid(&state)?;
        state.is_minimized = !state.is_minimized;
        Ok(())
    }

    async fn minimum_size(&self, _screen: &ScreenInfo) -> Result<Size> {
        let state = self.state.read().expect("poisoned lock");
        self.ensure_valid(&state)?;
        Ok(state.minimum_size.unwrap_or_default())
    }
}

/// In-memory window provider; windows are kept in front-to-back order
#[derive(Debug, Default)]
pub struct InMemoryWindowProvider {
    windows: RwLock<Vec<Arc<InMemoryWindow>>>,
    pointer: RwLock<Option<Point>>,
    frontmost: RwLock<Option<WindowId>>,
    element_hit_testing: RwLock<bool>,
}

impl InMemoryWindowProvider {
    pub fn new_with(windows: Vec<Arc<InMemoryWindow>>) -> Self {
        Self {
            windows: RwLock::new(windows),
            pointer: RwLock::new(None),
            frontmost: RwLock::new(None),
            element_hit_testing: RwLock::new(true),
        }
    }

    pub fn set_pointer_location(&self, point: Option<Point>) {
        *self.pointer.write().expect("poisoned lock") = point;
    }

    pub fn set_frontmost(&self, window: Option<WindowId>) {
        *self.frontmost.write().expect("poisoned lock") = window;
    }

    /// Turn the direct accessibility hit-test on or off to exercise the
    /// window-list fallback
    pub fn set_element_hit_testing(&self, enabled: bool) {
        *self.element_hit_testing.write().expect("poisoned lock") = enabled;
    }

    fn visible_windows(&self) -> Vec<Arc<InMemoryWindow>> {
        self.windows
            .read()
            .expect("poisoned lock")
            .iter()
            .filter(|window| {
                let state = window.snapshot();
                state.is_valid && !state.is_hidden && !state.is_minimized
            })
            .cloned()
            .collect()
    }
}

impl WindowProvider for InMemoryWindowProvider {
    fn pointer_location(&self) -> Option<Point> {
        *self.pointer.read().expect("poisoned lock")
    }

    fn element_at_position(&self, point: Point) -> Result<Option<Arc<dyn Window>>> {
        if !*self.element_hit_testing.read().expect("poisoned lock") {
            return Ok(None);
        }

        Ok(self
            .visible_windows()
            .into_iter()
            .find(|window| window.frame().contains(point))
            .map(|window| window as Arc<dyn Window>))
    }

    fn on_screen_windows(&self) -> Result<Vec<Arc<dyn Window>>> {
        Ok(self
            .visible_windows()
            .into_iter()
            .map(|window| window as Arc<dyn Window>)
            .collect())
    }

    fn frontmost_window(&self) -> Result<Option<Arc<dyn Window>>> {
        let visible = self.visible_windows();
        let frontmost = *self.frontmost.read().expect("poisoned lock");
        let window = match frontmost {
            Some(id) => visible.into_iter().find(|window| window.id() == id),
            None => visible.into_iter().next(),
        };
        Ok(window.map(|window| window as Arc<dyn Window>))
    }
}
