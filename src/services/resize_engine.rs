use crate::config::ResizeSettings;
use crate::macos::accessibility::{Window, WindowProvider};
use crate::macos::core_graphics::{DisplayProvider, ScreenInfo};
use crate::macos::permissions::PermissionProbe;
use crate::models::{Direction, HistoryEntry, PaddingConfiguration, Rect, Size, WindowId};
use crate::services::window_history::WindowHistoryStore;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Why a resize request ended without touching the window's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoAction,
    /// Undo or initial-frame with nothing recorded to go back to
    Unresolvable,
    NoTargetWindow,
    NoScreen,
    /// The window went away while a frame change was in flight
    WindowClosed,
}

/// Result of one resize request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// A new frame was requested from the OS
    Applied { direction: Direction, frame: Rect },
    /// Fullscreen, hide or minimize was toggled
    Toggled(Direction),
    Skipped(SkipReason),
    /// Animated resizes need screen recording access; a request was issued
    PermissionRequired,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoAction => "no action",
            SkipReason::Unresolvable => "nothing recorded to resolve against",
            SkipReason::NoTargetWindow => "no target window",
            SkipReason::NoScreen => "no screen",
            SkipReason::WindowClosed => "window closed",
        };
        f.write_str(reason)
    }
}

impl fmt::Display for ResizeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeOutcome::Applied { frame, .. } => write!(f, "applied {frame}"),
            ResizeOutcome::Toggled(direction) => write!(f, "toggled {direction}"),
            ResizeOutcome::Skipped(reason) => write!(f, "skipped: {reason}"),
            ResizeOutcome::PermissionRequired => {
                f.write_str("screen recording permission required")
            }
        }
    }
}

/// Frames computed for a directive before anything is applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FramePlan {
    /// Directive the frame was computed from; differs from the request for `undo`
    pub resolved: Direction,
    pub raw: Rect,
    pub target: Rect,
}

/// Counters for resize operations
#[derive(Debug, Default, Clone)]
pub struct ResizeEngineMetrics {
    pub requests: u64,
    pub applied: u64,
    pub toggled: u64,
    pub skipped: u64,
    pub permission_prompts: u64,
    pub constraint_corrections: u64,
    pub dropped_completions: u64,
}

/// Compute the raw frame for `direction`, or `None` when it cannot be resolved.
///
/// `undo` resolves to the directive the window's last one replaced and is
/// computed as that directive. Also returns the directive actually used.
pub fn generate_frame(
    window_frame: Rect,
    screen_frame: Rect,
    direction: Direction,
    history: Option<&HistoryEntry>,
) -> Option<(Rect, Direction)> {
    match direction {
        Direction::Center => {
            let frame = Rect::from_xywh(
                screen_frame.mid_x() - window_frame.size.width / 2.0,
                screen_frame.mid_y() - window_frame.size.height / 2.0,
                window_frame.size.width,
                window_frame.size.height,
            );
            Some((frame, direction))
        }
        Direction::Undo => {
            let previous = history?.replaced_direction?;
            if previous == Direction::Undo {
                return None;
            }
            generate_frame(window_frame, screen_frame, previous, history)
        }
        Direction::InitialFrame => history.map(|entry| (entry.initial_frame, direction)),
        Direction::NoAction | Direction::Fullscreen | Direction::Hide | Direction::Minimize => None,
        _ => direction
            .multipliers()
            .map(|multipliers| (multipliers.apply(screen_frame), direction)),
    }
}

/// Raw frame plus padding, or `None` when the padded frame has no area.
///
/// `center` and `initial-frame` are not padded: repeating them would shrink the
/// window each time and `initial-frame` would no longer restore the exact frame.
pub fn preview(
    window_frame: Rect,
    screen_frame: Rect,
    direction: Direction,
    padding: &PaddingConfiguration,
    history: Option<&HistoryEntry>,
) -> Option<FramePlan> {
    let (raw, resolved) = generate_frame(window_frame, screen_frame, direction, history)?;
    let target = if resolved.is_window_relative() {
        raw
    } else {
        padding.apply(raw, resolved)
    };

    if target.size.width <= 0.0 || target.size.height <= 0.0 {
        return None;
    }

    Some(FramePlan {
        resolved,
        raw,
        target,
    })
}

/// Shift `target` so a window of `minimum_size` still fits inside the screen
pub fn clamp_to_minimum_size(
    target: Rect,
    minimum_size: Size,
    screen_frame: Rect,
    gap: f64,
) -> Rect {
    let mut clamped = target;

    if clamped.min_x() + minimum_size.width > screen_frame.max_x() {
        clamped.origin.x = screen_frame.max_x() - minimum_size.width - gap;
    }

    if clamped.min_y() + minimum_size.height > screen_frame.max_y() {
        clamped.origin.y = screen_frame.max_y() - minimum_size.height - gap;
    }

    clamped
}

/// Move a window that overshot the screen back on, keeping its size.
/// Run after a frame was applied; returns whether the window was moved.
pub fn handle_size_constrained_window(
    window: &dyn Window,
    screen_frame: Rect,
    gap: f64,
) -> Result<bool> {
    let frame = window.current_frame()?;
    if frame.max_x() <= screen_frame.max_x() && frame.max_y() <= screen_frame.max_y() {
        return Ok(false);
    }

    let mut fixed = frame;
    if fixed.max_x() > screen_frame.max_x() {
        fixed.origin.x = screen_frame.max_x() - fixed.size.width - gap;
    }
    if fixed.max_y() > screen_frame.max_y() {
        fixed.origin.y = screen_frame.max_y() - fixed.size.height - gap;
    }

    debug!(
        window = %window.id(),
        from = %frame,
        to = %fixed,
        "Pulling size-constrained window back on screen"
    );
    window.set_origin(fixed.origin)?;
    Ok(true)
}

/// Turns directives into window frames and keeps per-window history
pub struct ResizeEngine {
    history: WindowHistoryStore,
    settings: Arc<RwLock<ResizeSettings>>,
    windows: Arc<dyn WindowProvider>,
    displays: Arc<dyn DisplayProvider>,
    permissions: Arc<dyn PermissionProbe>,
    metrics: Arc<RwLock<ResizeEngineMetrics>>,
}

impl ResizeEngine {
    pub fn new(
        settings: ResizeSettings,
        windows: Arc<dyn WindowProvider>,
        displays: Arc<dyn DisplayProvider>,
        permissions: Arc<dyn PermissionProbe>,
    ) -> Self {
        Self {
            history: WindowHistoryStore::new(),
            settings: Arc::new(RwLock::new(settings)),
            windows,
            displays,
            permissions,
            metrics: Arc::new(RwLock::new(ResizeEngineMetrics::default())),
        }
    }

    /// Share an existing history store instead of starting empty
    pub fn with_history(mut self, history: WindowHistoryStore) -> Self {
        self.history = history;
        self
    }

    pub fn history(&self) -> &WindowHistoryStore {
        &self.history
    }

    pub async fn settings(&self) -> ResizeSettings {
        self.settings.read().await.clone()
    }

    pub async fn update_settings(&self, settings: ResizeSettings) {
        *self.settings.write().await = settings;
        debug!("Resize settings updated");
    }

    pub async fn metrics(&self) -> ResizeEngineMetrics {
        self.metrics.read().await.clone()
    }

    /// The window has closed; forget everything recorded for it
    pub async fn forget_window(&self, window: WindowId) -> Option<HistoryEntry> {
        self.history.remove(window).await
    }

    /// Resize `window` on `screen` according to `direction`
    #[instrument(
        skip(self, window, screen),
        fields(window = %window.id(), direction = %direction, request = %Uuid::new_v4())
    )]
    pub async fn resize(
        &self,
        window: Arc<dyn Window>,
        direction: Direction,
        screen: &ScreenInfo,
    ) -> Result<ResizeOutcome> {
        self.metrics.write().await.requests += 1;
        if direction == Direction::NoAction {
            return Ok(self.skip(SkipReason::NoAction).await);
        }

        let settings = self.settings().await;
        let id = window.id();

        window.activate()?;
        let current = window.current_frame()?;
        self.history.record_first_if_absent(id, current).await;

        match direction {
            Direction::Fullscreen => {
                window.toggle_fullscreen()?;
                self.history.record_direction(id, direction).await;
                return Ok(self.toggled(direction).await);
            }
            Direction::Hide => {
                window.toggle_hidden()?;
                return Ok(self.toggled(direction).await);
            }
            Direction::Minimize => {
                window.toggle_minimized()?;
                return Ok(self.toggled(direction).await);
            }
            _ => {}
        }

        let screen_frame = screen.usable_frame();
        let entry = self.history.entry(id).await;
        let Some(plan) = preview(
            current,
            screen_frame,
            direction,
            &settings.padding,
            entry.as_ref(),
        ) else {
            debug!("Direction does not resolve to a usable frame, leaving window untouched");
            return Ok(self.skip(SkipReason::Unresolvable).await);
        };

        if settings.animate_window_resizes && !self.permissions.screen_recording_granted() {
            info!("Animated resize needs screen recording access");
            self.permissions.request_screen_recording_access();
            self.metrics.write().await.permission_prompts += 1;
            return Ok(ResizeOutcome::PermissionRequired);
        }

        window.set_fullscreen(false)?;

        let gap = settings.window_gap();
        let applied = if settings.animate_window_resizes {
            self.apply_animated(window.as_ref(), plan.target, screen, gap).await
        } else {
            self.apply_instant(window.as_ref(), plan.target, screen_frame, gap).await
        };
        let frame = match applied {
            Ok(frame) => frame,
            Err(err) if !window.is_valid() => {
                debug!(
                    "Window closed while its frame was changing, dropping completion: {}",
                    err
                );
                self.metrics.write().await.dropped_completions += 1;
                return Ok(self.skip(SkipReason::WindowClosed).await);
            }
            Err(err) => return Err(err),
        };

        if window.is_valid() {
            if direction == Direction::Undo {
                self.history.commit_undo(id).await;
            } else {
                self.history.record_direction(id, direction).await;
            }
        } else {
            debug!("Window closed before the resize completed, dropping history update");
            self.metrics.write().await.dropped_completions += 1;
        }

        self.metrics.write().await.applied += 1;
        debug!(resolved = %plan.resolved, frame = %frame, "Applied frame");
        Ok(ResizeOutcome::Applied { direction, frame })
    }

    async fn apply_animated(
        &self,
        window: &dyn Window,
        target: Rect,
        screen: &ScreenInfo,
        gap: f64,
    ) -> Result<Rect> {
        let minimum_size = window.minimum_size(screen).await?;
        let target = clamp_to_minimum_size(target, minimum_size, screen.usable_frame(), gap);
        window.set_frame(target, true).await?;
        Ok(target)
    }

    /// Overshoot correction failures are logged, not returned
    async fn apply_instant(
        &self,
        window: &dyn Window,
        target: Rect,
        screen_frame: Rect,
        gap: f64,
    ) -> Result<Rect> {
        window.set_frame(target, false).await?;

        if window.is_valid() {
            match handle_size_constrained_window(window, screen_frame, gap) {
                Ok(true) => self.metrics.write().await.constraint_corrections += 1,
                Ok(false) => {}
                Err(err) => warn!("Could not pull window back on screen: {}", err),
            }
        }

        Ok(target)
    }

    /// Resolve the window to act on: the one under the cursor when that mode is
    /// on, otherwise the frontmost window of the active application.
    pub async fn target_window(&self) -> Result<Option<Arc<dyn Window>>> {
        let under_cursor = self.settings.read().await.resize_window_under_cursor;

        if under_cursor {
            if let Some(point) = self.windows.pointer_location() {
                if let Some(window) = self.window_at_position(point) {
                    return Ok(Some(window));
                }
            }
        }

        self.windows.frontmost_window()
    }

    fn window_at_position(&self, point: crate::models::Point) -> Option<Arc<dyn Window>> {
        match self.windows.element_at_position(point) {
            Ok(Some(window)) => return Some(window),
            Ok(None) => {}
            Err(err) => warn!("Accessibility hit-test failed: {}", err),
        }

        match self.windows.on_screen_windows() {
            Ok(windows) => windows.into_iter().find(|window| {
                window
                    .current_frame()
                    .map(|frame| frame.contains(point))
                    .unwrap_or(false)
            }),
            Err(err) => {
                warn!("Could not list on-screen windows: {}", err);
                None
            }
        }
    }

    /// Resize the target window on the screen it currently occupies
    pub async fn resize_target(&self, direction: Direction) -> Result<ResizeOutcome> {
        let Some(window) = self.target_window().await? else {
            debug!(direction = %direction, "No target window");
            return Ok(self.skip(SkipReason::NoTargetWindow).await);
        };

        let center = window.current_frame()?.center();
        let screen = match self.displays.screen_containing(center)? {
            Some(screen) => Some(screen),
            None => self.displays.primary_screen()?,
        };
        let Some(screen) = screen else {
            debug!(direction = %direction, "No screen for target window");
            return Ok(self.skip(SkipReason::NoScreen).await);
        };

        self.resize(window, direction, &screen).await
    }

    async fn skip(&self, reason: SkipReason) -> ResizeOutcome {
        self.metrics.write().await.skipped += 1;
        ResizeOutcome::Skipped(reason)
    }

    async fn toggled(&self, direction: Direction) -> ResizeOutcome {
        self.metrics.write().await.toggled += 1;
        ResizeOutcome::Toggled(direction)
    }
}
