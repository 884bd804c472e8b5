//! Integration tests for framesnap
//! Exercises the resize engine end to end against in-memory windows and screens

use framesnap::config::ResizeSettings;
use framesnap::macos::{
    InMemoryDisplayProvider, InMemoryPermissionProbe, InMemoryWindow, InMemoryWindowProvider,
    ScreenInfo, Window,
};
use framesnap::{Direction, Rect, ResizeEngine, ResizeOutcome, SkipReason, WindowId};
use std::sync::Arc;

fn main_screen() -> ScreenInfo {
    ScreenInfo::primary("main", Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0))
}

fn window(element: u64, frame: Rect) -> Arc<InMemoryWindow> {
    Arc::new(InMemoryWindow::new(WindowId::new(4242, element), frame))
}

fn engine(
    settings: ResizeSettings,
    windows: Vec<Arc<InMemoryWindow>>,
    screens: Vec<ScreenInfo>,
    permissions: Arc<InMemoryPermissionProbe>,
) -> (ResizeEngine, Arc<InMemoryWindowProvider>) {
    let provider = Arc::new(InMemoryWindowProvider::new_with(windows));
    let engine = ResizeEngine::new(
        settings,
        provider.clone(),
        Arc::new(InMemoryDisplayProvider::new_with(screens)),
        permissions,
    );
    (engine, provider)
}

fn simple_engine(settings: ResizeSettings, win: &Arc<InMemoryWindow>) -> ResizeEngine {
    engine(
        settings,
        vec![win.clone()],
        vec![main_screen()],
        Arc::new(InMemoryPermissionProbe::new(true)),
    )
    .0
}

mod frame_properties {
    use super::*;
    use framesnap::generate_frame;

    fn raw(direction: Direction) -> Rect {
        generate_frame(
            Rect::from_xywh(0.0, 0.0, 100.0, 100.0),
            main_screen().usable_frame,
            direction,
            None,
        )
        .map(|(frame, _)| frame)
        .unwrap()
    }

    fn assert_tiles_screen(directions: &[Direction]) {
        let screen = main_screen().usable_frame;
        let frames: Vec<Rect> = directions.iter().map(|d| raw(*d)).collect();

        let total: f64 = frames.iter().map(Rect::area).sum();
        assert_eq!(total, screen.area());

        for (i, a) in frames.iter().enumerate() {
            assert_eq!(a.intersection_area(&screen), a.area());
            for b in frames.iter().skip(i + 1) {
                assert_eq!(a.intersection_area(b), 0.0, "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn quarters_halves_and_thirds_tile_the_screen() {
        assert_tiles_screen(&[
            Direction::TopLeftQuarter,
            Direction::TopRightQuarter,
            Direction::BottomLeftQuarter,
            Direction::BottomRightQuarter,
        ]);
        assert_tiles_screen(&[Direction::LeftHalf, Direction::RightHalf]);
        assert_tiles_screen(&[Direction::TopHalf, Direction::BottomHalf]);
        assert_tiles_screen(&[
            Direction::LeftThird,
            Direction::HorizontalCenterThird,
            Direction::RightThird,
        ]);
        assert_tiles_screen(&[Direction::LeftTwoThirds, Direction::RightThird]);
        assert_tiles_screen(&[
            Direction::TopThird,
            Direction::VerticalCenterThird,
            Direction::BottomThird,
        ]);
    }

    #[tokio::test]
    async fn left_half_with_twenty_point_gap() {
        let win = window(1, Rect::from_xywh(300.0, 200.0, 640.0, 480.0));
        let engine = simple_engine(ResizeSettings::default().with_gap(20.0), &win);

        engine
            .resize(win.clone(), Direction::LeftHalf, &main_screen())
            .await
            .unwrap();

        assert_eq!(win.frame(), Rect::from_xywh(20.0, 20.0, 930.0, 1040.0));
    }

    #[tokio::test]
    async fn adjacent_halves_are_separated_by_one_gap() {
        let left = window(1, Rect::from_xywh(0.0, 0.0, 500.0, 500.0));
        let right = window(2, Rect::from_xywh(0.0, 0.0, 500.0, 500.0));
        let (engine, _) = engine(
            ResizeSettings::default().with_gap(20.0),
            vec![left.clone(), right.clone()],
            vec![main_screen()],
            Arc::new(InMemoryPermissionProbe::new(true)),
        );

        engine
            .resize(left.clone(), Direction::LeftHalf, &main_screen())
            .await
            .unwrap();
        engine
            .resize(right.clone(), Direction::RightHalf, &main_screen())
            .await
            .unwrap();

        let (left, right) = (left.frame(), right.frame());
        assert_eq!(left.min_x(), 20.0);
        assert_eq!(1920.0 - right.max_x(), 20.0);
        assert_eq!(right.min_x() - left.max_x(), 20.0);
    }

    #[tokio::test]
    async fn per_edge_padding_adds_external_bar_to_top() {
        let mut settings = ResizeSettings::default();
        settings.padding.set_uniform(false);
        settings.padding.window = 8.0;
        settings.padding.external_bar = 30.0;
        settings.padding.top = 10.0;
        settings.padding.bottom = 12.0;
        settings.padding.left = 6.0;
        settings.padding.right = 6.0;

        let win = window(1, Rect::from_xywh(0.0, 0.0, 500.0, 500.0));
        let engine = simple_engine(settings, &win);

        engine
            .resize(win.clone(), Direction::TopHalf, &main_screen())
            .await
            .unwrap();

        assert_eq!(win.frame(), Rect::from_xywh(6.0, 40.0, 1908.0, 496.0));
    }

    #[tokio::test]
    async fn repeating_a_direction_is_idempotent() {
        let mut directions: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| direction.multipliers().is_some())
            .collect();
        directions.push(Direction::Center);

        for direction in directions {
            let win = window(1, Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
            let engine = simple_engine(ResizeSettings::default().with_gap(12.0), &win);

            engine
                .resize(win.clone(), direction, &main_screen())
                .await
                .unwrap();
            let first = win.frame();
            engine
                .resize(win.clone(), direction, &main_screen())
                .await
                .unwrap();

            assert_eq!(win.frame(), first, "{direction} is not idempotent");
        }
    }

    #[tokio::test]
    async fn overshooting_window_is_pulled_back_with_gap() {
        let win = window(1, Rect::from_xywh(1500.0, 0.0, 700.0, 400.0));

        let moved = framesnap::handle_size_constrained_window(
            win.as_ref(),
            main_screen().usable_frame,
            10.0,
        )
        .unwrap();

        assert!(moved);
        assert_eq!(win.frame(), Rect::from_xywh(1210.0, 0.0, 700.0, 400.0));

        let moved = framesnap::handle_size_constrained_window(
            win.as_ref(),
            main_screen().usable_frame,
            10.0,
        )
        .unwrap();
        assert!(!moved);
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn undo_returns_to_the_previous_direction_once() {
        let win = window(1, Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
        let engine = simple_engine(ResizeSettings::default().with_gap(10.0), &win);
        let screen = main_screen();

        engine
            .resize(win.clone(), Direction::LeftHalf, &screen)
            .await
            .unwrap();
        let left_half = win.frame();
        engine
            .resize(win.clone(), Direction::RightHalf, &screen)
            .await
            .unwrap();
        assert_ne!(win.frame(), left_half);

        let outcome = engine
            .resize(win.clone(), Direction::Undo, &screen)
            .await
            .unwrap();
        assert!(matches!(outcome, ResizeOutcome::Applied { .. }));
        assert_eq!(win.frame(), left_half);
        assert_eq!(
            engine.history().last_direction(win.id()).await,
            Some(Direction::LeftHalf)
        );

        let outcome = engine
            .resize(win.clone(), Direction::Undo, &screen)
            .await
            .unwrap();
        assert_eq!(outcome, ResizeOutcome::Skipped(SkipReason::Unresolvable));
        assert_eq!(win.frame(), left_half);
    }

    #[tokio::test]
    async fn undo_without_history_changes_nothing() {
        let start = Rect::from_xywh(100.0, 100.0, 800.0, 600.0);
        let win = window(1, start);
        let engine = simple_engine(ResizeSettings::default(), &win);

        let outcome = engine
            .resize(win.clone(), Direction::Undo, &main_screen())
            .await
            .unwrap();

        assert_eq!(outcome, ResizeOutcome::Skipped(SkipReason::Unresolvable));
        assert_eq!(win.frame(), start);
        assert_eq!(win.snapshot().set_frame_calls, 0);
    }

    #[tokio::test]
    async fn initial_frame_restores_first_seen_frame() {
        let start = Rect::from_xywh(123.0, 77.0, 640.0, 480.0);
        let win = window(1, start);
        let engine = simple_engine(ResizeSettings::default().with_gap(16.0), &win);
        let screen = main_screen();

        for direction in [
            Direction::Maximize,
            Direction::BottomRightQuarter,
            Direction::Center,
            Direction::LeftTwoThirds,
        ] {
            engine.resize(win.clone(), direction, &screen).await.unwrap();
        }

        engine
            .resize(win.clone(), Direction::InitialFrame, &screen)
            .await
            .unwrap();
        assert_eq!(win.frame(), start);
        assert_eq!(engine.history().initial_frame(win.id()).await, Some(start));
    }

    #[tokio::test]
    async fn forgotten_window_starts_over() {
        let win = window(1, Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
        let engine = simple_engine(ResizeSettings::default(), &win);

        engine
            .resize(win.clone(), Direction::Maximize, &main_screen())
            .await
            .unwrap();
        engine.forget_window(win.id()).await;
        assert!(engine.history().is_empty().await);

        engine
            .resize(win.clone(), Direction::InitialFrame, &main_screen())
            .await
            .unwrap();
        assert_eq!(
            engine.history().initial_frame(win.id()).await,
            Some(Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0))
        );
    }
}

mod engine_behaviour {
    use super::*;

    #[tokio::test]
    async fn animated_resize_waits_for_permission() {
        let win = window(1, Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
        let permissions = Arc::new(InMemoryPermissionProbe::new(false));
        let mut settings = ResizeSettings::default();
        settings.animate_window_resizes = true;
        let (engine, _) = engine(
            settings,
            vec![win.clone()],
            vec![main_screen()],
            permissions.clone(),
        );

        let outcome = engine
            .resize(win.clone(), Direction::LeftHalf, &main_screen())
            .await
            .unwrap();
        assert_eq!(outcome, ResizeOutcome::PermissionRequired);
        assert_eq!(win.frame(), Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
        assert_eq!(permissions.request_count(), 1);

        permissions.set_granted(true);
        engine
            .resize(win.clone(), Direction::LeftHalf, &main_screen())
            .await
            .unwrap();
        assert_eq!(win.frame(), Rect::from_xywh(0.0, 0.0, 960.0, 1080.0));
        assert_eq!(win.snapshot().last_animated, Some(true));
        assert_eq!(permissions.request_count(), 1);
    }

    #[tokio::test]
    async fn resize_target_uses_screen_under_the_window() {
        let side = ScreenInfo {
            id: "side".to_string(),
            name: "Side".to_string(),
            frame: Rect::from_xywh(1920.0, 0.0, 2560.0, 1440.0),
            usable_frame: Rect::from_xywh(1920.0, 0.0, 2560.0, 1440.0),
            scale_factor: 1.0,
            is_primary: false,
        };
        let on_main = window(1, Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
        let on_side = window(2, Rect::from_xywh(2200.0, 200.0, 1000.0, 800.0));

        let mut settings = ResizeSettings::default();
        settings.resize_window_under_cursor = true;
        let (engine, provider) = engine(
            settings,
            vec![on_main.clone(), on_side.clone()],
            vec![main_screen(), side],
            Arc::new(InMemoryPermissionProbe::new(true)),
        );
        provider.set_frontmost(Some(on_main.id()));
        provider.set_pointer_location(Some(framesnap::Point::new(2500.0, 500.0)));

        engine.resize_target(Direction::LeftHalf).await.unwrap();

        assert_eq!(on_side.frame(), Rect::from_xywh(1920.0, 0.0, 1280.0, 1440.0));
        assert_eq!(on_main.frame(), Rect::from_xywh(100.0, 100.0, 800.0, 600.0));
    }

    #[tokio::test]
    async fn concurrent_resizes_of_different_windows_keep_separate_history() {
        let a = window(1, Rect::from_xywh(0.0, 0.0, 400.0, 400.0));
        let b = window(2, Rect::from_xywh(500.0, 500.0, 400.0, 400.0));
        let (engine, _) = engine(
            ResizeSettings::default(),
            vec![a.clone(), b.clone()],
            vec![main_screen()],
            Arc::new(InMemoryPermissionProbe::new(true)),
        );
        let screen = main_screen();

        let (ra, rb) = tokio::join!(
            engine.resize(a.clone(), Direction::LeftHalf, &screen),
            engine.resize(b.clone(), Direction::RightHalf, &screen),
        );
        ra.unwrap();
        rb.unwrap();

        assert_eq!(engine.history().len().await, 2);
        assert_eq!(
            engine.history().last_direction(a.id()).await,
            Some(Direction::LeftHalf)
        );
        assert_eq!(
            engine.history().last_direction(b.id()).await,
            Some(Direction::RightHalf)
        );

        let metrics = engine.metrics().await;
        assert_eq!(metrics.requests, 2);
        assert_eq!(metrics.applied, 2);
    }
}

mod settings {
    use framesnap::config::{ResizeSettings, SettingsStore, SettingsStoreConfig};
    use framesnap::PaddingConfiguration;
    use tempfile::TempDir;

    #[test]
    fn per_edge_settings_survive_a_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(SettingsStoreConfig {
            config_dir: dir.path().join("framesnap"),
        });

        let settings = ResizeSettings {
            resize_window_under_cursor: true,
            animate_window_resizes: false,
            padding: PaddingConfiguration {
                uniform: false,
                window: 8.0,
                external_bar: 30.0,
                top: 10.0,
                bottom: 12.0,
                left: 6.0,
                right: 6.0,
            },
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
        assert!(store.validate_file().unwrap().is_empty());
    }
}
