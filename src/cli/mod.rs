//! Command-line interface for framesnap
//!
//! Offline tools around the resize engine: list directions, preview the
//! frame a direction produces, replay a sequence of directions against a
//! simulated window, and manage settings and permissions.

use crate::config::{SettingsStore, SettingsValidator, ValidationSeverity};
use crate::macos::accessibility::InMemoryWindow;
use crate::macos::core_graphics::ScreenInfo;
use crate::macos::permissions::{
    is_accessibility_permission_granted, is_screen_recording_permission_granted,
    open_privacy_pane, prompt_accessibility_permission, prompt_screen_recording_permission,
    InMemoryPermissionProbe, PrivacyPane,
};
use crate::macos::{InMemoryDisplayProvider, InMemoryWindowProvider};
use crate::models::{Direction, Rect, WindowId};
use crate::services::{preview, ResizeEngine};
use crate::{trace_performance, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// framesnap command-line interface
#[derive(Parser)]
#[command(name = "framesnap")]
#[command(about = "Snap windows to screen regions, with gaps and single-step undo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct FrameSnapCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration directory holding settings.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable JSON output for machine-readable results
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every direction with its screen fractions and touching edges
    Directions,

    /// Compute the frame a direction produces without moving any window
    Preview(PreviewArgs),

    /// Replay directions against a simulated window
    Simulate(SimulateArgs),

    /// Configuration management commands
    Config(ConfigCommands),

    /// Permission management commands
    Permissions(PermissionCommands),
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Direction name, e.g. "left-half"
    pub direction: Direction,

    /// Usable screen frame as "x,y,w,h" or "WxH"
    #[arg(long, default_value = "1920x1080")]
    pub screen: Rect,

    /// Current window frame as "x,y,w,h" or "WxH"
    #[arg(long, default_value = "0,0,800,600")]
    pub frame: Rect,

    /// Uniform gap overriding the configured padding
    #[arg(long)]
    pub gap: Option<f64>,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Usable screen frame as "x,y,w,h" or "WxH"
    #[arg(long, default_value = "1920x1080")]
    pub screen: Rect,

    /// Starting window frame
    #[arg(long, default_value = "100,100,800,600")]
    pub frame: Rect,

    /// Uniform gap overriding the configured padding
    #[arg(long)]
    pub gap: Option<f64>,

    /// Directions applied in order
    #[arg(required = true)]
    pub directions: Vec<Direction>,
}

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub action: ConfigActions,
}

#[derive(Subcommand)]
pub enum ConfigActions {
    /// Show current configuration
    Show,

    /// Write a default settings file if none exists
    Init,

    /// Validate the settings file
    Validate,

    /// Print the settings file location
    Path,
}

#[derive(Args)]
pub struct PermissionCommands {
    #[command(subcommand)]
    pub action: PermissionActions,
}

#[derive(Subcommand)]
pub enum PermissionActions {
    /// Check permission status
    Check,

    /// Prompt for accessibility and screen recording access
    Request,
}

#[derive(Debug, Serialize)]
struct SimulationStep {
    direction: Direction,
    outcome: String,
    frame: Rect,
}

/// CLI command executor
pub struct FrameSnapCliExecutor {
    store: SettingsStore,
    json_output: bool,
}

impl FrameSnapCliExecutor {
    pub fn new(store: SettingsStore, json_output: bool) -> Self {
        Self { store, json_output }
    }

    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Directions => self.execute_directions(),
            Commands::Preview(args) => self.execute_preview(args),
            Commands::Simulate(args) => self.execute_simulate(args).await,
            Commands::Config(cmd) => self.execute_config_command(cmd),
            Commands::Permissions(cmd) => self.execute_permission_command(cmd),
        }
    }

    fn execute_directions(&self) -> Result<()> {
        if self.json_output {
            let directions: Vec<_> = Direction::ALL
                .iter()
                .map(|direction| {
                    serde_json::json!({
                        "name": direction.name(),
                        "special": direction.is_special(),
                        "multipliers": direction.multipliers().map(|m| [m.dx, m.dy, m.dw, m.dh]),
                        "edges": direction.edges_touching_screen(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&directions)?);
            return Ok(());
        }

        for direction in Direction::ALL {
            match direction.multipliers() {
                Some(m) => {
                    let edges: Vec<String> = direction
                        .edges_touching_screen()
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    println!(
                        "  {:<26} x {:.3} y {:.3} w {:.3} h {:.3}  [{}]",
                        direction.name(),
                        m.dx,
                        m.dy,
                        m.dw,
                        m.dh,
                        edges.join(", ")
                    );
                }
                None => println!("  {:<26} (special)", direction.name()),
            }
        }
        Ok(())
    }

    fn execute_preview(&self, args: PreviewArgs) -> Result<()> {
        let mut settings = self.store.load()?;
        if let Some(gap) = args.gap {
            settings = settings.with_gap(gap);
        }
        debug!(direction = %args.direction, screen = %args.screen, "Previewing frame");

        let plan = trace_performance!("preview", {
            preview(
                args.frame,
                args.screen,
                args.direction,
                &settings.padding,
                None,
            )
        });

        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            match plan {
                Some(plan) => {
                    println!("Direction: {}", args.direction);
                    println!("Raw frame: {}", plan.raw);
                    println!("Padded frame: {}", plan.target);
                }
                None => println!(
                    "'{}' does not produce a usable frame without window history",
                    args.direction
                ),
            }
        }
        Ok(())
    }

    async fn execute_simulate(&self, args: SimulateArgs) -> Result<()> {
        let mut settings = self.store.load()?;
        if let Some(gap) = args.gap {
            settings = settings.with_gap(gap);
        }

        let window = Arc::new(InMemoryWindow::new(WindowId::new(0, 0), args.frame));
        let screen = ScreenInfo::primary("simulated", args.screen);
        let engine = ResizeEngine::new(
            settings,
            Arc::new(InMemoryWindowProvider::new_with(vec![window.clone()])),
            Arc::new(InMemoryDisplayProvider::new_with(vec![screen.clone()])),
            Arc::new(InMemoryPermissionProbe::new(true)),
        );

        let mut steps = Vec::with_capacity(args.directions.len());
        for direction in args.directions {
            let outcome = engine.resize(window.clone(), direction, &screen).await?;
            steps.push(SimulationStep {
                direction,
                outcome: outcome.to_string(),
                frame: window.frame(),
            });
        }

        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&steps)?);
        } else {
            for (index, step) in steps.iter().enumerate() {
                println!(
                    "{:>3}. {:<26} {:<40} window {}",
                    index + 1,
                    step.direction.name(),
                    step.outcome,
                    step.frame
                );
            }
        }

        let metrics = engine.metrics().await;
        info!(
            requests = metrics.requests,
            applied = metrics.applied,
            skipped = metrics.skipped,
            "Simulation finished"
        );
        Ok(())
    }

    fn execute_config_command(&self, cmd: ConfigCommands) -> Result<()> {
        match cmd.action {
            ConfigActions::Show => {
                let settings = self.store.load()?;
                if self.json_output {
                    println!("{}", serde_json::to_string_pretty(&settings)?);
                } else {
                    println!("# {}", self.store.settings_path().display());
                    print!("{}", toml::to_string_pretty(&settings)?);
                }
            }
            ConfigActions::Init => {
                let path = self.store.initialize()?;
                println!("{}", path.display());
            }
            ConfigActions::Validate => {
                let results = self.store.validate_file()?;
                if self.json_output {
                    let results: Vec<_> = results
                        .iter()
                        .map(|result| {
                            serde_json::json!({
                                "severity": format!("{:?}", result.severity).to_lowercase(),
                                "field": result.field,
                                "message": result.message,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&results)?);
                } else if results.is_empty() {
                    println!("Configuration is valid");
                } else {
                    for result in &results {
                        let label = match result.severity {
                            ValidationSeverity::Error => "error",
                            ValidationSeverity::Warning => "warning",
                        };
                        println!("{label}: {}: {}", result.field, result.message);
                    }
                }

                if SettingsValidator::has_errors(&results) {
                    anyhow::bail!("configuration has errors");
                }
            }
            ConfigActions::Path => {
                println!("{}", self.store.settings_path().display());
            }
        }

        Ok(())
    }

    fn execute_permission_command(&self, cmd: PermissionCommands) -> Result<()> {
        match cmd.action {
            PermissionActions::Check => {
                let accessibility = is_accessibility_permission_granted()?;
                let screen_recording = is_screen_recording_permission_granted()?;

                if self.json_output {
                    let status = serde_json::json!({
                        "accessibility": accessibility,
                        "screen_recording": screen_recording,
                    });
                    println!("{}", serde_json::to_string_pretty(&status)?);
                } else {
                    println!("Accessibility: {}", granted_label(accessibility));
                    println!(
                        "Screen recording (animated resizes): {}",
                        granted_label(screen_recording)
                    );
                }
            }
            PermissionActions::Request => {
                info!("Requesting permissions");
                if !prompt_accessibility_permission()? {
                    open_privacy_pane(PrivacyPane::Accessibility)?;
                }
                if !prompt_screen_recording_permission()? {
                    open_privacy_pane(PrivacyPane::ScreenRecording)?;
                }
                println!("Requested accessibility and screen recording access");
            }
        }

        Ok(())
    }
}

fn granted_label(granted: bool) -> &'static str {
    if granted {
        "granted"
    } else {
        "missing"
    }
}
