//! Plan CLI command.
//!
//! Shows what the compositor would do for a given source size and target,
//! without reading or writing any image.

use std::path::Path;

use clap::Args;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::types::{CliBrightnessScope, CliFillMode};
use crate::cli::output;
use crate::compositor::{self, CompositePlan};
use crate::config::{self, WallweaveConfig};
use crate::error::WallweaveError;
use crate::geometry::ScreenSize;
use crate::params::CompositeParams;

/// Arguments for `wallweave plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Source image size, e.g. 1000x500.
    #[arg(long, short, value_name = "WxH")]
    pub source: ScreenSize,

    /// Target aspect ratio (width / height), e.g. 3.0 or 1.7778.
    #[arg(long, short, value_name = "RATIO", conflicts_with = "screen")]
    pub aspect: Option<f64>,

    /// Target screen size; its aspect ratio is used.
    #[arg(long, value_name = "WxH")]
    pub screen: Option<ScreenSize>,

    /// Fill mode, overriding the configuration.
    #[arg(long, short, value_enum)]
    pub fill: Option<CliFillMode>,

    /// Blur radius, overriding the configuration.
    #[arg(long, short, value_name = "RADIUS")]
    pub blur: Option<f32>,

    /// Brightness factor, overriding the configuration.
    #[arg(long, value_name = "FACTOR")]
    pub brightness: Option<f32>,

    /// Brightness scope, overriding the configuration.
    #[arg(long, value_enum)]
    pub brightness_scope: Option<CliBrightnessScope>,

    /// Seam buffer in pixels, overriding the configuration.
    #[arg(long, value_name = "PIXELS")]
    pub seam_buffer: Option<u32>,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl PlanArgs {
    /// Configured parameters with command-line overrides applied.
    #[must_use]
    pub fn params(&self, config: &WallweaveConfig) -> CompositeParams {
        let mut params = config.compositor.clone();
        if let Some(fill) = self.fill {
            params.fill_mode = fill.into();
        }
        if let Some(blur) = self.blur {
            params.blur_radius = blur;
        }
        if let Some(brightness) = self.brightness {
            params.brightness_factor = brightness;
        }
        if let Some(scope) = self.brightness_scope {
            params.brightness_scope = scope.into();
        }
        if let Some(seam_buffer) = self.seam_buffer {
            params.seam_buffer = seam_buffer;
        }
        params
    }

    /// Target aspect ratio: `--aspect`, then `--screen`, then the configured
    /// display, then 2560x1440.
    #[must_use]
    pub fn ratio(&self, config: &WallweaveConfig) -> f64 {
        self.aspect
            .unwrap_or_else(|| self.screen.unwrap_or_else(|| config.display_or_default()).aspect_ratio())
    }
}

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the input is
/// rejected by the compositor.
pub fn execute(args: &PlanArgs, config_path: Option<&Path>) -> Result<(), WallweaveError> {
    let (config, _) = config::resolve(config_path)?;
    let params = args.params(&config);
    let ratio = args.ratio(&config);

    let plan = compositor::plan(args.source.width, args.source.height, ratio, &params)?;

    if args.json {
        output::print_highlighted_json(&serde_json::to_value(&plan)?);
    } else {
        print_plan_table(&plan, ratio);
    }

    Ok(())
}

/// One row of the plan table.
#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Property")]
    property: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl PlanRow {
    fn new(property: &'static str, value: impl ToString) -> Self {
        Self { property, value: value.to_string() }
    }
}

fn plan_rows(plan: &CompositePlan, ratio: f64) -> Vec<PlanRow> {
    let geometry = &plan.geometry;
    let mut rows = vec![
        PlanRow::new("Source", format!("{}x{}", geometry.source_width, geometry.height)),
        PlanRow::new("Aspect ratio", format!("{ratio:.4}")),
        PlanRow::new("Canvas", format!("{}x{}", geometry.width, geometry.height)),
    ];

    match plan.strategy {
        Some(strategy) => {
            rows.push(PlanRow::new("Strategy", strategy));
            rows.push(PlanRow::new("Left panel", format!("{} px", plan.left_width)));
            rows.push(PlanRow::new("Right panel", format!("{} px", plan.right_width)));
            rows.push(PlanRow::new("Sharp columns", format!("{}..{}", plan.sharp_start, plan.sharp_end)));
        }
        None => rows.push(PlanRow::new("Strategy", "none (source fills the canvas)")),
    }

    rows.push(PlanRow::new("Min-fill policy", output::format_bool(plan.should_extend)));
    rows
}

fn print_plan_table(plan: &CompositePlan, ratio: f64) {
    let table = Table::new(plan_rows(plan, ratio))
        .with(Style::rounded())
        .with(Modify::new(Columns::one(1)).with(Alignment::right()))
        .to_string();

    println!("{table}");

    if plan.strategy.is_none() {
        println!("{}", "The source already covers the target width.".dimmed());
    }
}
