//! Offline replay of a drag gesture through the bottom-sheet controller.

use serde::Serialize;
use tabled::Tabled;

use sagip_core::{BottomSheet, Detent, SheetConfig, SheetEffect, SheetEvent, Viewport};

use crate::cli::{GestureStep, GlobalOpts, SheetArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize, Tabled)]
struct SheetRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Effect")]
    effect: String,
    #[tabled(rename = "Detent")]
    detent: Detent,
    #[tabled(rename = "Height")]
    height: String,
    #[tabled(rename = "Dragging")]
    dragging: bool,
}

fn event(step: GestureStep) -> SheetEvent {
    match step {
        GestureStep::Down(y) => SheetEvent::PointerDown { y },
        GestureStep::Move(y) => SheetEvent::PointerMove { y },
        GestureStep::Frame => SheetEvent::Frame,
        GestureStep::Up => SheetEvent::PointerUp,
        GestureStep::Reset => SheetEvent::Reset,
        GestureStep::Resize { width, height } => SheetEvent::Resize(Viewport::new(width, height)),
    }
}

fn step_label(step: GestureStep) -> String {
    match step {
        GestureStep::Down(y) => format!("down:{y}"),
        GestureStep::Move(y) => format!("move:{y}"),
        GestureStep::Frame => "frame".into(),
        GestureStep::Up => "up".into(),
        GestureStep::Reset => "reset".into(),
        GestureStep::Resize { width, height } => format!("resize:{width}x{height}"),
    }
}

fn effect_label(effect: SheetEffect) -> String {
    match effect {
        SheetEffect::None => "-".into(),
        SheetEffect::RequestFrame => "request frame".into(),
        SheetEffect::Live { height, .. } => format!("live {height:.0}px"),
        SheetEffect::Snap(t) => format!(
            "snap {} {:.0}px ({} {}ms)",
            t.detent,
            t.height,
            t.easing,
            t.duration.as_millis()
        ),
    }
}

/// Feed each step to a fresh sheet and record what it asked for.
fn replay(config: SheetConfig, viewport: Viewport, steps: &[GestureStep]) -> Vec<SheetRow> {
    let mut sheet = BottomSheet::new(config, viewport);
    steps
        .iter()
        .enumerate()
        .map(|(i, &step)| {
            let effect = sheet.handle(event(step));
            SheetRow {
                index: i + 1,
                step: step_label(step),
                effect: effect_label(effect),
                detent: sheet.detent(),
                height: format!("{:.0}", sheet.current_height()),
                dragging: sheet.is_dragging(),
            }
        })
        .collect()
}

pub fn handle(args: &SheetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.width <= 0.0 || args.height <= 0.0 {
        return Err(CliError::Validation {
            field: "viewport".into(),
            reason: format!("{}x{} is not a usable viewport", args.width, args.height),
        });
    }
    let cfg = config::load_config()?;
    cfg.sheet.validate().map_err(|e| CliError::Validation {
        field: format!("sheet.{}", e.field),
        reason: e.reason,
    })?;
    let rows = replay(cfg.sheet, Viewport::new(args.width, args.height), &args.steps);

    let out = output::render_list(
        &global.output,
        &rows,
        |r| SheetRow {
            index: r.index,
            step: r.step.clone(),
            effect: r.effect.clone(),
            detent: r.detent,
            height: r.height.clone(),
            dragging: r.dragging,
        },
        |r| r.detent.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
