//! Adorn demo - drives a shared buttons decoration over a small list of
//! records with a headless surface and prints what gets drawn.

use adorn_api::{MapRecord, Record, ResolveError, Value};
use adorn_layout::{FrameRecorder, IconSet, Point, Rect, Size, StyleSheet};
use adorn_ui::{ButtonsConfig, ButtonsDecoration, DrawContext, Services};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "titles": "$Status(),Remove",
    "icons": ",trash",
    "tooltips": "Mark done or reopen,Delete this task",
    "actions": "Toggle,Remove($name)",
    "buttonStyles": "buttonleft,buttonright",
    "alignment": "Right",
    "visible": "$editable",
    "top": 2,
    "bottom": 2
}"#;

const FIELD_WIDTH: f32 = 320.0;
const FIELD_HEIGHT: f32 = 20.0;

fn task(name: &str, done: bool) -> MapRecord {
    MapRecord::new()
        .with_field("name", name)
        .with_field("done", done)
        .with_field("editable", true)
        .with_query("Status", |fields| {
            let done = matches!(fields.get("done"), Some(Value::Bool(true)));
            Value::from(if done { "Reopen" } else { "Done" })
        })
        .with_action("Toggle", |fields, _| {
            let done = matches!(fields.get("done"), Some(Value::Bool(true)));
            fields.insert("done".into(), Value::Bool(!done));
            Ok(Value::Unit)
        })
        .with_action("Remove", |fields, args| {
            let name = args
                .first()
                .ok_or_else(|| ResolveError::Host("Remove needs a task name".into()))?;
            tracing::info!("Removing task {}", name);
            fields.insert("editable".into(), Value::Bool(false));
            Ok(Value::Unit)
        })
}

fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ButtonsConfig::from_json(CONFIG).context("loading demo decoration")?;
    let mut decoration = ButtonsDecoration::new(config);

    let skin = StyleSheet::standard();
    let icons = IconSet::new().with_icon("trash", Size::new(12.0, 12.0));
    let services = Services::new(&skin, &icons);

    let mut records = vec![
        task("write report", false),
        task("review patch", true),
        task("file taxes", false),
    ];
    let mut surface = FrameRecorder::new();
    let mut click: Option<Point> = None;

    for frame in 0..4 {
        surface.begin_frame();
        if let Some(point) = click.take() {
            println!("-- click at ({:.1}, {:.1})", point.x, point.y);
            surface.click(point);
        }

        // Measure pass: stack the fields top to bottom.
        let mut y = 0.0;
        let mut fields = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let path = format!("tasks[{}]", i);
            let height = decoration.measure(&path, record, &services, FIELD_HEIGHT);
            fields.push((path, Rect::new(0.0, y, FIELD_WIDTH, height)));
            y += height;
        }

        // Draw pass.
        for ((path, mut position), record) in fields.into_iter().zip(records.iter_mut()) {
            let mut ctx = DrawContext::new(&mut surface).with_indent(16.0);
            decoration.draw(&mut position, &path, record, true, &mut ctx);
        }

        println!("frame {}", frame);
        for command in surface.commands() {
            println!(
                "  [{:>6}] {:<8} at ({:.1}, {:.1}) {}x{}",
                command.style,
                command.content.text,
                command.rect.x,
                command.rect.y,
                command.rect.width,
                command.rect.height,
            );
        }

        // Queue a click on the second task's first button for the next frame.
        if frame == 0 {
            click = surface.commands().get(2).map(|c| {
                Point::new(c.rect.x + c.rect.width / 2.0, c.rect.y + c.rect.height / 2.0)
            });
        }
        // And remove the third task after that.
        if frame == 1 {
            click = surface.commands().get(5).map(|c| {
                Point::new(c.rect.x + c.rect.width / 2.0, c.rect.y + c.rect.height / 2.0)
            });
        }

        decoration.end_frame(2);
    }

    for (i, record) in records.iter().enumerate() {
        println!(
            "tasks[{}]: done={} editable={}",
            i,
            record.field("done").unwrap_or_default(),
            record.field("editable").unwrap_or_default(),
        );
    }
    println!("cached rows: {}", decoration.cache().len());

    Ok(())
}
