//! Integration tests for binding resolution against live records.
//!
//! These exercise the degrade-on-failure policy end to end: a broken binding
//! must produce a default value, a single warning, and no error at the call
//! site, then recover as soon as the record grows the missing member.

use std::sync::{Arc, Mutex};

use adorn_api::{MapRecord, Value};
use adorn_kernel::{DynamicAction, DynamicValue};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts WARN events emitted while installed.
#[derive(Clone, Default)]
struct WarnCounter {
    count: Arc<Mutex<usize>>,
}

impl WarnCounter {
    fn get(&self) -> usize {
        *self.count.lock().expect("warn counter lock")
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            *self.count.lock().expect("warn counter lock") += 1;
        }
    }
}

fn with_counter(f: impl FnOnce()) -> usize {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, f);
    counter.get()
}

#[test]
fn broken_binding_warns_once_per_failure_streak() {
    let warnings = with_counter(|| {
        let mut title = DynamicValue::<String>::new("$caption");
        let mut record = MapRecord::new();

        for _ in 0..10 {
            title.update(&record);
            assert_eq!(title.value(), "");
        }

        record.set("caption", "Ready");
        title.update(&record);
        assert_eq!(title.value(), "Ready");

        record.remove("caption");
        title.update(&record);
        assert_eq!(title.value(), "");
    });
    assert_eq!(warnings, 2);
}

#[test]
fn malformed_binding_warns_at_parse_time_only() {
    let warnings = with_counter(|| {
        let mut title = DynamicValue::<String>::new("$(");
        for _ in 0..5 {
            title.update(&MapRecord::new());
        }
        assert_eq!(title.value(), "");
        assert!(!title.is_dynamic());
    });
    assert_eq!(warnings, 1);
}

#[test]
fn action_mutates_only_through_invoke() {
    let mut record = MapRecord::new()
        .with_field("clicks", 0)
        .with_action("Click", |fields, _| {
            if let Some(Value::Int(n)) = fields.get_mut("clicks") {
                *n += 1;
            }
            Ok(Value::Unit)
        });

    let mut label = DynamicValue::<i64>::new("$clicks");
    let mut click = DynamicAction::new("Click");

    label.update(&record);
    click.update(&record);
    assert_eq!(*label.value(), 0);
    assert_eq!(record.get("clicks"), Some(&Value::Int(0)));

    assert!(click.invoke(&mut record));
    assert!(click.invoke(&mut record));
    label.update(&record);
    assert_eq!(*label.value(), 2);
}

#[test]
fn nested_record_fields_resolve() {
    let record = MapRecord::new().with_field("owner", owner());
    let mut name = DynamicValue::<String>::new("$owner.name");
    name.update(&record);
    assert_eq!(name.value(), "Rin");
}

fn owner() -> Value {
    Value::Record(vec![
        ("name".into(), Value::from("Rin")),
        ("guild".into(), Value::from("North")),
    ])
}
