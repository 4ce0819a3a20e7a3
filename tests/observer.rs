//! Resolution observers and tracing output.

mod common;

use autowire::{Container, DiError, DiObserver, Strategy};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Resolving(String),
    Resolved(String),
    Failed(String, DiError),
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<Seen>>,
}

impl Recorder {
    fn take(&self) -> Vec<Seen> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl DiObserver for Recorder {
    fn resolving(&self, id: &str) {
        self.events.lock().push(Seen::Resolving(id.to_string()));
    }

    fn resolved(&self, id: &str, _duration: Duration) {
        self.events.lock().push(Seen::Resolved(id.to_string()));
    }

    fn failed(&self, id: &str, error: &DiError, _duration: Duration) {
        self.events.lock().push(Seen::Failed(id.to_string(), error.clone()));
    }
}

#[test]
fn test_nested_resolutions_are_observed_in_order() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::builder()
        .types(common::catalog())
        .observer(recorder.clone())
        .build();

    container.resolve("User").unwrap();

    assert_eq!(
        recorder.take(),
        vec![
            Seen::Resolving("User".into()),
            Seen::Resolving("ORM".into()),
            Seen::Resolved("ORM".into()),
            Seen::Resolved("User".into()),
        ]
    );
}

#[test]
fn test_failures_are_observed_at_each_level() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::builder()
        .types(common::catalog())
        .observer(recorder.clone())
        .build();

    let err = container.resolve("ImplementationConsumer").unwrap_err();
    let expected = DiError::AbstractionNotResolvable("TestInterface".into());
    assert_eq!(err, expected);

    assert_eq!(
        recorder.take(),
        vec![
            Seen::Resolving("ImplementationConsumer".into()),
            Seen::Resolving("TestInterface".into()),
            Seen::Failed("TestInterface".into(), expected.clone()),
            Seen::Failed("ImplementationConsumer".into(), expected),
        ]
    );
}

#[test]
fn test_cached_singletons_still_notify() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::builder().observer(recorder.clone()).build();
    container.singleton("answer", Strategy::value(42u32));

    container.resolve("answer").unwrap();
    container.resolve("answer").unwrap();

    assert_eq!(recorder.take().len(), 4);
}

#[test]
fn test_every_observer_is_called() {
    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());
    let container = Container::builder()
        .observer(first.clone())
        .observer(second.clone())
        .build();

    let _ = container.resolve("missing");

    let expected = vec![
        Seen::Resolving("missing".into()),
        Seen::Failed("missing".into(), DiError::NotFound("missing".into())),
    ];
    assert_eq!(first.take(), expected);
    assert_eq!(second.take(), expected);
}

/// Captures `message` and `id` of every event under the `autowire` target.
#[derive(Clone, Default)]
struct CaptureLayer {
    lines: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor<'a> {
    message: &'a mut String,
    id: &'a mut String,
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => *self.message = value.to_string(),
            "id" => *self.id = value.to_string(),
            _ => {}
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "autowire" {
            return;
        }
        let mut message = String::new();
        let mut id = String::new();
        event.record(&mut MessageVisitor {
            message: &mut message,
            id: &mut id,
        });
        self.lines.lock().push(format!("{} {}", message, id));
    }
}

#[test]
fn test_tracing_observer_emits_events() {
    let layer = CaptureLayer::default();
    let lines = layer.lines.clone();
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let container = Container::builder().with_tracing().build();
        container.register_value("greeting", "hi");

        container.resolve("greeting").unwrap();
        let _ = container.resolve("absent");
    });

    assert_eq!(
        *lines.lock(),
        vec![
            "resolving greeting".to_string(),
            "resolved greeting".to_string(),
            "resolving absent".to_string(),
            "resolution failed absent".to_string(),
        ]
    );
}
