// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge from overlay trace events into `tracing`.
//!
//! [`TracingSink`] re-emits every event as a `tracing` event under the
//! `overlay` target, with the event's fields as structured key-value pairs.
//! Rejected mutations are logged at `WARN`; everything else at `DEBUG`
//! (extent queries, which a renderer issues every frame, at `TRACE`).

use overlay_core::trace::{
    ElementUpdatedEvent, ExtentEvent, MutationEvent, RejectedEvent, TraceSink, VisibleEvent,
};

use crate::format_envelope;

/// A [`TraceSink`] that forwards events to the active `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn on_mutation(&self, e: &MutationEvent) {
        tracing::debug!(
            target: "overlay",
            layer = e.layer.raw(),
            op = e.kind.as_str(),
            attached = e.attached,
            detached = e.detached,
            len = e.len,
            "layer mutated"
        );
    }

    fn on_rejected(&self, e: &RejectedEvent) {
        tracing::warn!(
            target: "overlay",
            layer = e.layer.raw(),
            op = e.kind.as_str(),
            element = e.error.element().raw(),
            error = %e.error,
            "mutation rejected"
        );
    }

    fn on_visible(&self, e: &VisibleEvent) {
        tracing::debug!(
            target: "overlay",
            layer = e.layer.raw(),
            zoom = e.zoom,
            visible = e.visible,
            restyled = e.restyled,
            "visible set recomputed"
        );
    }

    fn on_extent(&self, e: &ExtentEvent) {
        tracing::trace!(
            target: "overlay",
            layer = e.layer.raw(),
            elements = e.elements,
            extent = %format_envelope(e.extent),
            "data extent computed"
        );
    }

    fn on_element_updated(&self, e: &ElementUpdatedEvent) {
        tracing::debug!(
            target: "overlay",
            layer = e.layer.raw(),
            element = e.element.raw(),
            handler = ?e.handler,
            render_requested = e.render_requested,
            "element updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use overlay_core::envelope::Envelope;
    use overlay_core::layer::OverlayLayer;
    use overlay_core::projection::Identity;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::TracingSink;
    use crate::format_envelope;
    use crate::testing::Dot;

    #[derive(Debug)]
    struct Captured {
        target: String,
        level: Level,
        fields: HashMap<String, String>,
    }

    impl Captured {
        fn field(&self, name: &str) -> &str {
            self.fields.get(name).map_or("<missing>", String::as_str)
        }
    }

    struct FieldVisitor(HashMap<String, String>);

    impl Visit for FieldVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }
    }

    /// A `tracing` layer that keeps every event it sees.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<Captured>>>);

    impl<S: Subscriber> tracing_subscriber::Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor(HashMap::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push(Captured {
                target: event.metadata().target().to_owned(),
                level: *event.metadata().level(),
                fields: visitor.0,
            });
        }
    }

    impl Capture {
        fn take(&self) -> Vec<Captured> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    fn one<'a>(events: &'a [Captured], message: &str) -> &'a Captured {
        let matching: Vec<_> = events
            .iter()
            .filter(|e| e.field("message") == message)
            .collect();
        assert_eq!(matching.len(), 1, "expected one {message:?} in {events:#?}");
        matching[0]
    }

    #[test]
    fn emits_structured_events_under_overlay_target() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        let layer = OverlayLayer::builder(Arc::new(Identity))
            .trace_sink(Arc::new(TracingSink))
            .build();
        let dot = Dot::at(0.0, 0.0);
        let layer_id = layer.id().raw().to_string();

        tracing::subscriber::with_default(subscriber, || {
            layer.add_all(&[dot.clone()]).unwrap();
            assert!(layer.add_all(&[dot.clone()]).is_err());
            layer.recompute_visible(Envelope::EMPTY, 3);
            layer.element_updated(&*dot);
            assert_eq!(layer.data_extent(), Envelope::new(0.0, 0.0, 1.0, 1.0));
        });
        let events = capture.take();

        assert_eq!(events.len(), 5, "{events:#?}");
        for event in &events {
            assert_eq!(event.target, "overlay");
            assert_eq!(event.field("layer"), layer_id);
        }

        let added = one(&events, "layer mutated");
        assert_eq!(added.level, Level::DEBUG);
        assert_eq!(added.field("op"), "add_all");
        assert_eq!(added.field("attached"), "1");
        assert_eq!(added.field("detached"), "0");
        assert_eq!(added.field("len"), "1");

        let rejected = one(&events, "mutation rejected");
        assert_eq!(rejected.level, Level::WARN);
        assert_eq!(rejected.field("op"), "add_all");
        assert_eq!(rejected.field("element"), dot.id().raw().to_string());
        assert!(rejected.fields.contains_key("error"));

        let visible = one(&events, "visible set recomputed");
        assert_eq!(visible.level, Level::DEBUG);
        assert_eq!(visible.field("zoom"), "3");
        assert_eq!(visible.field("visible"), "1");
        assert_eq!(visible.field("restyled"), "true");

        let updated = one(&events, "element updated");
        assert_eq!(updated.level, Level::DEBUG);
        assert_eq!(updated.field("handler"), "Geometry");
        assert_eq!(updated.field("render_requested"), "false");

        let extent = one(&events, "data extent computed");
        assert_eq!(extent.level, Level::TRACE);
        assert_eq!(extent.field("elements"), "1");
        assert_eq!(
            extent.field("extent"),
            format_envelope(Envelope::new(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn events_outside_the_scope_are_not_captured() {
        let capture = Capture::default();
        let layer = OverlayLayer::builder(Arc::new(Identity))
            .trace_sink(Arc::new(TracingSink))
            .build();

        tracing::subscriber::with_default(
            tracing_subscriber::registry().with(capture.clone()),
            || layer.clear(),
        );
        layer.clear();

        let events = capture.take();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("op"), "clear");
        assert_eq!(events[0].field("len"), "0");
    }
}
