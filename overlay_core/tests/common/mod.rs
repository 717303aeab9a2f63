// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test geometry.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::sync::{Arc, Mutex};

use overlay_core::element::{Attachment, Element, Geometry};
use overlay_core::envelope::Envelope;

/// A vertex handle with a fixed envelope.
#[derive(Debug)]
pub struct Handle {
    attachment: Attachment,
    envelope: Envelope,
    style_zoom: Mutex<Option<u8>>,
}

impl Handle {
    pub fn new(envelope: Envelope) -> Arc<Self> {
        Arc::new(Self {
            attachment: Attachment::new(),
            envelope,
            style_zoom: Mutex::new(None),
        })
    }

    pub fn at(x: f64, y: f64) -> Arc<Self> {
        Self::new(Envelope::new(x, y, x + 1.0, y + 1.0))
    }

    pub fn style_zoom(&self) -> Option<u8> {
        *self.style_zoom.lock().unwrap()
    }
}

impl Element for Handle {
    fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    fn as_geometry(&self) -> Option<&dyn Geometry> {
        Some(self)
    }
}

impl Geometry for Handle {
    fn internal_envelope(&self) -> Envelope {
        self.envelope
    }

    fn calculate_internal_state(&self) {}

    fn set_active_style(&self, zoom: u8) {
        *self.style_zoom.lock().unwrap() = Some(zoom);
    }
}

pub fn as_dyn(handles: &[Arc<Handle>]) -> Vec<Arc<dyn Geometry>> {
    handles
        .iter()
        .map(|h| Arc::clone(h) as Arc<dyn Geometry>)
        .collect()
}
