// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element storage, construction, and membership mutations.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::backend::{BaseLayer, NoBase, RenderTrigger};
use crate::config::LayerConfig;
use crate::element::{Element, Geometry};
use crate::error::OverlayError;
use crate::projection::Projection;
use crate::trace::{MutationEvent, MutationKind, RejectedEvent, TraceSink, Tracer};

use super::id::{ElementId, LayerId};

/// Shared ordered collection of overlay members.
pub(crate) type Members = Arc<[Arc<dyn Geometry>]>;

/// State guarded by the layer lock.
pub(crate) struct LayerState {
    // -- Membership --
    pub(crate) elements: Members,
    pub(crate) visible: Members,

    // -- Change tracking --
    track: bool,
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_added: Vec<ElementId>,
    pub(crate) pending_removed: Vec<ElementId>,
    pub(crate) republished: bool,
}

impl LayerState {
    fn new(track: bool) -> Self {
        Self {
            elements: empty_members(),
            visible: empty_members(),
            track,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            republished: false,
        }
    }

    /// Makes the committed collection the visible set.
    pub(crate) fn publish(&mut self) {
        self.visible = Arc::clone(&self.elements);
        self.republished |= self.track;
    }

    /// Marks `id` on `channel` when change tracking is on.
    pub(crate) fn mark(&mut self, id: ElementId, channel: Channel) {
        if self.track {
            self.dirty.mark(id.raw(), channel);
        }
    }

    fn record_added(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        if self.track {
            self.pending_added.extend(ids);
        }
    }

    fn record_removed(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        if self.track {
            self.pending_removed.extend(ids);
        }
    }
}

impl fmt::Debug for LayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerState")
            .field("elements", &self.elements.len())
            .field("visible", &self.visible.len())
            .field("track", &self.track)
            .field("pending_added", &self.pending_added)
            .field("pending_removed", &self.pending_removed)
            .field("republished", &self.republished)
            .finish_non_exhaustive()
    }
}

fn empty_members() -> Members {
    Vec::new().into()
}

/// A thread-safe collection of overlay geometry.
///
/// Share it between threads with `Arc<OverlayLayer>`. Mutations come from the
/// editing side ([`replace_all`](Self::replace_all), [`add_all`](Self::add_all),
/// [`remove_all`](Self::remove_all), [`clear`](Self::clear)); the renderer
/// reads [`visible_elements`](Self::visible_elements) and
/// [`data_extent`](Self::data_extent).
pub struct OverlayLayer {
    pub(crate) id: LayerId,
    pub(crate) projection: Arc<dyn Projection>,
    pub(crate) base: Arc<dyn BaseLayer>,
    pub(crate) render: Option<Arc<dyn RenderTrigger>>,
    pub(crate) tracer: Tracer,
    pub(crate) config: LayerConfig,
    pub(crate) zoom: AtomicU8,
    state: Mutex<LayerState>,
}

impl fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("zoom", &self.current_zoom())
            .field("has_render_trigger", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds an [`OverlayLayer`] with injected collaborators.
pub struct OverlayLayerBuilder {
    projection: Arc<dyn Projection>,
    base: Arc<dyn BaseLayer>,
    render: Option<Arc<dyn RenderTrigger>>,
    tracer: Tracer,
    config: LayerConfig,
}

impl fmt::Debug for OverlayLayerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLayerBuilder")
            .field("config", &self.config)
            .field("has_render_trigger", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

impl OverlayLayerBuilder {
    /// Sets the base layer providing the inherited extent and generic update
    /// handling. Defaults to [`NoBase`].
    #[must_use]
    pub fn base(mut self, base: Arc<dyn BaseLayer>) -> Self {
        self.base = base;
        self
    }

    /// Sets the trigger fired when an element's geometry is recomputed.
    #[must_use]
    pub fn render_trigger(mut self, render: Arc<dyn RenderTrigger>) -> Self {
        self.render = Some(render);
        self
    }

    /// Sets the sink receiving trace events (requires the `trace` feature).
    #[must_use]
    pub fn trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.tracer = Tracer::new(sink);
        self
    }

    /// Sets the layer configuration.
    #[must_use]
    pub fn config(mut self, config: LayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates the layer.
    #[must_use]
    pub fn build(self) -> OverlayLayer {
        OverlayLayer {
            id: LayerId::next(),
            projection: self.projection,
            base: self.base,
            render: self.render,
            tracer: self.tracer,
            zoom: AtomicU8::new(self.config.initial_zoom),
            config: self.config,
            state: Mutex::new(LayerState::new(self.config.track_changes)),
        }
    }
}

impl OverlayLayer {
    /// Creates an empty layer with default collaborators and configuration.
    #[must_use]
    pub fn new(projection: Arc<dyn Projection>) -> Self {
        Self::builder(projection).build()
    }

    /// Starts building a layer.
    #[must_use]
    pub fn builder(projection: Arc<dyn Projection>) -> OverlayLayerBuilder {
        OverlayLayerBuilder {
            projection,
            base: Arc::new(NoBase),
            render: None,
            tracer: Tracer::none(),
            config: LayerConfig::default(),
        }
    }

    /// Returns this layer's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> LayerId {
        self.id
    }

    /// Returns the configuration the layer was built with.
    #[must_use]
    pub const fn config(&self) -> &LayerConfig {
        &self.config
    }

    /// Returns the zoom level used to resolve active styles.
    #[must_use]
    pub fn current_zoom(&self) -> u8 {
        self.zoom.load(Ordering::Acquire)
    }

    // -- Read API --

    /// Returns a copy of the current members in insertion order.
    ///
    /// The returned `Vec` is independent of the layer: later mutations do not
    /// affect it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn Geometry>> {
        self.lock().elements.to_vec()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().elements.len()
    }

    /// Returns whether the layer has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether `element` is a member.
    #[must_use]
    pub fn contains(&self, element: &dyn Element) -> bool {
        let id = element.id();
        self.members().iter().any(|e| e.id() == id)
    }

    // -- Mutation API --

    /// Replaces all members with `elements`.
    ///
    /// Every element in `elements` is attached and styled for the current
    /// zoom. The collection is then swapped and republished in one critical
    /// section, which also detaches the members absent from `elements`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::DuplicateElement`] if an element appears twice.
    /// The layer is unchanged on error.
    pub fn replace_all(&self, elements: &[Arc<dyn Geometry>]) -> Result<(), OverlayError> {
        self.validate(MutationKind::ReplaceAll, elements, false)?;
        for element in elements {
            self.attach(&**element);
        }

        let incoming: HashSet<ElementId> = elements.iter().map(|e| e.id()).collect();
        let (old, detached) = {
            let mut state = self.lock();
            let old = std::mem::replace(&mut state.elements, Arc::from(elements));
            let old_ids: HashSet<ElementId> = old.iter().map(|e| e.id()).collect();

            let dropped = old.iter().filter(|e| !incoming.contains(&e.id()));
            let detached = self.detach_each(dropped.clone());
            for element in elements {
                self.bind(&**element);
            }

            state.record_removed(dropped.map(|e| e.id()));
            state.record_added(
                elements
                    .iter()
                    .map(|e| e.id())
                    .filter(|id| !old_ids.contains(id)),
            );
            state.publish();
            (old, detached)
        };
        // Released members may drop here, outside the lock.
        drop(old);

        self.tracer.mutation(&MutationEvent {
            layer: self.id,
            kind: MutationKind::ReplaceAll,
            attached: elements.len(),
            detached,
            len: elements.len(),
        });
        Ok(())
    }

    /// Appends `elements` to the members.
    ///
    /// Each element is attached and styled for the current zoom before the
    /// collection is extended and republished.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::DuplicateElement`] if an element appears twice,
    /// or [`OverlayError::AlreadyMember`] if this layer already owns one of
    /// them. The layer is unchanged on error.
    pub fn add_all(&self, elements: &[Arc<dyn Geometry>]) -> Result<(), OverlayError> {
        self.validate(MutationKind::AddAll, elements, true)?;
        for element in elements {
            self.attach(&**element);
        }

        let committed = {
            let mut state = self.lock();
            let current: HashSet<ElementId> = state.elements.iter().map(|e| e.id()).collect();
            // A concurrent writer may have added one of these since
            // validation. Back out the rest of the batch.
            if let Some(member) = elements.iter().find(|e| current.contains(&e.id())) {
                self.detach_each(elements.iter().filter(|e| !current.contains(&e.id())));
                Err(OverlayError::AlreadyMember(member.id()))
            } else {
                let mut next = Vec::with_capacity(state.elements.len() + elements.len());
                next.extend(state.elements.iter().cloned());
                next.extend(elements.iter().cloned());
                for element in elements {
                    self.bind(&**element);
                }
                state.elements = next.into();
                state.record_added(elements.iter().map(|e| e.id()));
                state.publish();
                Ok(state.elements.len())
            }
        };

        let len = match committed {
            Ok(len) => len,
            Err(error) => {
                self.tracer.rejected(&RejectedEvent {
                    layer: self.id,
                    kind: MutationKind::AddAll,
                    error,
                });
                return Err(error);
            }
        };
        self.tracer.mutation(&MutationEvent {
            layer: self.id,
            kind: MutationKind::AddAll,
            attached: elements.len(),
            detached: 0,
            len,
        });
        Ok(())
    }

    /// Removes `elements` from the members and detaches them.
    ///
    /// Elements that are not members are ignored. Returns the number of
    /// elements removed.
    pub fn remove_all(&self, elements: &[Arc<dyn Geometry>]) -> usize {
        let targets: HashSet<ElementId> = elements.iter().map(|e| e.id()).collect();

        let (removed, detached, len) = {
            let mut state = self.lock();
            let (removed, kept): (Vec<_>, Vec<_>) = state
                .elements
                .iter()
                .cloned()
                .partition(|e| targets.contains(&e.id()));
            let detached = self.detach_each(&removed);
            state.elements = kept.into();
            state.record_removed(removed.iter().map(|e| e.id()));
            state.publish();
            (removed, detached, state.elements.len())
        };

        self.tracer.mutation(&MutationEvent {
            layer: self.id,
            kind: MutationKind::RemoveAll,
            attached: 0,
            detached,
            len,
        });
        removed.len()
    }

    /// Removes and detaches every member.
    pub fn clear(&self) {
        let (previous, detached) = {
            let mut state = self.lock();
            let previous = std::mem::replace(&mut state.elements, empty_members());
            let detached = self.detach_each(previous.iter());
            state.record_removed(previous.iter().map(|e| e.id()));
            state.publish();
            (previous, detached)
        };
        drop(previous);

        self.tracer.mutation(&MutationEvent {
            layer: self.id,
            kind: MutationKind::Clear,
            attached: 0,
            detached,
            len: 0,
        });
    }

    // -- Internal helpers --

    /// Acquires the layer lock, recovering from poisoning.
    ///
    /// Guarded state is only ever replaced wholesale, so a panic while the
    /// lock was held cannot leave it half-mutated.
    pub(crate) fn lock(&self) -> MutexGuard<'_, LayerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the committed members without copying them.
    pub(crate) fn members(&self) -> Members {
        Arc::clone(&self.lock().elements)
    }
}
