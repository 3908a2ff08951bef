//! Stage: cooperative scheduler for mounted background effects.
//!
//! A `Stage` owns an ordered stack of mounted effects and drives them from
//! a single thread: one `advance` per display refresh, pointer events
//! interleaved in between. Effects never read each other's state; the only
//! shared input is the viewport. Unmounting removes the registration
//! synchronously, so no tick can reach a freed effect.

use crate::effect::{Effect, Viewport};
use crate::error::BackdropError;

/// Handle identifying a mounted effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

struct MountedLayer {
    id: LayerId,
    effect: Box<dyn Effect>,
    interactive: bool,
}

/// Ordered stack of mounted effects behind the host page content.
///
/// Mount order is draw order (index 0 = bottom). Effects needing failure
/// isolation are mounted wrapped in a
/// [`Boundary`](crate::boundary::Boundary); a bare effect's tick error
/// propagates out of [`Stage::advance`].
pub struct Stage {
    viewport: Viewport,
    layers: Vec<MountedLayer>,
    next_id: u64,
}

impl Stage {
    /// Creates an empty stage for the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mounts an effect on top of the stack and hands it the current
    /// viewport.
    ///
    /// `interactive` opts the layer into pointer-move routing; all other
    /// layers stay transparent to pointer events.
    pub fn mount(&mut self, mut effect: Box<dyn Effect>, interactive: bool) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        effect.resize(self.viewport);
        self.layers.push(MountedLayer {
            id,
            effect,
            interactive,
        });
        id
    }

    /// Unmounts a layer, dropping its frame-callback registration
    /// synchronously.
    ///
    /// Returns false if the id is not mounted (already unmounted ids are
    /// tolerated).
    pub fn unmount(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() != before
    }

    /// Number of live frame-callback registrations.
    pub fn registration_count(&self) -> usize {
        self.layers.len()
    }

    /// Advances every mounted effect by `dt` seconds, in mount order.
    ///
    /// The first error from an unwrapped effect stops the pass and
    /// propagates.
    pub fn advance(&mut self, dt: f64) -> Result<(), BackdropError> {
        for layer in &mut self.layers {
            layer.effect.tick(dt)?;
        }
        Ok(())
    }

    /// Routes a pointer move to interactive layers only.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        for layer in &mut self.layers {
            if layer.interactive {
                layer.effect.pointer_moved(x, y);
            }
        }
    }

    /// Updates the viewport and propagates it to every mounted effect.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for layer in &mut self.layers {
            layer.effect.resize(viewport);
        }
    }

    /// Borrow a mounted effect by id.
    pub fn layer(&self, id: LayerId) -> Option<&dyn Effect> {
        self.layers
            .iter()
            .find(|layer| layer.id == id)
            .map(|layer| layer.effect.as_ref())
    }

    /// Mutably borrow a mounted effect by id.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut dyn Effect> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .map(|layer| layer.effect.as_mut() as &mut dyn Effect)
    }
}
