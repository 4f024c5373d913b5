#![forbid(unsafe_code)]

//! Move animations for tiles.
//!
//! After each layout the animator compares where every tile is going with
//! where it was last time. Tiles that moved get an animation registered
//! with the tree, which keeps their own validation deferred until the host
//! calls [`LayoutTree::finish_animation`].

use gridkit_core::{Rectangle, Result};
use gridkit_runtime::{AnimationId, ComponentId, LayoutTree};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Where one tile is placed in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub tile: ComponentId,
    pub bounds: Rectangle,
    /// Placeholders are never animated.
    pub placeholder: bool,
}

/// A tile move the host should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub tile: ComponentId,
    pub from: Rectangle,
    pub to: Rectangle,
    /// Finish this once the host is done animating.
    pub animation: AnimationId,
}

/// Tracks tile bounds between passes.
#[derive(Debug, Clone, Default)]
pub struct TileAnimator {
    enabled: bool,
    previous: FxHashMap<ComponentId, Rectangle>,
    layouted_once: bool,
}

impl TileAnimator {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Forget all bounds; the next pass counts as a first layout.
    pub fn reset(&mut self) {
        self.previous.clear();
        self.layouted_once = false;
    }

    /// Tiles whose bounds changed since the last pass, as `(tile, from, to)`.
    ///
    /// Nothing moves on the first pass. Placeholders and tiles without
    /// previous bounds (new, or back from outside the view range) are
    /// skipped.
    #[must_use]
    pub fn plan(&self, placements: &[Placement]) -> Vec<(ComponentId, Rectangle, Rectangle)> {
        if !self.enabled || !self.layouted_once {
            return Vec::new();
        }
        placements
            .iter()
            .filter(|p| !p.placeholder)
            .filter_map(|p| {
                let from = *self.previous.get(&p.tile)?;
                (from != p.bounds).then_some((p.tile, from, p.bounds))
            })
            .collect()
    }

    /// Register animations for every planned move and remember the new
    /// bounds.
    ///
    /// A tile still animating from an earlier pass has that animation
    /// finished first, so its deferred validation runs before the new one
    /// starts.
    pub fn animate(&mut self, tree: &mut LayoutTree, placements: &[Placement]) -> Result<Vec<TileMove>> {
        let planned = self.plan(placements);
        let mut moves = Vec::with_capacity(planned.len());
        for (tile, from, to) in planned {
            if let Some(running) = tree.animation(tile)? {
                trace!(tile = tile.index(), animation = running.0, "finishing running tile animation");
                tree.finish_animation(running)?;
            }
            let animation = tree.start_animation(tile)?;
            moves.push(TileMove {
                tile,
                from,
                to,
                animation,
            });
        }
        if !moves.is_empty() {
            debug!(moves = moves.len(), "tile moves animated");
        }
        self.remember(placements);
        Ok(moves)
    }

    fn remember(&mut self, placements: &[Placement]) {
        self.previous = placements
            .iter()
            .filter(|p| !p.placeholder)
            .map(|p| (p.tile, p.bounds))
            .collect();
        self.layouted_once = true;
    }
}
