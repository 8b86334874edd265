//! Target jitter animation
//!
//! Each moving item swings its horizontal margin back and forth. The
//! surface runs the CSS transition; every time one completes the item
//! flips phase and gets a freshly drawn offset, so items drift out of
//! sync with each other.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::placer::uniform;
use super::state::ItemId;

/// Direction of the current swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Margin above the base, sprite faces forward
    Forward,
    /// Margin below the base, sprite flipped (`back` marker)
    Backward,
}

impl MotionPhase {
    pub fn flipped(self) -> Self {
        match self {
            MotionPhase::Forward => MotionPhase::Backward,
            MotionPhase::Backward => MotionPhase::Forward,
        }
    }
}

/// What the surface should apply for one swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    pub id: ItemId,
    pub phase: MotionPhase,
    /// Horizontal margin in pixels
    pub margin: f32,
}

/// Per-item animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionHandle {
    pub phase: MotionPhase,
    pub base: f32,
    pub min: f32,
    pub max: f32,
}

impl MotionHandle {
    /// Margin for the current phase with a fresh random swing
    fn margin<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let swing = uniform(rng, self.min, self.max);
        match self.phase {
            MotionPhase::Forward => self.base + swing,
            MotionPhase::Backward => self.base - swing,
        }
    }
}

/// Animation handles for all moving items
#[derive(Debug, Clone, Default)]
pub struct MotionAnimator {
    handles: BTreeMap<ItemId, MotionHandle>,
    base: f32,
    min: f32,
    max: f32,
}

impl MotionAnimator {
    pub fn new(base: f32, min: f32, max: f32) -> Self {
        Self {
            handles: BTreeMap::new(),
            base,
            min,
            max,
        }
    }

    /// Begin animating `ids`, returning the first (forward) frame of each
    ///
    /// Items already animating are restarted.
    pub fn start<R: Rng + ?Sized>(&mut self, ids: &[ItemId], rng: &mut R) -> Vec<MotionFrame> {
        ids.iter()
            .map(|&id| {
                let handle = MotionHandle {
                    phase: MotionPhase::Forward,
                    base: self.base,
                    min: self.min,
                    max: self.max,
                };
                self.handles.insert(id, handle);
                MotionFrame {
                    id,
                    phase: handle.phase,
                    margin: handle.margin(rng),
                }
            })
            .collect()
    }

    /// Advance an item after its transition finished
    ///
    /// Returns `None` for items that are not (or no longer) animated.
    pub fn on_transition_end<R: Rng + ?Sized>(
        &mut self,
        id: ItemId,
        rng: &mut R,
    ) -> Option<MotionFrame> {
        let handle = self.handles.get_mut(&id)?;
        handle.phase = handle.phase.flipped();
        Some(MotionFrame {
            id,
            phase: handle.phase,
            margin: handle.margin(rng),
        })
    }

    /// Stop animating one item
    pub fn detach(&mut self, id: ItemId) -> bool {
        self.handles.remove(&id).is_some()
    }

    /// Stop everything
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    pub fn handle(&self, id: ItemId) -> Option<&MotionHandle> {
        self.handles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn animator() -> MotionAnimator {
        MotionAnimator::new(30.0, 10.0, 100.0)
    }

    #[test]
    fn test_start_is_forward() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut anim = animator();
        let frames = anim.start(&[1, 2, 3], &mut rng);

        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.phase, MotionPhase::Forward);
            assert!(frame.margin >= 40.0 && frame.margin < 130.0);
        }
        assert_eq!(anim.len(), 3);
    }

    #[test]
    fn test_phases_alternate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut anim = animator();
        anim.start(&[7], &mut rng);

        let back = anim.on_transition_end(7, &mut rng).unwrap();
        assert_eq!(back.phase, MotionPhase::Backward);
        assert!(back.margin > -70.0 && back.margin <= 20.0);

        let fwd = anim.on_transition_end(7, &mut rng).unwrap();
        assert_eq!(fwd.phase, MotionPhase::Forward);
        assert_eq!(anim.handle(7).map(|h| h.phase), Some(MotionPhase::Forward));
    }

    #[test]
    fn test_detached_item_stops() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut anim = animator();
        anim.start(&[1, 2], &mut rng);

        assert!(anim.detach(1));
        assert!(!anim.detach(1));
        assert!(anim.on_transition_end(1, &mut rng).is_none());
        assert!(anim.on_transition_end(2, &mut rng).is_some());

        anim.clear();
        assert!(anim.is_empty());
        assert!(anim.on_transition_end(2, &mut rng).is_none());
    }

    #[test]
    fn test_items_are_not_synchronised() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut anim = animator();
        let frames = anim.start(&[1, 2, 3, 4, 5], &mut rng);
        let first = frames[0].margin;
        assert!(frames.iter().any(|f| f.margin != first));
    }
}
