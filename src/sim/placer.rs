//! Random placement helpers

use glam::Vec2;
use rand::Rng;

/// Uniform real in `[min, max)` as `min + random() * (max - min)`
///
/// Works with `min > max` too (the result then lies in `(max, min]`).
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Random top-left corner for an item of `item_size` inside `field`
///
/// Keeps `pos + item_size <= field` on both axes. An axis smaller than
/// the item collapses to 0.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, field: Vec2, item_size: f32) -> Vec2 {
    let max_x = (field.x - item_size).max(0.0);
    let max_y = (field.y - item_size).max(0.0);
    Vec2::new(uniform(rng, 0.0, max_x), uniform(rng, 0.0, max_y))
}
