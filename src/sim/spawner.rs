//! Item spawning
//!
//! Drops a batch of items of one kind at independent random positions.
//! Overlap is allowed: counts are small next to the field area.

use rand::Rng;

use super::placer::random_position;
use super::state::{Field, Item, ItemId, ItemKind};

/// Spawn `count` items of `kind` into `field`, returning their IDs in order
pub fn spawn<R: Rng + ?Sized>(
    field: &mut Field,
    rng: &mut R,
    kind: ItemKind,
    count: u32,
    item_size: f32,
    asset: &str,
) -> Vec<ItemId> {
    let bounds = field.size();
    let mut ids = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let id = field.next_item_id();
        let pos = random_position(rng, bounds, item_size);
        field.items.push(Item {
            id,
            kind,
            pos,
            asset: asset.to_string(),
        });
        ids.push(id);
    }

    log::debug!("Spawned {} {:?} items", count, kind);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_counts_and_bounds() {
        let mut field = Field::new(640.0, 240.0);
        let mut rng = Pcg32::seed_from_u64(3);

        let targets = spawn(&mut field, &mut rng, ItemKind::Target, 5, 70.0, "img/trash.svg");
        let hazards = spawn(&mut field, &mut rng, ItemKind::Hazard, 4, 70.0, "img/fish.svg");

        assert_eq!(targets.len(), 5);
        assert_eq!(hazards.len(), 4);
        assert_eq!(field.items.len(), 9);
        assert_eq!(field.ids_of(ItemKind::Target), targets);

        for item in &field.items {
            assert!(item.pos.x >= 0.0 && item.pos.x + 70.0 <= 640.0);
            assert!(item.pos.y >= 0.0 && item.pos.y + 70.0 <= 240.0);
        }
        assert!(field.items.iter().filter(|i| i.kind == ItemKind::Hazard).all(|i| i.asset == "img/fish.svg"));
    }

    #[test]
    fn test_spawn_zero() {
        let mut field = Field::new(640.0, 240.0);
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(spawn(&mut field, &mut rng, ItemKind::Hazard, 0, 70.0, "").is_empty());
        assert!(field.items.is_empty());
    }

    #[test]
    fn test_spawn_is_seed_deterministic() {
        let mut a = Field::new(500.0, 500.0);
        let mut b = Field::new(500.0, 500.0);
        spawn(&mut a, &mut Pcg32::seed_from_u64(9), ItemKind::Target, 5, 70.0, "");
        spawn(&mut b, &mut Pcg32::seed_from_u64(9), ItemKind::Target, 5, 70.0, "");
        assert_eq!(a.items, b.items);
    }
}
