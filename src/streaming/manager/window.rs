use rustc_hash::FxHashSet as HashSet;

use crate::streaming::types::ChunkKey;

/// Offsets of an `n x n` window relative to its focus. Integer-division
/// centering: for even `n` the window reaches one further on the negative side.
#[inline]
pub fn window_offsets(n: i32) -> impl Iterator<Item = (i32, i32)> {
    let half = n / 2;
    (0..n).flat_map(move |i| (0..n).map(move |j| (i - half, j - half)))
}

/// Every grid coordinate that should be live around `center`. Cells that
/// would fall past the `i32` grid are left out.
pub fn desired_set(center: ChunkKey, n: i32) -> HashSet<ChunkKey> {
    window_offsets(n)
        .filter_map(|(dx, dz)| {
            Some(ChunkKey::new(center.x.checked_add(dx)?, center.z.checked_add(dz)?))
        })
        .collect()
}

/// Sorts keys nearest-to-center first; ties broken by `(z, x)` so dispatch
/// order does not depend on hash iteration.
pub fn sort_near_first(keys: &mut [ChunkKey], center: ChunkKey) {
    keys.sort_by_key(|k| (k.dist2(center), k.z, k.x));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_n_squared_keys_and_contains_focus() {
        for n in 1..=9 {
            for &(fx, fz) in &[(0, 0), (5, -3), (-100, 42)] {
                let set = desired_set(ChunkKey::new(fx, fz), n);
                assert_eq!(set.len(), (n * n) as usize, "n={n}");
                assert!(set.contains(&ChunkKey::new(fx, fz)));
            }
        }
    }

    #[test]
    fn even_window_is_offset_toward_negative() {
        let set = desired_set(ChunkKey::new(0, 0), 6);
        assert!(set.contains(&ChunkKey::new(-3, -3)));
        assert!(set.contains(&ChunkKey::new(2, 2)));
        assert!(!set.contains(&ChunkKey::new(3, 0)));
        assert!(!set.contains(&ChunkKey::new(0, -4)));
    }

    #[test]
    fn odd_window_is_symmetric() {
        let set = desired_set(ChunkKey::new(10, 10), 5);
        let xs: Vec<i32> = set.iter().map(|k| k.x).collect();
        assert_eq!(xs.iter().min(), Some(&8));
        assert_eq!(xs.iter().max(), Some(&12));
    }

    #[test]
    fn window_at_grid_edge_drops_overflowing_cells() {
        let set = desired_set(ChunkKey::new(i32::MAX, i32::MIN), 6);
        // x keeps offsets -3..=0, z keeps 0..=2
        assert_eq!(set.len(), 4 * 3);
        assert!(set.contains(&ChunkKey::new(i32::MAX, i32::MIN)));
        assert!(set.contains(&ChunkKey::new(i32::MAX - 3, i32::MIN + 2)));

        let mut keys: Vec<ChunkKey> = set.into_iter().collect();
        sort_near_first(&mut keys, ChunkKey::new(i32::MAX, i32::MIN));
        assert_eq!(keys[0], ChunkKey::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn near_first_ordering() {
        let c = ChunkKey::new(0, 0);
        let mut keys: Vec<ChunkKey> = desired_set(c, 4).into_iter().collect();
        sort_near_first(&mut keys, c);
        assert_eq!(keys[0], c);
        let d: Vec<i64> = keys.iter().map(|k| k.dist2(c)).collect();
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
    }
}
