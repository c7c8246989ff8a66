//! Controller selection state
//!
//! Plain value type plus pure transitions, so the wrap-around rules can be
//! exercised without a renderer.

/// Wrap `index + delta` into `0..len` (negative results wrap to the high end).
/// `len` must be non-zero.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    (index as isize + delta).rem_euclid(len as isize) as usize
}

/// Current (tile count, tint) selection as indices into the option lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub tile_index: usize,
    pub color_index: usize,
}

impl ControllerState {
    pub fn new(tile_index: usize, color_index: usize) -> Self {
        Self { tile_index, color_index }
    }

    pub fn stepped_tile(self, delta: isize, len: usize) -> Self {
        Self {
            tile_index: wrap_index(self.tile_index, delta, len),
            ..self
        }
    }

    pub fn stepped_color(self, delta: isize, len: usize) -> Self {
        Self {
            color_index: wrap_index(self.color_index, delta, len),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 5), 4);
        assert_eq!(wrap_index(4, 1, 5), 0);
        assert_eq!(wrap_index(2, 13, 5), 0);
        assert_eq!(wrap_index(2, -13, 5), 4);
        assert_eq!(wrap_index(0, 0, 1), 0);
        assert_eq!(wrap_index(0, -7, 1), 0);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let len = 7;
        let start = ControllerState::new(3, 0);
        let mut s = start;
        for _ in 0..len {
            s = s.stepped_tile(1, len);
            assert!(s.tile_index < len);
        }
        assert_eq!(s, start);
    }

    #[test]
    fn test_steps_touch_one_field() {
        let s = ControllerState::new(1, 2);
        assert_eq!(s.stepped_tile(1, 4), ControllerState::new(2, 2));
        assert_eq!(s.stepped_color(-3, 4), ControllerState::new(1, 3));
    }
}
