// Math utilities and helper functions

/// Convert a grid cell coordinate into world units
pub fn cell_to_world(cell: i32, cell_size: f32) -> f32 {
    cell as f32 * cell_size
}

/// Floor a world coordinate to the whole unit used for distance scoring
pub fn floor_distance(x: f32) -> i32 {
    x.floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_world() {
        assert_eq!(cell_to_world(0, 32.0), 0.0);
        assert_eq!(cell_to_world(3, 32.0), 96.0);
        assert_eq!(cell_to_world(-2, 32.0), -64.0);
    }

    #[test]
    fn test_floor_distance_rounds_down() {
        assert_eq!(floor_distance(12.9), 12);
        assert_eq!(floor_distance(-0.5), -1);
    }
}
