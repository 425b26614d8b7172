//! Moore-neighbourhood adjacency

use super::grid::Coord;

/// In-bounds Moore neighbours of `(row, col)` in a `rows x cols` grid,
/// in row-major offset order.
pub fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<Coord> {
    let mut result = Vec::with_capacity(8);

    for dr in [-1isize, 0, 1] {
        for dc in [-1isize, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }

            let r = row as isize + dr;
            let c = col as isize + dc;

            if r >= 0 && r < rows as isize && c >= 0 && c < cols as isize {
                result.push((r as usize, c as usize));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_edge_corner() {
        assert_eq!(neighbors(1, 1, 3, 3).len(), 8);
        assert_eq!(neighbors(0, 1, 3, 3).len(), 5);
        assert_eq!(neighbors(1, 2, 3, 3).len(), 5);
        assert_eq!(neighbors(0, 0, 3, 3).len(), 3);
        assert_eq!(neighbors(2, 2, 3, 3).len(), 3);
    }

    #[test]
    fn test_degenerate_grids() {
        assert!(neighbors(0, 0, 1, 1).is_empty());
        assert_eq!(neighbors(0, 0, 1, 2), vec![(0, 1)]);
        assert_eq!(neighbors(0, 1, 1, 3), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn test_excludes_self_and_stays_in_bounds() {
        for row in 0..4 {
            for col in 0..5 {
                let ns = neighbors(row, col, 4, 5);
                assert!(!ns.contains(&(row, col)));
                for (r, c) in ns {
                    assert!(r < 4 && c < 5);
                    assert!(r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1);
                }
            }
        }
    }
}
