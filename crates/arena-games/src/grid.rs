//! Line detection on rectangular grids

/// Scan directions in reporting order: horizontal, vertical, diagonal, anti-diagonal
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Owner of the first complete line of `run` cells
///
/// Players are checked in seat order, and for each player every window of
/// length `run` that fits on the grid, direction by direction.
pub fn line_owner<const R: usize, const C: usize>(
    cells: &[[Option<usize>; C]; R],
    run: usize,
    players: usize,
) -> Option<usize> {
    (0..players).find(|&player| {
        DIRECTIONS
            .iter()
            .any(|&(dy, dx)| has_line(cells, run, player, dy, dx))
    })
}

fn has_line<const R: usize, const C: usize>(
    cells: &[[Option<usize>; C]; R],
    run: usize,
    player: usize,
    dy: isize,
    dx: isize,
) -> bool {
    if run == 0 {
        return false;
    }
    (0..R).any(|y| {
        (0..C).any(|x| {
            (0..run).all(|i| {
                let cy = y as isize + dy * i as isize;
                let cx = x as isize + dx * i as isize;
                (0..R as isize).contains(&cy)
                    && (0..C as isize).contains(&cx)
                    && cells[cy as usize][cx as usize] == Some(player)
            })
        })
    })
}
