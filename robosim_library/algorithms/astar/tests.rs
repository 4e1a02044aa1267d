use super::AStar;
use crate::algorithms::dijkstra::Dijkstra;
use robosim_core::{Grid, GridPos, RoboSimError};

fn min_obstacle_distance(grid: &Grid, cell: GridPos) -> u32 {
    grid.obstacles()
        .iter()
        .map(|o| o.manhattan_distance(&cell))
        .min()
        .unwrap_or(u32::MAX)
}

fn assert_connected(path: &[GridPos]) {
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(&pair[1]),
            1,
            "non-adjacent step {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_open_grid_manhattan_length() {
    let grid = Grid::new(10, 10);
    let start = GridPos::new(1, 2);
    let target = GridPos::new(8, 7);

    let path = AStar::new(&grid, start, target, None).unwrap().exec();

    assert_eq!(path.len() as u32, start.manhattan_distance(&target) + 1);
    assert_eq!(path[0], start);
    assert_eq!(path[path.len() - 1], target);
    assert_connected(&path);
}

#[test]
fn test_small_grid_corner_to_corner() {
    let grid = Grid::new(5, 5);
    let start = GridPos::new(0, 0);
    let target = GridPos::new(4, 4);

    let astar = AStar::new(&grid, start, target, None).unwrap().exec();
    let dijkstra = Dijkstra::new(&grid, start, target, None).unwrap().exec();

    assert_eq!(astar.len(), 9);
    assert_eq!(dijkstra.len(), 9);
}

#[test]
fn test_path_around_wall() {
    let mut grid = Grid::new(20, 20);
    // Vertical wall with a gap at y = 7..=12
    for y in (0..7).chain(13..20) {
        grid.add_obstacle(GridPos::new(10, y)).unwrap();
    }

    let path = AStar::new(&grid, GridPos::new(0, 10), GridPos::new(19, 10), None)
        .unwrap()
        .exec();

    assert!(!path.is_empty());
    assert!(path.iter().all(|p| !grid.is_occupied(*p)));
    assert!(path.iter().any(|p| p.x == 10 && (7..=12).contains(&p.y)));
    assert_connected(&path);
}

#[test]
fn test_no_path_exists() {
    let mut grid = Grid::new(10, 10);
    for y in 0..10 {
        grid.add_obstacle(GridPos::new(5, y)).unwrap();
    }

    let path = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(9, 9), None)
        .unwrap()
        .exec();
    assert!(path.is_empty());
}

#[test]
fn test_start_equals_target() {
    let grid = Grid::new(10, 10);
    let path = AStar::new(&grid, GridPos::new(5, 5), GridPos::new(5, 5), Some(3))
        .unwrap()
        .exec();
    assert_eq!(path, vec![GridPos::new(5, 5)]);
}

#[test]
fn test_obstacle_at_start() {
    let grid = Grid::with_obstacles(10, 10, [GridPos::new(5, 5)]).unwrap();
    let path = AStar::new(&grid, GridPos::new(5, 5), GridPos::new(9, 9), None)
        .unwrap()
        .exec();
    assert!(path.is_empty());
}

#[test]
fn test_obstacle_at_target() {
    let grid = Grid::with_obstacles(10, 10, [GridPos::new(9, 9)]).unwrap();
    let path = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(9, 9), None)
        .unwrap()
        .exec();
    assert!(path.is_empty());
}

#[test]
fn test_out_of_bounds_endpoints() {
    let grid = Grid::new(10, 10);

    let err = AStar::new(&grid, GridPos::new(-1, 0), GridPos::new(5, 5), None).unwrap_err();
    assert!(matches!(err, RoboSimError::InvalidPosition { .. }));
    assert!(err.to_string().starts_with("Start position (-1, 0)"));

    let err = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(10, 5), None).unwrap_err();
    assert!(err.to_string().starts_with("Target position (10, 5)"));
}

#[test]
fn test_deterministic() {
    let grid = Grid::with_obstacles(
        12,
        12,
        [GridPos::new(4, 4), GridPos::new(5, 4), GridPos::new(7, 8)],
    )
    .unwrap();
    let astar = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(11, 11), Some(2)).unwrap();

    let first = astar.exec();
    let second = astar.exec();
    assert_eq!(first, second);
    assert_eq!(astar.path_cost(&first), astar.path_cost(&second));
}

#[test]
fn test_matches_dijkstra_cost_without_range() {
    let grid = Grid::with_obstacles(
        10,
        10,
        [
            GridPos::new(3, 0),
            GridPos::new(3, 1),
            GridPos::new(3, 2),
            GridPos::new(6, 9),
            GridPos::new(6, 8),
            GridPos::new(6, 7),
        ],
    )
    .unwrap();
    let start = GridPos::new(0, 0);
    let target = GridPos::new(9, 9);

    let astar = AStar::new(&grid, start, target, None).unwrap();
    let dijkstra = Dijkstra::new(&grid, start, target, None).unwrap();

    let a = astar.exec();
    let d = dijkstra.exec();
    assert_eq!(astar.path_cost(&a), dijkstra.path_cost(&d));
}

#[test]
fn test_ranged_cost_never_below_dijkstra() {
    let grid = Grid::with_obstacles(
        12,
        12,
        [
            GridPos::new(3, 2),
            GridPos::new(3, 3),
            GridPos::new(4, 7),
            GridPos::new(7, 5),
            GridPos::new(8, 9),
            GridPos::new(9, 2),
        ],
    )
    .unwrap();

    for range in 1..=3 {
        for (start, target) in [
            (GridPos::new(0, 0), GridPos::new(11, 11)),
            (GridPos::new(0, 11), GridPos::new(11, 0)),
            (GridPos::new(5, 0), GridPos::new(5, 11)),
        ] {
            let astar = AStar::new(&grid, start, target, Some(range)).unwrap();
            let dijkstra = Dijkstra::new(&grid, start, target, Some(range)).unwrap();

            let a = astar.exec();
            let d = dijkstra.exec();
            assert!(!a.is_empty() && !d.is_empty());
            assert_connected(&a);
            assert!(
                astar.path_cost(&a) + 1e-9 >= dijkstra.path_cost(&d),
                "range {range}: {start} -> {target}"
            );
        }
    }
}

#[test]
fn test_risk_aware_avoidance() {
    let layouts: [(&[GridPos], GridPos, GridPos); 3] = [
        (&[GridPos::new(7, 7)], GridPos::new(0, 7), GridPos::new(14, 7)),
        (&[GridPos::new(7, 3), GridPos::new(7, 4)], GridPos::new(0, 4), GridPos::new(14, 4)),
        (
            &[GridPos::new(4, 10), GridPos::new(10, 4)],
            GridPos::new(0, 0),
            GridPos::new(14, 14),
        ),
    ];
    let range = 2;

    for (obstacles, start, target) in layouts {
        let grid = Grid::with_obstacles(15, 15, obstacles.iter().copied()).unwrap();

        let astar = AStar::new(&grid, start, target, Some(range)).unwrap().exec();
        let dijkstra = Dijkstra::new(&grid, start, target, Some(range)).unwrap().exec();

        for path in [&astar, &dijkstra] {
            assert!(!path.is_empty());
            assert_connected(path);
            for cell in path.iter() {
                assert!(
                    min_obstacle_distance(&grid, *cell) > range,
                    "cell {} too close to an obstacle",
                    cell
                );
            }
        }
    }
}

#[test]
fn test_unavoidable_risk_still_finds_path() {
    // One-cell corridor between two walls, every cell is within range
    let mut grid = Grid::new(9, 3);
    for x in 0..9 {
        grid.add_obstacle(GridPos::new(x, 0)).unwrap();
        grid.add_obstacle(GridPos::new(x, 2)).unwrap();
    }

    let path = AStar::new(&grid, GridPos::new(0, 1), GridPos::new(8, 1), Some(3))
        .unwrap()
        .exec();
    assert_eq!(path.len(), 9);
}

#[test]
fn test_risk_never_shortens_path() {
    let grid = Grid::with_obstacles(
        15,
        15,
        [GridPos::new(7, 7), GridPos::new(3, 5), GridPos::new(11, 9)],
    )
    .unwrap();
    let start = GridPos::new(0, 7);
    let target = GridPos::new(14, 7);

    let plain = AStar::new(&grid, start, target, None).unwrap().exec();
    let risky = AStar::new(&grid, start, target, Some(2)).unwrap().exec();

    assert!(!plain.is_empty());
    assert!(risky.len() >= plain.len());
}

#[test]
fn test_heuristic_terms() {
    let grid = Grid::with_obstacles(10, 10, [GridPos::new(5, 5)]).unwrap();

    let plain = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(9, 9), None).unwrap();
    assert_eq!(plain.heuristic(GridPos::new(5, 4)), 9.0);

    let risky = AStar::new(&grid, GridPos::new(0, 0), GridPos::new(9, 9), Some(3)).unwrap();
    // 9 (manhattan) + (3 + 1 - 1)^2 * 10 + 3
    assert_eq!(risky.heuristic(GridPos::new(5, 4)), 102.0);
}
