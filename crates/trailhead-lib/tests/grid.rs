mod common;

use std::collections::VecDeque;

use trailhead_lib::{
    shortest_ascent, shortest_descent, Error, HeightMap, Position, SearchLimits,
};

/// Plain breadth-first distances from `start`, following ascent rules.
fn bfs_distance(map: &HeightMap, start: Position, goal: Position) -> Option<u64> {
    let mut distance = vec![None; map.width() * map.height()];
    let index = |p: Position| p.row * map.width() + p.column;
    distance[index(start)] = Some(0u64);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let here = distance[index(current)].expect("queued cells have a distance");
        for next in map.adjacent(current) {
            if map.elevation(next) <= map.elevation(current) + 1 && distance[index(next)].is_none()
            {
                distance[index(next)] = Some(here + 1);
                queue.push_back(next);
            }
        }
    }
    distance[index(goal)]
}

#[test]
fn sample_climb_takes_thirty_one_steps() {
    let map = HeightMap::parse(&common::fixture("hill_sample.txt")).expect("fixture parses");
    let solution = shortest_ascent(&map, SearchLimits::default())
        .expect("search succeeds")
        .into_solution()
        .expect("summit reachable");

    assert_eq!(solution.cost, 31);
    assert_eq!(solution.path.first(), Some(&map.start()));
    assert_eq!(solution.path.last(), Some(&map.end()));
    assert_eq!(solution.steps(), 31);
}

#[test]
fn sample_descent_from_any_lowest_square_takes_twenty_nine_steps() {
    let map = HeightMap::parse(&common::fixture("hill_sample.txt")).expect("fixture parses");
    let solution = shortest_descent(&map, b'a', SearchLimits::default())
        .expect("search succeeds")
        .into_solution()
        .expect("some lowest square reachable");

    assert_eq!(solution.cost, 29);
    assert_eq!(solution.path.first(), Some(&map.end()));
    let last = *solution.path.last().expect("non-empty path");
    assert_eq!(map.elevation(last), b'a');
}

#[test]
fn small_grids_agree_with_breadth_first_search() {
    let mut seed = 0x9e37_79b9_7f4a_7c15u64;
    for _ in 0..200 {
        let cells: Vec<u8> = (0..25)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                b'a' + (seed % 5) as u8
            })
            .collect();
        let start = Position::new(0, 0);
        let end = Position::new(4, 4);
        let map = HeightMap::from_elevations(5, cells, start, end).expect("valid 5x5 map");

        let outcome = shortest_ascent(&map, SearchLimits::default()).expect("search succeeds");
        assert_eq!(outcome.cost(), bfs_distance(&map, start, end), "map {map:?}");
    }
}

#[test]
fn walled_off_summit_is_unreachable() {
    let map =
        HeightMap::parse(&common::fixture("hill_unreachable.txt")).expect("fixture parses");
    let outcome = shortest_ascent(&map, SearchLimits::default()).expect("search succeeds");

    assert!(!outcome.is_reached());
    assert_eq!(outcome.cost(), None);
}

#[test]
fn explicit_positions_must_lie_on_the_map() {
    let error = HeightMap::from_elevations(
        2,
        b"abcd".to_vec(),
        Position::new(0, 0),
        Position::new(2, 0),
    )
    .expect_err("end below the map");
    assert!(matches!(
        error,
        Error::MarkerOutOfBounds {
            marker: 'E',
            row: 2,
            ..
        }
    ));

    let error = HeightMap::from_elevations(
        2,
        b"abc".to_vec(),
        Position::new(0, 0),
        Position::new(0, 1),
    )
    .expect_err("ragged");
    assert!(matches!(error, Error::NonRectangularGrid { .. }));
}

#[test]
fn expansion_cap_applies_to_puzzle_searches() {
    let map = HeightMap::parse(&common::fixture("hill_sample.txt")).expect("fixture parses");
    let error = shortest_ascent(&map, SearchLimits::unbounded().with_max_expansions(5))
        .expect_err("cap too small for the sample");
    assert!(matches!(error, Error::ExpansionLimitExceeded { limit: 5 }));
}
