use trailhead_lib::{
    find_shortest, Cost, SearchEngine, SearchLimits, SearchModel, SearchOutcome, TieBreak,
};

/// Directed graph with weighted adjacency lists.
struct WeightedGraph {
    adjacency: Vec<Vec<(usize, Cost)>>,
}

impl SearchModel for WeightedGraph {
    type State = usize;
    type Target = usize;

    fn neighbors(&self, state: &usize) -> Vec<(usize, Cost)> {
        self.adjacency[*state].clone()
    }

    fn heuristic(&self, _state: &usize, _target: &usize) -> Cost {
        0
    }

    fn is_target(&self, state: &usize, target: &usize) -> bool {
        state == target
    }
}

/// Small deterministic generator so graphs are reproducible between runs.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn random_graph(seed: u64, nodes: usize, edges: usize) -> WeightedGraph {
    let mut rng = XorShift(seed);
    let mut adjacency = vec![Vec::new(); nodes];
    for _ in 0..edges {
        let from = rng.below(nodes as u64) as usize;
        let to = rng.below(nodes as u64) as usize;
        // Small weight range so equal-priority ties are common.
        let cost = rng.below(4);
        adjacency[from].push((to, cost));
    }
    WeightedGraph { adjacency }
}

/// Bellman-Ford reference distances from `start`.
fn reference_distances(graph: &WeightedGraph, start: usize) -> Vec<Option<Cost>> {
    let mut distances = vec![None; graph.adjacency.len()];
    distances[start] = Some(0);
    for _ in 0..graph.adjacency.len() {
        let mut changed = false;
        for (from, edges) in graph.adjacency.iter().enumerate() {
            let Some(base) = distances[from] else {
                continue;
            };
            for &(to, cost) in edges {
                let candidate = base + cost;
                if distances[to].map_or(true, |known| candidate < known) {
                    distances[to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    distances
}

#[test]
fn tie_break_order_never_changes_the_cost() {
    for seed in 1..=25u64 {
        let graph = random_graph(seed * 7919, 30, 90);
        for target in 0..graph.adjacency.len() {
            let fifo = SearchEngine::new(&graph)
                .with_tie_break(TieBreak::Fifo)
                .find_shortest(0, &target)
                .expect("search succeeds");
            let lifo = SearchEngine::new(&graph)
                .with_tie_break(TieBreak::Lifo)
                .find_shortest(0, &target)
                .expect("search succeeds");
            assert_eq!(
                fifo.cost(),
                lifo.cost(),
                "seed {seed}, target {target}: tie-break changed the cost"
            );
        }
    }
}

#[test]
fn costs_match_exhaustive_reference() {
    for seed in 1..=25u64 {
        let graph = random_graph(seed * 104_729, 40, 120);
        let expected = reference_distances(&graph, 0);
        for (target, distance) in expected.iter().enumerate() {
            let outcome = find_shortest(&graph, 0, &target).expect("search succeeds");
            assert_eq!(
                outcome.cost(),
                *distance,
                "seed {seed}, target {target}: engine disagrees with Bellman-Ford"
            );
        }
    }
}

#[test]
fn returned_path_is_consistent_with_its_cost() {
    let graph = random_graph(42, 30, 100);
    let expected = reference_distances(&graph, 0);
    for (target, distance) in expected.iter().enumerate() {
        let Some(distance) = distance else {
            continue;
        };
        let solution = find_shortest(&graph, 0, &target)
            .expect("search succeeds")
            .into_solution()
            .expect("reachable");

        assert_eq!(solution.path.first(), Some(&0));
        assert_eq!(solution.path.last(), Some(&target));
        let walked: Cost = solution
            .path
            .windows(2)
            .map(|pair| {
                graph.adjacency[pair[0]]
                    .iter()
                    .filter(|(to, _)| *to == pair[1])
                    .map(|(_, cost)| *cost)
                    .min()
                    .expect("path follows an edge")
            })
            .sum();
        assert_eq!(walked, *distance);
    }
}

#[test]
fn repeated_searches_are_identical() {
    let graph = random_graph(9001, 50, 200);
    let engine = SearchEngine::new(&graph);
    for target in [3, 17, 49] {
        let first = engine.find_shortest(0, &target).expect("search succeeds");
        let second = engine.find_shortest(0, &target).expect("search succeeds");
        assert_eq!(first, second);
    }
}

#[test]
fn start_equal_to_target_costs_nothing() {
    let graph = random_graph(5, 10, 30);
    let outcome = find_shortest(&graph, 4, &4).expect("search succeeds");

    match outcome {
        SearchOutcome::Reached(solution) => {
            assert_eq!(solution.cost, 0);
            assert_eq!(solution.path, vec![4]);
            assert_eq!(solution.stats.expansions, 0);
        }
        SearchOutcome::Unreachable(_) => panic!("start is its own target"),
    }
}

#[test]
fn disconnected_component_is_reported_unreachable() {
    let graph = WeightedGraph {
        adjacency: vec![vec![(1, 1)], vec![(0, 1)], vec![(3, 1)], vec![(2, 1)]],
    };
    let outcome = find_shortest(&graph, 0, &3).expect("search succeeds");

    assert_eq!(outcome, SearchOutcome::Unreachable(*outcome.stats()));
    assert_eq!(outcome.stats().expansions, 2);
}

#[test]
fn limits_turn_runaway_searches_into_errors() {
    // An unbounded chain: every state leads to the next, the target never appears.
    struct Chain;

    impl SearchModel for Chain {
        type State = u64;
        type Target = ();

        fn neighbors(&self, state: &u64) -> Vec<(u64, Cost)> {
            vec![(state + 1, 1), (state + 2, 1)]
        }

        fn heuristic(&self, _state: &u64, _target: &()) -> Cost {
            0
        }

        fn is_target(&self, _state: &u64, _target: &()) -> bool {
            false
        }
    }

    let error = SearchEngine::new(&Chain)
        .with_limits(SearchLimits::unbounded().with_max_expansions(1_000))
        .find_shortest(0, &())
        .expect_err("expansion cap reached");
    assert!(error.to_string().contains("1000 expansions"));
}
