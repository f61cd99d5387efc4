//! Behaviour shared by every search strategy.

use eight_puzzle::search::{AStar, BreadthFirst, DepthFirst, DepthFirstMode};
use eight_puzzle::{Heuristic, Move, Path, Puzzle, SearchLimits, SearchOutcome, SearchStrategy, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn all_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(BreadthFirst::new()),
        Box::new(DepthFirst::new(DepthFirstMode::Backtrack)),
        Box::new(AStar::new(Heuristic::MisplacedTiles)),
        Box::new(AStar::new(Heuristic::TotalDisplacement)),
    ]
}

fn near_goal() -> Puzzle {
    Puzzle::from_rows([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap()
}

/// Same tiles as the solved puzzle with 1 and 2 exchanged: opposite parity.
fn unreachable_goal() -> Puzzle {
    Puzzle::from_rows([[2, 1, 3], [4, 5, 6], [7, 8, 0]]).unwrap()
}

fn assert_valid_route(path: &Path, start: &Puzzle, goal: &Puzzle) {
    assert_eq!(path.start(), Some(start), "route must begin at the start");
    assert_eq!(path.goal(), Some(goal), "route must end at the goal");
    assert!(path.is_connected(), "consecutive puzzles must be one move apart");
    for pair in path.states().windows(2) {
        assert!(pair[0].move_towards(&pair[1]).is_some());
    }
}

#[test]
fn breadth_first_scenario_from_centre_blank() {
    let start = near_goal();
    let goal = Puzzle::solved();

    let mut bfs = BreadthFirst::new();
    let path = bfs.find_path(&start, &goal).into_path().expect("route exists");

    assert_eq!(path.states().len(), 3);
    assert_eq!(path.moves(), &[Move::Down, Move::Right]);
    assert_valid_route(&path, &start, &goal);
    // Four from the start, three from each of its children, two from each
    // of the seven corner puzzles dequeued before the goal.
    assert_eq!(bfs.nodes_expanded(), 30);
}

#[test]
fn start_equal_to_goal_returns_immediately() {
    let start = near_goal();
    let mut strategies = all_strategies();
    strategies.push(Box::new(DepthFirst::new(DepthFirstMode::Strict)));

    for mut strategy in strategies {
        let outcome = strategy.find_path(&start, &start);
        let path = outcome.path().unwrap_or_else(|| panic!("{} found nothing", strategy.name()));
        assert_eq!(path.states(), &[start]);
        assert_eq!(path.move_count(), 0);
        assert_eq!(strategy.nodes_expanded(), 0, "{} expanded nodes", strategy.name());
    }
}

#[test]
fn unreachable_goal_is_reported_not_found() {
    let start = Puzzle::solved();
    let goal = unreachable_goal();
    assert!(!start.is_reachable_from(&goal));

    for mut strategy in all_strategies() {
        assert_eq!(
            strategy.find_path(&start, &goal),
            SearchOutcome::NotFound,
            "{} should exhaust the parity class",
            strategy.name()
        );
        assert!(strategy.nodes_expanded() > 0);
    }
}

#[test]
fn breadth_first_generates_every_edge_of_the_parity_class() {
    // 181440 arrangements, 20160 per blank cell; blank degrees sum to 24.
    let mut bfs = BreadthFirst::new();
    bfs.find_path(&Puzzle::solved(), &unreachable_goal());
    assert_eq!(bfs.nodes_expanded(), 20160 * 24);
}

#[test]
fn strict_depth_first_stalls_instead_of_spinning() {
    let mut dfs = DepthFirst::new(DepthFirstMode::Strict);
    let outcome = dfs.find_path(&Puzzle::solved(), &unreachable_goal());
    assert!(matches!(outcome, SearchOutcome::Stalled { .. }), "got {outcome:?}");
}

#[test]
fn optimal_strategies_agree_on_random_walks() {
    let mut rng = StdRng::seed_from_u64(2024);
    let goal = Puzzle::solved();

    for steps in [1, 3, 6, 9, 12, 14, 16, 18] {
        let start = goal.random_walk(steps, &mut rng);

        let mut bfs = BreadthFirst::new();
        let shortest = bfs.find_path(&start, &goal).into_path().expect("route exists");
        assert_valid_route(&shortest, &start, &goal);
        assert!(shortest.move_count() <= steps);

        for heuristic in Heuristic::ALL {
            let mut astar = AStar::new(heuristic);
            let path = astar.find_path(&start, &goal).into_path().expect("route exists");
            assert_valid_route(&path, &start, &goal);
            assert_eq!(
                path.move_count(),
                shortest.move_count(),
                "{heuristic} disagrees with breadth-first from {start:?}"
            );
        }

        let mut dfs = DepthFirst::new(DepthFirstMode::Backtrack);
        let path = dfs.find_path(&start, &goal).into_path().expect("route exists");
        assert_valid_route(&path, &start, &goal);
        assert!(path.move_count() >= shortest.move_count());
    }
}

#[test]
fn optimal_strategies_agree_on_shuffled_pairs() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..3 {
        let goal = Puzzle::shuffled_reachable(&Puzzle::solved(), &mut rng);
        let start = Puzzle::shuffled_reachable(&goal, &mut rng);

        let (outcome, _) = Strategy::BreadthFirst.solve(&start, &goal, SearchLimits::unbounded());
        let shortest = outcome.into_path().expect("same parity class");

        for heuristic in Heuristic::ALL {
            let (outcome, _) = Strategy::AStar(heuristic).solve(&start, &goal, SearchLimits::unbounded());
            let path = outcome.into_path().expect("same parity class");
            assert_valid_route(&path, &start, &goal);
            assert_eq!(path.move_count(), shortest.move_count());
        }
    }
}

#[test]
fn hardest_instance_takes_thirty_one_moves() {
    let start = Puzzle::from_rows([[8, 6, 7], [2, 5, 4], [3, 0, 1]]).unwrap();
    let goal = Puzzle::solved();

    let mut astar = AStar::new(Heuristic::TotalDisplacement);
    let path = astar.find_path(&start, &goal).into_path().expect("route exists");
    assert_eq!(path.move_count(), 31);
    assert_valid_route(&path, &start, &goal);
}

#[test]
fn searches_are_repeatable_on_one_value() {
    let start = near_goal();
    let goal = Puzzle::solved();

    for mut strategy in all_strategies() {
        let first = strategy.find_path(&start, &goal);
        let first_count = strategy.nodes_expanded();
        let second = strategy.find_path(&start, &goal);
        assert_eq!(first, second);
        assert_eq!(strategy.nodes_expanded(), first_count);
    }
}

#[test]
fn node_limit_interrupts_every_strategy() {
    let start = Puzzle::from_rows([[8, 6, 7], [2, 5, 4], [3, 0, 1]]).unwrap();
    let goal = Puzzle::solved();
    let limits = SearchLimits::with_node_limit(50);

    for strategy in [
        Strategy::BreadthFirst,
        Strategy::DepthFirst(DepthFirstMode::Backtrack),
        Strategy::AStar(Heuristic::MisplacedTiles),
        Strategy::AStar(Heuristic::TotalDisplacement),
    ] {
        let (outcome, expanded) = strategy.solve(&start, &goal, limits);
        assert_eq!(outcome, SearchOutcome::LimitReached, "{strategy}");
        assert!((50..54).contains(&expanded), "{strategy} expanded {expanded}");
    }
}
