use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crucible_core::{CostGrid, Direction, GridError, Point};
use log::{debug, trace, warn};

use crate::neighbors::Neighbors;
use crate::route::Route;
use crate::state::{NO_PARENT, State};
use crate::traits::HeatMap;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What counts as "the same node" when settling and pruning states.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SettlePolicy {
    /// Key by cell, direction and run length. Always finds the optimum.
    #[default]
    Exact,
    /// Key by cell only: once any state at a cell is expanded, the cell is
    /// closed. Expands fewer states but may miss the optimum, or any route
    /// at all.
    Coordinate,
}

impl FromStr for SettlePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(SettlePolicy::Exact),
            "coordinate" | "coord" => Ok(SettlePolicy::Coordinate),
            other => Err(format!(
                "unknown settle policy {other:?} (expected \"exact\" or \"coordinate\")"
            )),
        }
    }
}

impl fmt::Display for SettlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlePolicy::Exact => f.write_str("exact"),
            SettlePolicy::Coordinate => f.write_str("coordinate"),
        }
    }
}

/// Tunables for [`HeatLossSearch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub settle: SettlePolicy,
    /// Most cells the crucible may cross in one straight line. Values
    /// below 1 are treated as 1.
    pub max_straight: u8,
    /// Stop with [`Outcome::Cancelled`] after expanding this many states.
    pub expansion_budget: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            settle: SettlePolicy::Exact,
            max_straight: 3,
            expansion_budget: None,
        }
    }
}

impl SearchOptions {
    pub fn with_settle(mut self, settle: SettlePolicy) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_max_straight(mut self, max_straight: u8) -> Self {
        self.max_straight = max_straight;
        self
    }

    pub fn with_expansion_budget(mut self, budget: usize) -> Self {
        self.expansion_budget = Some(budget);
        self
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The goal was reached.
    Found(Route),
    /// Every reachable state was expanded without reaching the goal.
    Exhausted { expanded: usize },
    /// The expansion budget ran out first.
    Cancelled { expanded: usize },
}

impl Outcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            Outcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Consume the outcome, keeping only the route.
    pub fn into_route(self) -> Option<Route> {
        match self {
            Outcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Total heat loss of the route, if one was found.
    pub fn cost(&self) -> Option<u32> {
        self.route().map(|r| r.cost)
    }
}

// ---------------------------------------------------------------------------
// Frontier bookkeeping
// ---------------------------------------------------------------------------

/// Identity of a state for settling and dominance checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Key {
    pos: Point,
    dir: Option<Direction>,
    run: u8,
}

impl Key {
    fn of(policy: SettlePolicy, s: &State) -> Self {
        match policy {
            SettlePolicy::Exact => Self {
                pos: s.pos,
                dir: s.dir,
                run: s.run,
            },
            SettlePolicy::Coordinate => Self {
                pos: s.pos,
                dir: None,
                run: 0,
            },
        }
    }
}

/// Reference into the state arena, ordered for use in `BinaryHeap`.
///
/// Arena indices grow with insertion order, so comparing them gives a
/// stable first-inserted-wins tie-break between equal `f` values.
#[derive(Clone, Copy, Eq, PartialEq)]
struct StateRef {
    idx: usize,
    f: u32,
}

impl Ord for StateRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then oldest.
        other.f.cmp(&self.f).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for StateRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// HeatLossSearch
// ---------------------------------------------------------------------------

/// Best-first search for the route losing the least heat.
///
/// `HeatLossSearch` owns the state arena, the frontier and the settled set,
/// so running it again on another grid reuses their allocations.
#[derive(Default)]
pub struct HeatLossSearch {
    options: SearchOptions,
    states: Vec<State>,
    open: BinaryHeap<StateRef>,
    best: HashMap<Key, u32>,
    settled: HashSet<Key>,
    nbuf: Neighbors,
}

impl HeatLossSearch {
    /// Create a search with the given options.
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this search runs with.
    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Number of states created by the most recent run.
    #[inline]
    pub fn states_created(&self) -> usize {
        self.states.len()
    }

    /// Search `map` from its start to its goal.
    ///
    /// Running out of frontier or budget is reported through [`Outcome`];
    /// the only error is a map that reports a cell it contains as out of
    /// bounds.
    pub fn run<M: HeatMap>(&mut self, map: &M) -> Result<Outcome, GridError> {
        self.states.clear();
        self.open.clear();
        self.best.clear();
        self.settled.clear();

        debug!(
            "searching {} -> {} (settle {}, max straight {})",
            map.start(),
            map.goal(),
            self.options.settle,
            self.options.max_straight
        );

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let outcome = self.expand(map, &mut nbuf);
        self.nbuf = nbuf;
        outcome
    }

    fn expand<M: HeatMap>(&mut self, map: &M, nbuf: &mut Neighbors) -> Result<Outcome, GridError> {
        let policy = self.options.settle;
        let max_straight = self.options.max_straight.max(1);
        let goal = map.goal();

        let start = map.start();
        self.push(policy, State::start(start, map.estimate(start)?));

        let mut expanded = 0;
        while let Some(current) = self.open.pop() {
            let ci = current.idx;
            let state = self.states[ci];
            let key = Key::of(policy, &state);

            // Skip entries superseded after they were pushed.
            if self.settled.contains(&key) || self.best.get(&key).is_some_and(|&g| g < state.g) {
                continue;
            }

            if state.pos == goal {
                let route = self.route_to(ci);
                debug!(
                    "found route costing {} after {expanded} expansions ({} states)",
                    route.cost,
                    self.states.len()
                );
                return Ok(Outcome::Found(route));
            }

            if self.options.expansion_budget.is_some_and(|b| expanded >= b) {
                warn!("expansion budget of {expanded} exhausted before reaching {goal}");
                return Ok(Outcome::Cancelled { expanded });
            }

            trace!("expanding {state}");
            expanded += 1;
            self.settled.insert(key);

            let parent_pos = if state.is_root() {
                None
            } else {
                Some(self.states[state.parent].pos)
            };
            let candidates = nbuf.cardinal(state.pos, |p| {
                Some(p) != parent_pos && map.contains(p) && state.accepts_step(p, max_straight)
            });

            for &np in candidates {
                let child = state.child(ci, np, map.entry_cost(np)?, map.estimate(np)?);
                let ck = Key::of(policy, &child);
                if self.settled.contains(&ck) {
                    continue;
                }
                if self.best.get(&ck).is_some_and(|&g| g <= child.g) {
                    continue;
                }
                self.push(policy, child);
            }
        }

        debug!("frontier exhausted after {expanded} expansions; no route to {goal}");
        Ok(Outcome::Exhausted { expanded })
    }

    fn push(&mut self, policy: SettlePolicy, state: State) {
        let idx = self.states.len();
        self.best.insert(Key::of(policy, &state), state.g);
        self.states.push(state);
        self.open.push(StateRef { idx, f: state.f() });
    }

    fn route_to(&self, idx: usize) -> Route {
        let cost = self.states[idx].g;
        let mut path = Vec::new();
        let mut ci = idx;
        while ci != NO_PARENT {
            let s = &self.states[ci];
            path.push(s.pos);
            ci = s.parent;
        }
        path.reverse();
        Route { cost, path }
    }
}

/// Run an exact search with default options over `grid`.
pub fn minimal_heat_loss(grid: &CostGrid) -> Result<Outcome, GridError> {
    HeatLossSearch::default().run(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EXAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533";

    const CORRIDOR: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991";

    fn grid(s: &str) -> CostGrid {
        s.parse().unwrap()
    }

    fn found(outcome: Outcome) -> Route {
        match outcome {
            Outcome::Found(route) => route,
            other => panic!("expected a route, got {other:?}"),
        }
    }

    #[rstest]
    #[case(EXAMPLE, 102)]
    #[case(CORRIDOR, 59)]
    #[case("11111\n11111", 5)]
    #[case("19\n11", 2)]
    fn known_minimal_costs(#[case] input: &str, #[case] cost: u32) {
        let route = found(minimal_heat_loss(&grid(input)).unwrap());
        assert_eq!(route.cost, cost);
    }

    #[test]
    fn example_route_is_well_formed() {
        let g = grid(EXAMPLE);
        let route = found(minimal_heat_loss(&g).unwrap());
        assert_eq!(route.path.first(), Some(&Point::ZERO));
        assert_eq!(route.path.last(), Some(&g.goal()));
        assert!(route.is_contiguous());
        assert!(!route.reverses());
        assert!(route.longest_run() <= 3);
        let sum: u32 = route.path[1..]
            .iter()
            .map(|&p| u32::from(g.entry_cost(p).unwrap()))
            .sum();
        assert_eq!(sum, route.cost);
    }

    #[test]
    fn single_cell_grid_costs_nothing() {
        let route = found(minimal_heat_loss(&grid("7")).unwrap());
        assert_eq!(route.cost, 0);
        assert_eq!(route.path, vec![Point::ZERO]);
    }

    #[test]
    fn start_cell_is_never_charged() {
        let route = found(minimal_heat_loss(&grid("9123")).unwrap());
        assert_eq!(route.cost, 6);
    }

    #[test]
    fn ties_resolve_to_first_inserted_route() {
        let route = found(minimal_heat_loss(&grid("123\n456\n789")).unwrap());
        assert_eq!(route.cost, 20);
        assert_eq!(
            route.path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
    }

    #[rstest]
    #[case("11111")]
    #[case("1\n1\n1\n1\n1\n1")]
    fn long_corridor_is_unreachable(#[case] input: &str) {
        let outcome = minimal_heat_loss(&grid(input)).unwrap();
        assert!(matches!(outcome, Outcome::Exhausted { .. }));
        assert_eq!(outcome.cost(), None);
    }

    #[test]
    fn four_cell_corridor_is_reachable() {
        let route = found(minimal_heat_loss(&grid("1111")).unwrap());
        assert_eq!(route.cost, 3);
        assert_eq!(route.longest_run(), 3);
    }

    #[test]
    fn longer_straight_runs_open_corridors() {
        let options = SearchOptions::default().with_max_straight(4);
        let route = found(HeatLossSearch::new(options).run(&grid("11111")).unwrap());
        assert_eq!(route.cost, 4);
    }

    #[test]
    fn coordinate_settling_is_never_cheaper() {
        let g = grid(EXAMPLE);
        let options = SearchOptions::default().with_settle(SettlePolicy::Coordinate);
        let route = found(HeatLossSearch::new(options).run(&g).unwrap());
        assert!(route.cost >= 102);
        assert!(route.is_contiguous());
        assert!(route.longest_run() <= 3);
        assert!(!route.reverses());
    }

    #[test]
    fn budget_cancels_search() {
        let options = SearchOptions::default().with_expansion_budget(10);
        let mut search = HeatLossSearch::new(options);
        let outcome = search.run(&grid(EXAMPLE)).unwrap();
        assert_eq!(outcome, Outcome::Cancelled { expanded: 10 });
        assert!(search.states_created() > 10);
    }

    #[test]
    fn reused_search_is_deterministic() {
        let g = grid(EXAMPLE);
        let mut search = HeatLossSearch::default();
        let first = search.run(&g).unwrap();
        let _ = search.run(&grid("19\n11")).unwrap();
        let again = search.run(&g).unwrap();
        assert_eq!(first, again);
    }

    #[rstest]
    #[case("exact", SettlePolicy::Exact)]
    #[case("Coordinate", SettlePolicy::Coordinate)]
    #[case("coord", SettlePolicy::Coordinate)]
    fn settle_policy_parses(#[case] s: &str, #[case] expected: SettlePolicy) {
        assert_eq!(s.parse::<SettlePolicy>(), Ok(expected));
    }

    #[test]
    fn unknown_settle_policy_is_rejected() {
        assert!("fastest".parse::<SettlePolicy>().is_err());
    }

    #[test]
    fn heap_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(StateRef { idx: 0, f: 5 });
        heap.push(StateRef { idx: 1, f: 3 });
        heap.push(StateRef { idx: 2, f: 3 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|r| r.idx).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
