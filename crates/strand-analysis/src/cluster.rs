use std::collections::{BTreeMap, BTreeSet};

use strand_core::ObjectNumber;
use strand_state::{SimObject, SimulationState};
use tracing::{debug, warn};

/// Cluster label of every analysed fiber.
///
/// The label of a fiber is the lowest fiber number of its connected
/// component, so labels are deterministic and independent of bridge order.
/// A map is built per analysis and never stored on the fibers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterMap {
    labels: BTreeMap<ObjectNumber, ObjectNumber>,
}

impl ClusterMap {
    /// Label of `fiber`, or `None` if it was not analysed.
    pub fn label(&self, fiber: ObjectNumber) -> Option<ObjectNumber> {
        self.labels.get(&fiber).copied()
    }

    /// Members of every cluster, keyed by ascending label.
    pub fn clusters(&self) -> BTreeMap<ObjectNumber, BTreeSet<ObjectNumber>> {
        let mut clusters: BTreeMap<ObjectNumber, BTreeSet<ObjectNumber>> = BTreeMap::new();
        for (&fiber, &label) in &self.labels {
            clusters.entry(label).or_default().insert(fiber);
        }
        clusters
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.labels
            .iter()
            .filter(|(fiber, label)| fiber == label)
            .count()
    }

    /// Returns true when no fiber was analysed.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(fiber, label)` pairs in ascending fiber order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectNumber, ObjectNumber)> + '_ {
        self.labels.iter().map(|(&fiber, &label)| (fiber, label))
    }
}

fn find(parent: &mut [usize], idx: usize) -> usize {
    let mut root = idx;
    while parent[root] != root {
        root = parent[root];
    }
    let mut cursor = idx;
    while parent[cursor] != root {
        let next = parent[cursor];
        parent[cursor] = root;
        cursor = next;
    }
    root
}

// `numbers` is sorted, so the smaller index is also the smaller fiber number.
fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra < rb {
        parent[rb] = ra;
    } else if rb < ra {
        parent[ra] = rb;
    }
}

/// Partitions `fibers` into components connected by `bridges`.
///
/// Each bridge is the pair of fibers held by one doubly attached couple.
/// Bridges naming a fiber outside `fibers` are skipped.
pub fn analyze_clusters<F, B>(fibers: F, bridges: B) -> ClusterMap
where
    F: IntoIterator<Item = ObjectNumber>,
    B: IntoIterator<Item = (ObjectNumber, ObjectNumber)>,
{
    let numbers: Vec<ObjectNumber> = fibers
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut parent: Vec<usize> = (0..numbers.len()).collect();

    for (first, second) in bridges {
        match (numbers.binary_search(&first), numbers.binary_search(&second)) {
            (Ok(a), Ok(b)) => union(&mut parent, a, b),
            _ => warn!(
                first = %first,
                second = %second,
                "bridge names a fiber outside the analysed set, skipped"
            ),
        }
    }

    let labels = (0..numbers.len())
        .map(|idx| (numbers[idx], numbers[find(&mut parent, idx)]))
        .collect();
    ClusterMap { labels }
}

/// Clusters of all fibers of `state`, bridged by its doubly attached couples.
pub fn fiber_clusters(state: &SimulationState) -> ClusterMap {
    let map = analyze_clusters(
        state.fibers.iter().map(|fiber| fiber.number()),
        state.couples.iter().filter_map(|couple| couple.bridge()),
    );
    debug!(
        fibers = state.fibers.len(),
        clusters = map.len(),
        "analysed fiber clusters"
    );
    map
}
