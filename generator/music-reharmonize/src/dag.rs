//! A DAG of candidate chord placements, solved by longest path.

use music_theory::{RomanNumeral, Scale};
use std::collections::HashMap;

/// `total_value` weighting of a node's own length against its score.
const LENGTH_ADVANTAGE: f64 = 1.1;

/// One candidate chord placement: a roman numeral spanning `[start, start+length)`.
#[derive(Debug, Clone, Copy)]
pub struct ChordNode {
    /// The roman numeral this node proposes.
    pub number: RomanNumeral,
    /// This window's raw fit score, before length weighting.
    pub value: f64,
    /// Window start, in beats.
    pub start: f64,
    /// Window length, in beats.
    pub length: f64,
    total_value: Option<f64>,
    target: Option<usize>,
}

impl ChordNode {
    fn new(number: RomanNumeral, value: f64, start: f64, length: f64) -> Self {
        Self { number, value, start, length, total_value: None, target: None }
    }

    /// This node's own contribution to a path's total, favoring longer windows.
    #[must_use]
    pub fn actual_value(&self) -> f64 {
        self.length.powf(LENGTH_ADVANTAGE) * self.value
    }

    /// The best total achievable on a path ending at this node, once solved.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.total_value.unwrap_or_else(|| self.actual_value())
    }
}

/// A DAG over chord placements at possibly-overlapping granularities.
#[derive(Debug, Default)]
pub struct ChordDag {
    nodes: Vec<ChordNode>,
}

impl ChordDag {
    /// An empty DAG.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a candidate node, returning its index.
    pub fn add_node(&mut self, number: RomanNumeral, value: f64, start: f64, length: f64) -> usize {
        self.nodes.push(ChordNode::new(number, value, start, length));
        self.nodes.len() - 1
    }

    /// All nodes added so far.
    #[must_use]
    pub fn nodes(&self) -> &[ChordNode] {
        &self.nodes
    }

    fn build_edges(&self, scale: &Scale) -> Vec<Vec<usize>> {
        let mut nodes_at_ending: HashMap<u64, Vec<usize>> = HashMap::new();
        for (i, n) in self.nodes.iter().enumerate() {
            nodes_at_ending.entry((n.start + n.length).to_bits()).or_default().push(i);
        }
        self.nodes
            .iter()
            .map(|n| match nodes_at_ending.get(&n.start.to_bits()) {
                Some(candidates) => candidates
                    .iter()
                    .copied()
                    .filter(|&m| scale.is_transitable(self.nodes[m].number, n.number))
                    .collect(),
                None => Vec::new(),
            })
            .collect()
    }

    /// Solve the longest path and return its node indices in time order.
    pub fn solve(&mut self, scale: &Scale) -> Vec<usize> {
        let prevs = self.build_edges(scale);

        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by(|&a, &b| {
            self.nodes[a].start.partial_cmp(&self.nodes[b].start).unwrap_or(std::cmp::Ordering::Equal)
        });

        for &i in &order {
            let actual = self.nodes[i].actual_value();
            let candidates = &prevs[i];
            if candidates.is_empty() {
                self.nodes[i].total_value = Some(actual);
                continue;
            }
            let mut best = candidates[0];
            for &p in &candidates[1..] {
                if self.nodes[p].total_value() > self.nodes[best].total_value() {
                    best = p;
                }
            }
            self.nodes[i].total_value = Some(self.nodes[best].total_value() + actual);
            self.nodes[i].target = Some(best);
        }

        let timing_max = self.nodes.iter().map(|n| n.start + n.length).fold(f64::MIN, f64::max);
        let mut end: Option<usize> = None;
        for (i, n) in self.nodes.iter().enumerate() {
            if n.start + n.length == timing_max {
                end = match end {
                    Some(e) if self.nodes[e].total_value() >= n.total_value() => Some(e),
                    _ => Some(i),
                };
            }
        }

        let mut path = Vec::new();
        let mut cursor = end;
        while let Some(i) = cursor {
            path.push(i);
            cursor = self.nodes[i].target;
        }
        path.reverse();
        path
    }
}
