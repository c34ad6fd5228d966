use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::glob::glob_match;
use crate::hooks::Customizer;
use crate::metrics::installed_observer;
use crate::tree::{NodeId, PatternTree};
use crate::types::{PatternRecord, Properties};


/// Registered patterns and the data they resolve to.
///
/// The store is a plain owned value: `find` and `list` take `&self`, `add` and
/// `remove` take `&mut self`, so the borrow checker already rules out a lookup
/// racing a mutation. To share one store across threads wrap it in
/// [`SharedStore`](crate::SharedStore) or another reader/writer lock.
pub struct PatternStore<T> {
    tree: PatternTree<T>,
    customizer: Option<Arc<dyn Customizer<T>>>,
}

impl<T> Default for PatternStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PatternStore<T> {
    /// An empty store with no customizer.
    pub fn new() -> Self {
        Self {
            tree: PatternTree::new(),
            customizer: None,
        }
    }

    /// An empty store whose `add` calls go through `customizer` first.
    pub fn with_customizer(customizer: Arc<dyn Customizer<T>>) -> Self {
        Self {
            tree: PatternTree::new(),
            customizer: Some(customizer),
        }
    }

    pub fn set_customizer(&mut self, customizer: Option<Arc<dyn Customizer<T>>>) {
        self.customizer = customizer;
    }

    pub fn customizer(&self) -> Option<&Arc<dyn Customizer<T>>> {
        self.customizer.as_ref()
    }

    /// Read-only view of the underlying decision tree.
    pub fn tree(&self) -> &PatternTree<T> {
        &self.tree
    }

    /// Register `data` under `properties`, replacing whatever was registered
    /// for the exact same set before.
    ///
    /// The customizer, when present, runs first and may rewrite `properties`;
    /// the rewritten set decides the path that gets built.
    pub fn add(&mut self, mut properties: Properties, data: T) -> &mut Self {
        let modifier = match self.customizer.clone() {
            Some(customizer) => customizer.add(self, &mut properties, &data),
            None => None,
        };

        let target = self.tree.ensure_path(&properties);
        debug!(
            pattern_len = properties.len(),
            node = target.index(),
            has_modifier = modifier.is_some(),
            "pattern_add"
        );
        self.tree.node_mut(target).set_payload(data, modifier);
        self
    }

    /// Soft-delete the pattern registered under exactly `properties`.
    ///
    /// The path must exist as stored; there is no fuzzy resolution here. If the
    /// pattern carries a modifier, it decides whether the deletion happens.
    /// Nodes are kept so longer patterns sharing the prefix stay reachable.
    pub fn remove(&mut self, properties: &Properties) {
        let Some(target) = self.tree.walk_exact(properties) else {
            trace!(pattern_len = properties.len(), "pattern_remove_miss");
            return;
        };

        let permitted = {
            let node = self.tree.node(target);
            match node.modifier() {
                Some(modifier) => modifier.remove(self, properties, node.data()),
                None => true,
            }
        };

        if permitted {
            self.tree.node_mut(target).clear_payload();
        }
        debug!(
            pattern_len = properties.len(),
            node = target.index(),
            vetoed = !permitted,
            "pattern_remove"
        );
    }

    /// Every registered pattern consistent with `constraints`, in tree order.
    ///
    /// Each constrained name must be present in a pattern, and the pattern's
    /// value must satisfy the constraint value as a glob (`*`, `?`). With
    /// `exact`, the pattern must also have exactly as many properties as the
    /// constraint set. `None` places no constraint at all, so `exact` has
    /// nothing to compare against and every pattern is returned.
    ///
    /// Unlike `find`, this keeps descending below matching patterns and returns
    /// the shallow and the deep ones alike.
    pub fn list(&self, constraints: Option<&Properties>, exact: bool) -> Vec<PatternRecord<T>>
    where
        T: Clone,
    {
        let start = Instant::now();
        let mut records = Vec::new();
        let mut path = Vec::new();
        self.collect(NodeId::ROOT, &mut path, constraints, exact, &mut records);

        let latency = start.elapsed();
        trace!(
            constraints = constraints.map_or(0, |c| c.len()),
            exact,
            count = records.len(),
            elapsed_micros = latency.as_micros(),
            "pattern_list"
        );
        if let Some(recorder) = installed_observer() {
            recorder.record_list(latency, records.len());
        }
        records
    }

    fn collect<'a>(
        &'a self,
        id: NodeId,
        path: &mut Vec<(&'a str, &'a str)>,
        constraints: Option<&Properties>,
        exact: bool,
        records: &mut Vec<PatternRecord<T>>,
    ) where
        T: Clone,
    {
        let node = self.tree.node(id);
        if let Some(data) = node.data() {
            if satisfies(path, constraints, exact) {
                records.push(PatternRecord {
                    pattern: path
                        .iter()
                        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                        .collect(),
                    data: data.clone(),
                    modifier: node.modifier().cloned(),
                });
            }
        }

        for (name, key) in node.children() {
            for (value, next) in self.tree.node(key).children() {
                path.push((name, value));
                self.collect(next, path, constraints, exact, records);
                path.pop();
            }
        }
    }

    /// Number of registered patterns (data-bearing nodes).
    pub fn pattern_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.tree.node(id);
            if node.data().is_some() {
                count += 1;
            }
            stack.extend(node.children().map(|(_, child)| child));
        }
        count
    }

    /// Number of tree nodes, including routing-only ones left by removals.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count() == 0
    }

    /// Drop every node. The customizer stays installed.
    pub fn clear(&mut self) {
        self.tree = PatternTree::new();
    }
}

impl<T: Clone> PatternStore<T> {
    /// The data of the most specific pattern `subject` satisfies.
    ///
    /// Subject properties the tree has no branch for are ignored, so extra
    /// properties never block a match; they only keep it from being more
    /// specific.
    pub fn find(&self, subject: &Properties) -> Option<T> {
        self.find_item(subject, false)
    }

    /// Like [`find`](Self::find), but only a pattern that consumed every
    /// subject property is accepted.
    pub fn find_exact(&self, subject: &Properties) -> Option<T> {
        self.find_item(subject, true)
    }

    fn find_item(&self, subject: &Properties, exact: bool) -> Option<T> {
        let start = Instant::now();
        let keys: Vec<(&str, &str)> = subject
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let root = self.tree.root();
        let mut current = NodeId::ROOT;
        let mut last_good = NodeId::ROOT;
        let mut last_data = root.data();
        let mut last_modifier = root.modifier();
        // Each choice point remembers how many keys had been consumed on
        // the way to it, so an abandoned branch is not counted.
        let mut choice_points: Vec<(NodeId, usize)> = Vec::new();
        let mut consumed = 0usize;
        let mut cursor = 0usize;

        while cursor < keys.len() {
            let (name, value) = keys[cursor];

            match self.tree.step(current, name, value) {
                Some(next) => {
                    // Later properties may still match a sibling branch of `last_good`.
                    if self.tree.node(last_good).child_count() > 1 {
                        choice_points.push((last_good, consumed));
                    }
                    last_good = next;
                    current = next;

                    let node = self.tree.node(next);
                    if let Some(data) = node.data() {
                        last_data = Some(data);
                        last_modifier = node.modifier();
                    }
                    consumed += 1;
                    cursor += 1;
                }
                None if last_data.is_none() && !choice_points.is_empty() => {
                    if let Some((resume, consumed_before)) = choice_points.pop() {
                        trace!(node = resume.index(), cursor, "find_backtrack");
                        current = resume;
                        last_good = resume;
                        consumed = consumed_before;
                    }
                }
                None => {
                    current = last_good;
                    cursor += 1;
                }
            }
        }

        if exact && consumed != keys.len() {
            last_data = None;
        }

        let result = match last_modifier {
            Some(modifier) => modifier.find(self, subject, last_data),
            None => last_data.cloned(),
        };

        let latency = start.elapsed();
        trace!(
            subject_len = keys.len(),
            consumed,
            exact,
            hit = result.is_some(),
            elapsed_micros = latency.as_micros(),
            "pattern_find"
        );
        if let Some(recorder) = installed_observer() {
            recorder.record_find(exact, latency, result.is_some());
        }
        result
    }
}

impl<T: fmt::Debug> fmt::Debug for PatternStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternStore")
            .field("tree", &self.tree)
            .field("customizer", &self.customizer.is_some())
            .finish()
    }
}

fn satisfies(path: &[(&str, &str)], constraints: Option<&Properties>, exact: bool) -> bool {
    let Some(constraints) = constraints else {
        return true;
    };
    if exact && path.len() != constraints.len() {
        return false;
    }
    constraints.iter().all(|(name, pattern)| {
        path.iter()
            .find(|(stored, _)| *stored == name.as_str())
            .is_some_and(|(_, value)| glob_match(pattern, value))
    })
}
