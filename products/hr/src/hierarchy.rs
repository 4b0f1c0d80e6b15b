//! In-memory reporting forest.
//!
//! Employees are nodes keyed by id; each node stores only the id of its
//! manager. Direct reports are an index derived from those parent links when
//! the forest is built, so the two views cannot drift apart. Every walk keeps a
//! visited set and reports a cycle instead of looping.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("employee {0} is not part of the hierarchy")]
    Unknown(i32),
    #[error("reporting cycle through employee {0}")]
    Cycle(i32),
}

#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    managers: HashMap<i32, Option<i32>>,
    reports: HashMap<i32, Vec<i32>>,
}

impl Hierarchy {
    /// Builds the forest from `(employee, manager)` pairs. Sibling order
    /// follows input order.
    pub fn from_edges(edges: impl IntoIterator<Item = (i32, Option<i32>)>) -> Self {
        let mut hierarchy = Self::default();
        for (id, manager) in edges {
            hierarchy.managers.insert(id, manager);
            if let Some(manager) = manager {
                hierarchy.reports.entry(manager).or_default().push(id);
            }
        }
        hierarchy
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.managers.contains_key(&id)
    }

    pub fn manager_of(&self, id: i32) -> Option<i32> {
        self.managers.get(&id).copied().flatten()
    }

    pub fn direct_reports(&self, id: i32) -> &[i32] {
        self.reports.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Employees without a manager, ascending by id.
    pub fn roots(&self) -> Vec<i32> {
        let mut roots: Vec<i32> = self
            .managers
            .iter()
            .filter_map(|(id, manager)| manager.is_none().then_some(*id))
            .collect();
        roots.sort_unstable();
        roots
    }

    /// The employee followed by each successive manager up to the first
    /// employee without one. A manager id missing from the forest ends the
    /// chain.
    pub fn chain(&self, id: i32) -> Result<Vec<i32>, HierarchyError> {
        if !self.contains(id) {
            return Err(HierarchyError::Unknown(id));
        }
        let mut chain = vec![id];
        let mut seen = HashSet::from([id]);
        let mut current = id;
        while let Some(manager) = self.manager_of(current) {
            if !self.contains(manager) {
                break;
            }
            if !seen.insert(manager) {
                return Err(HierarchyError::Cycle(manager));
            }
            chain.push(manager);
            current = manager;
        }
        Ok(chain)
    }

    /// Every transitive report of `id` in pre-order: each report is followed
    /// by its own subtree before the next sibling.
    pub fn descendants(&self, id: i32) -> Result<Vec<i32>, HierarchyError> {
        if !self.contains(id) {
            return Err(HierarchyError::Unknown(id));
        }
        let mut out = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut stack: Vec<i32> = self.direct_reports(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                return Err(HierarchyError::Cycle(next));
            }
            out.push(next);
            stack.extend(self.direct_reports(next).iter().rev());
        }
        Ok(out)
    }

    /// True when making `manager` the manager of `employee` would close a
    /// loop, i.e. `employee` already appears in the chain above `manager`.
    pub fn would_cycle(&self, employee: i32, manager: i32) -> bool {
        if employee == manager {
            return true;
        }
        match self.chain(manager) {
            Ok(chain) => chain.contains(&employee),
            Err(HierarchyError::Cycle(_)) => true,
            Err(HierarchyError::Unknown(_)) => false,
        }
    }
}
