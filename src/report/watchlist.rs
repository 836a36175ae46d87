use std::collections::HashMap;

/// Ordered, duplicate-free list of process names. Order defines CSV column
/// order; names compare case-sensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WatchList {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl WatchList {
    /// Build from names in order; later duplicates are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = WatchList::default();
        list.extend(names);
        list
    }

    /// Append names not already present.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if self.positions.contains_key(&name) {
                continue;
            }
            self.positions.insert(name.clone(), self.names.len());
            self.names.push(name);
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
