//! Status - consume の集計

use std::collections::BTreeMap;

use serde::Serialize;

/// What a successful `consume` handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    pub handled: usize,
    pub by_kind: BTreeMap<String, usize>,
}

impl DispatchStats {
    pub(crate) fn record(&mut self, kind: &str) {
        self.handled += 1;
        *self.by_kind.entry(kind.to_owned()).or_default() += 1;
    }
}
