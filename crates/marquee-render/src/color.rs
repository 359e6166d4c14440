use indexmap::IndexMap;

/// The 10-color categorical palette used by the reference chart.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal color scale: keys are assigned palette slots in first-seen
/// order, cycling when the palette is exhausted. The same key always
/// resolves to the same color within one scale instance.
#[derive(Debug, Default)]
pub struct OrdinalScale {
    domain: IndexMap<String, usize>,
}

impl OrdinalScale {
    pub fn get(&mut self, key: &str) -> &'static str {
        let next = self.domain.len();
        let idx = *self.domain.entry(key.to_string()).or_insert(next);
        CATEGORY10[idx % CATEGORY10.len()]
    }

    /// Keys in assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }
}
