//! Exhaustive evaluation of the decision table.
//!
//! Every combination of one representative symbol per [`SymbolGroup`] is
//! classified, which covers each branch of both axes including the gap.

use crate::diagnostic::{detect, Detection};
use crate::symbols::{SymbolGroup, SymbolSet};

/// One evaluated combination.
#[derive(Debug, Clone)]
pub struct MatrixRow {
    /// Groups whose representative was defined.
    pub groups: Vec<SymbolGroup>,
    pub detection: Detection,
}

/// Classify all `2^5` group combinations, starting from the empty set.
pub fn evaluate() -> Vec<MatrixRow> {
    evaluate_with(|group| group.representative())
}

/// Like [`evaluate`], choosing the symbol for each group with `pick`.
pub fn evaluate_with<F>(pick: F) -> Vec<MatrixRow>
where
    F: Fn(SymbolGroup) -> &'static str,
{
    let count = SymbolGroup::ALL.len();
    (0u32..1 << count)
        .map(|mask| {
            let groups: Vec<SymbolGroup> = SymbolGroup::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, g)| *g)
                .collect();
            let symbols: SymbolSet = groups.iter().map(|g| pick(*g)).collect();
            MatrixRow {
                detection: detect(&symbols),
                groups,
            }
        })
        .collect()
}
