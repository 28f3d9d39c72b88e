use std::collections::HashSet;

use crate::domain::inventory::CellValue;

/// Turn the header row into unique column labels.
///
/// Blank cells become `Unnamed: <position>`; a repeated label gets `.1`, `.2`,
/// ... appended on its second and later occurrences.
pub fn resolve_headers(cells: &[CellValue]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(cells.len());

    for (idx, cell) in cells.iter().enumerate() {
        let base = cell
            .to_display()
            .unwrap_or_else(|| format!("Unnamed: {}", idx));

        let mut label = base.clone();
        let mut suffix = 1;
        while seen.contains(&label) {
            label = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(label.clone());
        headers.push(label);
    }

    headers
}
