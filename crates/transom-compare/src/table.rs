//! Side-by-side comparison table construction and plain-text rendering.
//!
//! [`build_table`] is a pure function of the selection and the taxonomy:
//! one column per slot, one section per taxonomy category, one row per spec
//! name, each cell resolved through the accessor. Row and section order is
//! exactly the taxonomy's declared order.

use serde::{Deserialize, Serialize};
use transom_core::SpecCategory;

use crate::accessor::resolve_spec;
use crate::selection::SelectionSlots;

/// Identifying details for one occupied comparison column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeading {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub image_url: Option<String>,
}

/// One spec row: the canonical name plus one resolved cell per slot.
/// Cells for empty slots are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRow {
    pub name: String,
    pub cells: Vec<String>,
}

/// One taxonomy category's worth of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSection {
    pub title: String,
    pub rows: Vec<SpecRow>,
}

/// The full comparison table. `columns` has one entry per slot, in slot
/// order, `None` where the slot is empty; every row's `cells` vector is
/// parallel to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub columns: Vec<Option<ColumnHeading>>,
    pub sections: Vec<TableSection>,
}

impl ComparisonTable {
    /// True iff no slot contributed a column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }
}

/// Builds the comparison table for the current selection.
#[must_use]
pub fn build_table(slots: &SelectionSlots, taxonomy: &[SpecCategory]) -> ComparisonTable {
    let columns = slots
        .slots()
        .iter()
        .map(|slot| {
            slot.as_ref().map(|p| ColumnHeading {
                id: p.id.clone(),
                handle: p.handle.clone(),
                title: p.title.clone(),
                image_url: p.image_url.clone(),
            })
        })
        .collect();

    let sections = taxonomy
        .iter()
        .map(|category| TableSection {
            title: category.title.clone(),
            rows: category
                .specs
                .iter()
                .map(|name| SpecRow {
                    name: name.clone(),
                    cells: slots
                        .slots()
                        .iter()
                        .map(|slot| {
                            slot.as_ref()
                                .map(|p| resolve_spec(p, name))
                                .unwrap_or_default()
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    ComparisonTable { columns, sections }
}

/// Renders the table as aligned plain text for terminal output.
///
/// Only occupied columns are rendered. Section titles sit on their own
/// lines; spec rows are indented beneath them. Returns an empty string for
/// an empty table.
#[must_use]
pub fn render_text(table: &ComparisonTable) -> String {
    let occupied: Vec<(usize, &ColumnHeading)> = table
        .columns
        .iter()
        .enumerate()
        .filter_map(|(i, col)| col.as_ref().map(|heading| (i, heading)))
        .collect();
    if occupied.is_empty() {
        return String::new();
    }

    let name_width = 2 + table
        .sections
        .iter()
        .flat_map(|s| s.rows.iter())
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);

    let col_widths: Vec<usize> = occupied
        .iter()
        .map(|(slot_index, heading)| {
            table
                .sections
                .iter()
                .flat_map(|s| s.rows.iter())
                .filter_map(|row| row.cells.get(*slot_index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(heading.title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let mut header = format!("{:name_width$}", "");
    for ((_, heading), width) in occupied.iter().zip(&col_widths) {
        header.push_str("  ");
        header.push_str(&pad(&heading.title, *width));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for section in &table.sections {
        out.push_str(&section.title);
        out.push('\n');
        for row in &section.rows {
            let mut line = pad(&format!("  {}", row.name), name_width);
            for ((slot_index, _), width) in occupied.iter().zip(&col_widths) {
                line.push_str("  ");
                let cell = row.cells.get(*slot_index).map_or("", String::as_str);
                line.push_str(&pad(cell, *width));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}

/// Left-aligns `value` in a field of `width` characters. Width counts
/// chars, matching how the widths were measured.
fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}
