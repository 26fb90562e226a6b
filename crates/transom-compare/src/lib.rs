pub mod accessor;
pub mod selection;
pub mod table;

pub use accessor::resolve_spec;
pub use selection::{SelectionSlots, SLOT_COUNT};
pub use table::{build_table, render_text, ColumnHeading, ComparisonTable, SpecRow, TableSection};
