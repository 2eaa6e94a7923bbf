//! Table rendering: CALS-style `tgroup` segments to Markdown pipe tables.
//!
//! The schema wraps real data tables and single-column title blocks in the
//! same `table` element. A segment whose column specification declares at
//! most one column is a title wrapper and renders as nothing; everything
//! else is linearized with the first row promoted to the header.

use roxmltree::Node;

use crate::xml::{find_children, find_descendants, get_attribute, get_tag_name, get_text};

/// Paragraph-like tags harvested from anywhere inside a cell.
const CELL_TEXT_TAGS: &[&str] = &["KappaleKooste", "SaadosKappaleKooste", "LihavaTeksti"];

/// Intermediate form of one genuine table segment before linearization.
///
/// Columns are keyed by the `colname` cell attribute, in order of first
/// appearance; physical cell order within a row is not trusted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableModel {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableModel {
    /// Linearize into a Markdown pipe table.
    ///
    /// The first row becomes the header; there is no separate header marker
    /// in this schema variant.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut rows = self.rows.iter();
        let Some(header) = rows.next() else {
            return String::new();
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(format!("| {} |", header.join(" | ")));
        lines.push(format!(
            "| {} |",
            vec!["---"; self.columns.len()].join(" | ")
        ));
        for row in rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines.join("\n")
    }
}

/// Extract the text of one cell.
///
/// All paragraph-like fragments found anywhere inside the cell are joined
/// with a `<br>` separator; a cell with no structured fragments falls back
/// to its raw direct text.
fn cell_text(entry: Node<'_, '_>) -> String {
    let mut fragments: Vec<String> = Vec::new();
    for descendant in entry.descendants() {
        if descendant != entry
            && descendant.is_element()
            && CELL_TEXT_TAGS.contains(&get_tag_name(descendant))
        {
            let direct = get_text(descendant);
            if !direct.is_empty() {
                fragments.push(direct);
            }
        }
    }
    if fragments.is_empty() {
        get_text(entry)
    } else {
        fragments.join(" <br> ")
    }
}

/// Build the model for one `tgroup` segment, `None` when the segment is a
/// title block or has no rows.
fn segment_model(tgroup: Node<'_, '_>) -> Option<TableModel> {
    if find_children(tgroup, "colspec").count() <= 1 {
        tracing::debug!("table segment with a single column spec skipped");
        return None;
    }

    let mut columns: Vec<String> = Vec::new();
    let mut raw_rows: Vec<Vec<(String, String)>> = Vec::new();
    for row in find_descendants(tgroup, "row") {
        let mut cells: Vec<(String, String)> = Vec::new();
        for entry in find_children(row, "entry") {
            let name = get_attribute(entry, "colname").unwrap_or_default().to_string();
            if !columns.contains(&name) {
                columns.push(name.clone());
            }
            cells.push((name, cell_text(entry)));
        }
        raw_rows.push(cells);
    }
    if raw_rows.is_empty() {
        return None;
    }

    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            columns
                .iter()
                .map(|column| {
                    cells
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Some(TableModel { columns, rows })
}

/// Render a `table` node into Markdown, or an empty string when the node
/// holds no genuine data table.
///
/// Multiple segments within one table node become independent Markdown
/// tables joined by a blank line. The returned text carries no trailing
/// separator.
#[must_use]
pub fn render_table(node: Node<'_, '_>) -> String {
    let tables: Vec<String> = find_descendants(node, "tgroup")
        .filter_map(segment_model)
        .map(|model| model.to_markdown())
        .filter(|markdown| !markdown.is_empty())
        .collect();
    tables.join("\n\n")
}
