//! Terminal rendering of the current page and the session report.

use std::collections::BTreeSet;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pagesel_core::{BrowsingSession, SelectionQuery};

use crate::types::BrowseReport;

/// One-line pagination and selection label for the current page.
pub fn status_line(session: &BrowsingSession) -> String {
    let page = session.page();
    let rows = page
        .window(session.total_count())
        .map_or_else(|| "none".to_string(), |window| window.to_string());
    format!(
        "page {}/{} | rows {} | selected {}",
        page.page_number(),
        session.total_pages().max(1),
        rows,
        session.query().effective_count()
    )
}

/// Header checkbox glyph: checked, unchecked or mixed.
pub fn header_checkbox(query: &SelectionQuery<'_>) -> &'static str {
    if query.all_selected() {
        "[x]"
    } else if query.none_selected() {
        "[ ]"
    } else {
        "[-]"
    }
}

/// Status line followed by the page table, or the fetch error.
pub fn render_page(session: &BrowsingSession) -> String {
    let mut out = status_line(session);
    if let Some(error) = session.last_error() {
        out.push_str(&format!("\nerror: {}", error.user_message()));
        return out;
    }

    let query = session.query();
    let field_names: BTreeSet<&str> = session
        .items()
        .iter()
        .flat_map(|item| item.fields.keys().map(String::as_str))
        .collect();

    let mut table = Table::new();
    let mut header = vec![
        header_cell(header_checkbox(&query)),
        header_cell("#"),
        header_cell("ID"),
    ];
    header.extend(field_names.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);

    for (row, item) in query.rows().zip(session.items()) {
        let mut cells = vec![
            checkbox_cell(row.selected),
            dim_cell(row.position + 1),
            Cell::new(row.id),
        ];
        cells.extend(field_names.iter().map(|name| match item.fields.get(*name) {
            Some(serde_json::Value::String(text)) => Cell::new(text),
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out
}

pub fn print_report(report: &BrowseReport) {
    for view in &report.views {
        println!("{view}");
        println!();
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Selection"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let selection = &report.selection;
    table.add_row(vec![
        Cell::new("Selected items"),
        Cell::new(selection.effective_count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("First N rule"), Cell::new(selection.baseline)]);
    table.add_row(vec![
        Cell::new("Included"),
        id_list_cell(&selection.include),
    ]);
    table.add_row(vec![
        Cell::new("Excluded"),
        id_list_cell(&selection.exclude),
    ]);
    table.add_row(vec![
        Cell::new("Collection size"),
        Cell::new(report.total_count),
    ]);
    table.add_row(vec![
        Cell::new("Pages loaded"),
        Cell::new(report.pages_loaded),
    ]);
    table.add_row(vec![
        Cell::new("Failed fetches"),
        count_cell(report.fetch_failures, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Ignored toggles"),
        count_cell(report.ignored_events, Color::Yellow),
    ]);
    println!("{table}");

    if !report.messages.is_empty() {
        eprintln!("Problems:");
        for message in &report.messages {
            eprintln!("- {message}");
        }
    }
}

/// The toggle transition table, as printed by `pagesel explain`.
pub fn transition_table() -> Table {
    use pagesel_core::Transition;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Wanted"),
        header_cell("Position"),
        header_cell("Change"),
    ]);
    apply_table_style(&mut table);
    for (desired, rule_selected) in [(true, false), (true, true), (false, true), (false, false)] {
        let position = if rule_selected {
            "below baseline"
        } else {
            "at or past baseline"
        };
        let change = match Transition::for_toggle(desired, rule_selected) {
            Transition::MarkIncluded => "add to include",
            Transition::UnmarkExcluded => "remove from exclude",
            Transition::MarkExcluded => "add to exclude",
            Transition::UnmarkIncluded => "remove from include",
        };
        table.add_row(vec![
            Cell::new(if desired { "selected" } else { "unselected" }),
            Cell::new(position),
            Cell::new(change),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn checkbox_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("[x]")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("[ ]")
    }
}

fn id_list_cell(ids: &[String]) -> Cell {
    if ids.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(ids.join(", "))
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
