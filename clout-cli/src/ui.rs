use comfy_table::{presets, Cell, ContentArrangement, Table};

/// Key-value info card (address, decoded key, token claims).
/// No header, no outer borders -- just clean aligned rows.
pub fn info_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Plain cell.
pub fn cell(content: impl ToString) -> Cell {
    Cell::new(content)
}

/// Print table with 2-space left indent to match the rest of the output.
pub fn print_table(table: &Table) {
    for line in table.lines() {
        println!("  {}", line);
    }
}
