//! Terminal rendering of hydrated records and schemas.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hydrate_core::{DynamicRecord, RecordSpec, TypeSchema, Value};

/// One row per record, one column per configured field in declaration order.
pub fn records_table(spec: &RecordSpec, records: &[DynamicRecord]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(spec.fields.iter().map(|field| header_cell(&field.name)));
    table.set_header(header);
    apply_records_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (idx, record) in records.iter().enumerate() {
        let mut row = vec![dim_cell(idx + 1)];
        row.extend(
            spec.fields
                .iter()
                .map(|field| value_cell(record.get(&field.name))),
        );
        table.add_row(row);
    }
    table
}

/// Every accepted column and the field it binds to.
pub fn schema_table(schema: &TypeSchema<DynamicRecord>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Type"),
    ]);
    apply_schema_table_style(&mut table);
    for (column, field) in schema.accepted_columns() {
        let field_cell = if column == field.name() {
            Cell::new(field.name())
        } else {
            Cell::new(field.name()).fg(Color::Blue)
        };
        table.add_row(vec![
            Cell::new(column).add_attribute(Attribute::Bold),
            field_cell,
            dim_cell(field.value_type()),
        ]);
    }
    table
}

/// Records as JSON, one object per line.
pub fn json_lines(records: &[DynamicRecord]) -> serde_json::Result<String> {
    let lines = records
        .iter()
        .map(serde_json::to_string)
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn apply_records_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_schema_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        Some(value @ (Value::Integer(_) | Value::Float(_))) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
