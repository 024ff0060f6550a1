use crate::config::ColumnMapping;
use crate::model::{ContainerKey, Lookup, LookupEntry, RowRecord, SHEET_FIELD};

/// Build the (name, container) → datatype table for one container workbook.
///
/// Rows lacking any of the name, container, datatype or `Sheet` columns are
/// skipped. A later row with the same key replaces the earlier entry.
pub fn build_lookup(rows: &[RowRecord], columns: &ColumnMapping, source_file: &str) -> Lookup {
    let mut lookup = Lookup::new(source_file);
    let required = [
        columns.name.as_str(),
        columns.container.as_str(),
        columns.datatype.as_str(),
        SHEET_FIELD,
    ];

    let mut skipped = 0usize;
    for row in rows {
        if !required.iter().all(|field| row.contains(field)) {
            skipped += 1;
            continue;
        }

        let key = ContainerKey::new(row.text(&columns.name), row.text(&columns.container));
        let entry = LookupEntry {
            datatype: row.text(&columns.datatype),
            file: source_file.to_string(),
            sheet: row.text(SHEET_FIELD),
        };
        lookup.entries.insert(key, entry);
    }

    log::debug!(
        "Built lookup for {}: {} entries, {} rows skipped",
        source_file,
        lookup.len(),
        skipped
    );
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn row(sheet: &str, cells: &[(&str, &str)]) -> RowRecord {
        RowRecord::from_sheet_row(sheet, cells.iter().map(|(k, v)| (*k, CellValue::from(*v))))
    }

    #[test]
    fn complete_rows_produce_entries() {
        let rows = vec![
            row("S1", &[("Name", "x"), ("Container", "c1"), ("Datatype", "int")]),
            row("S2", &[("Name", "y"), ("Container", "c1"), ("Datatype", "varchar")]),
        ];
        let lookup = build_lookup(&rows, &ColumnMapping::default(), "A.xlsx");
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.source_file, "A.xlsx");

        let x = lookup.get(&ContainerKey::new("x", "c1")).unwrap();
        assert_eq!(x.datatype, "int");
        assert_eq!(x.file, "A.xlsx");
        assert_eq!(x.sheet, "S1");

        let y = lookup.get(&ContainerKey::new("y", "c1")).unwrap();
        assert_eq!(y.datatype, "varchar");
        assert_eq!(y.sheet, "S2");
    }

    #[test]
    fn rows_missing_columns_are_skipped() {
        let rows = vec![
            row("S1", &[("Name", "x"), ("Container", "c1")]),
            row("S1", &[("Name", "y"), ("Datatype", "int")]),
            row("S1", &[("Container", "c2"), ("Datatype", "int")]),
        ];
        let lookup = build_lookup(&rows, &ColumnMapping::default(), "A.xlsx");
        assert!(lookup.is_empty());
    }

    #[test]
    fn row_without_sheet_tag_is_skipped() {
        let mut untagged = RowRecord::new();
        untagged.set("Name", "x");
        untagged.set("Container", "c1");
        untagged.set("Datatype", "int");
        let lookup = build_lookup(&[untagged], &ColumnMapping::default(), "A.xlsx");
        assert!(lookup.is_empty());
    }

    #[test]
    fn blank_cells_still_contribute() {
        let rows = vec![RowRecord::from_sheet_row(
            "S1",
            vec![
                ("Name", CellValue::from("x")),
                ("Container", CellValue::Empty),
                ("Datatype", CellValue::Empty),
            ],
        )];
        let lookup = build_lookup(&rows, &ColumnMapping::default(), "A.xlsx");
        let entry = lookup.get(&ContainerKey::new("x", "")).unwrap();
        assert_eq!(entry.datatype, "");
    }

    #[test]
    fn later_duplicate_overwrites() {
        let rows = vec![
            row("S1", &[("Name", "x"), ("Container", "c1"), ("Datatype", "int")]),
            row("S2", &[("Name", "x"), ("Container", "c1"), ("Datatype", "bigint")]),
        ];
        let lookup = build_lookup(&rows, &ColumnMapping::default(), "A.xlsx");
        assert_eq!(lookup.len(), 1);
        let entry = lookup.get(&ContainerKey::new("x", "c1")).unwrap();
        assert_eq!(entry.datatype, "bigint");
        assert_eq!(entry.sheet, "S2");
    }

    #[test]
    fn numeric_cells_key_by_text() {
        let rows = vec![RowRecord::from_sheet_row(
            "S1",
            vec![
                ("Name", CellValue::Number(42.0)),
                ("Container", CellValue::from("c1")),
                ("Datatype", CellValue::from("int")),
            ],
        )];
        let lookup = build_lookup(&rows, &ColumnMapping::default(), "A.xlsx");
        assert!(lookup.get(&ContainerKey::new("42", "c1")).is_some());
    }

    #[test]
    fn custom_columns() {
        let columns = ColumnMapping {
            name: "Field".into(),
            container: "Table".into(),
            datatype: "Type".into(),
        };
        let rows = vec![
            row("S1", &[("Field", "x"), ("Table", "t"), ("Type", "date")]),
            row("S1", &[("Name", "y"), ("Container", "t"), ("Datatype", "int")]),
        ];
        let lookup = build_lookup(&rows, &columns, "B.xlsx");
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(&ContainerKey::new("x", "t")).unwrap().datatype, "date");
    }
}
