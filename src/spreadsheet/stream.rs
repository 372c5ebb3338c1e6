//! Streaming worksheet access.
//!
//! One forward pass over a worksheet part, with formatted cell text pushed to
//! a [`SheetHandler`] as parsing goes. Nothing beyond the current cell is
//! held in memory, so arbitrarily large sheets stream in constant space.

use crate::error::IngestError;
use crate::spreadsheet::xlsx::SheetEvent;
use crate::spreadsheet::xlsx::Workbook;

/// Receives worksheet content in document order: a `start_row`, then one
/// `cell` per populated cell of that row, then an `end_row`.
pub trait SheetHandler {
    /// A new row begins. `row` is the 0-based row index.
    fn start_row(&mut self, row: usize);

    /// A row ended; no more cells arrive for it.
    fn end_row(&mut self, row: usize);

    /// One populated cell: its A1-style reference, its value formatted the
    /// way a spreadsheet application would display it, and its comment when
    /// one is attached.
    fn cell(&mut self, reference: &str, formatted: &str, comment: Option<&str>);
}

impl Workbook {
    /// Streams the named worksheet through the handler.
    pub fn stream_sheet(
        &mut self,
        sheet_name: &str,
        handler: &mut dyn SheetHandler,
    ) -> Result<(), IngestError> {
        let (name, path) = self.sheet_entry(sheet_name)?;
        self.stream_part(&name, &path, handler)
    }

    /// Streams the first worksheet through the handler.
    pub fn stream_first_sheet(&mut self, handler: &mut dyn SheetHandler) -> Result<(), IngestError> {
        let (name, path) = self.sheet_entry_at(0)?;
        self.stream_part(&name, &path, handler)
    }

    fn stream_part(
        &mut self,
        sheet_name: &str,
        zip_path: &str,
        handler: &mut dyn SheetHandler,
    ) -> Result<(), IngestError> {
        self.scan_sheet(zip_path, &mut |event| {
            match event {
                SheetEvent::StartRow(row) => handler.start_row(row),
                SheetEvent::EndRow(row) => handler.end_row(row),
                SheetEvent::Cell(cell) => {
                    let formatted = cell.formatted(sheet_name)?;
                    handler.cell(&cell.reference(), &formatted, None);
                }
                SheetEvent::Merge(_) => (),
            }
            Ok(())
        })
    }
}

/// A [`SheetHandler`] that buffers one row at a time and hands each completed
/// row to a sink as (reference, trimmed text) pairs in document order.
pub struct RowCollector<F: FnMut(usize, &[(String, String)])> {
    cells: Vec<(String, String)>,
    sink: F,
}

impl<F: FnMut(usize, &[(String, String)])> RowCollector<F> {
    pub fn new(sink: F) -> RowCollector<F> {
        RowCollector {
            cells: Vec::new(),
            sink,
        }
    }
}

impl<F: FnMut(usize, &[(String, String)])> SheetHandler for RowCollector<F> {
    fn start_row(&mut self, _row: usize) {
        self.cells.clear();
    }

    fn end_row(&mut self, row: usize) {
        (self.sink)(row, &self.cells);
    }

    fn cell(&mut self, reference: &str, formatted: &str, _comment: Option<&str>) {
        self.cells.push((reference.to_owned(), formatted.trim().to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::fixtures;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SheetHandler for Recorder {
        fn start_row(&mut self, row: usize) {
            self.events.push(format!("start {}", row));
        }

        fn end_row(&mut self, row: usize) {
            self.events.push(format!("end {}", row));
        }

        fn cell(&mut self, reference: &str, formatted: &str, _comment: Option<&str>) {
            self.events.push(format!("{}={}", reference, formatted));
        }
    }

    #[test]
    fn rows_arrive_in_order_with_paired_boundaries() {
        let bytes = fixtures::simple_workbook(&[&["a", "b"], &["c"], &["d"]]);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let mut recorder = Recorder::default();
        workbook.stream_first_sheet(&mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec![
                "start 0", "A1=a", "B1=b", "end 0",
                "start 1", "A2=c", "end 1",
                "start 2", "A3=d", "end 2",
            ]
        );
    }

    #[test]
    fn formatted_text_matches_display_conventions() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1">
                <c r="A1"><v>12.5</v></c>
                <c r="B1" t="b"><v>1</v></c>
                <c r="C1" s="1"><v>44927</v></c>
            </row>
        </sheetData></worksheet>"#;
        let styles = r#"<styleSheet>
            <cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14"/></cellXfs>
        </styleSheet>"#;
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, Some(styles));
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let mut recorder = Recorder::default();
        workbook.stream_sheet("Sheet1", &mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec!["start 0", "A1=12.5", "B1=true", "C1=2023-01-01", "end 0"]
        );
    }

    #[test]
    fn row_collector_hands_out_keyed_rows() {
        let bytes = fixtures::simple_workbook(&[&["name", "url"], &["a.txt", "http://a"]]);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let mut rows: Vec<(usize, Vec<(String, String)>)> = Vec::new();
        let mut collector = RowCollector::new(|row, cells: &[(String, String)]| {
            rows.push((row, cells.to_vec()));
        });
        workbook.stream_first_sheet(&mut collector).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 0);
        assert_eq!(
            rows[1].1,
            vec![
                ("A2".to_string(), "a.txt".to_string()),
                ("B2".to_string(), "http://a".to_string()),
            ]
        );
    }

    #[test]
    fn streaming_an_unknown_sheet_fails() {
        let bytes = fixtures::simple_workbook(&[&["a"]]);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let mut recorder = Recorder::default();
        assert!(workbook.stream_sheet("Missing", &mut recorder).is_err());
        assert!(recorder.events.is_empty());
    }
}
