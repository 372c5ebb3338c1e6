//! Whole-sheet and row-range extraction into ordered cell value sequences.
//!
//! Merged coordinates resolve through their region's anchor cell; everything
//! else goes through the cell resolver, with absent cells coming back Blank.

use crate::error::IngestError;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::Workbook;
use std::collections::HashMap;

impl Sheet {
    /// Extracts the rows in `[start_row, start_row + row_count]`.
    ///
    /// Callers pass `row_count` as a count, but the scan has always included
    /// the `start_row + row_count` endpoint itself; kept for compatibility
    /// with existing callers. Rows holding no cells are skipped entirely,
    /// not emitted as rows of blanks. Every emitted row has uniform width:
    /// one value per column up to the sheet-wide maximum cell index.
    pub fn extract_rows(
        &self,
        start_row: usize,
        row_count: usize,
    ) -> Result<Vec<Vec<CellValue>>, IngestError> {
        let max_col = match self.max_cell_index() {
            Some(max_col) => max_col,
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::new();
        for row in start_row..=start_row + row_count {
            if !self.has_row(row) {
                continue;
            }
            let mut record = Vec::with_capacity(max_col + 1);
            for col in 0..=max_col {
                let value = match self.merged_anchor_value(row, col)? {
                    Some(value) => value,
                    None => match self.get(row, col) {
                        Some(cell) => cell.resolve(&self.name)?,
                        None => CellValue::Blank,
                    },
                };
                record.push(value);
            }
            rows.push(record);
        }
        Ok(rows)
    }

    /// Extracts every row of the sheet.
    pub fn rows(&self) -> Result<Vec<Vec<CellValue>>, IngestError> {
        self.extract_rows(0, self.last_row_index().unwrap_or(0))
    }

    /// Extracts every row from `start_row` on (typically 1, to skip a
    /// header row). Fails when nothing was read.
    pub fn rows_from(&self, start_row: usize) -> Result<Vec<Vec<CellValue>>, IngestError> {
        let rows = self.extract_rows(start_row, self.row_count())?;
        if rows.is_empty() {
            return Err(IngestError::NoContent(self.file_name.to_owned()));
        }
        Ok(rows)
    }

    /// Extracts the first row, typically the header. Fails on an empty sheet.
    pub fn first_row(&self) -> Result<Vec<CellValue>, IngestError> {
        self.extract_rows(0, 0)?
            .into_iter()
            .next()
            .ok_or_else(|| IngestError::NoContent(self.file_name.to_owned()))
    }

    /// Number of rows up to and including the last occupied one.
    pub fn row_count(&self) -> usize {
        self.last_row_index().map(|last| last + 1).unwrap_or(0)
    }

    /// Number of columns in the first row.
    pub fn column_count(&self) -> usize {
        self.row_last_col(0).map(|last| last + 1).unwrap_or(0)
    }
}

impl Workbook {
    /// Extracts every non-empty sheet, keyed by sheet name.
    /// Fails when no sheet holds any content.
    pub fn read_all_rows(&mut self) -> Result<HashMap<String, Vec<Vec<CellValue>>>, IngestError> {
        let mut map = HashMap::new();
        for index in 0..self.sheet_count() {
            let sheet = self.load_sheet_at(index)?;
            let rows = sheet.rows()?;
            if rows.is_empty() {
                continue;
            }
            map.insert(sheet.name().to_owned(), rows);
        }
        if map.is_empty() {
            return Err(IngestError::NoContent(self.name().to_owned()));
        }
        Ok(map)
    }

    /// Extracts every row of the first sheet. Fails when the sheet is empty.
    pub fn read_rows(&mut self) -> Result<Vec<Vec<CellValue>>, IngestError> {
        let sheet = self.load_sheet_at(0)?;
        let rows = sheet.rows()?;
        if rows.is_empty() {
            return Err(IngestError::EmptySheet {
                file: self.name().to_owned(),
                sheet: sheet.name().to_owned(),
            });
        }
        Ok(rows)
    }

    /// Extracts every row of the named sheet. Fails when the name is unknown
    /// or the sheet is empty.
    pub fn read_sheet_rows(&mut self, sheet_name: &str) -> Result<Vec<Vec<CellValue>>, IngestError> {
        let sheet = self.load_sheet(sheet_name)?;
        let rows = sheet.rows()?;
        if rows.is_empty() {
            return Err(IngestError::EmptySheet {
                file: self.name().to_owned(),
                sheet: sheet.name().to_owned(),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::{Cell, CellType};
    use crate::spreadsheet::sheet::MergedRegion;

    fn push_text(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
            formula: None,
        });
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn extract_range_includes_the_endpoint() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        for row in 0..4 {
            push_text(&mut sheet, row, 0, &format!("r{}", row));
        }
        // a count of 2 starting at row 0 still reaches row 2
        let rows = sheet.extract_rows(0, 2).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![text("r2")]);
    }

    #[test]
    fn missing_rows_are_skipped_not_blank() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        push_text(&mut sheet, 0, 0, "first");
        push_text(&mut sheet, 3, 0, "fourth");
        let rows = sheet.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![text("first")]);
        assert_eq!(rows[1], vec![text("fourth")]);
    }

    #[test]
    fn rows_are_padded_to_uniform_width() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        push_text(&mut sheet, 0, 0, "a");
        push_text(&mut sheet, 1, 2, "c");
        let rows = sheet.rows().unwrap();
        assert_eq!(rows[0], vec![text("a"), CellValue::Blank, CellValue::Blank]);
        assert_eq!(rows[1], vec![CellValue::Blank, CellValue::Blank, text("c")]);
    }

    #[test]
    fn merged_cells_inherit_the_anchor_value() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        push_text(&mut sheet, 0, 0, "merged");
        push_text(&mut sheet, 0, 2, "solo");
        push_text(&mut sheet, 1, 2, "next");
        sheet.add_merged_region(MergedRegion::parse("A1:B2").unwrap());
        let rows = sheet.rows().unwrap();
        assert_eq!(rows[0], vec![text("merged"), text("merged"), text("solo")]);
        assert_eq!(rows[1], vec![text("merged"), text("merged"), text("next")]);
    }

    #[test]
    fn rows_from_empty_sheet_fails() {
        let sheet = Sheet::new("test.xlsx", "Sheet1");
        let error = sheet.rows_from(1).unwrap_err();
        assert!(matches!(error, IngestError::NoContent(_)));
        assert!(sheet.first_row().is_err());
    }

    #[test]
    fn rows_from_skips_the_header_rows() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        push_text(&mut sheet, 0, 0, "header");
        push_text(&mut sheet, 1, 0, "data");
        let rows = sheet.rows_from(1).unwrap();
        assert_eq!(rows, vec![vec![text("data")]]);
        assert_eq!(sheet.first_row().unwrap(), vec![text("header")]);
    }

    #[test]
    fn row_and_column_counts() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.column_count(), 0);
        push_text(&mut sheet, 0, 0, "a");
        push_text(&mut sheet, 0, 1, "b");
        push_text(&mut sheet, 4, 0, "e");
        assert_eq!(sheet.row_count(), 5);
        assert_eq!(sheet.column_count(), 2);
    }
}
