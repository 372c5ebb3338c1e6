use crate::error::IngestError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::reference::reference_to_index;
use std::collections::HashMap;

/// Rectangular bounds of a merged cell region, all 0-based and inclusive.
///
/// Only the anchor cell (first_row, first_col) carries content; every other
/// coordinate in the region defers to the anchor's resolved value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergedRegion {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl MergedRegion {
    /// Whether a coordinate falls inside the region.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.first_row <= row && row <= self.last_row && self.first_col <= col && col <= self.last_col
    }

    /// Parses an "A1:B2" range reference.
    pub(crate) fn parse(range: &str) -> Option<MergedRegion> {
        let (start, end) = range.split_once(':')?;
        let (first_row, first_col) = reference_to_index(start)?;
        let (last_row, last_col) = reference_to_index(end)?;
        Some(MergedRegion {
            first_row,
            last_row,
            first_col,
            last_col,
        })
    }
}

/// An in-memory worksheet: sparse cell storage with a coordinate index,
/// plus the sheet's merged region list.
#[derive(Debug)]
pub struct Sheet {
    /// Source file name, kept for error messages
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// All cells, in document order
    cells: Vec<Cell>,
    /// Index from (row, column) to position in the cells vector
    indexes: HashMap<(usize, usize), usize>,
    /// Last occupied column per occupied row
    row_last_cols: HashMap<usize, usize>,
    /// Merged cell regions declared by the sheet
    merged_regions: Vec<MergedRegion>,
    /// Highest occupied row index
    last_row: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str) -> Sheet {
        Sheet {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            indexes: HashMap::new(),
            row_last_cols: HashMap::new(),
            merged_regions: Vec::new(),
            last_row: None,
        }
    }

    /// Adds a cell, updating the coordinate index and row bounds.
    pub(crate) fn push(&mut self, cell: Cell) {
        let row = cell.row;
        let col = cell.col;
        self.indexes.insert((row, col), self.cells.len());
        let last_col = self.row_last_cols.entry(row).or_insert(col);
        if *last_col < col {
            *last_col = col;
        }
        if self.last_row.map(|last| last < row).unwrap_or(true) {
            self.last_row = Some(row);
        }
        self.cells.push(cell);
    }

    pub(crate) fn add_merged_region(&mut self, region: MergedRegion) {
        self.merged_regions.push(region);
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the cell at a coordinate, if one is stored there.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.indexes
            .get(&(row, col))
            .and_then(|index| self.cells.get(*index))
    }

    /// Whether any cell was stored on the given row.
    pub fn has_row(&self, row: usize) -> bool {
        self.row_last_cols.contains_key(&row)
    }

    /// Highest occupied row index, or `None` for an empty sheet.
    pub fn last_row_index(&self) -> Option<usize> {
        self.last_row
    }

    /// Last occupied column index of one row, if the row holds any cell.
    pub(crate) fn row_last_col(&self, row: usize) -> Option<usize> {
        self.row_last_cols.get(&row).copied()
    }

    /// True if the sheet holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The widest occupied column index across all rows, or `None` for an
    /// empty sheet. Computed over the whole sheet so every extracted row
    /// gets the same width.
    pub fn max_cell_index(&self) -> Option<usize> {
        self.row_last_cols.values().copied().max()
    }

    /// Merged regions declared by the sheet.
    pub fn merged_regions(&self) -> &[MergedRegion] {
        &self.merged_regions
    }

    /// Whether a coordinate lies inside any merged region.
    ///
    /// Linear scan over the merge list: real-world sheets carry few merges,
    /// so full extraction stays O(rows * cols * merges) at worst.
    pub fn is_merged(&self, row: usize, col: usize) -> bool {
        self.merged_regions
            .iter()
            .any(|region| region.contains(row, col))
    }

    /// Resolved value of the anchor cell of the merged region covering the
    /// coordinate. `Ok(None)` when the coordinate is not merged; a merged
    /// coordinate whose anchor holds no cell resolves Blank.
    pub fn merged_anchor_value(&self, row: usize, col: usize) -> Result<Option<CellValue>, IngestError> {
        for region in &self.merged_regions {
            if region.contains(row, col) {
                let value = match self.get(region.first_row, region.first_col) {
                    Some(anchor) => anchor.resolve(&self.name)?,
                    None => CellValue::Blank,
                };
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    pub(crate) fn text_cell(row: usize, col: usize, value: &str) -> Cell {
        Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
            formula: None,
        }
    }

    fn sample_sheet() -> Sheet {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        sheet.push(text_cell(0, 0, "anchor"));
        sheet.push(text_cell(0, 3, "wide"));
        sheet.push(text_cell(2, 1, "below"));
        sheet.add_merged_region(MergedRegion::parse("A1:B2").unwrap());
        sheet
    }

    #[test]
    fn merged_region_parse() {
        let region = MergedRegion::parse("B2:D5").unwrap();
        assert_eq!(
            region,
            MergedRegion {
                first_row: 1,
                last_row: 4,
                first_col: 1,
                last_col: 3,
            }
        );
        assert!(MergedRegion::parse("B2").is_none());
        assert!(MergedRegion::parse("2:B").is_none());
    }

    #[test]
    fn sheet_bounds_track_pushed_cells() {
        let sheet = sample_sheet();
        assert_eq!(sheet.last_row_index(), Some(2));
        assert_eq!(sheet.max_cell_index(), Some(3));
        assert!(sheet.has_row(0));
        assert!(!sheet.has_row(1));
        assert!(sheet.has_row(2));
        assert!(sheet.get(0, 3).is_some());
        assert!(sheet.get(1, 1).is_none());
    }

    #[test]
    fn empty_sheet_has_no_bounds() {
        let sheet = Sheet::new("test.xlsx", "Sheet1");
        assert!(sheet.is_empty());
        assert_eq!(sheet.last_row_index(), None);
        assert_eq!(sheet.max_cell_index(), None);
    }

    #[test]
    fn every_merged_coordinate_resolves_to_the_anchor() {
        let sheet = sample_sheet();
        let anchor = sheet.merged_anchor_value(0, 0).unwrap().unwrap();
        for row in 0..=1 {
            for col in 0..=1 {
                assert!(sheet.is_merged(row, col));
                let value = sheet.merged_anchor_value(row, col).unwrap().unwrap();
                assert_eq!(value, anchor);
            }
        }
        assert_eq!(anchor, CellValue::Text("anchor".to_string()));
        assert!(!sheet.is_merged(0, 2));
        assert_eq!(sheet.merged_anchor_value(0, 2).unwrap(), None);
    }

    #[test]
    fn merged_region_with_empty_anchor_resolves_blank() {
        let mut sheet = Sheet::new("test.xlsx", "Sheet1");
        sheet.push(text_cell(5, 5, "far away"));
        sheet.add_merged_region(MergedRegion::parse("A1:B2").unwrap());
        assert_eq!(
            sheet.merged_anchor_value(1, 1).unwrap(),
            Some(CellValue::Blank)
        );
    }
}
