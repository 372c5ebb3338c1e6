//! Materialization of extracted rows into strongly typed records.
//!
//! A [`RecordSchema`] describes a record type as an ordered list of
//! attributes, one per sheet column. Rows come in three shapes: positional
//! cell values, streaming (reference, text) pairs, and in-memory sheet rows.

mod coerce;

pub use coerce::coerce;
pub use coerce::CoercedValue;
pub use coerce::TargetType;

use crate::error::IngestError;
use crate::error::ResultMessage;
use crate::spreadsheet::column_letters;
use crate::spreadsheet::CellValue;
use crate::spreadsheet::Sheet;
use crate::spreadsheet::Workbook;

/// One attribute of a record type, bound to the sheet column at its position
/// in the schema's attribute list.
pub struct AttributeDescriptor<T> {
    /// Attribute name, used to locate failures in error messages
    name: &'static str,
    /// Type the cell content coerces to before the setter runs
    target: TargetType,
    setter: Box<dyn Fn(&mut T, CoercedValue)>,
}

/// An ordered description of how sheet columns map onto a record type.
pub struct RecordSchema<T> {
    type_name: &'static str,
    constructor: Box<dyn Fn() -> Option<T>>,
    attributes: Vec<AttributeDescriptor<T>>,
}

/// One row of input, in whichever shape the caller extracted it.
pub enum RowData<'a> {
    /// Positional cell values, one per column from column 0 on
    Values(&'a [CellValue]),
    /// Streaming (A1-style reference, display text) pairs in document order
    Keyed(&'a [(String, String)]),
    /// A row of a fully loaded sheet
    Cells { sheet: &'a Sheet, row: usize },
}

impl<T: Default> RecordSchema<T> {
    /// Starts a schema for a type constructible via `Default`.
    pub fn new(type_name: &'static str) -> RecordSchema<T> {
        RecordSchema {
            type_name,
            constructor: Box::new(|| Some(T::default())),
            attributes: Vec::new(),
        }
    }
}

impl<T> RecordSchema<T> {
    /// Starts a schema with an explicit constructor. A constructor returning
    /// `None` surfaces as an instantiation failure at materialization time.
    pub fn with_constructor(
        type_name: &'static str,
        constructor: impl Fn() -> Option<T> + 'static,
    ) -> RecordSchema<T> {
        RecordSchema {
            type_name,
            constructor: Box::new(constructor),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute bound to the next sheet column.
    pub fn attribute(
        mut self,
        name: &'static str,
        target: TargetType,
        setter: impl Fn(&mut T, CoercedValue) + 'static,
    ) -> RecordSchema<T> {
        self.attributes.push(AttributeDescriptor {
            name,
            target,
            setter: Box::new(setter),
        });
        self
    }

    /// Builds one record from one row.
    ///
    /// Attributes whose column is absent or blank keep the freshly
    /// constructed record's value for that field; a row with no usable cell
    /// at all still yields a record. Cell content that cannot coerce to an
    /// attribute's target type fails the whole row.
    pub fn materialize(&self, row: RowData<'_>) -> Result<T, IngestError> {
        let mut record =
            (self.constructor)().ok_or(IngestError::Instantiation(self.type_name))?;

        // Keyed rows advance the pair cursor only on a prefix match: an
        // attribute whose column is absent is skipped and the unmatched pair
        // stays available for the next attribute. When declaration order
        // diverges from key order, fields silently skip rather than erroring.
        let mut cursor = 0usize;
        for (index, attribute) in self.attributes.iter().enumerate() {
            let text = match &row {
                RowData::Values(values) => values.get(index).map(|value| value.to_string()),
                RowData::Keyed(pairs) => {
                    let prefix = column_letters(index);
                    match pairs.get(cursor) {
                        Some((reference, text)) if reference.starts_with(&prefix) => {
                            cursor += 1;
                            Some(text.to_owned())
                        }
                        _ => None,
                    }
                }
                RowData::Cells { sheet, row } => match sheet.get(*row, index) {
                    Some(cell) => Some(cell.resolve(sheet.name())?.to_string()),
                    None => None,
                },
            };

            let text = match text {
                Some(text) => text,
                None => continue,
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let coerced = coerce(text, attribute.target).with_prefix(attribute.name)?;
            (attribute.setter)(&mut record, coerced);
        }
        Ok(record)
    }
}

impl Workbook {
    /// Materializes every row of the first sheet from `first_row` on into
    /// records. Unoccupied rows inside the range yield records holding only
    /// constructor values. Fails when nothing was read at all.
    pub fn parse_records<T>(
        &mut self,
        first_row: usize,
        schema: &RecordSchema<T>,
    ) -> Result<Vec<T>, IngestError> {
        let sheet = self.load_sheet_at(0)?;
        let mut records = Vec::new();
        if let Some(last_row) = sheet.last_row_index() {
            for row in first_row..=last_row {
                records.push(schema.materialize(RowData::Cells { sheet: &sheet, row })?);
            }
        }
        if records.is_empty() {
            return Err(IngestError::NoContent(self.name().to_owned()));
        }
        Ok(records)
    }
}
