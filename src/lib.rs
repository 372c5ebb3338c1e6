//! # sheet-ingest
//!
//! Turn spreadsheet workbooks into rows and strongly typed records.
//!
//! Workbooks open from a file path, a byte buffer or any `Read` stream, and
//! their worksheets come out three ways:
//!
//! - **Rows of typed values**: load a sheet and extract rows of
//!   [`CellValue`]s with uniform width, merged regions resolved through
//!   their anchor cell and dates decoded from either serial number epoch.
//! - **Streaming**: a single forward pass over a worksheet pushing formatted
//!   cell text to a [`SheetHandler`](spreadsheet::stream::SheetHandler),
//!   in constant space regardless of sheet size.
//! - **Records**: describe a target type with a [`RecordSchema`] and
//!   materialize each data row into a typed record, with per-attribute
//!   coercion of cell text into integers, floats, decimals or strings.
//!
//! ```no_run
//! use sheet_ingest::Workbook;
//!
//! # fn main() -> Result<(), sheet_ingest::IngestError> {
//! let mut workbook = Workbook::open("report.xlsx")?;
//! for row in workbook.read_rows()? {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod helpers;
pub mod record;
pub mod spreadsheet;

pub use error::IngestError;
pub use error::ResultMessage;
pub use record::coerce;
pub use record::CoercedValue;
pub use record::RecordSchema;
pub use record::RowData;
pub use record::TargetType;
pub use spreadsheet::CellValue;
pub use spreadsheet::MergedRegion;
pub use spreadsheet::Sheet;
pub use spreadsheet::Workbook;
