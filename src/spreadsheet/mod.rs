//! Workbook loading and worksheet access.
//!
//! [`Workbook`] opens an OOXML package from a path, a byte buffer or a
//! stream, and hands out worksheets either fully loaded ([`Sheet`]) or as a
//! single streaming pass (see [`stream`]).

mod cell;
mod reference;
mod rows;
mod sheet;
pub mod stream;
mod xlsx;

pub use cell::Cell;
pub use cell::CellValue;
pub use reference::column_letters;
pub use reference::index_to_reference;
pub use reference::reference_to_index;
pub use sheet::MergedRegion;
pub use sheet::Sheet;
pub use xlsx::Workbook;
