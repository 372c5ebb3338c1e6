pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;

pub use reader::SourceReader;
