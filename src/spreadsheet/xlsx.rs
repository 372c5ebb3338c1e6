use crate::error::IngestError;
use crate::helpers::SourceReader;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::MergedRegion;
use crate::spreadsheet::sheet::Sheet;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufReader;
use std::io::Read;
use zip::read::ZipFile;
use zip::ZipArchive;

// XML tag names of the workbook parts
const TAG_RELATIONSHIP: &[u8] = b"Relationship";          // Part relationship
const TAG_CUSTOM_FORMATS: QName = QName(b"numFmts");      // Custom number formats container
const TAG_CUSTOM_FORMAT: QName = QName(b"numFmt");        // Individual custom number format
const TAG_FORMAT_INDEXES: QName = QName(b"cellXfs");      // Cell format indexes container
const TAG_FORMAT_INDEX: QName = QName(b"xf");             // Individual cell format index
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");       // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");           // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                      // Text content within strings
const TAG_WORKBOOK_PROPERTIES: QName = QName(b"workbookPr"); // Workbook properties
const TAG_SHEET: QName = QName(b"sheet");                 // Worksheet definition
const TAG_ROW: QName = QName(b"row");                     // Row in worksheet
const TAG_CELL: QName = QName(b"c");                      // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");            // Inline string value
const TAG_VALUE: QName = QName(b"v");                     // Cell value content
const TAG_FORMULA: QName = QName(b"f");                   // Cell formula expression
const TAG_MERGE_CELL: QName = QName(b"mergeCell");        // Merged cell region

/// One event of a single forward pass over a worksheet part.
pub(crate) enum SheetEvent {
    StartRow(usize),
    Cell(Cell),
    EndRow(usize),
    Merge(MergedRegion),
}

/// An open spreadsheet workbook.
///
/// Owns the container exclusively for its lifetime; dropping the workbook
/// releases the underlying byte source. Sheets load on demand, either fully
/// in memory ([`Workbook::load_sheet`]) or as a streaming pass
/// ([`Workbook::stream_sheet`](crate::spreadsheet::stream)).
#[derive(Debug)]
pub struct Workbook {
    /// Source name, kept for error messages
    name: String,
    /// ZIP archive holding the workbook parts
    zip: ZipArchive<SourceReader>,
    /// Cell types per style index, derived from the number formats
    number_formats: Vec<CellType>,
    /// Fully loaded shared string table
    shared_strings: Vec<String>,
    /// Worksheets as (name, zip path) pairs, in workbook order
    sheets: Vec<(String, String)>,
}

impl Workbook {
    /// Opens a workbook from a file path.
    pub fn open(path: &str) -> Result<Workbook, IngestError> {
        Workbook::from_source(path, SourceReader::open_path(path)?)
    }

    /// Opens a workbook from an owned byte buffer.
    /// `name` identifies the source in error messages.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Workbook, IngestError> {
        Workbook::from_source(name, SourceReader::from_bytes(bytes))
    }

    /// Opens a workbook by draining an arbitrary stream, e.g. an upload.
    pub fn from_stream<R: Read>(name: &str, stream: &mut R) -> Result<Workbook, IngestError> {
        Workbook::from_source(name, SourceReader::from_stream(name, stream)?)
    }

    fn from_source(name: &str, reader: SourceReader) -> Result<Workbook, IngestError> {
        let mut zip = ZipArchive::new(reader)?;
        let (sheets, is_1904) = load_workbook_sheets(&mut zip)?;
        if sheets.is_empty() {
            return Err(IngestError::NoContent(name.to_owned()));
        }
        let number_formats = load_number_formats(&mut zip, is_1904)?;
        let shared_strings = load_shared_strings(&mut zip)?;
        Ok(Workbook {
            name: name.to_owned(),
            zip,
            number_formats,
            shared_strings,
            sheets,
        })
    }

    /// Source name this workbook was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of all worksheets, in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Name of the worksheet at the given index.
    pub fn sheet_name_at(&self, index: usize) -> Option<&str> {
        self.sheets.get(index).map(|(name, _)| name.as_str())
    }

    /// Number of worksheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Loads the named worksheet fully into memory.
    pub fn load_sheet(&mut self, sheet_name: &str) -> Result<Sheet, IngestError> {
        let (name, path) = self.sheet_entry(sheet_name)?;
        self.parse_sheet(&name, &path)
    }

    /// Loads the worksheet at the given index fully into memory.
    pub fn load_sheet_at(&mut self, index: usize) -> Result<Sheet, IngestError> {
        let (name, path) = self.sheet_entry_at(index)?;
        self.parse_sheet(&name, &path)
    }

    pub(crate) fn sheet_entry(&self, sheet_name: &str) -> Result<(String, String), IngestError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                file: self.name.to_owned(),
                sheet: sheet_name.to_owned(),
            })
    }

    pub(crate) fn sheet_entry_at(&self, index: usize) -> Result<(String, String), IngestError> {
        self.sheets
            .get(index)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                file: self.name.to_owned(),
                sheet: format!("#{}", index),
            })
    }

    fn parse_sheet(&mut self, sheet_name: &str, zip_path: &str) -> Result<Sheet, IngestError> {
        let file_name = self.name.to_owned();
        let mut sheet = Sheet::new(&file_name, sheet_name);
        self.scan_sheet(zip_path, &mut |event| {
            match event {
                SheetEvent::Cell(cell) => sheet.push(cell),
                SheetEvent::Merge(region) => sheet.add_merged_region(region),
                SheetEvent::StartRow(_) | SheetEvent::EndRow(_) => (),
            }
            Ok(())
        })?;
        Ok(sheet)
    }

    /// Drives a single forward pass over one worksheet part, emitting row
    /// boundaries, populated cells and merged regions in document order.
    /// Only the cell currently being parsed is held in memory.
    pub(crate) fn scan_sheet(
        &mut self,
        zip_path: &str,
        on_event: &mut dyn FnMut(SheetEvent) -> Result<(), IngestError>,
    ) -> Result<(), IngestError> {
        let mut reader = self
            .zip
            .xml_reader(zip_path)?
            .ok_or_else(|| IngestError::MissingPart(zip_path.to_owned()))?;

        let mut current_row = 0usize;
        let mut next_row = 0usize;
        let mut col_count = 0usize;
        let mut row = 0usize;
        let mut col = 0usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        let mut formula = None::<String>;
        let mut in_cell = false;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_ROW => {
                current_row = event.get_attribute_value("r")?
                    .and_then(|r| r.parse::<usize>().ok())
                    .and_then(|r| r.checked_sub(1))
                    .unwrap_or(next_row);
                next_row = current_row + 1;
                col_count = 0;
                on_event(SheetEvent::StartRow(current_row))?;
            }
            Event::End(event) if event.name() == TAG_ROW => {
                on_event(SheetEvent::EndRow(current_row))?;
            }
            Event::Start(event) if event.name() == TAG_CELL => {
                (row, col) = event.get_attribute_value("r")?
                    .and_then(|reference| reference_to_index(&reference))
                    .unwrap_or((current_row, col_count));
                col_count += 1;
                kind = match event.get_attribute_value("t")? {
                    None => CellType::Number,
                    Some(t) => match t.as_ref() {
                        "inlineStr" | "str" => CellType::InlineString,
                        "s" => CellType::SharedString,
                        "d" => CellType::IsoDateTime,
                        "b" => CellType::Boolean,
                        "e" => CellType::Error,
                        "n" => CellType::Number,
                        other => {
                            log::warn!(
                                "unrecognized cell type '{}' at {}; treating as empty",
                                other,
                                index_to_reference(row, col),
                            );
                            CellType::Empty
                        }
                    },
                };
                if let Some(format_id) = event.get_attribute_value("s")? {
                    if kind == CellType::Number && !format_id.is_empty() {
                        let index = format_id.parse::<usize>()?;
                        kind = self.number_formats.get(index).copied().unwrap_or(CellType::Number);
                    }
                }
                value.clear();
                formula = None;
                in_cell = true;
            }
            Event::Start(event) if in_cell && event.name() == TAG_INLINE_STRING => {
                value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
            }
            Event::Start(event) if in_cell && event.name() == TAG_VALUE => {
                value = read_string_value(&mut reader, TAG_VALUE, true)?;
            }
            Event::Start(event) if in_cell && event.name() == TAG_FORMULA => {
                formula = Some(read_string_value(&mut reader, TAG_FORMULA, true)?);
            }
            Event::End(event) if in_cell && event.name() == TAG_CELL => {
                in_cell = false;
                if kind != CellType::Empty && (!value.is_empty() || formula.is_some()) {
                    if kind == CellType::SharedString {
                        let index = value.parse::<usize>()?;
                        value = match self.shared_strings.get(index) {
                            Some(string) => string.to_owned(),
                            None => {
                                log::warn!(
                                    "shared string index {} out of range at {}",
                                    index,
                                    index_to_reference(row, col),
                                );
                                String::new()
                            }
                        };
                    }
                    on_event(SheetEvent::Cell(Cell {
                        row,
                        col,
                        kind,
                        value: std::mem::take(&mut value),
                        formula: formula.take(),
                    }))?;
                }
            }
            Event::Start(event) if event.name() == TAG_MERGE_CELL => {
                if let Some(range) = event.get_attribute_value("ref")? {
                    if let Some(region) = MergedRegion::parse(&range) {
                        on_event(SheetEvent::Merge(region))?;
                    }
                }
            }
        });
        Ok(())
    }
}

/// Loads the worksheet list and date system from `xl/workbook.xml`,
/// resolving each sheet's relationship id to its part path.
fn load_workbook_sheets(
    zip: &mut ZipArchive<SourceReader>,
) -> Result<(Vec<(String, String)>, bool), IngestError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip
        .xml_reader("xl/workbook.xml")?
        .ok_or_else(|| IngestError::MissingPart("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut is_1904 = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&id.to_string()) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.name() == TAG_WORKBOOK_PROPERTIES => {
            is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value.eq("1") || value.eq("true"))
                .unwrap_or(false);
        }
    });
    Ok((sheets, is_1904))
}

/// Loads worksheet relationships (relationship id to part path).
fn load_relationships(
    zip: &mut ZipArchive<SourceReader>,
    path: &str,
) -> Result<HashMap<String, String>, IngestError> {
    let mut reader = zip
        .xml_reader(path)?
        .ok_or_else(|| IngestError::MissingPart(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships matter here
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Loads number formats from `xl/styles.xml` and maps each cell style index
/// to the cell type its format implies.
fn load_number_formats(
    zip: &mut ZipArchive<SourceReader>,
    is_1904: bool,
) -> Result<Vec<CellType>, IngestError> {
    let mut reader = match zip.xml_reader("xl/styles.xml")? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut has_custom_formats = false;
    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, CellType>::new();

    let mut has_format_indexes = false;
    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if !custom_formats_context && event.name() == TAG_CUSTOM_FORMATS => {
            has_custom_formats = true;
            custom_formats_context = true;
        }
        Event::End(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMATS => {
            custom_formats_context = false;
            if has_custom_formats && has_format_indexes {
                break;
            }
        }
        Event::Start(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                let style = CellType::parse_custom_number_format(&format, is_1904);
                custom_formats.insert(id.to_string(), style);
            }
        }

        Event::Start(event) if !format_indexes_context && event.name() == TAG_FORMAT_INDEXES => {
            has_format_indexes = true;
            format_indexes_context = true;
        }
        Event::End(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEXES => {
            format_indexes_context = false;
            if has_custom_formats && has_format_indexes {
                break;
            }
        }
        Event::Start(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEX => {
            if let Some(id) = event.get_attribute_value("numFmtId")? {
                format_indexes.push(id.to_string());
            }
        }
    });

    Ok(format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .or_else(|| CellType::parse_builtin_number_format_id(id, is_1904))
                .unwrap_or(CellType::Number)
        })
        .collect())
}

/// Loads the full shared string table from `xl/sharedStrings.xml`.
fn load_shared_strings(zip: &mut ZipArchive<SourceReader>) -> Result<Vec<String>, IngestError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };

    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
            shared_strings.push(string);
        }
    });
    Ok(shared_strings)
}

/// Reads string content up to `end_tag`, skipping phonetic annotations and
/// handling text nodes, CDATA sections and entity references.
fn read_string_value(
    reader: &mut XmlReader<BufReader<ZipFile<'_, SourceReader>>>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, IngestError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_bytes_text(&event)?,
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}

/// Normalizes a relationship target to a path within the package.
fn to_zip_path(path: Cow<'_, str>) -> String {
    if path.starts_with("/xl/") {
        path[1..].to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::fixtures;
    use crate::spreadsheet::CellValue;

    #[test]
    fn open_reads_sheet_list() {
        let bytes = fixtures::simple_workbook(&[&["a", "b"], &["c", "d"]]);
        let workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Sheet1".to_string()]);
        assert_eq!(workbook.sheet_name_at(0), Some("Sheet1"));
        assert_eq!(workbook.sheet_name_at(1), None);
        assert_eq!(workbook.sheet_count(), 1);
    }

    #[test]
    fn load_sheet_reads_inline_and_numeric_cells() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1">
                <c r="A1" t="inlineStr"><is><t>title</t></is></c>
                <c r="B1"><v>12.5</v></c>
                <c r="C1" t="b"><v>1</v></c>
            </row>
        </sheetData></worksheet>"#;
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, None);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let sheet = workbook.load_sheet("Sheet1").unwrap();
        assert_eq!(
            sheet.rows().unwrap(),
            vec![vec![
                CellValue::Text("title".to_string()),
                CellValue::Number(12.5),
                CellValue::Boolean(true),
            ]]
        );
    }

    #[test]
    fn load_sheet_resolves_shared_strings() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>1</v></c><c r="B1" t="s"><v>0</v></c></row>
        </sheetData></worksheet>"#;
        let shared = "<sst><si><t>zero</t></si><si><t>one</t></si></sst>";
        let bytes = fixtures::workbook_with_sheet(sheet_xml, Some(shared), None);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let sheet = workbook.load_sheet("Sheet1").unwrap();
        assert_eq!(
            sheet.rows().unwrap(),
            vec![vec![
                CellValue::Text("one".to_string()),
                CellValue::Text("zero".to_string()),
            ]]
        );
    }

    #[test]
    fn load_sheet_applies_date_number_formats() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" s="1"><v>44927</v></c><c r="B1" s="0"><v>44927</v></c></row>
        </sheetData></worksheet>"#;
        let styles = r#"<styleSheet>
            <numFmts count="1"><numFmt numFmtId="164" formatCode="yyyy-mm-dd"/></numFmts>
            <cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="164"/></cellXfs>
        </styleSheet>"#;
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, Some(styles));
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let sheet = workbook.load_sheet("Sheet1").unwrap();
        let rows = sheet.rows().unwrap();
        match &rows[0][0] {
            CellValue::Date(datetime) => {
                assert_eq!(datetime.format("%Y-%m-%d").to_string(), "2023-01-01")
            }
            other => panic!("expected a date, got {:?}", other),
        }
        assert_eq!(rows[0][1], CellValue::Number(44927.0));
    }

    #[test]
    fn load_sheet_keeps_formula_text() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1"><f>SUM(B1:B9)</f><v>45</v></c></row>
        </sheetData></worksheet>"#;
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, None);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let sheet = workbook.load_sheet("Sheet1").unwrap();
        assert_eq!(
            sheet.rows().unwrap(),
            vec![vec![CellValue::Formula("SUM(B1:B9)".to_string())]]
        );
    }

    #[test]
    fn load_sheet_collects_merged_regions() {
        let sheet_xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="inlineStr"><is><t>anchor</t></is></c></row>
            <row r="2"><c r="C2" t="inlineStr"><is><t>other</t></is></c></row>
        </sheetData>
        <mergeCells count="1"><mergeCell ref="A1:B2"/></mergeCells></worksheet>"#;
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, None);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let sheet = workbook.load_sheet("Sheet1").unwrap();
        assert_eq!(sheet.merged_regions().len(), 1);
        let rows = sheet.rows().unwrap();
        assert_eq!(rows[1][0], CellValue::Text("anchor".to_string()));
        assert_eq!(rows[1][1], CellValue::Text("anchor".to_string()));
        assert_eq!(rows[1][2], CellValue::Text("other".to_string()));
    }

    #[test]
    fn unknown_sheet_name_fails() {
        let bytes = fixtures::simple_workbook(&[&["a"]]);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let error = workbook.load_sheet("NoSuchSheet").unwrap_err();
        assert!(matches!(error, IngestError::SheetNotFound { .. }));
        assert!(error.to_string().contains("NoSuchSheet"));
    }

    #[test]
    fn workbook_without_sheets_fails_to_open() {
        let bytes = fixtures::package(&[
            ("xl/workbook.xml", "<workbook><sheets></sheets></workbook>"),
            (
                "xl/_rels/workbook.xml.rels",
                "<Relationships></Relationships>",
            ),
        ]);
        let error = Workbook::from_bytes("test.xlsx", bytes).unwrap_err();
        assert!(matches!(error, IngestError::NoContent(_)));
    }

    #[test]
    fn read_all_rows_maps_sheets_by_name() {
        let bytes = fixtures::simple_workbook(&[&["x", "y"]]);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let map = workbook.read_all_rows().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Sheet1"));
    }

    #[test]
    fn read_rows_of_empty_sheet_fails() {
        let sheet_xml = "<worksheet><sheetData></sheetData></worksheet>";
        let bytes = fixtures::workbook_with_sheet(sheet_xml, None, None);
        let mut workbook = Workbook::from_bytes("test.xlsx", bytes).unwrap();
        let error = workbook.read_rows().unwrap_err();
        assert!(matches!(error, IngestError::EmptySheet { .. }));
        let error = workbook.read_all_rows().unwrap_err();
        assert!(matches!(error, IngestError::NoContent(_)));
    }
}
