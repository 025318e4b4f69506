use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ChecklistError;
use crate::workbook::style::{Style, StyleTable};
use crate::workbook::xml::{XmlWriter, NS_MAIN, NS_REL};

const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SHARED_STRINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

/// Column letters for a zero-based column index (0 -> A, 26 -> AA).
pub fn column_name(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// A1-style reference for a zero-based row and column.
pub fn cell_ref(row: u32, col: u16) -> String {
    format!("{}{}", column_name(col), row + 1)
}

/// Rectangular block of cells, zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        CellRange {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// A single column from `first_row` to `last_row`.
    pub fn column(col: u16, first_row: u32, last_row: u32) -> Self {
        Self::new(first_row, col, last_row, col)
    }

    fn absolute(&self) -> String {
        format!(
            "${}${}:${}${}",
            column_name(self.first_col),
            self.first_row + 1,
            column_name(self.last_col),
            self.last_row + 1
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = cell_ref(self.first_row, self.first_col);
        if self.first_row == self.last_row && self.first_col == self.last_col {
            write!(f, "{start}")
        } else {
            write!(f, "{start}:{}", cell_ref(self.last_row, self.last_col))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub value: CellValue,
    pub style: Style,
}

/// Allowed input for a block of cells.
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// Drop-down of fixed choices.
    List(Vec<String>),
    /// Dates strictly after the given day.
    DateAfter { year: u16, month: u8, day: u8 },
}

#[derive(Debug, Clone)]
pub struct DataValidation {
    pub rule: ValidationRule,
    pub ranges: Vec<CellRange>,
    pub allow_blank: bool,
}

impl DataValidation {
    pub fn list<S: AsRef<str>>(options: &[S], ranges: Vec<CellRange>) -> Self {
        DataValidation {
            rule: ValidationRule::List(options.iter().map(|o| o.as_ref().to_string()).collect()),
            ranges,
            allow_blank: true,
        }
    }

    pub fn date_after(year: u16, month: u8, day: u8, ranges: Vec<CellRange>) -> Self {
        DataValidation {
            rule: ValidationRule::DateAfter { year, month, day },
            ranges,
            allow_blank: true,
        }
    }
}

/// Comparison used by a `cellIs` conditional format.
#[derive(Debug, Clone, PartialEq)]
pub enum CellRule {
    Equal(String),
    GreaterThanOrEqual(String),
    LessThan(String),
    Between(String, String),
}

impl CellRule {
    /// Compare against a literal string (quoted in the formula).
    pub fn equal_text(text: &str) -> Self {
        CellRule::Equal(format!("\"{}\"", text.replace('"', "\"\"")))
    }

    fn operator(&self) -> &'static str {
        match self {
            CellRule::Equal(_) => "equal",
            CellRule::GreaterThanOrEqual(_) => "greaterThanOrEqual",
            CellRule::LessThan(_) => "lessThan",
            CellRule::Between(_, _) => "between",
        }
    }

    fn formulas(&self) -> Vec<&str> {
        match self {
            CellRule::Equal(f) | CellRule::GreaterThanOrEqual(f) | CellRule::LessThan(f) => {
                vec![f.as_str()]
            }
            CellRule::Between(low, high) => vec![low.as_str(), high.as_str()],
        }
    }
}

/// Background fill applied when a cell in `range` satisfies `rule`.
#[derive(Debug, Clone)]
pub struct ConditionalFormat {
    pub range: CellRange,
    pub rule: CellRule,
    pub fill: String,
}

/// One sheet of the workbook. Rows and columns are zero-based.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u16, Cell>>,
    col_widths: BTreeMap<u16, f64>,
    row_heights: BTreeMap<u32, f64>,
    merges: Vec<CellRange>,
    freeze: Option<(u32, u16)>,
    autofilter: Option<CellRange>,
    show_gridlines: bool,
    validations: Vec<DataValidation>,
    conditional_formats: Vec<ConditionalFormat>,
}

impl Worksheet {
    pub fn new(name: &str) -> Self {
        Worksheet {
            name: name.to_string(),
            rows: BTreeMap::new(),
            col_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            merges: Vec::new(),
            freeze: None,
            autofilter: None,
            show_gridlines: true,
            validations: Vec::new(),
            conditional_formats: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write_string(&mut self, row: u32, col: u16, text: &str, style: &Style) {
        self.put(row, col, CellValue::Text(text.to_string()), style);
    }

    pub fn write_number(&mut self, row: u32, col: u16, number: f64, style: &Style) {
        self.put(row, col, CellValue::Number(number), style);
    }

    /// Style a cell without giving it a value.
    pub fn write_blank(&mut self, row: u32, col: u16, style: &Style) {
        self.put(row, col, CellValue::Blank, style);
    }

    fn put(&mut self, row: u32, col: u16, value: CellValue, style: &Style) {
        self.rows.entry(row).or_default().insert(
            col,
            Cell {
                value,
                style: style.clone(),
            },
        );
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|cells| cells.get(&col))
    }

    /// Highest row index holding a cell, if any.
    pub fn last_row(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.col_widths.insert(col, width);
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn merge_range(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    /// Freeze everything above `row` and left of `col`.
    pub fn freeze_panes(&mut self, row: u32, col: u16) {
        self.freeze = Some((row, col));
    }

    pub fn autofilter(&mut self, range: CellRange) {
        self.autofilter = Some(range);
    }

    pub fn hide_gridlines(&mut self) {
        self.show_gridlines = false;
    }

    pub fn add_data_validation(&mut self, validation: DataValidation) {
        self.validations.push(validation);
    }

    pub fn add_conditional_format(&mut self, format: ConditionalFormat) {
        self.conditional_formats.push(format);
    }

    pub fn data_validations(&self) -> &[DataValidation] {
        &self.validations
    }

    pub fn conditional_formats(&self) -> &[ConditionalFormat] {
        &self.conditional_formats
    }

    fn dimension(&self) -> CellRange {
        let mut range = CellRange::new(0, 0, 0, 0);
        let mut first = true;
        for (&row, cells) in &self.rows {
            for &col in cells.keys() {
                if first {
                    range = CellRange::new(row, col, row, col);
                    first = false;
                } else {
                    range.first_row = range.first_row.min(row);
                    range.last_row = range.last_row.max(row);
                    range.first_col = range.first_col.min(col);
                    range.last_col = range.last_col.max(col);
                }
            }
        }
        range
    }

    fn to_xml(
        &self,
        selected: bool,
        styles: &mut StyleTable,
        strings: &mut SharedStrings,
    ) -> Result<Vec<u8>, ChecklistError> {
        let mut w = XmlWriter::new()?;
        w.start("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;

        let dimension = self.dimension().to_string();
        w.empty("dimension", &[("ref", dimension.as_str())])?;

        self.write_sheet_view(&mut w, selected)?;
        w.empty("sheetFormatPr", &[("defaultRowHeight", "15")])?;

        if !self.col_widths.is_empty() {
            w.start("cols", &[])?;
            for (&col, &width) in &self.col_widths {
                let index = (col + 1).to_string();
                let width = width.to_string();
                w.empty(
                    "col",
                    &[
                        ("min", index.as_str()),
                        ("max", index.as_str()),
                        ("width", width.as_str()),
                        ("customWidth", "1"),
                    ],
                )?;
            }
            w.end("cols")?;
        }

        w.start("sheetData", &[])?;
        let row_indices: BTreeSet<u32> = self
            .rows
            .keys()
            .chain(self.row_heights.keys())
            .copied()
            .collect();
        for row in row_indices {
            self.write_row(&mut w, row, styles, strings)?;
        }
        w.end("sheetData")?;

        if let Some(range) = &self.autofilter {
            let range = range.to_string();
            w.empty("autoFilter", &[("ref", range.as_str())])?;
        }

        if !self.merges.is_empty() {
            let count = self.merges.len().to_string();
            w.start("mergeCells", &[("count", count.as_str())])?;
            for merge in &self.merges {
                let range = merge.to_string();
                w.empty("mergeCell", &[("ref", range.as_str())])?;
            }
            w.end("mergeCells")?;
        }

        for (i, format) in self.conditional_formats.iter().enumerate() {
            let sqref = format.range.to_string();
            let dxf_id = styles.dxf_id(&format.fill).to_string();
            let priority = (i + 1).to_string();
            w.start("conditionalFormatting", &[("sqref", sqref.as_str())])?;
            w.start(
                "cfRule",
                &[
                    ("type", "cellIs"),
                    ("dxfId", dxf_id.as_str()),
                    ("priority", priority.as_str()),
                    ("operator", format.rule.operator()),
                ],
            )?;
            for formula in format.rule.formulas() {
                w.text_element("formula", &[], formula)?;
            }
            w.end("cfRule")?;
            w.end("conditionalFormatting")?;
        }

        if !self.validations.is_empty() {
            let count = self.validations.len().to_string();
            w.start("dataValidations", &[("count", count.as_str())])?;
            for validation in &self.validations {
                write_validation(&mut w, validation)?;
            }
            w.end("dataValidations")?;
        }

        w.empty(
            "pageMargins",
            &[
                ("left", "0.7"),
                ("right", "0.7"),
                ("top", "0.75"),
                ("bottom", "0.75"),
                ("header", "0.3"),
                ("footer", "0.3"),
            ],
        )?;
        w.end("worksheet")?;
        Ok(w.into_bytes())
    }

    fn write_sheet_view(&self, w: &mut XmlWriter, selected: bool) -> Result<(), ChecklistError> {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if !self.show_gridlines {
            attrs.push(("showGridLines", "0"));
        }
        if selected {
            attrs.push(("tabSelected", "1"));
        }
        attrs.push(("workbookViewId", "0"));

        w.start("sheetViews", &[])?;
        match self.freeze {
            Some((row, col)) if row > 0 || col > 0 => {
                w.start("sheetView", &attrs)?;
                let top_left = cell_ref(row, col);
                let x_split = col.to_string();
                let y_split = row.to_string();
                let pane = match (row > 0, col > 0) {
                    (true, true) => "bottomRight",
                    (true, false) => "bottomLeft",
                    _ => "topRight",
                };
                let mut pane_attrs: Vec<(&str, &str)> = Vec::new();
                if col > 0 {
                    pane_attrs.push(("xSplit", x_split.as_str()));
                }
                if row > 0 {
                    pane_attrs.push(("ySplit", y_split.as_str()));
                }
                pane_attrs.push(("topLeftCell", top_left.as_str()));
                pane_attrs.push(("activePane", pane));
                pane_attrs.push(("state", "frozen"));
                w.empty("pane", &pane_attrs)?;
                w.empty("selection", &[("pane", pane)])?;
                w.end("sheetView")?;
            }
            _ => w.empty("sheetView", &attrs)?,
        }
        w.end("sheetViews")
    }

    fn write_row(
        &self,
        w: &mut XmlWriter,
        row: u32,
        styles: &mut StyleTable,
        strings: &mut SharedStrings,
    ) -> Result<(), ChecklistError> {
        let index = (row + 1).to_string();
        let height = self.row_heights.get(&row).map(|h| h.to_string());
        let mut attrs: Vec<(&str, &str)> = vec![("r", index.as_str())];
        if let Some(height) = &height {
            attrs.push(("ht", height.as_str()));
            attrs.push(("customHeight", "1"));
        }

        let Some(cells) = self.rows.get(&row) else {
            return w.empty("row", &attrs);
        };

        w.start("row", &attrs)?;
        for (&col, cell) in cells {
            let reference = cell_ref(row, col);
            let style_id = styles.xf_id(&cell.style);
            let style_id = style_id.to_string();
            let mut cell_attrs: Vec<(&str, &str)> = vec![("r", reference.as_str())];
            if style_id != "0" {
                cell_attrs.push(("s", style_id.as_str()));
            }
            match &cell.value {
                CellValue::Text(text) => {
                    let sst_index = strings.index(text).to_string();
                    cell_attrs.push(("t", "s"));
                    w.start("c", &cell_attrs)?;
                    w.text_element("v", &[], &sst_index)?;
                    w.end("c")?;
                }
                CellValue::Number(number) => {
                    w.start("c", &cell_attrs)?;
                    w.text_element("v", &[], &format_number(*number))?;
                    w.end("c")?;
                }
                CellValue::Blank => w.empty("c", &cell_attrs)?,
            }
        }
        w.end("row")
    }
}

fn write_validation(w: &mut XmlWriter, validation: &DataValidation) -> Result<(), ChecklistError> {
    let sqref = validation
        .ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let (kind, operator, formula) = match &validation.rule {
        ValidationRule::List(options) => ("list", None, format!("\"{}\"", options.join(","))),
        ValidationRule::DateAfter { year, month, day } => (
            "date",
            Some("greaterThan"),
            format!("DATE({year},{month},{day})"),
        ),
    };

    let mut attrs: Vec<(&str, &str)> = vec![("type", kind)];
    if let Some(operator) = operator {
        attrs.push(("operator", operator));
    }
    if validation.allow_blank {
        attrs.push(("allowBlank", "1"));
    }
    attrs.push(("showInputMessage", "1"));
    attrs.push(("showErrorMessage", "1"));
    attrs.push(("sqref", sqref.as_str()));

    w.start("dataValidation", &attrs)?;
    w.text_element("formula1", &[], &formula)?;
    w.end("dataValidation")
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

#[derive(Debug, Default)]
struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    references: usize,
}

impl SharedStrings {
    fn index(&mut self, text: &str) -> usize {
        self.references += 1;
        if let Some(&i) = self.index.get(text) {
            return i;
        }
        let i = self.strings.len();
        self.strings.push(text.to_string());
        self.index.insert(text.to_string(), i);
        i
    }

    fn to_xml(&self) -> Result<Vec<u8>, ChecklistError> {
        let mut w = XmlWriter::new()?;
        let count = self.references.to_string();
        let unique = self.strings.len().to_string();
        w.start(
            "sst",
            &[
                ("xmlns", NS_MAIN),
                ("count", count.as_str()),
                ("uniqueCount", unique.as_str()),
            ],
        )?;
        for text in &self.strings {
            w.start("si", &[])?;
            let needs_preserve = text.starts_with(char::is_whitespace)
                || text.ends_with(char::is_whitespace)
                || text.contains('\n');
            if needs_preserve {
                w.text_element("t", &[("xml:space", "preserve")], text)?;
            } else {
                w.text_element("t", &[], text)?;
            }
            w.end("si")?;
        }
        w.end("sst")?;
        Ok(w.into_bytes())
    }
}

/// An xlsx package built in memory.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_worksheet(&mut self, sheet: Worksheet) {
        self.sheets.push(sheet);
    }

    pub fn worksheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Serialize the workbook into xlsx bytes.
    pub fn save_to_buffer(&self) -> Result<Vec<u8>, ChecklistError> {
        if self.sheets.is_empty() {
            return Err(ChecklistError::Workbook("workbook has no worksheets".into()));
        }
        for sheet in &self.sheets {
            validate_sheet_name(&sheet.name)?;
        }

        let mut styles = StyleTable::default();
        let mut strings = SharedStrings::default();
        let mut sheet_parts = Vec::with_capacity(self.sheets.len());
        for (i, sheet) in self.sheets.iter().enumerate() {
            sheet_parts.push(sheet.to_xml(i == 0, &mut styles, &mut strings)?);
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(&self.content_types_xml()?)?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(&root_rels_xml()?)?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(&self.workbook_xml()?)?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(&self.workbook_rels_xml()?)?;

        for (i, part) in sheet_parts.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
            zip.write_all(part)?;
        }

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(&styles.to_xml()?)?;

        zip.start_file("xl/sharedStrings.xml", options)?;
        zip.write_all(&strings.to_xml()?)?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> Result<Vec<u8>, ChecklistError> {
        let mut w = XmlWriter::new()?;
        w.start(
            "Types",
            &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
        )?;
        w.empty(
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        w.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
        w.empty("Override", &[("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)])?;
        for i in 0..self.sheets.len() {
            let part = format!("/xl/worksheets/sheet{}.xml", i + 1);
            w.empty("Override", &[("PartName", part.as_str()), ("ContentType", CT_WORKSHEET)])?;
        }
        w.empty("Override", &[("PartName", "/xl/styles.xml"), ("ContentType", CT_STYLES)])?;
        w.empty(
            "Override",
            &[("PartName", "/xl/sharedStrings.xml"), ("ContentType", CT_SHARED_STRINGS)],
        )?;
        w.end("Types")?;
        Ok(w.into_bytes())
    }

    fn workbook_xml(&self) -> Result<Vec<u8>, ChecklistError> {
        let mut w = XmlWriter::new()?;
        w.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
        w.start("bookViews", &[])?;
        w.empty("workbookView", &[("activeTab", "0")])?;
        w.end("bookViews")?;

        w.start("sheets", &[])?;
        for (i, sheet) in self.sheets.iter().enumerate() {
            let sheet_id = (i + 1).to_string();
            let rel_id = format!("rId{}", i + 1);
            w.empty(
                "sheet",
                &[
                    ("name", sheet.name.as_str()),
                    ("sheetId", sheet_id.as_str()),
                    ("r:id", rel_id.as_str()),
                ],
            )?;
        }
        w.end("sheets")?;

        let filtered: Vec<(usize, &Worksheet, CellRange)> = self
            .sheets
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.autofilter.map(|r| (i, s, r)))
            .collect();
        if !filtered.is_empty() {
            w.start("definedNames", &[])?;
            for (i, sheet, range) in filtered {
                let local_id = i.to_string();
                let target = format!("{}!{}", quote_sheet_name(&sheet.name), range.absolute());
                w.text_element(
                    "definedName",
                    &[
                        ("name", "_xlnm._FilterDatabase"),
                        ("localSheetId", local_id.as_str()),
                        ("hidden", "1"),
                    ],
                    &target,
                )?;
            }
            w.end("definedNames")?;
        }

        w.end("workbook")?;
        Ok(w.into_bytes())
    }

    fn workbook_rels_xml(&self) -> Result<Vec<u8>, ChecklistError> {
        let mut w = XmlWriter::new()?;
        w.start(
            "Relationships",
            &[("xmlns", "http://schemas.openxmlformats.org/package/2006/relationships")],
        )?;
        let sheet_count = self.sheets.len();
        for i in 0..sheet_count {
            let id = format!("rId{}", i + 1);
            let target = format!("worksheets/sheet{}.xml", i + 1);
            w.empty(
                "Relationship",
                &[("Id", id.as_str()), ("Type", REL_WORKSHEET), ("Target", target.as_str())],
            )?;
        }
        let styles_id = format!("rId{}", sheet_count + 1);
        w.empty(
            "Relationship",
            &[("Id", styles_id.as_str()), ("Type", REL_STYLES), ("Target", "styles.xml")],
        )?;
        let strings_id = format!("rId{}", sheet_count + 2);
        w.empty(
            "Relationship",
            &[
                ("Id", strings_id.as_str()),
                ("Type", REL_SHARED_STRINGS),
                ("Target", "sharedStrings.xml"),
            ],
        )?;
        w.end("Relationships")?;
        Ok(w.into_bytes())
    }
}

fn root_rels_xml() -> Result<Vec<u8>, ChecklistError> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Relationships",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/relationships")],
    )?;
    w.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "xl/workbook.xml")],
    )?;
    w.end("Relationships")?;
    Ok(w.into_bytes())
}

fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Excel rejects sheet names longer than 31 characters or containing any of `[]:*?/\`.
fn validate_sheet_name(name: &str) -> Result<(), ChecklistError> {
    if name.is_empty() || name.chars().count() > 31 {
        return Err(ChecklistError::Workbook(format!(
            "sheet name '{name}' must be 1-31 characters"
        )));
    }
    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        return Err(ChecklistError::Workbook(format!(
            "sheet name '{name}' contains a character Excel does not allow"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(15), "P");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_range_display() {
        assert_eq!(CellRange::new(0, 0, 0, 6).to_string(), "A1:G1");
        assert_eq!(CellRange::column(8, 1, 9).to_string(), "I2:I10");
        assert_eq!(CellRange::new(2, 1, 2, 1).to_string(), "B3");
        assert_eq!(CellRange::new(0, 0, 9, 15).absolute(), "$A$1:$P$10");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_sheet_xml_parts() {
        let mut sheet = Worksheet::new("Competency Matrix");
        sheet.hide_gridlines();
        sheet.write_string(0, 0, "Team Member", &Style::new().bold());
        sheet.write_number(1, 1, 3.0, &Style::default());
        sheet.write_blank(1, 2, &Style::new().fill("E0E0E0"));
        sheet.freeze_panes(1, 0);
        sheet.autofilter(CellRange::new(0, 0, 1, 2));
        sheet.add_data_validation(DataValidation::list(
            &["Not Started", "Complete"],
            vec![CellRange::column(2, 1, 1)],
        ));
        sheet.add_conditional_format(ConditionalFormat {
            range: CellRange::column(2, 1, 1),
            rule: CellRule::equal_text("Complete"),
            fill: "D4EDDA".into(),
        });

        let mut styles = StyleTable::default();
        let mut strings = SharedStrings::default();
        let xml = String::from_utf8(sheet.to_xml(true, &mut styles, &mut strings).unwrap()).unwrap();

        assert!(xml.contains("<dimension ref=\"A1:C2\"/>"));
        assert!(xml.contains("showGridLines=\"0\""));
        assert!(xml.contains("<pane ySplit=\"1\" topLeftCell=\"A2\" activePane=\"bottomLeft\" state=\"frozen\"/>"));
        assert!(xml.contains("<c r=\"A1\" s=\"1\" t=\"s\"><v>0</v></c>"));
        assert!(xml.contains("<c r=\"B2\"><v>3</v></c>"));
        assert!(xml.contains("<c r=\"C2\" s=\"2\"/>"));
        assert!(xml.contains("<autoFilter ref=\"A1:C2\"/>"));
        assert!(xml.contains("Not Started,Complete"));
        assert!(xml.contains("operator=\"equal\""));
        assert!(xml.contains("<formula>"));

        // Schema order: sheetData, autoFilter, conditionalFormatting, dataValidations.
        let data = xml.find("<sheetData>").unwrap();
        let filter = xml.find("<autoFilter").unwrap();
        let cf = xml.find("<conditionalFormatting").unwrap();
        let dv = xml.find("<dataValidations").unwrap();
        assert!(data < filter && filter < cf && cf < dv);
    }

    #[test]
    fn test_row_height_without_cells() {
        let mut sheet = Worksheet::new("Overview");
        sheet.set_row_height(4, 24.0);
        let mut styles = StyleTable::default();
        let mut strings = SharedStrings::default();
        let xml = String::from_utf8(sheet.to_xml(false, &mut styles, &mut strings).unwrap()).unwrap();
        assert!(xml.contains("<row r=\"5\" ht=\"24\" customHeight=\"1\"/>"));
    }

    #[test]
    fn test_shared_strings_deduplicated() {
        let mut strings = SharedStrings::default();
        assert_eq!(strings.index("Complete"), 0);
        assert_eq!(strings.index("Not Started"), 1);
        assert_eq!(strings.index("Complete"), 0);
        let xml = String::from_utf8(strings.to_xml().unwrap()).unwrap();
        assert!(xml.contains("count=\"3\" uniqueCount=\"2\""));
    }

    #[test]
    fn test_shared_strings_drop_control_characters() {
        let mut strings = SharedStrings::default();
        strings.index("Restock\u{3} ice\u{2}");
        let xml = String::from_utf8(strings.to_xml().unwrap()).unwrap();
        assert!(xml.contains("<si><t>Restock ice</t></si>"));
    }

    #[test]
    fn test_empty_workbook_rejected() {
        assert!(Workbook::new().save_to_buffer().is_err());
    }

    #[test]
    fn test_invalid_sheet_name_rejected() {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(Worksheet::new("Area/Status"));
        assert!(workbook.save_to_buffer().is_err());
    }

    #[test]
    fn test_package_is_zip() {
        let mut workbook = Workbook::new();
        let mut sheet = Worksheet::new("Overview");
        sheet.write_string(0, 0, "PGR Competency Checklist", &Style::default());
        workbook.push_worksheet(sheet);
        let bytes = workbook.save_to_buffer().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
