use std::collections::HashMap;

use crate::error::ChecklistError;
use crate::workbook::xml::{XmlWriter, NS_MAIN};

pub const DIVIDER_COLOUR: &str = "D0D7DE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    Top,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Font {
    pub bold: bool,
    pub size: Option<u16>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: Option<Horizontal>,
    pub vertical: Option<Vertical>,
    pub wrap: bool,
}

/// Cell formatting. `Style::default()` is the workbook's plain style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub font: Font,
    /// Solid fill colour as `RRGGBB`.
    pub fill: Option<String>,
    /// Thin divider border on all four sides.
    pub border: bool,
    pub alignment: Alignment,
    pub number_format: Option<String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.font.bold = true;
        self
    }

    pub fn font_size(mut self, size: u16) -> Self {
        self.font.size = Some(size);
        self
    }

    pub fn font_color(mut self, color: &str) -> Self {
        self.font.color = Some(color.to_string());
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn align(mut self, horizontal: Horizontal) -> Self {
        self.alignment.horizontal = Some(horizontal);
        self
    }

    pub fn valign(mut self, vertical: Vertical) -> Self {
        self.alignment.vertical = Some(vertical);
        self
    }

    pub fn wrap(mut self) -> Self {
        self.alignment.wrap = true;
        self
    }

    pub fn number_format(mut self, format: &str) -> Self {
        self.number_format = Some(format.to_string());
        self
    }
}

/// Deduplicating registry behind `xl/styles.xml`.
///
/// Index 0 of every list is the workbook default, and fills 0/1 are the
/// two entries Excel reserves.
#[derive(Debug)]
pub(crate) struct StyleTable {
    xfs: Vec<Style>,
    xf_index: HashMap<Style, u32>,
    fonts: Vec<Font>,
    fills: Vec<Option<String>>,
    number_formats: Vec<String>,
    dxf_fills: Vec<String>,
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut xf_index = HashMap::new();
        xf_index.insert(Style::default(), 0);
        StyleTable {
            xfs: vec![Style::default()],
            xf_index,
            fonts: vec![Font::default()],
            fills: vec![None, None],
            number_formats: Vec::new(),
            dxf_fills: Vec::new(),
        }
    }
}

impl StyleTable {
    /// Cell format index (`s` attribute) for a style.
    pub fn xf_id(&mut self, style: &Style) -> u32 {
        if let Some(&id) = self.xf_index.get(style) {
            return id;
        }
        let id = self.xfs.len() as u32;
        self.xfs.push(style.clone());
        self.xf_index.insert(style.clone(), id);
        id
    }

    /// Differential format index for a conditional fill.
    pub fn dxf_id(&mut self, fill: &str) -> u32 {
        if let Some(pos) = self.dxf_fills.iter().position(|f| f == fill) {
            return pos as u32;
        }
        self.dxf_fills.push(fill.to_string());
        (self.dxf_fills.len() - 1) as u32
    }

    fn font_id(&mut self, font: &Font) -> usize {
        match self.fonts.iter().position(|f| f == font) {
            Some(pos) => pos,
            None => {
                self.fonts.push(font.clone());
                self.fonts.len() - 1
            }
        }
    }

    fn fill_id(&mut self, fill: &Option<String>) -> usize {
        if fill.is_none() {
            return 0;
        }
        match self.fills.iter().skip(2).position(|f| f == fill) {
            Some(pos) => pos + 2,
            None => {
                self.fills.push(fill.clone());
                self.fills.len() - 1
            }
        }
    }

    fn number_format_id(&mut self, format: &Option<String>) -> u32 {
        let Some(format) = format else {
            return 0;
        };
        let pos = match self.number_formats.iter().position(|f| f == format) {
            Some(pos) => pos,
            None => {
                self.number_formats.push(format.clone());
                self.number_formats.len() - 1
            }
        };
        164 + pos as u32
    }

    pub fn to_xml(&mut self) -> Result<Vec<u8>, ChecklistError> {
        // Resolve component ids first; this may grow the font/fill/format lists.
        let xfs = self.xfs.clone();
        let resolved: Vec<(u32, usize, usize, &Style)> = xfs
            .iter()
            .map(|style| {
                (
                    self.number_format_id(&style.number_format),
                    self.font_id(&style.font),
                    self.fill_id(&style.fill),
                    style,
                )
            })
            .collect();

        let mut w = XmlWriter::new()?;
        w.start("styleSheet", &[("xmlns", NS_MAIN)])?;

        if !self.number_formats.is_empty() {
            let count = self.number_formats.len().to_string();
            w.start("numFmts", &[("count", count.as_str())])?;
            for (i, format) in self.number_formats.iter().enumerate() {
                let id = (164 + i).to_string();
                w.empty("numFmt", &[("numFmtId", id.as_str()), ("formatCode", format.as_str())])?;
            }
            w.end("numFmts")?;
        }

        let count = self.fonts.len().to_string();
        w.start("fonts", &[("count", count.as_str())])?;
        for font in &self.fonts {
            write_font(&mut w, font)?;
        }
        w.end("fonts")?;

        let count = self.fills.len().to_string();
        w.start("fills", &[("count", count.as_str())])?;
        for (i, fill) in self.fills.iter().enumerate() {
            w.start("fill", &[])?;
            match (i, fill) {
                (1, _) => w.empty("patternFill", &[("patternType", "gray125")])?,
                (_, Some(color)) => write_solid_fill(&mut w, color, true)?,
                (_, None) => w.empty("patternFill", &[("patternType", "none")])?,
            }
            w.end("fill")?;
        }
        w.end("fills")?;

        w.start("borders", &[("count", "2")])?;
        w.start("border", &[])?;
        for side in ["left", "right", "top", "bottom"] {
            w.empty(side, &[])?;
        }
        w.empty("diagonal", &[])?;
        w.end("border")?;
        w.start("border", &[])?;
        let divider = argb(DIVIDER_COLOUR);
        for side in ["left", "right", "top", "bottom"] {
            w.start(side, &[("style", "thin")])?;
            w.empty("color", &[("rgb", divider.as_str())])?;
            w.end(side)?;
        }
        w.empty("diagonal", &[])?;
        w.end("border")?;
        w.end("borders")?;

        w.start("cellStyleXfs", &[("count", "1")])?;
        w.empty(
            "xf",
            &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")],
        )?;
        w.end("cellStyleXfs")?;

        let count = resolved.len().to_string();
        w.start("cellXfs", &[("count", count.as_str())])?;
        for (num_fmt_id, font_id, fill_id, style) in &resolved {
            write_xf(&mut w, *num_fmt_id, *font_id, *fill_id, style)?;
        }
        w.end("cellXfs")?;

        w.start("cellStyles", &[("count", "1")])?;
        w.empty("cellStyle", &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")])?;
        w.end("cellStyles")?;

        let count = self.dxf_fills.len().to_string();
        w.start("dxfs", &[("count", count.as_str())])?;
        for color in &self.dxf_fills {
            w.start("dxf", &[])?;
            w.start("fill", &[])?;
            write_solid_fill(&mut w, color, false)?;
            w.end("fill")?;
            w.end("dxf")?;
        }
        w.end("dxfs")?;

        w.end("styleSheet")?;
        Ok(w.into_bytes())
    }
}

fn write_font(w: &mut XmlWriter, font: &Font) -> Result<(), ChecklistError> {
    w.start("font", &[])?;
    if font.bold {
        w.empty("b", &[])?;
    }
    let size = font.size.unwrap_or(11).to_string();
    w.empty("sz", &[("val", size.as_str())])?;
    if let Some(color) = &font.color {
        let rgb = argb(color);
        w.empty("color", &[("rgb", rgb.as_str())])?;
    }
    w.empty("name", &[("val", "Calibri")])?;
    w.empty("family", &[("val", "2")])?;
    w.end("font")
}

/// Cell fills put the colour in `fgColor`; differential fills read `bgColor`.
fn write_solid_fill(w: &mut XmlWriter, color: &str, cell_fill: bool) -> Result<(), ChecklistError> {
    let rgb = argb(color);
    w.start("patternFill", &[("patternType", "solid")])?;
    if cell_fill {
        w.empty("fgColor", &[("rgb", rgb.as_str())])?;
    }
    w.empty("bgColor", &[("rgb", rgb.as_str())])?;
    w.end("patternFill")
}

fn write_xf(
    w: &mut XmlWriter,
    num_fmt_id: u32,
    font_id: usize,
    fill_id: usize,
    style: &Style,
) -> Result<(), ChecklistError> {
    let num_fmt_id = num_fmt_id.to_string();
    let font_id = font_id.to_string();
    let fill_id = fill_id.to_string();
    let border_id = if style.border { "1" } else { "0" };

    let mut attrs: Vec<(&str, &str)> = vec![
        ("numFmtId", num_fmt_id.as_str()),
        ("fontId", font_id.as_str()),
        ("fillId", fill_id.as_str()),
        ("borderId", border_id),
        ("xfId", "0"),
    ];
    if num_fmt_id != "0" {
        attrs.push(("applyNumberFormat", "1"));
    }
    if font_id != "0" {
        attrs.push(("applyFont", "1"));
    }
    if fill_id != "0" {
        attrs.push(("applyFill", "1"));
    }
    if style.border {
        attrs.push(("applyBorder", "1"));
    }

    let alignment = &style.alignment;
    if *alignment == Alignment::default() {
        return w.empty("xf", &attrs);
    }

    attrs.push(("applyAlignment", "1"));
    w.start("xf", &attrs)?;
    let mut align_attrs: Vec<(&str, &str)> = Vec::new();
    match alignment.horizontal {
        Some(Horizontal::Left) => align_attrs.push(("horizontal", "left")),
        Some(Horizontal::Center) => align_attrs.push(("horizontal", "center")),
        None => {}
    }
    match alignment.vertical {
        Some(Vertical::Top) => align_attrs.push(("vertical", "top")),
        Some(Vertical::Center) => align_attrs.push(("vertical", "center")),
        None => {}
    }
    if alignment.wrap {
        align_attrs.push(("wrapText", "1"));
    }
    w.empty("alignment", &align_attrs)?;
    w.end("xf")
}

fn argb(color: &str) -> String {
    format!("FF{}", color.trim_start_matches('#').to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_index_zero() {
        let mut table = StyleTable::default();
        assert_eq!(table.xf_id(&Style::default()), 0);
    }

    #[test]
    fn test_styles_deduplicated() {
        let mut table = StyleTable::default();
        let header = Style::new().bold().fill("1F2933").border();
        let a = table.xf_id(&header);
        let b = table.xf_id(&header.clone());
        let c = table.xf_id(&Style::new().bold());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dxf_ids_stable() {
        let mut table = StyleTable::default();
        assert_eq!(table.dxf_id("D4EDDA"), 0);
        assert_eq!(table.dxf_id("FFF3CD"), 1);
        assert_eq!(table.dxf_id("D4EDDA"), 0);
    }

    #[test]
    fn test_styles_xml_contents() {
        let mut table = StyleTable::default();
        table.xf_id(&Style::new().fill("e9f2ff").number_format("dd mmm yyyy").wrap());
        table.dxf_id("F8D7DA");
        let xml = String::from_utf8(table.to_xml().unwrap()).unwrap();
        assert!(xml.contains("<numFmt numFmtId=\"164\" formatCode=\"dd mmm yyyy\"/>"));
        assert!(xml.contains("<fgColor rgb=\"FFE9F2FF\"/>"));
        assert!(xml.contains("<cellXfs count=\"2\">"));
        assert!(xml.contains("wrapText=\"1\""));
        assert!(xml.contains("<dxfs count=\"1\">"));
        assert!(xml.contains("<patternFill patternType=\"gray125\"/>"));
    }
}
