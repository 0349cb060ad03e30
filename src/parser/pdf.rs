//! PDF pattern documents.
//!
//! Pages are read with `lopdf`: extents from the (possibly inherited)
//! MediaBox, painted path segments and text from the decoded content
//! streams, including Form XObjects drawn with `Do`. Text is decoded with
//! the encoding of the font selected by `Tf`. Coordinates are returned in a
//! top-left page frame, x to the right and y downwards, origin at the
//! MediaBox's upper-left corner.

use super::page::{PageContent, VectorDocument};
use crate::error::{PatternError, Result};
use crate::model::{Point, Primitive};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Maximum nesting of Form XObjects, the page itself included.
const MAX_FORM_DEPTH: usize = 8;

/// An open PDF pattern document. The file contents are released on drop.
pub struct PdfDocument {
    /// Source path (empty for in-memory documents).
    path: PathBuf,
    /// Parsed document.
    doc: Document,
    /// Page object ids in page order.
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PatternError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let doc = Document::load(path).map_err(|e| PatternError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self::from_document(path.to_path_buf(), doc))
    }

    /// Parse a PDF held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).map_err(|e| PatternError::Pdf {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;

        Ok(Self::from_document(PathBuf::new(), doc))
    }

    fn from_document(path: PathBuf, doc: Document) -> Self {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!("Opened {} ({} pages)", path.display(), page_ids.len());
        Self {
            path,
            doc,
            page_ids,
        }
    }

    /// Find the page's MediaBox, walking up the page tree if inherited.
    fn media_box(&self, page_id: ObjectId) -> Option<[f64; 4]> {
        let mut dict = self.doc.get_dictionary(page_id).ok()?;

        // Bounded walk, a malformed tree could loop
        for _ in 0..32 {
            if let Ok(value) = dict.get(b"MediaBox") {
                return self.rect(value);
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }

        None
    }

    /// Read a rectangle array `[llx lly urx ury]`, normalized so that ll < ur.
    fn rect(&self, value: &Object) -> Option<[f64; 4]> {
        let values = self.resolve(value).as_array().ok()?;
        if values.len() != 4 {
            return None;
        }

        let mut numbers = [0.0; 4];
        for (slot, obj) in numbers.iter_mut().zip(values) {
            *slot = number(self.resolve(obj))?;
        }

        let [x0, y0, x1, y1] = numbers;
        Some([x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)])
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    /// Decode the page's content streams into one operation list.
    ///
    /// Each stream is decoded on its own, as a stream need not end with a
    /// separator. A stream that cannot be decoded is skipped.
    fn operations(&self, index: usize, page_id: ObjectId) -> Vec<Operation> {
        let mut operations = Vec::new();

        for stream_id in self.doc.get_page_contents(page_id) {
            let decoded = self
                .doc
                .get_object(stream_id)
                .and_then(Object::as_stream)
                .and_then(Stream::get_plain_content)
                .and_then(|data| Content::decode(&data));

            match decoded {
                Ok(content) => operations.extend(content.operations),
                Err(e) => warn!(
                    "{}: page {} content stream {:?} unreadable, skipped: {}",
                    self.path.display(),
                    index,
                    stream_id,
                    e
                ),
            }
        }

        operations
    }
}

impl VectorDocument for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        let page_id = *self.page_ids.get(index).ok_or(PatternError::Page {
            page: index,
            message: "page index out of range".to_string(),
        })?;

        let [llx, lly, urx, ury] = self
            .media_box(page_id)
            .ok_or(PatternError::MissingMediaBox { page: index })?;

        let operations = self.operations(index, page_id);
        let mut interpreter =
            ContentInterpreter::new(&self.doc, Scope::page(&self.doc, page_id), llx, ury);
        interpreter.run(&operations);

        let mut page = PageContent::new(index, urx - llx, ury - lly);
        page.text = interpreter.text.trim().to_string();
        page.primitives = interpreter.primitives;

        debug!(
            "Page {}: {:.1}x{:.1} pt, {} primitives, {} text chars",
            index,
            page.width_pt,
            page.height_pt,
            page.primitives.len(),
            page.text.len()
        );

        Ok(page)
    }
}

/// Read a PDF number.
fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Decode a PDF string with no font encoding: UTF-16BE with BOM, otherwise
/// Latin-1.
fn decode_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Text encodings of the fonts in a font map. Fonts lopdf cannot describe
/// are left out and their text falls back to [`decode_string`].
fn font_encodings<'a>(
    doc: &'a Document,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
) -> BTreeMap<Vec<u8>, Encoding<'a>> {
    fonts
        .into_iter()
        .filter_map(|(name, font)| {
            if !font.type_is(b"Font") {
                debug!("Resource {} is not a font", String::from_utf8_lossy(&name));
                return None;
            }
            match font.get_font_encoding(doc) {
                Ok(encoding) => Some((name, encoding)),
                Err(e) => {
                    debug!("Font {}: no usable encoding: {}", String::from_utf8_lossy(&name), e);
                    None
                }
            }
        })
        .collect()
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let n: Vec<f64> = operands.iter().map(number).collect::<Option<_>>()?;
        match n.as_slice() {
            &[a, b, c, d, e, f] => Some(Matrix { a, b, c, d, e, f }),
            _ => None,
        }
    }

    /// `self` applied first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// Resources visible to one content stream: the page's, or a Form
/// XObject's own.
struct Scope<'a> {
    resources: Vec<&'a Dictionary>,
    fonts: BTreeMap<Vec<u8>, Encoding<'a>>,
}

impl<'a> Scope<'a> {
    /// Page resources, inherited ones included.
    fn page(doc: &'a Document, page_id: ObjectId) -> Self {
        let mut resources = Vec::new();
        if let Ok((inline, ids)) = doc.get_page_resources(page_id) {
            resources.extend(inline);
            resources.extend(ids.into_iter().filter_map(|id| doc.get_dictionary(id).ok()));
        }

        let fonts = doc.get_page_fonts(page_id).unwrap_or_default();

        Self {
            resources,
            fonts: font_encodings(doc, fonts),
        }
    }

    /// Resources of a Form XObject. Names it does not define resolve in the
    /// enclosing scopes.
    fn form(doc: &'a Document, form: &'a Stream) -> Self {
        let resources: Vec<&'a Dictionary> = form
            .dict
            .get_deref(b"Resources", doc)
            .and_then(Object::as_dict)
            .ok()
            .into_iter()
            .collect();

        let fonts = resources
            .iter()
            .copied()
            .filter_map(|res| res.get_deref(b"Font", doc).and_then(Object::as_dict).ok())
            .flat_map(Dictionary::iter)
            .filter_map(|(name, font)| {
                let (_, font) = doc.dereference(font).ok()?;
                Some((name.clone(), font.as_dict().ok()?))
            })
            .collect();

        Self {
            resources,
            fonts: font_encodings(doc, fonts),
        }
    }
}

/// Walks content stream operations, collecting painted path segments and
/// text.
struct ContentInterpreter<'a> {
    doc: &'a Document,
    /// Page scope first, innermost Form XObject last.
    scopes: Vec<Scope<'a>>,
    /// Left edge of the MediaBox.
    origin_x: f64,
    /// Top edge of the MediaBox.
    top_y: f64,
    ctm: Matrix,
    saved: Vec<Matrix>,
    current: Option<Point>,
    subpath_start: Option<Point>,
    /// Segments of the path under construction, kept only once painted.
    path: Vec<Primitive>,
    primitives: Vec<Primitive>,
    /// Font resource selected by `Tf`.
    font: Option<Vec<u8>>,
    text: String,
}

impl<'a> ContentInterpreter<'a> {
    fn new(doc: &'a Document, page: Scope<'a>, origin_x: f64, top_y: f64) -> Self {
        Self {
            doc,
            scopes: vec![page],
            origin_x,
            top_y,
            ctm: Matrix::IDENTITY,
            saved: Vec::new(),
            current: None,
            subpath_start: None,
            path: Vec::new(),
            primitives: Vec::new(),
            font: None,
            text: String::new(),
        }
    }

    fn run(&mut self, operations: &[Operation]) {
        for op in operations {
            self.apply(op);
        }
    }

    /// User-space coordinates to the top-left page frame.
    fn to_page(&self, x: f64, y: f64) -> Point {
        let (x, y) = self.ctm.apply(x, y);
        Point::new(x - self.origin_x, self.top_y - y)
    }

    /// Read operand pairs as page points.
    fn points(&self, operands: &[Object], count: usize) -> Option<Vec<Point>> {
        if operands.len() < count * 2 {
            return None;
        }
        operands[..count * 2]
            .chunks_exact(2)
            .map(|pair| Some(self.to_page(number(&pair[0])?, number(&pair[1])?)))
            .collect()
    }

    fn move_to(&mut self, p: Point) {
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        if let Some(from) = self.current {
            self.path.push(Primitive::Line { from, to: p });
        } else {
            self.subpath_start = Some(p);
        }
        self.current = Some(p);
    }

    fn curve_to(&mut self, ctrl1: Option<Point>, ctrl2: Point, to: Point) {
        let from = self.current.unwrap_or(ctrl2);
        self.path.push(Primitive::Curve {
            from,
            ctrl1: ctrl1.unwrap_or(from),
            ctrl2,
            to,
        });
        if self.current.is_none() {
            self.subpath_start = Some(from);
        }
        self.current = Some(to);
    }

    fn close_path(&mut self) {
        if let (Some(current), Some(start)) = (self.current, self.subpath_start) {
            if !current.approx_eq(&start) {
                self.path.push(Primitive::Line {
                    from: current,
                    to: start,
                });
            }
            self.current = Some(start);
        }
    }

    /// End the current path. Painted segments become page primitives,
    /// unpainted ones (clipping paths ended with `n`) are dropped.
    fn end_path(&mut self, painted: bool) {
        if painted {
            self.primitives.append(&mut self.path);
        } else if !self.path.is_empty() {
            trace!("Discarding {} unpainted path segments", self.path.len());
            self.path.clear();
        }
        self.current = None;
        self.subpath_start = None;
    }

    /// Encoding of the current font, looked up from the innermost scope out.
    fn encoding(&self) -> Option<&Encoding<'a>> {
        let name = self.font.as_deref()?;
        self.scopes.iter().rev().find_map(|scope| scope.fonts.get(name))
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if let Some(encoding) = self.encoding() {
            match Document::decode_text(encoding, bytes) {
                Ok(text) => return text,
                Err(e) => trace!("Font decoding failed, using raw bytes: {}", e),
            }
        }
        decode_string(bytes)
    }

    fn push_text(&mut self, operand: &Object) {
        match operand {
            Object::String(bytes, _) => {
                let text = self.decode(bytes);
                self.text.push_str(&text);
            }
            Object::Array(items) => {
                for item in items {
                    if let Object::String(bytes, _) = item {
                        let text = self.decode(bytes);
                        self.text.push_str(&text);
                    } else if number(item).is_some_and(|offset| offset < -100.0)
                        && !self.text.ends_with(char::is_whitespace)
                    {
                        // Large kerning gap between words
                        self.text.push(' ');
                    }
                }
            }
            _ => {}
        }
    }

    fn new_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    /// Form XObject named in the innermost scope that defines it.
    fn xobject(&self, name: &[u8]) -> Option<&'a Stream> {
        let doc = self.doc;
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.resources.iter().copied())
            .find_map(|resources| {
                resources
                    .get_deref(b"XObject", doc)
                    .and_then(Object::as_dict)
                    .ok()?
                    .get_deref(name, doc)
                    .and_then(Object::as_stream)
                    .ok()
            })
    }

    /// Run a Form XObject's content with its matrix, restoring the graphics
    /// state afterwards.
    fn draw_form(&mut self, name: &[u8]) {
        let label = String::from_utf8_lossy(name);
        let Some(form) = self.xobject(name) else {
            debug!("XObject {} not found", label);
            return;
        };

        let is_form = form
            .dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .is_ok_and(|subtype| subtype == b"Form");
        if !is_form {
            trace!("Ignoring non-form XObject {}", label);
            return;
        }

        if self.scopes.len() >= MAX_FORM_DEPTH {
            warn!("XObject {} nested too deep, skipped", label);
            return;
        }

        let operations = match form
            .get_plain_content()
            .and_then(|data| Content::decode(&data))
        {
            Ok(content) => content.operations,
            Err(e) => {
                warn!("XObject {} content unreadable, skipped: {}", label, e);
                return;
            }
        };

        let ctm = self.ctm;
        let depth = self.saved.len();
        if let Some(m) = form
            .dict
            .get(b"Matrix")
            .and_then(Object::as_array)
            .ok()
            .and_then(|values| Matrix::from_operands(values))
        {
            self.ctm = m.then(&self.ctm);
        }

        self.scopes.push(Scope::form(self.doc, form));
        self.run(&operations);
        self.scopes.pop();

        self.end_path(false);
        self.saved.truncate(depth);
        self.ctm = ctm;
    }

    fn apply(&mut self, op: &Operation) {
        let operands = op.operands.as_slice();

        match op.operator.as_str() {
            // Graphics state
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.then(&self.ctm);
                }
            }

            // Path construction
            "m" => {
                if let Some(p) = self.points(operands, 1) {
                    self.move_to(p[0]);
                }
            }
            "l" => {
                if let Some(p) = self.points(operands, 1) {
                    self.line_to(p[0]);
                }
            }
            "c" => {
                if let Some(p) = self.points(operands, 3) {
                    self.curve_to(Some(p[0]), p[1], p[2]);
                }
            }
            "v" => {
                if let Some(p) = self.points(operands, 2) {
                    self.curve_to(self.current, p[0], p[1]);
                }
            }
            "y" => {
                if let Some(p) = self.points(operands, 2) {
                    self.curve_to(Some(p[0]), p[1], p[1]);
                }
            }
            "h" => self.close_path(),
            "re" => {
                let n: Option<Vec<f64>> = operands.iter().take(4).map(number).collect();
                if let Some(&[x, y, w, h]) = n.as_deref() {
                    self.move_to(self.to_page(x, y));
                    self.line_to(self.to_page(x + w, y));
                    self.line_to(self.to_page(x + w, y + h));
                    self.line_to(self.to_page(x, y + h));
                    self.close_path();
                }
            }

            // Path painting
            "S" | "f" | "F" | "f*" | "B" | "B*" => self.end_path(true),
            "s" | "b" | "b*" => {
                self.close_path();
                self.end_path(true);
            }
            "n" => self.end_path(false),

            // External objects
            "Do" => {
                if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                    self.draw_form(name);
                }
            }

            // Text
            "Tf" => {
                self.font = operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .map(<[u8]>::to_vec);
            }
            "Tj" | "TJ" => {
                if let Some(operand) = operands.first() {
                    self.push_text(operand);
                }
            }
            "'" => {
                self.new_line();
                if let Some(operand) = operands.first() {
                    self.push_text(operand);
                }
            }
            "\"" => {
                self.new_line();
                if let Some(operand) = operands.get(2) {
                    self.push_text(operand);
                }
            }
            "ET" | "T*" | "Td" | "TD" | "Tm" => self.new_line(),

            other => trace!("Ignoring content operator {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};
    use pretty_assertions::assert_eq;

    fn int(v: i64) -> Object {
        Object::Integer(v)
    }

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    /// Build a single-page PDF with the MediaBox on the page tree root.
    fn build_pdf(media_box: [i64; 4], operations: Vec<Operation>) -> Vec<u8> {
        build_pdf_with(media_box, vec![operations], |_| dictionary! {})
    }

    /// Build a single-page PDF with one content stream per operation list
    /// and page resources made by `resources`.
    fn build_pdf_with(
        media_box: [i64; 4],
        streams: Vec<Vec<Operation>>,
        resources: impl FnOnce(&mut Document) -> Dictionary,
    ) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut content_ids: Vec<Object> = streams
            .into_iter()
            .map(|operations| {
                let content = Content { operations };
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
                    .into()
            })
            .collect();
        let contents = if content_ids.len() == 1 {
            content_ids.remove(0)
        } else {
            Object::Array(content_ids)
        };

        let resources = resources(&mut doc);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
            "Resources" => resources,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => media_box.iter().map(|v| int(*v)).collect::<Vec<_>>(),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Stroked square of side `side` with its lower-left corner at (x, y).
    fn square_ops(x: i64, y: i64, side: i64) -> Vec<Operation> {
        vec![
            op("m", vec![int(x), int(y)]),
            op("l", vec![int(x + side), int(y)]),
            op("l", vec![int(x + side), int(y + side)]),
            op("l", vec![int(x), int(y + side)]),
            op("h", vec![]),
            op("S", vec![]),
        ]
    }

    /// Identity-H font whose ToUnicode CMap maps glyph code `c` to
    /// U+0020 + (c - 1), for printable ASCII.
    fn identity_font(doc: &mut Document) -> ObjectId {
        let cmap = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS)
/Supplement 0
>> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0001> <005F> <0020>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";
        let cmap_id = doc.add_object(Stream::new(dictionary! {}, cmap.to_vec()));
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "ArialMT",
            "Encoding" => "Identity-H",
            "ToUnicode" => cmap_id,
        })
    }

    /// Two-byte glyph codes for `identity_font`.
    fn glyph_codes(text: &str) -> Object {
        let bytes = text.bytes().flat_map(|b| [0, b - 0x1F]).collect();
        Object::String(bytes, StringFormat::Hexadecimal)
    }

    fn text_ops(text: &str) -> Vec<Operation> {
        vec![
            op("BT", vec![]),
            op("Td", vec![int(50), int(800)]),
            op("Tj", vec![Object::string_literal(text)]),
            op("ET", vec![]),
        ]
    }

    #[test]
    fn test_inherited_media_box_and_extents() {
        let bytes = build_pdf([0, 0, 595, 842], vec![]);
        let doc = PdfDocument::from_bytes(&bytes).unwrap();
        assert_eq!(doc.page_count(), 1);

        let page = doc.page(0).unwrap();
        assert_eq!(page.index, 0);
        assert_eq!(page.width_pt, 595.0);
        assert_eq!(page.height_pt, 842.0);
        assert!(page.primitives.is_empty());
        assert_eq!(page.text, "");
    }

    #[test]
    fn test_lines_in_top_left_frame() {
        let ops = vec![
            op("m", vec![int(100), int(742)]),
            op("l", vec![int(200), int(742)]),
            op("l", vec![int(200), int(642)]),
            op("h", vec![]),
            op("S", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        let page = doc.page(0).unwrap();

        assert_eq!(
            page.primitives,
            vec![
                Primitive::line((100.0, 100.0), (200.0, 100.0)),
                Primitive::line((200.0, 100.0), (200.0, 200.0)),
                Primitive::line((200.0, 200.0), (100.0, 100.0)),
            ]
        );
    }

    #[test]
    fn test_rectangle_operator() {
        let ops = vec![op("re", vec![int(0), int(0), int(10), int(20)]), op("f", vec![])];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 100, 100], ops)).unwrap();
        let page = doc.page(0).unwrap();

        let ends: Vec<Point> = page.primitives.iter().map(Primitive::end).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(10.0, 100.0),
                Point::new(10.0, 80.0),
                Point::new(0.0, 80.0),
                Point::new(0.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_curve_operators() {
        let ops = vec![
            op("m", vec![int(0), int(100)]),
            op("c", vec![int(0), int(50), int(50), int(50), int(50), int(100)]),
            op("v", vec![int(100), int(50), int(100), int(100)]),
            op("y", vec![int(150), int(50), int(150), int(100)]),
            op("S", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 200, 100], ops)).unwrap();
        let page = doc.page(0).unwrap();

        assert_eq!(page.primitives.len(), 3);
        assert!(page.primitives.iter().all(Primitive::is_curve));
        assert_eq!(
            page.primitives[1],
            Primitive::curve((50.0, 0.0), (50.0, 0.0), (100.0, 50.0), (100.0, 0.0))
        );
        assert_eq!(
            page.primitives[2],
            Primitive::curve((100.0, 0.0), (150.0, 50.0), (150.0, 0.0), (150.0, 0.0))
        );
    }

    #[test]
    fn test_transformation_matrix_and_restore() {
        let ops = vec![
            op("q", vec![]),
            op("cm", vec![int(2), int(0), int(0), int(2), int(10), int(10)]),
            op("m", vec![int(0), int(0)]),
            op("l", vec![int(5), int(0)]),
            op("S", vec![]),
            op("Q", vec![]),
            op("m", vec![int(0), int(0)]),
            op("l", vec![int(5), int(0)]),
            op("S", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 100, 100], ops)).unwrap();
        let page = doc.page(0).unwrap();

        assert_eq!(
            page.primitives,
            vec![
                Primitive::line((10.0, 90.0), (20.0, 90.0)),
                Primitive::line((0.0, 100.0), (5.0, 100.0)),
            ]
        );
    }

    #[test]
    fn test_text_extraction() {
        let mut ops = text_ops("Piece Name: DELANTERO");
        ops.extend(text_ops("Talla M"));
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        let page = doc.page(0).unwrap();
        assert_eq!(page.text, "Piece Name: DELANTERO\nTalla M");
    }

    #[test]
    fn test_tj_array_text() {
        let ops = vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("@MANGA"),
                    int(-300),
                    Object::string_literal("DER"),
                ])],
            ),
            op("ET", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        assert_eq!(doc.page(0).unwrap().text, "@MANGA DER");
    }

    #[test]
    fn test_tj_small_kerning_is_not_a_space() {
        let ops = vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("DELAN"),
                    int(-40),
                    Object::string_literal("TERO"),
                    Object::Real(-250.5),
                    Object::string_literal("M"),
                ])],
            ),
            op("ET", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        assert_eq!(doc.page(0).unwrap().text, "DELANTERO M");
    }

    #[test]
    fn test_text_in_identity_font() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![Object::Name(b"F1".to_vec()), int(12)]),
            op("Td", vec![int(50), int(800)]),
            op("Tj", vec![glyph_codes("Piece Name: DELANTERO")]),
            op("ET", vec![]),
        ];
        let bytes = build_pdf_with([0, 0, 595, 842], vec![ops], |doc| {
            let font_id = identity_font(doc);
            dictionary! { "Font" => dictionary! { "F1" => font_id } }
        });
        let page = PdfDocument::from_bytes(&bytes).unwrap().page(0).unwrap();
        assert_eq!(page.text, "Piece Name: DELANTERO");
    }

    #[test]
    fn test_unknown_font_falls_back_to_raw_bytes() {
        let ops = vec![
            op("BT", vec![]),
            op("Tf", vec![Object::Name(b"F9".to_vec()), int(12)]),
            op("Tj", vec![Object::string_literal("POSTERIOR")]),
            op("ET", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        assert_eq!(doc.page(0).unwrap().text, "POSTERIOR");
    }

    #[test]
    fn test_clipping_path_is_not_an_outline() {
        let mut ops = vec![
            op("re", vec![int(0), int(0), int(595), int(842)]),
            op("W", vec![]),
            op("n", vec![]),
        ];
        ops.extend(square_ops(100, 642, 100));
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 595, 842], ops)).unwrap();
        let page = doc.page(0).unwrap();

        assert_eq!(page.primitives.len(), 4);
        let ends: Vec<Point> = page.primitives.iter().map(Primitive::end).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(200.0, 200.0),
                Point::new(200.0, 100.0),
                Point::new(100.0, 100.0),
                Point::new(100.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_unpainted_path_dropped() {
        let ops = vec![
            op("m", vec![int(0), int(0)]),
            op("l", vec![int(50), int(50)]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 100, 100], ops)).unwrap();
        assert!(doc.page(0).unwrap().primitives.is_empty());
    }

    #[test]
    fn test_close_and_stroke_operator() {
        let ops = vec![
            op("m", vec![int(0), int(0)]),
            op("l", vec![int(10), int(0)]),
            op("l", vec![int(10), int(10)]),
            op("s", vec![]),
        ];
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 100, 100], ops)).unwrap();
        let page = doc.page(0).unwrap();
        assert_eq!(page.primitives.len(), 3);
        assert_eq!(page.primitives[2], Primitive::line((10.0, 90.0), (0.0, 100.0)));
    }

    #[test]
    fn test_form_xobject_outline() {
        let ops = vec![op("Do", vec![Object::Name(b"Fm0".to_vec())])];
        let bytes = build_pdf_with([0, 0, 595, 842], vec![ops], |doc| {
            let content = Content {
                operations: square_ops(0, 0, 100),
            };
            let form_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![int(0), int(0), int(100), int(100)],
                    "Matrix" => vec![int(1), int(0), int(0), int(1), int(100), int(100)],
                },
                content.encode().unwrap(),
            ));
            dictionary! { "XObject" => dictionary! { "Fm0" => form_id } }
        });
        let page = PdfDocument::from_bytes(&bytes).unwrap().page(0).unwrap();

        let ends: Vec<Point> = page.primitives.iter().map(Primitive::end).collect();
        assert_eq!(
            ends,
            vec![
                Point::new(200.0, 742.0),
                Point::new(200.0, 642.0),
                Point::new(100.0, 642.0),
                Point::new(100.0, 742.0),
            ]
        );
    }

    #[test]
    fn test_form_xobject_text_uses_form_font() {
        let ops = vec![
            op("q", vec![]),
            op("Do", vec![Object::Name(b"Label".to_vec())]),
            op("Q", vec![]),
        ];
        let bytes = build_pdf_with([0, 0, 595, 842], vec![ops], |doc| {
            let font_id = identity_font(doc);
            let content = Content {
                operations: vec![
                    op("BT", vec![]),
                    op("Tf", vec![Object::Name(b"F2".to_vec()), int(10)]),
                    op("Tj", vec![glyph_codes("@MANGA IZQ")]),
                    op("ET", vec![]),
                ],
            };
            let form_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![int(0), int(0), int(100), int(100)],
                    "Resources" => dictionary! { "Font" => dictionary! { "F2" => font_id } },
                },
                content.encode().unwrap(),
            ));
            dictionary! { "XObject" => dictionary! { "Label" => form_id } }
        });
        let page = PdfDocument::from_bytes(&bytes).unwrap().page(0).unwrap();
        assert_eq!(page.text, "@MANGA IZQ");
    }

    #[test]
    fn test_self_referencing_form_is_bounded() {
        let ops = vec![op("Do", vec![Object::Name(b"Fm0".to_vec())])];
        let bytes = build_pdf_with([0, 0, 100, 100], vec![ops], |doc| {
            let form_id = doc.new_object_id();
            let content = Content {
                operations: vec![
                    op("m", vec![int(0), int(0)]),
                    op("l", vec![int(10), int(0)]),
                    op("S", vec![]),
                    op("Do", vec![Object::Name(b"Fm0".to_vec())]),
                ],
            };
            let form = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![int(0), int(0), int(10), int(10)],
                    "Resources" => dictionary! { "XObject" => dictionary! { "Fm0" => form_id } },
                },
                content.encode().unwrap(),
            );
            doc.objects.insert(form_id, Object::Stream(form));
            dictionary! { "XObject" => dictionary! { "Fm0" => form_id } }
        });
        let page = PdfDocument::from_bytes(&bytes).unwrap().page(0).unwrap();
        assert_eq!(page.primitives.len(), MAX_FORM_DEPTH - 1);
    }

    #[test]
    fn test_missing_xobject_ignored() {
        let mut ops = vec![op("Do", vec![Object::Name(b"Missing".to_vec())])];
        ops.extend(square_ops(0, 0, 10));
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 100, 100], ops)).unwrap();
        assert_eq!(doc.page(0).unwrap().primitives.len(), 4);
    }

    #[test]
    fn test_label_and_outline_in_separate_streams() {
        let streams = vec![text_ops("Piece Name: POSTERIOR"), square_ops(100, 642, 100)];
        let bytes = build_pdf_with([0, 0, 595, 842], streams, |_| dictionary! {});
        let page = PdfDocument::from_bytes(&bytes).unwrap().page(0).unwrap();

        assert_eq!(page.text, "Piece Name: POSTERIOR");
        assert_eq!(page.primitives.len(), 4);
    }

    #[test]
    fn test_page_out_of_range() {
        let doc = PdfDocument::from_bytes(&build_pdf([0, 0, 10, 10], vec![])).unwrap();
        assert!(matches!(doc.page(5), Err(PatternError::Page { page: 5, .. })));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = PdfDocument::from_bytes(b"this is not a pdf");
        assert!(matches!(result, Err(PatternError::Pdf { .. })));
    }

    #[test]
    fn test_open_missing_file() {
        let result = PdfDocument::open(Path::new("/nonexistent/pattern-M.pdf"));
        assert!(matches!(result, Err(PatternError::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode_string(b"Pu\xf1o"), "Puño");
        assert_eq!(decode_string(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0xD1]), "AÑ");
    }

    #[test]
    fn test_matrix_composition() {
        let scale = Matrix {
            a: 2.0,
            d: 2.0,
            ..Matrix::IDENTITY
        };
        let shift = Matrix {
            e: 5.0,
            f: -5.0,
            ..Matrix::IDENTITY
        };
        // Scale then shift
        assert_eq!(scale.then(&shift).apply(1.0, 1.0), (7.0, -3.0));
        // Shift then scale
        assert_eq!(shift.then(&scale).apply(1.0, 1.0), (12.0, -8.0));
    }
}
