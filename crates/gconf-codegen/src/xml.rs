//! XML document writer and reader.
//!
//! Layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <configuration>
//!   <constant name="width" type="number">10</constant>
//!   <constant name="sizes" type="array">
//!     <array>
//!       <item type="number">1</item>
//!       <item type="array">
//!         <array/>
//!       </item>
//!     </array>
//!   </constant>
//! </configuration>
//! ```

use gconf_types::{Number, SymbolTable, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{EmitError, EmitResult};

// ── Element Names ─────────────────────────────────────────────────────────────

pub const ROOT: &str = "configuration";
pub const CONSTANT: &str = "constant";
pub const ARRAY: &str = "array";
pub const ITEM: &str = "item";

fn xml_err(e: impl std::fmt::Display) -> EmitError {
    EmitError::Xml(e.to_string())
}

// ══════════════════════════════════════════════════════════════════════════════
// Writer
// ══════════════════════════════════════════════════════════════════════════════

/// Render the symbol table as an XML document, entries in declaration order.
pub fn to_xml(symbols: &SymbolTable, indent: usize) -> EmitResult<String> {
    let mut emitter = XmlEmitter {
        writer: Writer::new_with_indent(Vec::new(), b' ', indent),
    };
    emitter.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if symbols.is_empty() {
        emitter.event(Event::Empty(BytesStart::new(ROOT)))?;
    } else {
        emitter.event(Event::Start(BytesStart::new(ROOT)))?;
        for (name, value) in symbols.iter() {
            let mut start = BytesStart::new(CONSTANT);
            start.push_attribute(("name", name));
            emitter.value(CONSTANT, start, value)?;
        }
        emitter.event(Event::End(BytesEnd::new(ROOT)))?;
    }

    let mut xml = String::from_utf8(emitter.writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

struct XmlEmitter {
    writer: Writer<Vec<u8>>,
}

impl XmlEmitter {
    fn event(&mut self, event: Event<'_>) -> EmitResult<()> {
        self.writer.write_event(event).map_err(xml_err)
    }

    /// Write `<element type="…">` holding `value`. `start` may already carry
    /// other attributes.
    fn value(&mut self, element: &str, mut start: BytesStart<'_>, value: &Value) -> EmitResult<()> {
        start.push_attribute(("type", value.type_name()));
        self.event(Event::Start(start))?;
        match value {
            Value::Array(items) => self.array(items)?,
            Value::Number(n) => self.event(Event::Text(BytesText::new(&n.to_string())))?,
            Value::String(s) => self.event(Event::Text(BytesText::new(s)))?,
        }
        self.event(Event::End(BytesEnd::new(element)))
    }

    fn array(&mut self, items: &[Value]) -> EmitResult<()> {
        if items.is_empty() {
            return self.event(Event::Empty(BytesStart::new(ARRAY)));
        }
        self.event(Event::Start(BytesStart::new(ARRAY)))?;
        for item in items {
            self.value(ITEM, BytesStart::new(ITEM), item)?;
        }
        self.event(Event::End(BytesEnd::new(ARRAY)))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Reader
// ══════════════════════════════════════════════════════════════════════════════

/// Recover `(name, value)` pairs from a document written by [`to_xml`].
pub fn read_xml(xml: &str) -> EmitResult<Vec<(String, Value)>> {
    XmlParser {
        reader: Reader::from_str(xml),
    }
    .document()
}

struct XmlParser<'x> {
    reader: Reader<&'x [u8]>,
}

impl<'x> XmlParser<'x> {
    fn raw(&mut self) -> EmitResult<Event<'x>> {
        self.reader.read_event().map_err(xml_err)
    }

    /// Next event that is not layout whitespace, a declaration or a comment.
    fn significant(&mut self) -> EmitResult<Event<'x>> {
        loop {
            match self.raw()? {
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                event => return Ok(event),
            }
        }
    }

    fn document(&mut self) -> EmitResult<Vec<(String, Value)>> {
        match self.significant()? {
            Event::Start(e) if e.name().as_ref() == ROOT.as_bytes() => {}
            Event::Empty(e) if e.name().as_ref() == ROOT.as_bytes() => return Ok(Vec::new()),
            other => return Err(unexpected(ROOT, &other)),
        }

        let mut entries = Vec::new();
        loop {
            match self.significant()? {
                Event::Start(e) if e.name().as_ref() == CONSTANT.as_bytes() => {
                    let name = attribute(&e, "name")?;
                    let ty = attribute(&e, "type")?;
                    entries.push((name, self.value(&ty, CONSTANT)?));
                }
                Event::End(e) if e.name().as_ref() == ROOT.as_bytes() => return Ok(entries),
                other => return Err(unexpected(CONSTANT, &other)),
            }
        }
    }

    /// Read the contents of an already-opened `element` up to its end tag.
    fn value(&mut self, ty: &str, element: &str) -> EmitResult<Value> {
        match ty {
            "number" => parse_number(&self.text(element)?).map(Value::Number),
            "string" => self.text(element).map(Value::String),
            "array" => {
                let items = self.array()?;
                match self.significant()? {
                    Event::End(e) if e.name().as_ref() == element.as_bytes() => {
                        Ok(Value::Array(items))
                    }
                    other => Err(unexpected(element, &other)),
                }
            }
            other => Err(EmitError::Malformed(format!("unknown value type '{other}'"))),
        }
    }

    /// Scalar text is read verbatim, surrounding whitespace included.
    fn text(&mut self, element: &str) -> EmitResult<String> {
        let mut text = String::new();
        loop {
            match self.raw()? {
                Event::Text(t) => text.push_str(&t.unescape().map_err(xml_err)?),
                Event::End(e) if e.name().as_ref() == element.as_bytes() => return Ok(text),
                other => return Err(unexpected(element, &other)),
            }
        }
    }

    fn array(&mut self) -> EmitResult<Vec<Value>> {
        match self.significant()? {
            Event::Empty(e) if e.name().as_ref() == ARRAY.as_bytes() => return Ok(Vec::new()),
            Event::Start(e) if e.name().as_ref() == ARRAY.as_bytes() => {}
            other => return Err(unexpected(ARRAY, &other)),
        }

        let mut items = Vec::new();
        loop {
            match self.significant()? {
                Event::Start(e) if e.name().as_ref() == ITEM.as_bytes() => {
                    let ty = attribute(&e, "type")?;
                    items.push(self.value(&ty, ITEM)?);
                }
                // `<item type="string"/>` is an empty string.
                Event::Empty(e) if e.name().as_ref() == ITEM.as_bytes() => {
                    match attribute(&e, "type")?.as_str() {
                        "string" => items.push(Value::String(String::new())),
                        other => {
                            return Err(EmitError::Malformed(format!(
                                "empty <item> of type '{other}'"
                            )))
                        }
                    }
                }
                Event::End(e) if e.name().as_ref() == ARRAY.as_bytes() => return Ok(items),
                other => return Err(unexpected(ITEM, &other)),
            }
        }
    }
}

fn attribute(element: &BytesStart<'_>, key: &str) -> EmitResult<String> {
    let attr = element
        .try_get_attribute(key)
        .map_err(xml_err)?
        .ok_or_else(|| {
            EmitError::Malformed(format!(
                "<{}> is missing the '{key}' attribute",
                String::from_utf8_lossy(element.name().as_ref())
            ))
        })?;
    Ok(attr.unescape_value().map_err(xml_err)?.into_owned())
}

fn unexpected(expected: &str, found: &Event<'_>) -> EmitError {
    EmitError::Malformed(format!("expected <{expected}>, found {found:?}"))
}

/// Integers are written without `.` or an exponent; anything else, including
/// `inf` and `NaN`, is a float.
fn parse_number(text: &str) -> EmitResult<Number> {
    let text = text.trim();
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Number::Int(i));
        }
    }
    text.parse::<f64>()
        .map(Number::Float)
        .map_err(|_| EmitError::Malformed(format!("'{text}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_keeps_form() {
        assert!(matches!(parse_number("4").unwrap(), Number::Int(4)));
        assert!(matches!(parse_number("4.0").unwrap(), Number::Float(f) if f == 4.0));
        assert!(matches!(parse_number("1e20").unwrap(), Number::Float(f) if f == 1e20));
        assert!(parse_number("inf").unwrap().as_f64().is_infinite());
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn test_empty_table_is_empty_root() {
        let xml = to_xml(&SymbolTable::new(), 2).unwrap();
        assert!(xml.contains("<configuration/>"));
        assert!(read_xml(&xml).unwrap().is_empty());
    }
}
