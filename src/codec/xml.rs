//! XML encoding and decoding on top of quick-xml events.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{CodecError, Format, Payload, RESOURCE_ROOT};
use crate::fields::XmlFields;
use crate::record::ResourceRecord;

type XmlWriter = Writer<Vec<u8>>;

pub(super) fn encode(root: &str, payload: &Payload) -> Result<Vec<u8>, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    match payload {
        Payload::Record(record) => write_record(&mut writer, root, record)?,
        Payload::Collection(records) => {
            write(&mut writer, Event::Start(BytesStart::new(root)))?;
            for record in records {
                write_record(&mut writer, RESOURCE_ROOT, record)?;
            }
            write(&mut writer, Event::End(BytesEnd::new(root)))?;
        }
        Payload::Message(confirmation) => {
            write(&mut writer, Event::Start(BytesStart::new(root)))?;
            write_text_element(&mut writer, "message", &confirmation.message)?;
            write(&mut writer, Event::End(BytesEnd::new(root)))?;
        }
    }

    Ok(writer.into_inner())
}

fn write_record(writer: &mut XmlWriter, label: &str, record: &ResourceRecord) -> Result<(), CodecError> {
    write(writer, Event::Start(BytesStart::new(label)))?;
    write_text_element(writer, "id", &record.id.to_string())?;
    if let Some(name) = &record.name {
        write_text_element(writer, "name", name)?;
    }
    if let Some(description) = &record.description {
        write_text_element(writer, "description", description)?;
    }
    write_text_element(writer, "quantity", &record.quantity.to_string())?;
    write_text_element(writer, "price", &record.price.to_string())?;
    write(writer, Event::End(BytesEnd::new(label)))
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), CodecError> {
    if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
        return Err(CodecError::Encode(format!(
            "character {:?} is not allowed in <{}>",
            c, name
        )));
    }
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

/// The `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), CodecError> {
    writer
        .write_event(event)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode an XML body into its fields.
///
/// The fields live in a `<resource>` element, which is either the document
/// root or the single `<resource>` child of a wrapper root.
pub fn decode(body: &[u8]) -> Result<XmlFields, CodecError> {
    let root = parse_document(body)?;
    let resource = resource_element(root)?;

    let mut fields = XmlFields::default();
    for child in resource.children {
        if !child.children.is_empty() {
            continue;
        }
        let slot = match child.name.as_str() {
            "name" => &mut fields.name,
            "description" => &mut fields.description,
            "quantity" => &mut fields.quantity,
            "price" => &mut fields.price,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(child.text);
        }
    }
    Ok(fields)
}

/// Minimal element tree; attributes are not kept.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

fn resource_element(root: Element) -> Result<Element, CodecError> {
    if root.name == RESOURCE_ROOT {
        return Ok(root);
    }
    let mut nested = root
        .children
        .into_iter()
        .filter(|child| child.name == RESOURCE_ROOT);
    match (nested.next(), nested.next()) {
        (Some(resource), None) => Ok(resource),
        _ => Err(CodecError::MissingElement(RESOURCE_ROOT)),
    }
}

fn malformed(reason: impl std::fmt::Display) -> CodecError {
    CodecError::malformed(Format::Xml, reason)
}

fn element(start: &BytesStart<'_>) -> Result<Element, CodecError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(malformed)?
        .to_string();
    Ok(Element {
        name,
        ..Element::default()
    })
}

fn parse_document(body: &[u8]) -> Result<Element, CodecError> {
    let text = std::str::from_utf8(body).map_err(malformed)?;
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                stack.push(element(&start)?);
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                close(&mut stack, &mut root, element(&start)?);
            }
            Event::End(_) => {
                let finished = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without opening tag"))?;
                close(&mut stack, &mut root, finished);
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&value),
                    None if value.trim().is_empty() => {}
                    None => return Err(malformed("text outside of the root element")),
                }
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let value = std::str::from_utf8(&bytes).map_err(malformed)?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(value),
                    None => return Err(malformed("CDATA outside of the root element")),
                }
            }
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn close(stack: &mut [Element], root: &mut Option<Element>, finished: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(finished),
        None => *root = Some(finished),
    }
}
