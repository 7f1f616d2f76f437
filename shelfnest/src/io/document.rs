use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use svg::node::element::tag::Type;
use svg::parser::Event;

use crate::{NestError, Result};

/// Owned tree of an SVG document, enough to extract shapes from and to re-emit its content.
///
/// Attribute values and text hold the decoded characters, entity references are resolved while
/// parsing and escaped again by the [`fmt::Display`] implementations.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    /// Identifier used in logs and errors, usually the file stem
    pub id: String,
    /// The root `svg` element
    pub root: SvgElement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<SvgNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SvgNode {
    Element(SvgElement),
    Text(String),
}

impl SvgDocument {
    pub fn parse(id: impl Into<String>, content: &str) -> Result<Self> {
        let id = id.into();
        let parse_err = |message: String| NestError::Parse {
            document: id.clone(),
            message,
        };

        // open elements, the last one is the innermost
        let mut stack: Vec<SvgElement> = vec![];
        let mut root = None;

        for event in svg::read(content)? {
            match event {
                Event::Tag(name, tag_type, attributes) => {
                    let attributes = attributes
                        .iter()
                        .map(|(k, v)| (k.clone(), unescape(v).into_owned()))
                        .collect();
                    match tag_type {
                        Type::Start => stack.push(SvgElement {
                            name: name.to_string(),
                            attributes,
                            children: vec![],
                        }),
                        Type::Empty => {
                            let element = SvgElement {
                                name: name.to_string(),
                                attributes,
                                children: vec![],
                            };
                            match stack.last_mut() {
                                Some(parent) => parent.children.push(SvgNode::Element(element)),
                                None => root = root.or(Some(element)),
                            }
                        }
                        Type::End => {
                            let element = stack
                                .pop()
                                .ok_or_else(|| parse_err(format!("unexpected closing tag </{name}>")))?;
                            if element.name != name {
                                return Err(parse_err(format!(
                                    "closing tag </{name}> does not match <{}>",
                                    element.name
                                )));
                            }
                            match stack.last_mut() {
                                Some(parent) => parent.children.push(SvgNode::Element(element)),
                                None => root = root.or(Some(element)),
                            }
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(SvgNode::Text(unescape(text).into_owned()));
                    }
                }
                Event::Error(e) => return Err(parse_err(e.to_string())),
                Event::Comment(_) | Event::Declaration(_) | Event::Instruction(_) => {}
            }
        }

        if let Some(unclosed) = stack.last() {
            return Err(parse_err(format!("unclosed element <{}>", unclosed.name)));
        }
        match root {
            Some(root) if root.name == "svg" => Ok(SvgDocument { id, root }),
            Some(root) => Err(parse_err(format!(
                "root element is <{}>, expected <svg>",
                root.name
            ))),
            None => Err(parse_err("document contains no elements".into())),
        }
    }

    /// Reads and parses the file at `path`, the file stem becomes the document's identifier.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        SvgDocument::parse(id, &content)
    }
}

impl SvgElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute parsed as a base-10 float, `None` when absent or malformed.
    pub fn num_attr(&self, name: &str) -> Option<f64> {
        self.attr(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(|c| match c {
            SvgNode::Element(e) => Some(e),
            SvgNode::Text(_) => None,
        })
    }

    /// All elements below `self`, depth-first in document order.
    pub fn descendants(&self) -> Vec<&SvgElement> {
        let mut found = vec![];
        self.collect_descendants(&mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, found: &mut Vec<&'a SvgElement>) {
        for child in self.child_elements() {
            found.push(child);
            child.collect_descendants(found);
        }
    }
}

impl fmt::Display for SvgElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, r#" {name}="{}""#, escape(value, true))?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for SvgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgNode::Element(e) => fmt::Display::fmt(e, f),
            SvgNode::Text(t) => f.write_str(&escape(t, false)),
        }
    }
}

/// Resolves the predefined XML entities and numeric character references.
/// Anything else starting with `&` is kept as is.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];
        let resolved = rest.find(';').and_then(|end| {
            let c = match &rest[1..end] {
                "amp" => '&',
                "lt" => '<',
                "gt" => '>',
                "quot" => '"',
                "apos" => '\'',
                r if r.starts_with("#x") || r.starts_with("#X") => {
                    char::from_u32(u32::from_str_radix(&r[2..], 16).ok()?)?
                }
                r if r.starts_with('#') => char::from_u32(r[1..].parse().ok()?)?,
                _ => return None,
            };
            Some((c, end))
        });
        match resolved {
            Some((c, end)) => {
                decoded.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

fn escape(value: &str, in_attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (in_attribute && c == '"');
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Splits a list of numbers separated by commas and/or whitespace.
/// `None` if any of the entries is not a number.
pub(crate) fn parse_number_list(list: &str) -> Option<Vec<f64>> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements() {
        let doc = SvgDocument::parse(
            "nested",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
                <g id="outer"><rect width="4" height="5"/><g><circle r="1"/></g></g>
            </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.root.attr("viewBox"), Some("0 0 10 10"));
        let names: Vec<_> = doc.root.descendants().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["g", "rect", "g", "circle"]);
    }

    #[test]
    fn rejects_non_svg_root() {
        let result = SvgDocument::parse("html", "<html><body/></html>");
        assert!(matches!(result, Err(NestError::Parse { .. })));
    }

    #[test]
    fn malformed_numbers_are_absent() {
        let doc = SvgDocument::parse("units", r#"<svg width="90mm" height=" 12.5 "/>"#).unwrap();
        assert_eq!(doc.root.num_attr("width"), None);
        assert_eq!(doc.root.num_attr("height"), Some(12.5));
        assert_eq!(doc.root.num_attr("missing"), None);
    }

    #[test]
    fn entities_are_decoded() {
        let doc = SvgDocument::parse(
            "entities",
            r#"<svg><text style="font-family:&quot;A&quot;">a &amp; b &lt; c &#65;&#x42; &nbsp;</text></svg>"#,
        )
        .unwrap();
        let text = doc.root.child_elements().next().unwrap();
        assert_eq!(text.attr("style"), Some(r#"font-family:"A""#));
        assert_eq!(text.children, vec![SvgNode::Text("a & b < c AB &nbsp;".into())]);
    }

    #[test]
    fn display_escapes_once() {
        let source = r#"<svg><text style="font-family:&quot;A&quot;">a &amp; b &lt; c</text></svg>"#;
        let doc = SvgDocument::parse("escaped", source).unwrap();
        assert_eq!(doc.root.to_string(), source);

        let reparsed = SvgDocument::parse("escaped", &doc.root.to_string()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn number_lists() {
        assert_eq!(
            parse_number_list("0,0 10,0 10 10"),
            Some(vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0])
        );
        assert_eq!(parse_number_list("1, 2,x"), None);
        assert_eq!(parse_number_list(""), Some(vec![]));
    }
}
