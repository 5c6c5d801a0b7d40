//! XML decoding for SQS responses.
//!
//! Bodies are parsed into a small element tree and fields are read back with
//! `/`-separated tag paths relative to the document root, e.g.
//! `ListQueuesResult/QueueUrl`. Namespaces are ignored; only local names are
//! matched.

use crate::error::ErrorResponse;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// XML decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("Malformed XML: {message}")]
    Malformed {
        /// Details about the parse failure.
        message: String,
    },

    /// A required element is absent.
    #[error("Missing element: {path}")]
    MissingElement {
        /// Tag path of the element.
        path: String,
    },

    /// An element holds a value of the wrong shape.
    #[error("Invalid value at {path}: {message}")]
    InvalidValue {
        /// Tag path of the element.
        path: String,
        /// What is wrong with it.
        message: String,
    },
}

impl XmlError {
    fn malformed(message: impl Into<String>) -> Self {
        XmlError::Malformed {
            message: message.into(),
        }
    }
}

/// Decoding of a typed response shape from a parsed document.
pub trait FromXml: Sized {
    /// Build the shape from the document root.
    fn from_xml(root: &XmlElement) -> Result<Self, XmlError>;
}

/// An element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local tag name.
    pub name: String,
    /// Character data directly inside this element, exactly as sent.
    ///
    /// Whitespace-only text of an element that has children is dropped.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<XmlElement, XmlError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::malformed("more than one root element"));
                    }
                    stack.push(XmlElement::new(local_name(e.local_name().as_ref())));
                }
                Ok(Event::Empty(e)) => {
                    let element = XmlElement::new(local_name(e.local_name().as_ref()));
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(e)) => {
                    let name = local_name(e.local_name().as_ref());
                    let mut element = stack.pop().ok_or_else(|| {
                        XmlError::malformed(format!("unexpected closing tag </{}>", name))
                    })?;
                    if element.name != name {
                        return Err(XmlError::malformed(format!(
                            "expected </{}>, found </{}>",
                            element.name, name
                        )));
                    }
                    // Indentation between child elements is not content.
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| XmlError::malformed(err.to_string()))?;
                    push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|err| XmlError::malformed(err.to_string()))?;
                    push_text(&mut stack, text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmlError::malformed(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                // Declarations, comments, processing instructions, doctype.
                Ok(_) => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::malformed(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }

        root.ok_or_else(|| XmlError::malformed("document has no root element"))
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every direct child with the given name.
    pub fn children_named<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'b
    where
        'a: 'b,
    {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First element at a `/`-separated path below this element.
    ///
    /// An empty path returns the element itself.
    pub fn find(&self, path: &str) -> Option<&XmlElement> {
        segments(path).try_fold(self, |el, segment| el.child(segment))
    }

    /// Every element at a `/`-separated path below this element, following
    /// all matching branches.
    pub fn find_all(&self, path: &str) -> Vec<&XmlElement> {
        let mut current = vec![self];
        for segment in segments(path) {
            current = current
                .into_iter()
                .flat_map(|el| el.children_named(segment))
                .collect();
        }
        current
    }

    /// Text of the first element at `path`.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.find(path).map(|el| el.text.as_str())
    }

    /// Texts of every element at `path`.
    pub fn texts(&self, path: &str) -> Vec<&str> {
        self.find_all(path)
            .into_iter()
            .map(|el| el.text.as_str())
            .collect()
    }

    /// Text of the first element at `path`, or [`XmlError::MissingElement`].
    pub fn required_text(&self, path: &str) -> Result<&str, XmlError> {
        self.text(path).ok_or_else(|| XmlError::MissingElement {
            path: path.to_string(),
        })
    }

    /// Text at `path` as an owned string, if present.
    pub fn optional_text(&self, path: &str) -> Option<String> {
        self.text(path).map(String::from)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(XmlError::malformed("more than one root element"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::malformed(format!(
            "text outside of the root element: {:?}",
            text.chars().take(64).collect::<String>()
        ))),
    }
}

/// Extract the service error fields from an error document.
///
/// Accepts `ErrorResponse/Error/{Type,Code,Message}` with a sibling
/// `RequestId`, and the older `Response/Errors/Error` layout. The HTTP status
/// fields are left for the caller to fill.
pub fn parse_error_response(root: &XmlElement) -> Result<ErrorResponse, XmlError> {
    let error = root
        .find("Error")
        .or_else(|| root.find("Errors/Error"))
        .ok_or_else(|| XmlError::MissingElement {
            path: format!("{}/Error", root.name),
        })?;

    let code = error.required_text("Code")?.to_string();

    let request_id = root
        .text("RequestId")
        .or_else(|| root.text("RequestID"))
        .or_else(|| error.text("RequestId"))
        .unwrap_or_default()
        .to_string();

    Ok(ErrorResponse {
        error_type: error.text("Type").unwrap_or_default().to_string(),
        code,
        message: error.text("Message").unwrap_or_default().to_string(),
        request_id,
        ..Default::default()
    })
}

/// Request ID from `ResponseMetadata/RequestId`, present on every success body.
pub fn response_request_id(root: &XmlElement) -> Option<String> {
    root.optional_text("ResponseMetadata/RequestId")
}
