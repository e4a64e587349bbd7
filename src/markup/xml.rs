//! `quick-xml` backed [`MarkupTree`].
//!
//! The document keeps its source text and an index of element spans over it.
//! Reads slice the source; replacements splice it and shift the index, so the
//! original formatting of everything that was not replaced survives byte for
//! byte.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::trace;

use super::MarkupTree;
use super::path::PathExpr;
use crate::core::Json2DocError;

/// Handle to an element of an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    name: String,
    parent: Option<usize>,
    /// `None` once the element was replaced or sat inside a replaced element.
    span: Option<Range<usize>>,
}

/// An XML document held as text plus an element index.
///
/// # Examples
///
/// ```rust
/// use json2doc::markup::{MarkupTree, XmlDocument};
///
/// let mut doc = XmlDocument::parse("<t><r>a</r><r>b</r></t>").unwrap();
/// let rows = doc.select("//r").unwrap();
/// assert_eq!(doc.text_content(rows[1]).unwrap(), "b");
///
/// doc.replace_node(rows[0], "<r>x</r><r>y</r>").unwrap();
/// assert_eq!(doc.serialize(), "<t><r>x</r><r>y</r><r>b</r></t>");
/// assert_eq!(doc.node_markup(rows[1]).unwrap(), "<r>b</r>");
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocument {
    source: String,
    elements: Vec<Element>,
}

impl XmlDocument {
    /// Parse markup and index its elements.
    ///
    /// Fragments with several top-level elements or surrounding text are
    /// accepted; comments, processing instructions and declarations are kept
    /// in the text but not indexed.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::MarkupParse`] for mismatched or unclosed tags
    /// and any other syntax error reported by the reader.
    pub fn parse(markup: &str) -> Result<Self, Json2DocError> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let event_start = reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    elements.push(Element {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        parent: open.last().copied(),
                        span: Some(event_start..event_start),
                    });
                    open.push(elements.len() - 1);
                }
                Ok(Event::End(e)) => {
                    let index = open.pop().ok_or_else(|| Json2DocError::MarkupParse {
                        reason: format!(
                            "unexpected closing tag </{}> at byte {event_start}",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                    })?;
                    let end = reader.buffer_position() as usize;
                    if let Some(span) = elements[index].span.as_mut() {
                        span.end = end;
                    }
                }
                Ok(Event::Empty(e)) => {
                    elements.push(Element {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        parent: open.last().copied(),
                        span: Some(event_start..reader.buffer_position() as usize),
                    });
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Json2DocError::MarkupParse {
                        reason: format!("{e} at byte {}", reader.error_position()),
                    });
                }
            }
        }

        if let Some(&index) = open.last() {
            return Err(Json2DocError::MarkupParse {
                reason: format!("element <{}> is never closed", elements[index].name),
            });
        }

        trace!(elements = elements.len(), "indexed markup");
        Ok(Self {
            source: markup.to_string(),
            elements,
        })
    }

    /// Number of elements still addressable.
    #[must_use]
    pub fn live_elements(&self) -> usize {
        self.elements.iter().filter(|e| e.span.is_some()).count()
    }

    /// Qualified name of an element.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::StaleNode`] for replaced elements.
    pub fn name(&self, node: NodeId) -> Result<&str, Json2DocError> {
        self.span(node)?;
        Ok(&self.elements[node.0].name)
    }

    fn span(&self, node: NodeId) -> Result<Range<usize>, Json2DocError> {
        self.elements.get(node.0).and_then(|e| e.span.clone()).ok_or(Json2DocError::StaleNode)
    }

    /// Element names from the outermost ancestor down to `index`.
    fn lineage(&self, index: usize) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            names.push(self.elements[i].name.as_str());
            current = self.elements[i].parent;
        }
        names.reverse();
        names
    }
}

impl MarkupTree for XmlDocument {
    type Node = NodeId;

    fn select(&self, path: &str) -> Result<Vec<NodeId>, Json2DocError> {
        let path = PathExpr::parse(path)?;
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, e)| e.span.is_some() && path.matches(&self.lineage(*i)))
            .map(|(i, _)| NodeId(i))
            .collect())
    }

    fn text_content(&self, node: NodeId) -> Result<String, Json2DocError> {
        let span = self.span(node)?;
        let fragment = &self.source[span];

        let mut reader = Reader::from_str(fragment);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        let mut text = String::new();
        loop {
            match reader.read_event() {
                Ok(Event::Text(e)) => match e.unescape() {
                    Ok(unescaped) => text.push_str(&unescaped),
                    // Unknown entities stay as written
                    Err(_) => text.push_str(&String::from_utf8_lossy(&e)),
                },
                Ok(Event::CData(e)) => text.push_str(&String::from_utf8_lossy(&e)),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Json2DocError::MarkupParse {
                        reason: format!("{e} in element at byte {}", reader.error_position()),
                    });
                }
            }
        }
        Ok(text)
    }

    fn node_markup(&self, node: NodeId) -> Result<String, Json2DocError> {
        let span = self.span(node)?;
        Ok(self.source[span].to_string())
    }

    fn replace_node(&mut self, node: NodeId, markup: &str) -> Result<(), Json2DocError> {
        let replaced = self.span(node)?;
        self.source.replace_range(replaced.clone(), markup);

        let delta = markup.len() as isize - replaced.len() as isize;
        for element in &mut self.elements {
            let Some(span) = element.span.as_mut() else {
                continue;
            };
            if span.start >= replaced.start && span.end <= replaced.end {
                element.span = None;
            } else if span.start >= replaced.end {
                span.start = span.start.saturating_add_signed(delta);
                span.end = span.end.saturating_add_signed(delta);
            } else if span.end >= replaced.end {
                span.end = span.end.saturating_add_signed(delta);
            }
        }

        trace!(node = node.0, old_len = replaced.len(), new_len = markup.len(), "replaced node");
        Ok(())
    }

    fn serialize(&self) -> String {
        self.source.clone()
    }
}
