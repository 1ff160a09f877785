// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use super::text::unescape;
use super::{AttrPositions, ElementPositions, Error, XmlElement, XmlNode, XmlText};
use crate::interval::text_pos;
use crate::Interval;

fn qname(prefix: &StrSpan, local: &StrSpan) -> String {
    if prefix.as_str().is_empty() {
        local.as_str().to_string()
    } else {
        format!("{}:{}", prefix.as_str(), local.as_str())
    }
}

fn qname_interval(prefix: &StrSpan, local: &StrSpan) -> Interval {
    if prefix.as_str().is_empty() {
        Interval::new(local.start(), local.end())
    } else {
        Interval::new(prefix.start(), local.end())
    }
}

struct ParserData<'a> {
    text: &'a str,
    stack: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl<'a> ParserData<'a> {
    // Attaches a finished element to its parent or makes it the root.
    fn attach(&mut self, elem: XmlElement) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(XmlNode::Element(elem)),
            None => self.root = Some(elem),
        }
    }

    fn push_text_node(&mut self, node: XmlNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }
}

/// Parses a text into a positioned XML tree.
///
/// Returns `None` when the text doesn't contain any element.
/// Top-level comments, processing instructions and DTD are skipped.
pub fn parse(text: &str) -> Result<Option<XmlElement>, Error> {
    let mut data = ParserData {
        text,
        stack: Vec::new(),
        root: None,
    };

    for token in Tokenizer::from(text) {
        process_token(token?, &mut data)?;
    }

    if let Some(elem) = data.stack.pop() {
        return Err(Error::UnclosedElement {
            name: elem.name,
            pos: text_pos(text, elem.positions.element.start),
        });
    }

    Ok(data.root)
}

fn process_token(token: Token, data: &mut ParserData) -> Result<(), Error> {
    match token {
        Token::ElementStart { prefix, local, span } => {
            if data.stack.is_empty() && data.root.is_some() {
                return Err(Error::MultipleRoots {
                    pos: text_pos(data.text, span.start()),
                });
            }

            let open = Interval::new(span.start(), span.end());
            data.stack.push(XmlElement {
                name: qname(&prefix, &local),
                attrs: IndexMap::new(),
                children: Vec::new(),
                positions: ElementPositions {
                    element: open,
                    open_element: open,
                    close_element: None,
                    start_tag: qname_interval(&prefix, &local),
                    end_tag: None,
                    attrs: IndexMap::new(),
                },
            });
        }
        Token::Attribute { prefix, local, value, .. } => {
            let elem = match data.stack.last_mut() {
                Some(elem) => elem,
                None => return Ok(()),
            };

            let name = qname(&prefix, &local);
            if elem.attrs.contains_key(&name) {
                return Err(Error::DuplicatedAttribute {
                    name,
                    pos: text_pos(data.text, prefix.start().min(local.start())),
                });
            }

            let quote = data
                .text
                .as_bytes()
                .get(value.start().wrapping_sub(1))
                .map(|c| *c as char)
                .unwrap_or('"');

            elem.positions.attrs.insert(
                name.clone(),
                AttrPositions {
                    name: qname_interval(&prefix, &local),
                    value: Interval::new(value.start(), value.end()),
                    quote,
                },
            );
            elem.attrs.insert(name, unescape(value.as_str()).into_owned());
        }
        Token::ElementEnd { end, span } => match end {
            ElementEnd::Open => {
                if let Some(elem) = data.stack.last_mut() {
                    elem.positions.open_element.end = span.end();
                    elem.positions.element.end = span.end();
                }
            }
            ElementEnd::Empty => {
                if let Some(mut elem) = data.stack.pop() {
                    elem.positions.open_element.end = span.end();
                    elem.positions.element.end = span.end();
                    data.attach(elem);
                }
            }
            ElementEnd::Close(prefix, local) => {
                let name = qname(&prefix, &local);
                let mut elem = match data.stack.pop() {
                    Some(elem) => elem,
                    None => {
                        return Err(Error::UnmatchedCloseTag {
                            name,
                            pos: text_pos(data.text, span.start()),
                        });
                    }
                };

                if elem.name != name {
                    return Err(Error::UnexpectedCloseTag {
                        expected: elem.name,
                        actual: name,
                        pos: text_pos(data.text, span.start()),
                    });
                }

                elem.positions.close_element = Some(Interval::new(span.start(), span.end()));
                elem.positions.end_tag = Some(qname_interval(&prefix, &local));
                elem.positions.element.end = span.end();
                data.attach(elem);
            }
        },
        Token::Text { text } => {
            if data.stack.is_empty() {
                if !text.as_str().trim().is_empty() {
                    return Err(Error::TextOutsideRoot {
                        pos: text_pos(data.text, text.start()),
                    });
                }
                return Ok(());
            }

            data.push_text_node(XmlNode::Text(XmlText {
                text: unescape(text.as_str()).into_owned(),
                interval: Interval::new(text.start(), text.end()),
            }));
        }
        Token::Comment { text, span } => {
            data.push_text_node(XmlNode::Comment(XmlText {
                text: text.as_str().to_string(),
                interval: Interval::new(span.start(), span.end()),
            }));
        }
        Token::Cdata { text, span } => {
            data.push_text_node(XmlNode::Cdata(XmlText {
                text: text.as_str().to_string(),
                interval: Interval::new(span.start(), span.end()),
            }));
        }
        _ => {}
    }

    Ok(())
}
