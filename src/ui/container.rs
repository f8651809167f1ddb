use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DisplayError, Result};

pub const DEFAULT_CONTAINER_ID: &str = "messages";
pub const DEFAULT_URL_ATTRIBUTE: &str = "data-url";

/// The page element that supplies the source URL and receives the output.
pub trait Container {
    fn attribute(&self, name: &str) -> Option<String>;
    fn inner_html(&self) -> &str;
    fn set_inner_html(&mut self, html: String);
}

/// Detached element, built directly or lifted out of a host page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    inner_html: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_inner_html(mut self, html: &str) -> Self {
        self.inner_html = html.to_string();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Container for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(&name.to_ascii_lowercase()).cloned()
    }

    fn inner_html(&self) -> &str {
        &self.inner_html
    }

    fn set_inner_html(&mut self, html: String) {
        self.inner_html = html;
    }
}

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("attribute pattern")
});

// Anchored at a `<`; quoted values may contain `>`.
static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^<([A-Za-z][\w-]*)((?:\s+[^\s=>/"']+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#,
    )
    .expect("open tag pattern")
});

static CLOSE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</([A-Za-z][\w-]*)\s*>").expect("close tag pattern"));

/// Elements whose content is text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug)]
enum Tag<'a> {
    Open {
        name: String,
        attributes: &'a str,
        self_closing: bool,
        end: usize,
    },
    Close {
        name: String,
        start: usize,
    },
}

/// Walks the tags of a document, stepping over comments and raw-text content.
struct TagScanner<'a> {
    document: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    fn new(document: &'a str, pos: usize) -> Self {
        Self { document, pos }
    }

    fn skip_past(&mut self, from: usize, needle: &str) -> Option<()> {
        let found = self.document[from..].to_ascii_lowercase().find(needle)?;
        self.pos = from + found + needle.len();
        Some(())
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        loop {
            let at = self.pos + document[self.pos..].find('<')?;
            let rest = &document[at..];

            if rest.starts_with("<!--") {
                // an unterminated comment swallows the rest of the document
                self.skip_past(at + 4, "-->")?;
                continue;
            }

            if let Some(caps) = CLOSE_TAG_RE.captures(rest) {
                self.pos = at + caps[0].len();
                return Some(Tag::Close {
                    name: caps[1].to_ascii_lowercase(),
                    start: at,
                });
            }

            if let Some(caps) = OPEN_TAG_RE.captures(rest) {
                let end = at + caps[0].len();
                let name = caps[1].to_ascii_lowercase();
                let self_closing = !caps[3].is_empty();
                self.pos = end;
                if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    let closing = format!("</{name}");
                    let raw_end = document[end..].to_ascii_lowercase().find(&closing)?;
                    self.pos = end + raw_end;
                }
                return Some(Tag::Open {
                    name,
                    attributes: caps.get(2).map_or("", |m| m.as_str()),
                    self_closing,
                    end,
                });
            }

            self.pos = at + 1;
        }
    }
}

/// An HTML document holding a container element located by id.
///
/// Only the container's inner HTML is rewritten; the rest of the document
/// is reproduced byte for byte.
#[derive(Debug, Clone)]
pub struct HostPage {
    document: String,
    inner_start: usize,
    inner_end: usize,
    element: Element,
}

impl HostPage {
    pub fn parse(document: &str, id: &str) -> Result<Self> {
        let (tag, attributes, inner_start) = TagScanner::new(document, 0)
            .find_map(|tag| match tag {
                Tag::Open {
                    name,
                    attributes,
                    self_closing: false,
                    end,
                } => {
                    let attributes = parse_attributes(attributes);
                    (attributes.get("id").map(String::as_str) == Some(id))
                        .then_some((name, attributes, end))
                }
                _ => None,
            })
            .ok_or_else(|| DisplayError::Config(format!("no element with id \"{id}\" in page")))?;

        let inner_end = find_closing_tag(document, &tag, inner_start).ok_or_else(|| {
            DisplayError::Config(format!("element \"{id}\" has no closing </{tag}>"))
        })?;

        let element = Element {
            tag,
            attributes,
            inner_html: document[inner_start..inner_end].to_string(),
        };

        Ok(Self {
            document: document.to_string(),
            inner_start,
            inner_end,
            element,
        })
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The document with the container's current content spliced in.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.document.len() + self.element.inner_html.len());
        out.push_str(&self.document[..self.inner_start]);
        out.push_str(&self.element.inner_html);
        out.push_str(&self.document[self.inner_end..]);
        out
    }
}

impl Container for HostPage {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name)
    }

    fn inner_html(&self) -> &str {
        self.element.inner_html()
    }

    fn set_inner_html(&mut self, html: String) {
        self.element.set_inner_html(html);
    }
}

fn parse_attributes(raw: &str) -> BTreeMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (caps[1].to_ascii_lowercase(), decode_entities(value))
        })
        .collect()
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Offset of the `</tag>` that closes the element whose content starts at `from`.
fn find_closing_tag(document: &str, tag: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for token in TagScanner::new(document, from) {
        match token {
            Tag::Open {
                name,
                self_closing: false,
                ..
            } if name == tag => depth += 1,
            Tag::Close { name, start } if name == tag => {
                depth -= 1;
                if depth == 0 {
                    return Some(start);
                }
            }
            _ => {}
        }
    }
    None
}
