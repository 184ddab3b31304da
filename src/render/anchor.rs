// Replaces the children of one element in an HTML document, leaving every
// other byte of the document as it was.
//
// The anchor is found structurally: the document is parsed into a DOM, the
// selector picks exactly one element, and that element's position among
// elements of the same name is mapped back to its tags in the source text.
use crate::model::RenderError;
use scraper::{ElementRef, Html, Selector};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "script", "style", "textarea", "title", "xmp",
];

/// Byte range of the anchor's contents, between its start and end tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorSpan {
    pub inner_start: usize,
    pub inner_end: usize,
}

pub fn replace_anchor_contents(
    document: &str,
    selector: &str,
    contents: &str,
) -> Result<String, RenderError> {
    let span = locate_anchor(document, selector)?;
    let mut out = String::with_capacity(
        document.len() - (span.inner_end - span.inner_start) + contents.len(),
    );
    out.push_str(&document[..span.inner_start]);
    out.push_str(contents);
    out.push_str(&document[span.inner_end..]);
    Ok(out)
}

pub fn locate_anchor(document: &str, selector: &str) -> Result<AnchorSpan, RenderError> {
    let parsed_selector = Selector::parse(selector).map_err(|e| RenderError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;
    let html = Html::parse_document(document);

    let matches: Vec<ElementRef> = html.select(&parsed_selector).collect();
    let target = match matches.as_slice() {
        [one] => *one,
        [] => return Err(RenderError::AnchorNotFound(selector.to_string())),
        many => {
            return Err(RenderError::AnchorAmbiguous {
                selector: selector.to_string(),
                count: many.len(),
            });
        }
    };

    let name = target.value().name().to_ascii_lowercase();
    if VOID_ELEMENTS.contains(&name.as_str()) {
        return Err(RenderError::AnchorNotContainer(selector.to_string()));
    }

    // Same-named elements as the parser built them, in document order.
    let dom_elements: Vec<ElementRef> = html
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name().eq_ignore_ascii_case(&name))
        .collect();
    let ordinal = dom_elements
        .iter()
        .position(|e| e.id() == target.id())
        .ok_or_else(|| RenderError::AnchorNotFound(selector.to_string()))?;

    let tags: Vec<Tag> = TagScanner::new(document).collect();
    let raw_opens: Vec<usize> = tags
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind == TagKind::Start && t.name == name)
        .map(|(i, _)| i)
        .collect();

    // The parser drops some tags (a div inside a select) and moves others (a
    // div inside a table), so source order must agree with the tree before
    // the ordinal can be trusted.
    if raw_opens.len() != dom_elements.len() {
        return Err(RenderError::AnchorMismatch(selector.to_string()));
    }
    for (element, &tag_index) in dom_elements.iter().zip(&raw_opens) {
        let tag = &tags[tag_index];
        let raw_attrs = raw_tag_attrs(&document[tag.start..tag.end], &name);
        if raw_attrs.as_ref() != Some(&sorted_attrs(*element)) {
            return Err(RenderError::AnchorMismatch(selector.to_string()));
        }
    }

    let open_index = raw_opens[ordinal];
    let open = &tags[open_index];
    let mut depth = 1usize;
    for tag in &tags[open_index + 1..] {
        if tag.name != name {
            continue;
        }
        match tag.kind {
            TagKind::Start => depth += 1,
            TagKind::End => {
                depth -= 1;
                if depth == 0 {
                    return Ok(AnchorSpan {
                        inner_start: open.end,
                        inner_end: tag.start,
                    });
                }
            }
        }
    }

    Err(RenderError::AnchorUnbalanced(selector.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Start,
    End,
}

#[derive(Debug)]
struct Tag {
    kind: TagKind,
    name: String,
    /// Offset of `<`.
    start: usize,
    /// Offset just past `>`.
    end: usize,
}

/// Walks the start and end tags of raw HTML text, skipping comments,
/// declarations and the bodies of raw-text elements.
struct TagScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl Iterator for TagScanner<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        loop {
            let start = self.pos + self.src.get(self.pos..)?.find('<')?;
            let rest = &self.src[start..];

            if let Some(comment) = rest.strip_prefix("<!--") {
                self.pos = comment
                    .find("-->")
                    .map_or(self.src.len(), |i| start + 4 + i + 3);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos = rest.find('>').map_or(self.src.len(), |i| start + i + 1);
                continue;
            }

            let (kind, name_start) = if rest.starts_with("</") {
                (TagKind::End, start + 2)
            } else {
                (TagKind::Start, start + 1)
            };
            let after = &self.src[name_start..];
            let name_len = after
                .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .unwrap_or(after.len());
            let raw_name = &after[..name_len];
            if !raw_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                // A stray `<` in text.
                self.pos = start + 1;
                continue;
            }

            let Some(end) = find_tag_end(self.src, name_start + name_len) else {
                self.pos = self.src.len();
                return None;
            };
            let name = raw_name.to_ascii_lowercase();
            self.pos = end;

            if kind == TagKind::Start && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let closing = format!("</{name}");
                self.pos = self.src[end..]
                    .to_ascii_lowercase()
                    .find(&closing)
                    .map_or(self.src.len(), |i| end + i);
            }

            return Some(Tag {
                kind,
                name,
                start,
                end,
            });
        }
    }
}

/// Offset just past the `>` closing a tag, honoring quoted attribute values.
fn find_tag_end(src: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in src.as_bytes()[from..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(from + i + 1),
                _ => {}
            },
        }
    }
    None
}

fn sorted_attrs(element: ElementRef<'_>) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = element
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    attrs.sort();
    attrs
}

/// Attributes of a raw start tag, decoded the same way the document parser does.
fn raw_tag_attrs(start_tag: &str, name: &str) -> Option<Vec<(String, String)>> {
    let fragment = Html::parse_fragment(&format!("{start_tag}</{name}>"));
    fragment
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
        .map(sorted_attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<HTML lang="en">
<head><title>Blog  <div> not a tag </title>
<script>var s = "<div class='blog-grid'></div>";</script>
</head>
<body>
  <!-- <div class="blog-grid"> old markup -->
  <div class="nav"><div>menu</div></div>
  <section id="blog">
    <div class="container">
      <div class="blog-grid" data-note="a > b">
        <div class="blog-card"><div>old</div></div>
        <div class="blog-card">old two</div>
      </div>
    </div>
  </section>
  <footer><div>&copy;   2026</div></footer>
</body>
</HTML>
"#;

    #[test]
    fn replaces_only_the_anchor_contents() {
        let out = replace_anchor_contents(PAGE, "div.blog-grid", "\nNEW\n      ").unwrap();

        let open = r#"<div class="blog-grid" data-note="a > b">"#;
        let (before, tail) = PAGE.split_once(open).unwrap();
        let after = &tail[tail.find("</div>\n    </div>\n  </section>").unwrap()..];

        assert_eq!(out, format!("{before}{open}\nNEW\n      {after}"));
        assert!(!out.contains("old two"));
        assert!(out.contains("<!-- <div class=\"blog-grid\"> old markup -->"));
        assert!(out.contains("<footer><div>&copy;   2026</div></footer>"));
    }

    #[test]
    fn locates_nested_span_exactly() {
        let span = locate_anchor(PAGE, "section#blog .blog-grid").unwrap();
        let inner = &PAGE[span.inner_start..span.inner_end];
        assert!(inner.starts_with("\n        <div class=\"blog-card\"><div>old</div></div>"));
        assert!(inner.ends_with("old two</div>\n      "));
    }

    #[test]
    fn replacement_is_idempotent_for_same_contents() {
        let once = replace_anchor_contents(PAGE, "div.blog-grid", "<p>x</p>").unwrap();
        let twice = replace_anchor_contents(&once, "div.blog-grid", "<p>x</p>").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_anchor_is_reported() {
        let err = locate_anchor(PAGE, "div.news-grid").unwrap_err();
        assert!(matches!(err, RenderError::AnchorNotFound(_)));
    }

    #[test]
    fn ambiguous_anchor_is_reported() {
        let err = locate_anchor(PAGE, "div.blog-card").unwrap_err();
        assert!(matches!(err, RenderError::AnchorAmbiguous { count: 2, .. }));
    }

    #[test]
    fn invalid_selector_is_reported() {
        let err = locate_anchor(PAGE, "div[").unwrap_err();
        assert!(matches!(err, RenderError::Selector { .. }));
    }

    #[test]
    fn void_anchor_is_rejected() {
        let err = locate_anchor(r#"<body><img class="hero" src="x.png"></body>"#, "img.hero").unwrap_err();
        assert!(matches!(err, RenderError::AnchorNotContainer(_)));
    }

    #[test]
    fn unclosed_anchor_is_rejected() {
        let err = locate_anchor(r#"<body><div class="blog-grid"><p>x</p></body>"#, "div.blog-grid")
            .unwrap_err();
        assert!(matches!(err, RenderError::AnchorUnbalanced(_)));
    }

    #[test]
    fn tag_dropped_by_parser_is_not_overwritten() {
        let page = r#"<body><select><div>IGNORED</div></select><div class="blog-grid">OLD</div></body>"#;
        let err = replace_anchor_contents(page, "div.blog-grid", "NEW").unwrap_err();
        assert!(matches!(err, RenderError::AnchorMismatch(_)));
    }

    #[test]
    fn tag_moved_out_of_table_is_not_overwritten() {
        let page = r#"<body><table><tr><td><div class="keep">KEEP</div></td></tr><div class="blog-grid">OLD</div></table></body>"#;
        let err = replace_anchor_contents(page, "div.blog-grid", "NEW").unwrap_err();
        assert!(matches!(err, RenderError::AnchorMismatch(_)));
    }

    #[test]
    fn encoded_attributes_still_match() {
        let page = r#"<body><div title="Fish &amp; Chips">menu</div><div class='blog-grid' title="a &lt; b">OLD</div></body>"#;
        let out = replace_anchor_contents(page, "div.blog-grid", "NEW").unwrap();
        assert_eq!(
            out,
            r#"<body><div title="Fish &amp; Chips">menu</div><div class='blog-grid' title="a &lt; b">NEW</div></body>"#
        );
    }

    #[test]
    fn scanner_skips_comments_and_raw_text() {
        let names: Vec<(TagKind, String)> =
            TagScanner::new("<!-- <a> --><p title='1>0'>x</p><style>p > a {}</style><br/>")
                .map(|t| (t.kind, t.name))
                .collect();
        assert_eq!(
            names,
            vec![
                (TagKind::Start, "p".to_string()),
                (TagKind::End, "p".to_string()),
                (TagKind::Start, "style".to_string()),
                (TagKind::End, "style".to_string()),
                (TagKind::Start, "br".to_string()),
            ]
        );
    }
}
