//! Content markup parser
//!
//! Catalog strings carry a small tag markup (`<title>`, `<hl>`, `<link>`,
//! `<bar/>`, ...). This module parses a markup string once into a tree of
//! text and element nodes, then flattens the tree into styled spans grouped
//! into lines. The typewriter and the renderer both work on the flattened
//! form.
//!
//! The parser is total: unknown tags style nothing but keep their children,
//! a `<` that does not open a tag is literal text, and unterminated elements
//! are closed at end of input.

use bitflags::bitflags;

bitflags! {
    /// Character attributes carried by a span.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct TextAttrs: u8 {
        const BOLD      = 0b0001;
        const DIM       = 0b0010;
        const ITALIC    = 0b0100;
        const UNDERLINE = 0b1000;
    }
}

/// Semantic color role of a span. The active color scheme picks the
/// concrete color at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Default,
    Title,
    Subtitle,
    Highlight,
    Muted,
    Error,
    Link,
    Chip,
    PromptUser,
    PromptPath,
    PromptSymbol,
    CommandText,
}

/// Recognized markup tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Section title line.
    Title,
    /// Secondary heading.
    Sub,
    /// Highlighted inline text.
    Hl,
    /// De-emphasized text.
    Muted,
    /// Diagnostic text (command not found).
    Err,
    /// Bold.
    B,
    /// Underline.
    U,
    /// Small label chip (skill tags).
    Chip,
    /// Hyperlink; `url` attribute carries the target.
    Link,
    /// Skill bar; `level` attribute carries the fill percentage. Always
    /// self-closing.
    Bar,
    /// Unknown tag; children render unstyled.
    Other,
}

impl TagKind {
    fn from_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "sub" => Self::Sub,
            "hl" => Self::Hl,
            "muted" => Self::Muted,
            "err" => Self::Err,
            "b" => Self::B,
            "u" => Self::U,
            "chip" => Self::Chip,
            "link" => Self::Link,
            "bar" => Self::Bar,
            _ => Self::Other,
        }
    }
}

/// A node in the parsed markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of plain text (may contain newlines).
    Text(String),
    /// A tagged element with attributes and children.
    Element {
        tag: TagKind,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Look up an attribute value on an element node.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }
}

/// Parse a markup string into a node tree.
pub fn parse(input: &str) -> Vec<Node> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    parser.parse_children(None)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Parse sibling nodes until end of input or the closing tag of the
    /// enclosing element. A close tag with a mismatched name still closes
    /// the innermost element.
    fn parse_children(&mut self, enclosing: Option<TagKind>) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '<' {
                if self.peek_at(1) == Some('/') {
                    // Close tag: consume it and return to the parent.
                    if enclosing.is_some() {
                        if !text.is_empty() {
                            nodes.push(Node::Text(std::mem::take(&mut text)));
                        }
                        self.consume_close_tag();
                        return nodes;
                    }
                    // Stray close tag at top level: drop it.
                    self.consume_close_tag();
                    continue;
                }
                if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) {
                    if !text.is_empty() {
                        nodes.push(Node::Text(std::mem::take(&mut text)));
                    }
                    nodes.push(self.parse_element());
                    continue;
                }
                // Not a tag opener: literal '<'.
            }
            text.push(ch);
            self.pos += 1;
        }

        if !text.is_empty() {
            nodes.push(Node::Text(text));
        }
        nodes
    }

    fn consume_close_tag(&mut self) {
        // At "</": skip to past the next '>' (or end of input).
        while let Some(ch) = self.bump() {
            if ch == '>' {
                break;
            }
        }
    }

    fn parse_element(&mut self) -> Node {
        self.bump(); // '<'

        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                name.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        let tag = TagKind::from_name(&name);

        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            match self.peek() {
                None => break,
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('/') => {
                    self.bump();
                    if self.peek() == Some('>') {
                        self.bump();
                    }
                    self_closing = true;
                    break;
                }
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some(_) => {
                    if let Some(attr) = self.parse_attr() {
                        attrs.push(attr);
                    }
                }
            }
        }

        // Bar elements never hold children even without the '/'.
        let children = if self_closing || tag == TagKind::Bar {
            Vec::new()
        } else {
            self.parse_children(Some(tag))
        };

        Node::Element {
            tag,
            attrs,
            children,
        }
    }

    fn parse_attr(&mut self) -> Option<(String, String)> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                name.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            // Unparseable character inside a tag: skip it.
            self.bump();
            return None;
        }

        if self.peek() != Some('=') {
            return Some((name, String::new()));
        }
        self.bump(); // '='

        let mut value = String::new();
        if self.peek() == Some('"') {
            self.bump();
            while let Some(ch) = self.bump() {
                if ch == '"' {
                    break;
                }
                value.push(ch);
            }
        } else {
            while let Some(ch) = self.peek() {
                if ch.is_whitespace() || ch == '>' || ch == '/' {
                    break;
                }
                value.push(ch);
                self.pos += 1;
            }
        }
        Some((name, value))
    }
}

// ---------------------------------------------------------------------------
// Flattening: tree -> styled spans grouped into lines
// ---------------------------------------------------------------------------

/// Content of a single span.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanKind {
    /// A styled text run (no newlines).
    Text(String),
    /// A skill bar with a 0-100 fill level. Revealed atomically by the
    /// typewriter; its fill width animates after the reveal completes.
    Bar(u8),
}

/// A styled fragment of a rendered line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub kind: SpanKind,
    pub ink: Ink,
    pub attrs: TextAttrs,
    /// Target URL when this span came from a `<link>` element.
    pub link: Option<String>,
}

impl Span {
    /// Styled text span.
    pub fn styled(text: impl Into<String>, ink: Ink, attrs: TextAttrs) -> Self {
        Self {
            kind: SpanKind::Text(text.into()),
            ink,
            attrs,
            link: None,
        }
    }

    /// Number of reveal units this span contributes.
    pub fn units(&self) -> usize {
        match &self.kind {
            SpanKind::Text(t) => t.chars().count(),
            SpanKind::Bar(_) => 1,
        }
    }
}

/// One rendered line of spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Concatenated text content, bars rendered as empty.
    #[allow(dead_code)]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            if let SpanKind::Text(t) = &span.kind {
                out.push_str(t);
            }
        }
        out
    }
}

#[derive(Clone)]
struct StyleCtx {
    ink: Ink,
    attrs: TextAttrs,
    link: Option<String>,
}

impl StyleCtx {
    fn apply(&self, tag: TagKind, node: &Node) -> Self {
        let mut next = self.clone();
        match tag {
            TagKind::Title => {
                next.ink = Ink::Title;
                next.attrs |= TextAttrs::BOLD;
            }
            TagKind::Sub => next.ink = Ink::Subtitle,
            TagKind::Hl => {
                next.ink = Ink::Highlight;
                next.attrs |= TextAttrs::BOLD;
            }
            TagKind::Muted => {
                next.ink = Ink::Muted;
                next.attrs |= TextAttrs::DIM;
            }
            TagKind::Err => next.ink = Ink::Error,
            TagKind::B => next.attrs |= TextAttrs::BOLD,
            TagKind::U => next.attrs |= TextAttrs::UNDERLINE,
            TagKind::Chip => next.ink = Ink::Chip,
            TagKind::Link => {
                next.ink = Ink::Link;
                next.attrs |= TextAttrs::UNDERLINE;
                next.link = node.attr("url").map(str::to_string);
            }
            TagKind::Bar | TagKind::Other => {}
        }
        next
    }
}

/// Flatten a node tree into lines of styled spans. Text newlines split
/// lines; empty input yields no lines.
pub fn flatten(nodes: &[Node]) -> Vec<Line> {
    let mut lines = vec![Line::default()];
    let ctx = StyleCtx {
        ink: Ink::Default,
        attrs: TextAttrs::empty(),
        link: None,
    };
    flatten_into(nodes, &ctx, &mut lines);
    if lines.len() == 1 && lines[0].spans.is_empty() {
        return Vec::new();
    }
    lines
}

fn flatten_into(nodes: &[Node], ctx: &StyleCtx, lines: &mut Vec<Line>) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                for (i, piece) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Line::default());
                    }
                    if piece.is_empty() {
                        continue;
                    }
                    if let Some(line) = lines.last_mut() {
                        line.spans.push(Span {
                            kind: SpanKind::Text(piece.to_string()),
                            ink: ctx.ink,
                            attrs: ctx.attrs,
                            link: ctx.link.clone(),
                        });
                    }
                }
            }
            Node::Element { tag, children, .. } => {
                if *tag == TagKind::Bar {
                    let level = node
                        .attr("level")
                        .and_then(|v| v.parse::<u8>().ok())
                        .unwrap_or(0)
                        .min(100);
                    if let Some(line) = lines.last_mut() {
                        line.spans.push(Span {
                            kind: SpanKind::Bar(level),
                            ink: ctx.ink,
                            attrs: ctx.attrs,
                            link: None,
                        });
                    }
                    continue;
                }
                let child_ctx = ctx.apply(*tag, node);
                flatten_into(children, &child_ctx, lines);
            }
        }
    }
}

/// Parse and flatten in one step.
pub fn render(input: &str) -> Vec<Line> {
    flatten(&parse(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_single_line() {
        let lines = render("hello world");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].plain_text(), "hello world");
    }

    #[test]
    fn newlines_split_lines() {
        let lines = render("one\ntwo\n\nfour");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].plain_text(), "one");
        assert_eq!(lines[1].plain_text(), "two");
        assert_eq!(lines[2].plain_text(), "");
        assert_eq!(lines[3].plain_text(), "four");
    }

    #[test]
    fn nested_tags_combine_styles() {
        let lines = render("<title>Big <hl>deal</hl></title>");
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].ink, Ink::Title);
        assert!(spans[0].attrs.contains(TextAttrs::BOLD));
        assert_eq!(spans[1].ink, Ink::Highlight);
        assert_eq!(spans[1].kind, SpanKind::Text("deal".to_string()));
    }

    #[test]
    fn link_carries_url() {
        let lines = render("<link url=\"https://example.com\">here</link>");
        let span = &lines[0].spans[0];
        assert_eq!(span.ink, Ink::Link);
        assert_eq!(span.link.as_deref(), Some("https://example.com"));
        assert!(span.attrs.contains(TextAttrs::UNDERLINE));
    }

    #[test]
    fn bar_is_self_closing_with_level() {
        let lines = render("python <bar level=\"85\"/> done");
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].kind, SpanKind::Bar(85));
        assert_eq!(spans[2].kind, SpanKind::Text(" done".to_string()));
    }

    #[test]
    fn bar_level_clamped_to_100() {
        let lines = render("<bar level=\"250\"/>");
        assert_eq!(lines[0].spans[0].kind, SpanKind::Bar(100));
    }

    #[test]
    fn unknown_tag_keeps_children_unstyled() {
        let lines = render("<blink>text</blink>");
        assert_eq!(lines[0].spans[0].ink, Ink::Default);
        assert_eq!(lines[0].plain_text(), "text");
    }

    #[test]
    fn stray_angle_bracket_is_literal() {
        let lines = render("a < b and a <= c");
        assert_eq!(lines[0].plain_text(), "a < b and a <= c");
    }

    #[test]
    fn unterminated_element_closes_at_end() {
        let lines = render("<hl>open ended");
        assert_eq!(lines[0].spans[0].ink, Ink::Highlight);
        assert_eq!(lines[0].plain_text(), "open ended");
    }

    #[test]
    fn span_units_count_chars_and_bars() {
        let lines = render("ab<bar level=\"50\"/>");
        let spans = &lines[0].spans;
        assert_eq!(spans[0].units(), 2);
        assert_eq!(spans[1].units(), 1);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(render("").is_empty());
    }
}
