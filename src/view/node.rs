use html_escape::{encode_double_quoted_attribute, encode_text};

/// Declarative markup tree. Text is always escaped when rendered, so
/// user content can never inject markup.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    /// Identity used by the diff to match nodes across renders.
    pub key: Option<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["input", "br", "img", "hr"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            key: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(attr) => attr.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Element(el) => el.key.as_deref(),
            Node::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&encode_text(text)),
        }
    }

    /// Concatenated text of this subtree, unescaped.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for elements matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if pred(el) {
                found.push(el);
            }
            for child in &el.children {
                child.collect(pred, found);
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find_all(&|el| el.get_attr("id") == Some(id))
            .into_iter()
            .next()
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let el = match self {
            Node::Element(el) => el,
            Node::Text(_) => return None,
        };
        if el.get_attr("id") == Some(id) {
            return Some(el);
        }
        el.children.iter_mut().find_map(|child| child.find_by_id_mut(id))
    }
}

pub fn render_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}
