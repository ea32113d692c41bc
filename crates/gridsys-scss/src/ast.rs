//! Minimal SCSS syntax tree and its printer.
//!
//! Only the constructs the generator emits are modelled. Nested rules indent
//! each child line by two spaces; blank lines stay empty so the output has no
//! trailing whitespace.

use std::fmt;

const INDENT: &str = "  ";

/// One SCSS statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `// text`
    Comment(String),
    /// `property: value;`
    Declaration { property: String, value: String },
    /// `$name: value;`
    Variable { name: String, value: String },
    /// `prelude { children }`, for selectors and at-rules alike.
    Rule { prelude: String, children: Vec<Node> },
    /// Pre-formatted source, printed as is.
    Verbatim(String),
    /// Empty separator line.
    Blank,
}

impl Node {
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    pub fn declaration(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Declaration {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn rule(prelude: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Rule {
            prelude: prelude.into(),
            children,
        }
    }

    /// Property name for declarations, `None` for everything else.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::Declaration { property, .. } => Some(property),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "// {text}"),
            Self::Declaration { property, value } => write!(f, "{property}: {value};"),
            Self::Variable { name, value } => write!(f, "${name}: {value};"),
            Self::Verbatim(source) => f.write_str(source),
            Self::Blank => Ok(()),
            Self::Rule { prelude, children } => {
                write!(f, "{prelude} {{")?;
                if !children.is_empty() {
                    f.write_str("\n")?;
                    for (index, child) in children.iter().enumerate() {
                        if index > 0 {
                            f.write_str("\n")?;
                        }
                        write_indented(f, &child.to_string())?;
                    }
                    f.write_str("\n")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_indented(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            f.write_str("\n")?;
        }
        if !line.is_empty() {
            f.write_str(INDENT)?;
            f.write_str(line)?;
        }
    }
    Ok(())
}

/// Top-level statement list; printed one statement per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    nodes: Vec<Node>,
}

impl Stylesheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Push `rules` separated by blank lines. An empty list still occupies
    /// one (blank) line.
    pub fn push_separated(&mut self, rules: Vec<Node>) {
        if rules.is_empty() {
            self.nodes.push(Node::Blank);
            return;
        }
        for (index, rule) in rules.into_iter().enumerate() {
            if index > 0 {
                self.nodes.push(Node::Blank);
            }
            self.nodes.push(rule);
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
