//! Template parser.
//!
//! Turns template source into a tree of [`Node`]s.

use super::{Result, TemplateError};

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted as-is.
    Text(String),

    /// Variable reference: `{{name}}` or `{{board.name}}`. Escaped on output.
    Variable(String),

    /// `{{#if condition}}...{{else}}...{{/if}}`
    If {
        condition: String,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },

    /// `{{#each items}}...{{/each}}` or `{{#each items as item}}...{{/each}}`
    Each {
        variable: String,
        item_name: Option<String>,
        body: Vec<Node>,
    },

    /// `{{#unless condition}}...{{/unless}}`
    Unless { condition: String, body: Vec<Node> },
}

/// Template parser over a source string.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the whole template.
    pub fn parse(mut self) -> Result<Vec<Node>> {
        let nodes = self.parse_nodes(None)?;
        if self.pos < self.input.len() {
            // A stray closing tag stopped the top-level loop.
            return Err(self.error("unexpected closing tag"));
        }
        Ok(nodes)
    }

    /// Parse nodes until the closing tag of `block` (or `{{else}}` inside
    /// an `if`), or end of input at top level.
    fn parse_nodes(&mut self, block: Option<&str>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while self.pos < self.input.len() {
            if self.at_tag_start("/") {
                if block.is_none() {
                    break;
                }
                return Ok(nodes);
            }
            if block == Some("if") && self.at_else() {
                return Ok(nodes);
            }

            if self.peek_str("\\{{") {
                self.pos += 3;
                nodes.push(Node::Text("{{".to_string()));
            } else if self.peek_str("{{!") {
                self.skip_comment()?;
            } else if self.peek_str("{{") {
                nodes.push(self.parse_tag()?);
            } else {
                let text = self.collect_text();
                if !text.is_empty() {
                    nodes.push(Node::Text(text));
                }
            }
        }

        if let Some(tag) = block {
            return Err(self.error(&format!("unclosed {{{{#{tag}}}}} block")));
        }
        Ok(nodes)
    }

    /// Parse a variable or block-opening tag.
    fn parse_tag(&mut self) -> Result<Node> {
        self.expect("{{")?;
        self.skip_whitespace();

        if self.peek_str("#") {
            self.pos += 1;
            return self.parse_block();
        }

        let name = self.parse_identifier()?;
        self.close_tag()?;
        Ok(Node::Variable(name))
    }

    /// Parse a block after its `{{#`.
    fn parse_block(&mut self) -> Result<Node> {
        let tag = self.parse_identifier()?;
        self.skip_whitespace();

        match tag.as_str() {
            "if" => {
                let condition = self.parse_identifier()?;
                self.close_tag()?;
                let then_branch = self.parse_nodes(Some("if"))?;
                let else_branch = if self.at_else() {
                    self.expect("{{")?;
                    self.skip_whitespace();
                    self.expect("else")?;
                    self.close_tag()?;
                    self.parse_nodes(Some("if"))?
                } else {
                    Vec::new()
                };
                self.end_block("if")?;
                Ok(Node::If {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            "each" => {
                let variable = self.parse_identifier()?;
                self.skip_whitespace();
                let item_name = if self.peek_str("as ") {
                    self.pos += 3;
                    self.skip_whitespace();
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                self.close_tag()?;
                let body = self.parse_nodes(Some("each"))?;
                self.end_block("each")?;
                Ok(Node::Each {
                    variable,
                    item_name,
                    body,
                })
            }
            "unless" => {
                let condition = self.parse_identifier()?;
                self.close_tag()?;
                let body = self.parse_nodes(Some("unless"))?;
                self.end_block("unless")?;
                Ok(Node::Unless { condition, body })
            }
            _ => Err(self.error(&format!("unknown block tag '{tag}'"))),
        }
    }

    /// Consume `{{/tag}}`, rejecting a mismatched closer.
    fn end_block(&mut self, tag: &str) -> Result<()> {
        self.expect("{{")?;
        self.skip_whitespace();
        self.expect("/")?;
        let found = self.parse_identifier()?;
        if found != tag {
            return Err(self.error(&format!("expected {{{{/{tag}}}}} but found {{{{/{found}}}}}")));
        }
        self.close_tag()
    }

    /// Skip `{{! ... }}`.
    fn skip_comment(&mut self) -> Result<()> {
        match self.input[self.pos..].find("}}") {
            Some(end) => {
                self.pos += end + 2;
                Ok(())
            }
            None => Err(self.error("unterminated comment")),
        }
    }

    /// Parse a name: letters, digits, `_`, `-`, `.`, and a leading `@`.
    fn parse_identifier(&mut self) -> Result<String> {
        let start = self.pos;
        for (i, ch) in self.input[self.pos..].char_indices() {
            let ok = ch.is_alphanumeric()
                || matches!(ch, '_' | '-' | '.')
                || (ch == '@' && i == 0);
            if !ok {
                break;
            }
            self.pos = start + i + ch.len_utf8();
        }

        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Collect text up to the next tag or escape.
    fn collect_text(&mut self) -> String {
        let start = self.pos;
        let rest = &self.input[start..];
        let end = [rest.find("{{"), rest.find("\\{{")]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    fn close_tag(&mut self) -> Result<()> {
        self.skip_whitespace();
        self.expect("}}")
    }

    /// At `{{` followed (after optional spaces) by `marker`?
    fn at_tag_start(&self, marker: &str) -> bool {
        self.input[self.pos..]
            .strip_prefix("{{")
            .map(|rest| rest.trim_start().starts_with(marker))
            .unwrap_or(false)
    }

    fn at_else(&self) -> bool {
        self.input[self.pos..]
            .strip_prefix("{{")
            .map(|rest| {
                rest.trim_start()
                    .strip_prefix("else")
                    .map(|r| r.trim_start().starts_with("}}"))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn expect(&mut self, s: &str) -> Result<()> {
        if self.peek_str(s) {
            self.pos += s.len();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{s}'")))
        }
    }

    /// Build a parse error pointing at the current line.
    fn error(&self, message: &str) -> TemplateError {
        let line = self.input[..self.pos].matches('\n').count() + 1;
        let found: String = self.input[self.pos..].chars().take(12).collect();
        TemplateError::Parse(format!("line {line}: {message} near '{found}'"))
    }
}
