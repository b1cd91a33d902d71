//! Template renderer module.
//!
//! Renders parsed template nodes with the given context. Variable output is
//! HTML-escaped; literal template text is emitted unchanged.

use super::parser::Node;
use super::{escape_html, Result, TemplateContext, TemplateError, Value};

/// Template renderer.
pub struct Renderer<'a> {
    context: &'a TemplateContext,
}

impl<'a> Renderer<'a> {
    /// Create a new renderer with the given context.
    pub fn new(context: &'a TemplateContext) -> Self {
        Self { context }
    }

    /// Render a list of nodes to a string.
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        let mut output = String::new();
        for node in nodes {
            self.render_node(node, &mut output)?;
        }
        Ok(output)
    }

    fn render_node(&self, node: &Node, output: &mut String) -> Result<()> {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Variable(name) => {
                // Missing variables render as nothing
                if let Some(value) = self.context.get(name) {
                    output.push_str(&escape_html(&value.to_display_string()));
                }
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.truthy(condition) {
                    then_branch
                } else {
                    else_branch
                };
                output.push_str(&self.render(branch)?);
            }
            Node::Unless { condition, body } => {
                if !self.truthy(condition) {
                    output.push_str(&self.render(body)?);
                }
            }
            Node::Each {
                variable,
                item_name,
                body,
            } => self.render_each(variable, item_name.as_deref(), body, output)?,
        }
        Ok(())
    }

    fn truthy(&self, condition: &str) -> bool {
        self.context
            .get(condition)
            .map(Value::is_truthy)
            .unwrap_or(false)
    }

    /// Render an each block once per list item.
    fn render_each(
        &self,
        variable: &str,
        item_name: Option<&str>,
        body: &[Node],
        output: &mut String,
    ) -> Result<()> {
        let list = match self.context.get(variable) {
            Some(Value::List(items)) => items,
            Some(Value::Null) | None => return Ok(()),
            Some(_) => {
                return Err(TemplateError::Render(format!("'{variable}' is not a list")));
            }
        };

        for (index, item) in list.iter().enumerate() {
            let mut child = self.context.child();
            child.set("@index", index as i64);
            child.set("@first", index == 0);
            child.set("@last", index + 1 == list.len());

            match item_name {
                Some(name) => child.set(name, item.clone()),
                None => {
                    // Unnamed loops expose object fields at top level
                    if let Value::Object(fields) = item {
                        for (key, value) in fields {
                            child.set(key.clone(), value.clone());
                        }
                    }
                    child.set("this", item.clone());
                }
            }

            output.push_str(&Renderer::new(&child).render(body)?);
        }

        Ok(())
    }
}
