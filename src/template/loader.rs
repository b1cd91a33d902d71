//! Page template loading.
//!
//! The two pages ship embedded in the binary. A template directory may
//! override either of them with a file of the same name.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{Result, TemplateContext, TemplateEngine, TemplateError};

/// Board list page with the creation form.
pub const BOARDS_PAGE: &str = "boards.html";

/// Board detail page with comments and the comment form.
pub const BOARD_PAGE: &str = "board.html";

const BUILTIN_PAGES: [(&str, &str); 2] = [
    (BOARDS_PAGE, include_str!("../../templates/boards.html")),
    (BOARD_PAGE, include_str!("../../templates/board.html")),
];

/// Parsed page templates, ready to render.
#[derive(Debug)]
pub struct PageTemplates {
    engine: TemplateEngine,
}

impl PageTemplates {
    /// Load the built-in pages.
    pub fn builtin() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        for (name, content) in BUILTIN_PAGES {
            engine.load(name, content)?;
        }
        Ok(Self { engine })
    }

    /// Load the built-in pages, then replace any that exist in `dir`.
    ///
    /// A missing directory is not an error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pages = Self::builtin()?;

        if !dir.is_dir() {
            debug!("Template directory {:?} not found, using built-in pages", dir);
            return Ok(pages);
        }

        for (name, _) in BUILTIN_PAGES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path)
                .map_err(|e| TemplateError::Load(format!("{}: {e}", path.display())))?;
            pages.engine.load(name, &content)?;
            info!("Using template override {:?}", path);
        }

        Ok(pages)
    }

    /// Render a page by name.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        self.engine.render(name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Value;
    use tempfile::TempDir;

    fn boards_context() -> TemplateContext {
        let mut context = TemplateContext::new();
        context.set(
            "boards",
            Value::from(vec![Value::object([
                ("id", Value::from(1)),
                ("name", Value::from("Puppies & <Kittens>")),
                ("creator", Value::from("alice")),
                ("created_at", Value::from("2024/01/15 10:30")),
            ])]),
        );
        context
    }

    #[test]
    fn test_builtin_pages_parse() {
        let pages = PageTemplates::builtin().unwrap();
        assert!(pages.engine.has_template(BOARDS_PAGE));
        assert!(pages.engine.has_template(BOARD_PAGE));
    }

    #[test]
    fn test_builtin_boards_page_renders() {
        let pages = PageTemplates::builtin().unwrap();
        let html = pages.render(BOARDS_PAGE, &boards_context()).unwrap();

        assert!(html.contains(r#"href="/1""#));
        assert!(html.contains("Puppies &amp; &lt;Kittens&gt;"));
        assert!(html.contains(r#"name="board_name""#));
    }

    #[test]
    fn test_builtin_board_page_renders() {
        let pages = PageTemplates::builtin().unwrap();
        let mut context = TemplateContext::new();
        context.set(
            "board",
            Value::object([
                ("id", Value::from(4)),
                ("name", Value::from("Puppies")),
                ("creator", Value::from("alice")),
                ("created_at", Value::from("")),
            ]),
        );
        context.set(
            "comments",
            Value::from(vec![Value::object([
                ("creator", "bob"),
                ("text", "Cute!"),
                ("created_at", "2024/01/15 10:31"),
            ])]),
        );

        let html = pages.render(BOARD_PAGE, &context).unwrap();
        assert!(html.contains("Puppies"));
        assert!(html.contains("Cute!"));
        assert!(html.contains(r#"action="/4""#));
        assert!(html.contains(r#"name="comment""#));
    }

    #[test]
    fn test_load_dir_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(BOARDS_PAGE),
            "{{#each boards}}[{{name}}]{{/each}}",
        )
        .unwrap();

        let pages = PageTemplates::load_dir(dir.path()).unwrap();
        assert_eq!(
            pages.render(BOARDS_PAGE, &boards_context()).unwrap(),
            "[Puppies &amp; &lt;Kittens&gt;]"
        );
        // No override for the detail page, built-in stays
        assert!(pages.engine.has_template(BOARD_PAGE));
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let pages = PageTemplates::load_dir("/nonexistent/corkboard/templates").unwrap();
        assert!(pages.engine.has_template(BOARDS_PAGE));
    }

    #[test]
    fn test_load_dir_bad_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BOARD_PAGE), "{{#each comments}}").unwrap();

        let result = PageTemplates::load_dir(dir.path());
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn test_render_unknown_page() {
        let pages = PageTemplates::builtin().unwrap();
        let result = pages.render("missing.html", &TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }
}
