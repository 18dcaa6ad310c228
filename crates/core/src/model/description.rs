/// Profile text shown on the result page.
///
/// `display_name` may be decorated, e.g. `"Backend Lead [김철수]"`; the
/// bracketed part is what name matching looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    display_name: String,
    text: String,
}

impl Description {
    #[must_use]
    pub fn new(display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-blank lines of the text, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter(|line| !line.trim().is_empty())
    }
}
