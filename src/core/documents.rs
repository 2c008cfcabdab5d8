//! Document model shared by every publish path
//!
//! A document is a named piece of text that may end up in a gist. Where the
//! documents come from (files, piped stdin) is abstracted behind the
//! `DocumentSource` trait so the publish pipeline can be tested without
//! touching the filesystem.

/// Name used for documents that were never given one
pub const UNTITLED_NAME: &str = "untitled";

/// Gist visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Anyone can see the gist
    #[default]
    Public,
    /// Only people with the link can see the gist
    Private,
}

impl Visibility {
    /// Whether this maps to `"public": true` on the GitHub API
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// Capitalized label for notifications ("Public" / "Private")
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// A single piece of text headed for a gist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Display name; `None` or empty falls back to [`UNTITLED_NAME`]
    pub name: Option<String>,
    /// Full text content
    pub content: String,
}

impl DocumentRef {
    /// Create a named document
    pub fn named(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: content.into(),
        }
    }

    /// Create a document without a name
    pub fn unnamed(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: content.into(),
        }
    }

    /// Name to publish under, with the untitled fallback applied
    pub fn resolved_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNTITLED_NAME,
        }
    }
}

/// Which documents a publish should pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSelection {
    /// The single document currently in focus
    Current,
    /// The documents explicitly named for this run
    Selected,
    /// Every open document
    Active,
}

impl DocumentSelection {
    /// Resolve this selection against a document source
    pub fn resolve<S: DocumentSource>(&self, source: &S) -> Vec<DocumentRef> {
        match self {
            DocumentSelection::Current => source.current_document().into_iter().collect(),
            DocumentSelection::Selected => source.selected_documents(),
            DocumentSelection::Active => source.active_documents(),
        }
    }
}

/// Where documents come from
pub trait DocumentSource {
    /// The document currently in focus, if any
    fn current_document(&self) -> Option<DocumentRef>;

    /// Documents explicitly named for this run
    fn selected_documents(&self) -> Vec<DocumentRef>;

    /// Every open document
    fn active_documents(&self) -> Vec<DocumentRef>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_name_prefers_given_name() {
        let doc = DocumentRef::named("notes.md", "hi");
        assert_eq!(doc.resolved_name(), "notes.md");
    }

    #[test]
    fn test_resolved_name_falls_back_to_untitled() {
        assert_eq!(DocumentRef::unnamed("hi").resolved_name(), UNTITLED_NAME);
        assert_eq!(DocumentRef::named("", "hi").resolved_name(), UNTITLED_NAME);
    }

    #[test]
    fn test_visibility_labels() {
        assert!(Visibility::Public.is_public());
        assert!(!Visibility::Private.is_public());
        assert_eq!(Visibility::Public.label(), "Public");
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    struct StubSource;

    impl DocumentSource for StubSource {
        fn current_document(&self) -> Option<DocumentRef> {
            Some(DocumentRef::named("focused.rs", "fn main() {}"))
        }

        fn selected_documents(&self) -> Vec<DocumentRef> {
            vec![
                DocumentRef::named("a.txt", "a"),
                DocumentRef::named("b.txt", "b"),
            ]
        }

        fn active_documents(&self) -> Vec<DocumentRef> {
            vec![
                DocumentRef::named("a.txt", "a"),
                DocumentRef::named("b.txt", "b"),
                DocumentRef::unnamed("scratch"),
            ]
        }
    }

    #[test]
    fn test_selection_resolves_against_source() {
        assert_eq!(DocumentSelection::Current.resolve(&StubSource).len(), 1);
        assert_eq!(DocumentSelection::Selected.resolve(&StubSource).len(), 2);
        assert_eq!(DocumentSelection::Active.resolve(&StubSource).len(), 3);
    }
}
