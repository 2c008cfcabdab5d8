//! The set of documents opened for a single run
//!
//! Documents come from file paths on the command line and from piped stdin.
//! `Workspace` loads them once and then answers the `DocumentSource`
//! queries: the current document, the explicitly selected ones, or all of
//! them.

use std::fs;
use std::path::PathBuf;

use crate::core::documents::{DocumentRef, DocumentSource};
use crate::error::{GistlyError, Result};

/// Path argument that stands for piped stdin
pub const STDIN_PATH: &str = "-";

#[derive(Debug)]
struct OpenDocument {
    doc: DocumentRef,
    from_stdin: bool,
    named_on_cli: bool,
}

/// Documents loaded for one invocation
#[derive(Debug)]
pub struct Workspace {
    documents: Vec<OpenDocument>,
}

impl Workspace {
    /// Load documents from path arguments plus optional piped stdin
    ///
    /// A `-` path consumes the piped buffer at that position and makes it an
    /// explicitly selected document. Piped input without a `-` is still
    /// opened, but only shows up for the current/active selections.
    /// `stdin_name` names the piped buffer when the user provided one.
    pub fn open(
        paths: &[PathBuf],
        mut stdin: Option<String>,
        stdin_name: Option<String>,
    ) -> Result<Self> {
        let mut documents = Vec::new();
        let mut stdin_claimed = false;

        for path in paths {
            if path.as_os_str() == STDIN_PATH {
                if stdin_claimed {
                    return Err(GistlyError::InvalidInput(
                        "Stdin ('-') can only be given once.".into(),
                    ));
                }
                let content = stdin.take().ok_or_else(|| {
                    GistlyError::InvalidInput("No piped input available for '-'.".into())
                })?;
                documents.push(OpenDocument {
                    doc: DocumentRef {
                        name: stdin_name.clone(),
                        content,
                    },
                    from_stdin: true,
                    named_on_cli: true,
                });
                stdin_claimed = true;
            } else {
                let content = fs::read_to_string(path).map_err(|e| {
                    GistlyError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
                })?;
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                documents.push(OpenDocument {
                    doc: DocumentRef { name, content },
                    from_stdin: false,
                    named_on_cli: true,
                });
            }
        }

        // Piped input that no '-' claimed still counts as an open document
        if let Some(content) = stdin {
            documents.push(OpenDocument {
                doc: DocumentRef {
                    name: stdin_name,
                    content,
                },
                from_stdin: true,
                named_on_cli: false,
            });
        }

        Ok(Self { documents })
    }
}

impl DocumentSource for Workspace {
    /// The piped buffer when input was piped, otherwise the first document
    fn current_document(&self) -> Option<DocumentRef> {
        self.documents
            .iter()
            .find(|d| d.from_stdin)
            .or_else(|| self.documents.first())
            .map(|d| d.doc.clone())
    }

    fn selected_documents(&self) -> Vec<DocumentRef> {
        self.documents
            .iter()
            .filter(|d| d.named_on_cli)
            .map(|d| d.doc.clone())
            .collect()
    }

    fn active_documents(&self) -> Vec<DocumentRef> {
        self.documents.iter().map(|d| d.doc.clone()).collect()
    }
}
