//! BoardContext - collaborator handles for a single request
//!
//! A context carries access, not logic: the two store handles, the block
//! syntax of the host document format, and the acting author. It is built
//! per request and dropped with it, so nothing fetched through it — field
//! definitions included — outlives the request.

use std::sync::Arc;

use crate::block::BlockSyntax;
use crate::store::{TicketStore, WikiStore};

/// Context passed to every board operation
pub struct BoardContext {
    tickets: Arc<dyn TicketStore>,
    wiki: Arc<dyn WikiStore>,
    syntax: BlockSyntax,
    author: String,
}

impl BoardContext {
    /// Create a context over the two stores. Defaults: wiki-macro block
    /// syntax, anonymous author.
    pub fn new(tickets: Arc<dyn TicketStore>, wiki: Arc<dyn WikiStore>) -> Self {
        Self {
            tickets,
            wiki,
            syntax: BlockSyntax::wiki_macro(),
            author: "anonymous".into(),
        }
    }

    /// Use a different embedded-block syntax
    pub fn with_syntax(mut self, syntax: BlockSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Attribute writes to the given author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tickets(&self) -> &dyn TicketStore {
        self.tickets.as_ref()
    }

    pub fn wiki(&self) -> &dyn WikiStore {
        self.wiki.as_ref()
    }

    pub fn syntax(&self) -> &BlockSyntax {
        &self.syntax
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}
