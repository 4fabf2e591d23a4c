//! Ordered request-mutation steps applied before dispatch.
//!
//! Editors see a [`RequestHead`]: the method, path and request context are
//! read-only, headers are writable. An editor therefore cannot change what is
//! requested, only how it is authenticated or annotated.
//!
//! The chain is assembled once with [`RequestEditors::builder`] and is
//! immutable afterwards; cloning it shares the same editors.
//!
//! ```
//! use http::HeaderValue;
//! use youscore_http::editor::{RequestEditors, editor_fn};
//!
//! let editors = RequestEditors::builder()
//!     .push(editor_fn("user-agent", |head| {
//!         head.headers_mut()
//!             .insert("user-agent", HeaderValue::from_static("youscore-client"));
//!         Ok(())
//!     }))
//!     .build();
//! assert_eq!(editors.len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use http::{Extensions, HeaderMap, Method, request::Parts};
use tracing::{trace, warn};

use crate::error::{BoxError, EditorError};

/// The editable view of an outgoing request.
pub struct RequestHead<'a> {
    method: &'a Method,
    path: &'a str,
    headers: &'a mut HeaderMap,
    extensions: &'a Extensions,
}

impl<'a> RequestHead<'a> {
    /// Builds a view over the individual pieces of a request.
    ///
    /// `extensions` is the request context handed to editors.
    pub fn new(
        method: &'a Method,
        path: &'a str,
        headers: &'a mut HeaderMap,
        extensions: &'a Extensions,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            extensions,
        }
    }

    /// Builds a view over `http` request parts, using the request
    /// extensions as context.
    pub fn from_parts(parts: &'a mut Parts) -> Self {
        Self {
            method: &parts.method,
            path: parts.uri.path(),
            headers: &mut parts.headers,
            extensions: &parts.extensions,
        }
    }

    pub fn method(&self) -> &Method {
        self.method
    }

    /// URL path without the query string.
    pub fn path(&self) -> &str {
        self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.headers
    }

    pub fn extensions(&self) -> &Extensions {
        self.extensions
    }
}

/// A single step of the editor chain.
pub trait RequestEditor: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Edits the outgoing request. An error aborts the request.
    fn edit(&self, head: &mut RequestHead<'_>) -> Result<(), BoxError>;
}

/// Editor backed by a closure, see [`editor_fn`].
pub struct FnEditor<F> {
    name: String,
    f: F,
}

impl<F> RequestEditor for FnEditor<F>
where
    F: Fn(&mut RequestHead<'_>) -> Result<(), BoxError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn edit(&self, head: &mut RequestHead<'_>) -> Result<(), BoxError> {
        (self.f)(head)
    }
}

/// Wraps a closure as a named [`RequestEditor`].
pub fn editor_fn<F>(name: impl Into<String>, f: F) -> FnEditor<F>
where
    F: Fn(&mut RequestHead<'_>) -> Result<(), BoxError> + Send + Sync,
{
    FnEditor {
        name: name.into(),
        f,
    }
}

/// Immutable, ordered chain of request editors.
#[derive(Clone, Default)]
pub struct RequestEditors {
    editors: Arc<[Arc<dyn RequestEditor>]>,
}

impl RequestEditors {
    pub fn builder() -> RequestEditorsBuilder {
        RequestEditorsBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Runs every editor in registration order.
    ///
    /// Stops at the first failing editor.
    pub fn apply(&self, head: &mut RequestHead<'_>) -> Result<(), EditorError> {
        for editor in self.editors.iter() {
            trace!(editor = editor.name(), path = head.path(), "applying request editor");
            editor.edit(head).map_err(|source| {
                warn!(editor = editor.name(), path = head.path(), "request editor failed");
                EditorError {
                    editor: editor.name().to_owned(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for RequestEditors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.editors.iter().map(|editor| editor.name()))
            .finish()
    }
}

/// Collects editors in the order they should run.
#[derive(Default)]
pub struct RequestEditorsBuilder {
    editors: Vec<Arc<dyn RequestEditor>>,
}

impl RequestEditorsBuilder {
    /// Appends an editor to the end of the chain.
    pub fn push<E>(mut self, editor: E) -> Self
    where
        E: RequestEditor + 'static,
    {
        self.editors.push(Arc::new(editor));
        self
    }

    /// Appends an already shared editor.
    pub fn push_shared(mut self, editor: Arc<dyn RequestEditor>) -> Self {
        self.editors.push(editor);
        self
    }

    pub fn build(self) -> RequestEditors {
        RequestEditors {
            editors: self.editors.into(),
        }
    }
}
