//! Request usage classification for cost tracking.

use std::sync::Arc;

use http::Extensions;
use youscore_core::ApiType;

use crate::editor::{RequestEditor, RequestHead};
use crate::error::BoxError;

/// Receives one record per outgoing request.
///
/// What happens with it is up to the implementation: count, log, bill.
/// Implementations must tolerate concurrent calls.
pub trait UsageRecorder: Send + Sync {
    /// Records a request to `path` (query string removed) of the given category.
    fn record(&self, extensions: &Extensions, api_type: ApiType, path: &str);
}

impl<F> UsageRecorder for F
where
    F: Fn(&Extensions, ApiType, &str) + Send + Sync,
{
    fn record(&self, extensions: &Extensions, api_type: ApiType, path: &str) {
        self(extensions, api_type, path)
    }
}

/// Observational editor reporting every request to a [`UsageRecorder`].
///
/// It never touches the request and never fails it.
#[derive(Clone)]
pub struct UsageTracker {
    recorder: Arc<dyn UsageRecorder>,
}

impl UsageTracker {
    pub fn new<R>(recorder: R) -> Self
    where
        R: UsageRecorder + 'static,
    {
        Self {
            recorder: Arc::new(recorder),
        }
    }
}

impl RequestEditor for UsageTracker {
    fn name(&self) -> &str {
        "usage-tracker"
    }

    fn edit(&self, head: &mut RequestHead<'_>) -> Result<(), BoxError> {
        let path = head.path();
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        self.recorder
            .record(head.extensions(), ApiType::for_path(path), path);
        Ok(())
    }
}
