use super::{Args, Method, Request, Response, Transport};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// One request observed by a [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub args: Args,
}

/// In-process transport serving canned responses.
///
/// Responses queued for the same (method, path) are served in order; the
/// last one keeps being served once the queue is down to it. Unrouted
/// requests get a 404 with a server-style message body.
#[derive(Default)]
pub struct MemoryTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Response>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method` on `path`.
    pub fn route(&self, method: Method, path: &str, response: Response) {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Queue a 200 response with the given body.
    pub fn route_ok(&self, method: Method, path: &str, body: impl Into<Vec<u8>>) {
        self.route(method, path, Response::ok(body));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls matching `method` and `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn send(&self, path: &str, request: &Request) -> Result<Response> {
        self.calls.lock().push(RecordedCall {
            method: request.method,
            path: path.to_string(),
            args: request.args.clone(),
        });

        let mut routes = self.routes.lock();
        let response = match routes.get_mut(&(request.method, path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| {
            Response::with_status(
                404,
                format!(
                    "<response><messages><msg type=\"ERROR\">No route for {} {}</msg></messages></response>",
                    request.method, path
                ),
            )
        }))
    }
}
