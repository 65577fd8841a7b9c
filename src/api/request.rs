//! Simulated-latency request queue
//!
//! Requests are submitted with a timestamp and resolve once their latency has
//! elapsed, on the first `poll` after the deadline. Everything runs on the
//! frame loop; nothing blocks.

use std::collections::VecDeque;

use super::{ApiError, DataAccess};
use crate::model::{AppObject, Designer, DesignerPatch, InsertDesigner, InsertObject, ObjectPatch};
use crate::query::QueryKey;

/// One data-access call
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListDesigners,
    CreateDesigner(InsertDesigner),
    UpdateDesigner { id: String, patch: DesignerPatch },
    DeleteDesigner(String),
    ListObjects,
    CreateObject(InsertObject),
    UpdateObject { id: String, patch: ObjectPatch },
    DeleteObject(String),
}

/// Result payload of a request
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Designers(Vec<Designer>),
    Designer(Designer),
    Objects(Vec<AppObject>),
    Object(AppObject),
    Deleted,
}

impl Request {
    /// Unscaled simulated latency
    pub fn latency_ms(&self) -> u64 {
        match self {
            Request::ListDesigners => 400,
            Request::CreateDesigner(_) => 500,
            Request::UpdateDesigner { .. } => 400,
            Request::DeleteDesigner(_) => 400,
            Request::ListObjects => 300,
            Request::CreateObject(_) => 400,
            Request::UpdateObject { .. } => 300,
            Request::DeleteObject(_) => 300,
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, Request::ListDesigners | Request::ListObjects)
    }

    /// Cache keys a completed mutation invalidates.
    ///
    /// Designer changes cascade into objects and object changes move designer
    /// counters, so every mutation touches both collections.
    pub fn affected_keys(&self) -> &'static [QueryKey] {
        if self.is_mutation() {
            &[QueryKey::Designers, QueryKey::Objects]
        } else {
            &[]
        }
    }

    /// Run against the data-access layer
    pub fn execute(self, api: &mut DataAccess) -> Result<Response, ApiError> {
        match self {
            Request::ListDesigners => api.list_designers().map(Response::Designers),
            Request::CreateDesigner(data) => api.create_designer(data).map(Response::Designer),
            Request::UpdateDesigner { id, patch } => api.update_designer(&id, &patch).map(Response::Designer),
            Request::DeleteDesigner(id) => api.delete_designer(&id).map(|()| Response::Deleted),
            Request::ListObjects => api.list_objects().map(Response::Objects),
            Request::CreateObject(data) => api.create_object(data).map(Response::Object),
            Request::UpdateObject { id, patch } => api.update_object(&id, &patch).map(Response::Object),
            Request::DeleteObject(id) => api.delete_object(&id).map(|()| Response::Deleted),
        }
    }
}

/// Handle returned by `RequestQueue::submit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Debug)]
struct InFlight {
    id: RequestId,
    request: Request,
    /// Time (seconds) at which the request resolves
    due: f64,
}

/// Requests waiting out their latency
#[derive(Debug)]
pub struct RequestQueue {
    in_flight: VecDeque<InFlight>,
    next_id: u64,
    latency_scale: f32,
}

impl RequestQueue {
    pub fn new(latency_scale: f32) -> Self {
        Self {
            in_flight: VecDeque::new(),
            next_id: 0,
            latency_scale: latency_scale.max(0.0),
        }
    }

    /// Queue a request; `now` is in seconds
    pub fn submit(&mut self, request: Request, now: f64) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        let due = now + request.latency_ms() as f64 * self.latency_scale as f64 / 1000.0;
        self.in_flight.push_back(InFlight { id, request, due });
        id
    }

    /// Execute every request whose deadline has passed, in submission order
    pub fn poll(&mut self, now: f64, api: &mut DataAccess) -> Vec<(RequestId, Result<Response, ApiError>)> {
        let mut done = Vec::new();
        let mut waiting = VecDeque::with_capacity(self.in_flight.len());
        for entry in self.in_flight.drain(..) {
            if entry.due <= now {
                done.push((entry.id, entry.request.execute(api)));
            } else {
                waiting.push_back(entry);
            }
        }
        self.in_flight = waiting;
        done
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: RequestId) -> bool {
        self.in_flight.iter().any(|e| e.id == id)
    }

    /// Number of unresolved requests
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
