//! Query cache
//!
//! `QueryClient` sits between the views and the request queue. List results
//! are cached per collection; a completed mutation publishes an invalidation
//! for every collection it touched, which marks the cache stale so the next
//! access (or the next tick, if the key is observed) refetches.

pub mod bus;
pub mod toast;

pub use bus::{InvalidationBus, Subscription};
pub use toast::{Toast, ToastVariant, Toasts};

use std::collections::HashMap;

use crate::api::{ApiError, DataAccess, Request, RequestId, RequestQueue, Response};
use crate::model::{AppObject, Designer, DesignerPatch, InsertDesigner, InsertObject, ObjectPatch};

/// Cache key of a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Designers,
    Objects,
}

impl QueryKey {
    /// Logical path, used as a discriminator only
    pub fn path(&self) -> &'static str {
        match self {
            QueryKey::Designers => "/api/designers",
            QueryKey::Objects => "/api/objects",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Cached list plus fetch bookkeeping
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<Vec<T>>,
    /// Invalidated since the data was fetched
    pub stale: bool,
    in_flight: Option<RequestId>,
    observed: bool,
    /// Bumped on every invalidation
    generation: u64,
    /// Generation at the time the in-flight fetch was issued
    fetch_generation: u64,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            stale: false,
            in_flight: None,
            observed: false,
            generation: 0,
            fetch_generation: 0,
        }
    }
}

impl<T> QueryState<T> {
    /// First load, nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading && self.data.is_none()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cached rows, empty until the first fetch lands
    pub fn data(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    fn needs_fetch(&self) -> bool {
        self.in_flight.is_none() && (self.status == QueryStatus::Idle || self.stale)
    }

    fn invalidate(&mut self) {
        self.stale = true;
        self.generation += 1;
    }

    fn start_fetch(&mut self, id: RequestId) {
        self.in_flight = Some(id);
        self.fetch_generation = self.generation;
        self.status = QueryStatus::Loading;
    }

    fn finish(&mut self, result: Result<Vec<T>, String>) {
        self.in_flight = None;
        // An invalidation that arrived mid-flight may not be reflected in the result
        self.stale = self.fetch_generation != self.generation;
        match result {
            Ok(rows) => {
                self.data = Some(rows);
                self.status = QueryStatus::Success;
            }
            Err(msg) => self.status = QueryStatus::Error(msg),
        }
    }
}

/// A user-initiated write
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateDesigner(InsertDesigner),
    /// Full replacement from the edit form
    UpdateDesigner { id: String, data: InsertDesigner },
    DeleteDesigner(String),
    CreateObject(InsertObject),
    /// Full replacement from the property panel
    UpdateObject { id: String, data: InsertObject },
    /// Position-only update at the end of a drag
    MoveObject { id: String, position: [f32; 3] },
    DeleteObject(String),
}

/// Mutation category, used to disable the control that triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateDesigner,
    UpdateDesigner,
    DeleteDesigner,
    CreateObject,
    UpdateObject,
    MoveObject,
    DeleteObject,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateDesigner(_) => MutationKind::CreateDesigner,
            Mutation::UpdateDesigner { .. } => MutationKind::UpdateDesigner,
            Mutation::DeleteDesigner(_) => MutationKind::DeleteDesigner,
            Mutation::CreateObject(_) => MutationKind::CreateObject,
            Mutation::UpdateObject { .. } => MutationKind::UpdateObject,
            Mutation::MoveObject { .. } => MutationKind::MoveObject,
            Mutation::DeleteObject(_) => MutationKind::DeleteObject,
        }
    }

    fn into_request(self) -> Request {
        match self {
            Mutation::CreateDesigner(data) => Request::CreateDesigner(data),
            Mutation::UpdateDesigner { id, data } => Request::UpdateDesigner {
                id,
                patch: DesignerPatch::from(data),
            },
            Mutation::DeleteDesigner(id) => Request::DeleteDesigner(id),
            Mutation::CreateObject(data) => Request::CreateObject(data),
            Mutation::UpdateObject { id, data } => Request::UpdateObject {
                id,
                patch: ObjectPatch::from(data),
            },
            Mutation::MoveObject { id, position } => Request::UpdateObject {
                id,
                patch: ObjectPatch::position(position),
            },
            Mutation::DeleteObject(id) => Request::DeleteObject(id),
        }
    }
}

impl MutationKind {
    /// (title, description) of the success toast; drags are silent
    fn success_toast(&self) -> Option<(&'static str, &'static str)> {
        match self {
            MutationKind::CreateDesigner => Some(("Success", "Designer created successfully")),
            MutationKind::UpdateDesigner => Some(("Success", "Designer updated")),
            MutationKind::DeleteDesigner => Some(("Success", "Designer deleted")),
            MutationKind::CreateObject => Some(("Success", "Object created")),
            MutationKind::UpdateObject => Some(("Updated", "Object properties saved.")),
            MutationKind::MoveObject => None,
            MutationKind::DeleteObject => Some(("Success", "Object deleted")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationId(u64);

/// Settled mutations remembered for holders that have not looked yet.
/// Older ones are forgotten and report `None`.
const SETTLED_KEPT: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum MutationStatus {
    Pending,
    Success,
    Error(String),
}

#[derive(Debug)]
struct MutationEntry {
    kind: MutationKind,
    status: MutationStatus,
    affected: &'static [QueryKey],
}

/// Cache, request dispatch and notifications for the views
pub struct QueryClient {
    queue: RequestQueue,
    designers: QueryState<Designer>,
    objects: QueryState<AppObject>,
    bus: InvalidationBus,
    subscription: Subscription,
    pub toasts: Toasts,
    fetches: HashMap<RequestId, QueryKey>,
    mutation_requests: HashMap<RequestId, MutationId>,
    mutations: HashMap<MutationId, MutationEntry>,
    next_mutation: u64,
    /// Time of the last tick, used to stamp new requests
    now: f64,
}

impl QueryClient {
    pub fn new(latency_scale: f32, toast_seconds: f32) -> Self {
        let mut bus = InvalidationBus::new();
        let subscription = bus.subscribe();
        Self {
            queue: RequestQueue::new(latency_scale),
            designers: QueryState::default(),
            objects: QueryState::default(),
            bus,
            subscription,
            toasts: Toasts::new(toast_seconds),
            fetches: HashMap::new(),
            mutation_requests: HashMap::new(),
            mutations: HashMap::new(),
            next_mutation: 0,
            now: 0.0,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Designers query; schedules a fetch when idle or stale
    pub fn designers(&mut self) -> &QueryState<Designer> {
        self.designers.observed = true;
        self.ensure_fresh(QueryKey::Designers);
        &self.designers
    }

    /// Objects query; schedules a fetch when idle or stale
    pub fn objects(&mut self) -> &QueryState<AppObject> {
        self.objects.observed = true;
        self.ensure_fresh(QueryKey::Objects);
        &self.objects
    }

    /// Bus the client publishes invalidations on; other observers may subscribe
    #[cfg(test)]
    pub fn bus_mut(&mut self) -> &mut InvalidationBus {
        &mut self.bus
    }

    fn ensure_fresh(&mut self, key: QueryKey) {
        let needs_fetch = match key {
            QueryKey::Designers => self.designers.needs_fetch(),
            QueryKey::Objects => self.objects.needs_fetch(),
        };
        if !needs_fetch {
            return;
        }

        let request = match key {
            QueryKey::Designers => Request::ListDesigners,
            QueryKey::Objects => Request::ListObjects,
        };
        log::debug!("fetch {}", key.path());
        let id = self.queue.submit(request, self.now);
        self.fetches.insert(id, key);
        match key {
            QueryKey::Designers => self.designers.start_fetch(id),
            QueryKey::Objects => self.objects.start_fetch(id),
        }
    }

    /// Submit a write
    pub fn mutate(&mut self, mutation: Mutation) -> MutationId {
        let id = MutationId(self.next_mutation);
        self.next_mutation += 1;

        let kind = mutation.kind();
        let request = mutation.into_request();
        let affected = request.affected_keys();
        let request_id = self.queue.submit(request, self.now);

        self.mutation_requests.insert(request_id, id);
        self.mutations.insert(
            id,
            MutationEntry {
                kind,
                status: MutationStatus::Pending,
                affected,
            },
        );
        id
    }

    pub fn mutation_status(&self, id: MutationId) -> Option<&MutationStatus> {
        self.mutations.get(&id).map(|m| &m.status)
    }

    /// Whether a mutation of this kind is still in flight
    pub fn is_mutating(&self, kind: MutationKind) -> bool {
        self.mutations
            .values()
            .any(|m| m.kind == kind && m.status == MutationStatus::Pending)
    }

    /// Resolve due requests, apply invalidations and expire toasts
    pub fn tick(&mut self, now: f64, api: &mut DataAccess) {
        self.now = now;

        for (request_id, result) in self.queue.poll(now, api) {
            if let Some(key) = self.fetches.remove(&request_id) {
                self.finish_fetch(key, result);
            } else if let Some(mutation_id) = self.mutation_requests.remove(&request_id) {
                self.finish_mutation(mutation_id, result);
            }
        }

        let invalidated = if self.bus.has_pending(self.subscription) {
            self.bus.drain(self.subscription)
        } else {
            Vec::new()
        };
        for key in invalidated {
            match key {
                QueryKey::Designers => self.designers.invalidate(),
                QueryKey::Objects => self.objects.invalidate(),
            }
            let observed = match key {
                QueryKey::Designers => self.designers.observed,
                QueryKey::Objects => self.objects.observed,
            };
            if observed {
                self.ensure_fresh(key);
            }
        }

        self.toasts.expire(now);
    }

    fn finish_fetch(&mut self, key: QueryKey, result: Result<Response, ApiError>) {
        let failure = |e: ApiError| e.to_string();
        match key {
            QueryKey::Designers => {
                let rows = match result {
                    Ok(Response::Designers(rows)) => Ok(rows),
                    Ok(other) => Err(format!("unexpected response {:?}", other)),
                    Err(e) => Err(failure(e)),
                };
                self.report_fetch_error(key, &rows);
                self.designers.finish(rows);
            }
            QueryKey::Objects => {
                let rows = match result {
                    Ok(Response::Objects(rows)) => Ok(rows),
                    Ok(other) => Err(format!("unexpected response {:?}", other)),
                    Err(e) => Err(failure(e)),
                };
                self.report_fetch_error(key, &rows);
                self.objects.finish(rows);
            }
        }
    }

    fn report_fetch_error<T>(&mut self, key: QueryKey, rows: &Result<Vec<T>, String>) {
        if let Err(msg) = rows {
            log::warn!("fetch {} failed: {}", key.path(), msg);
            self.toasts.error(msg, self.now);
        }
    }

    fn finish_mutation(&mut self, id: MutationId, result: Result<Response, ApiError>) {
        let Some(entry) = self.mutations.get_mut(&id) else {
            return;
        };
        match result {
            Ok(_) => {
                entry.status = MutationStatus::Success;
                let (kind, affected) = (entry.kind, entry.affected);
                for key in affected {
                    self.bus.publish(*key);
                }
                if let Some((title, description)) = kind.success_toast() {
                    self.toasts.push(title, description, ToastVariant::Default, self.now);
                }
            }
            Err(e) => {
                let msg = e.to_string();
                entry.status = MutationStatus::Error(msg.clone());
                self.toasts.error(&msg, self.now);
            }
        }
        self.forget_old_settled();
    }

    fn forget_old_settled(&mut self) {
        let mut settled: Vec<MutationId> = self
            .mutations
            .iter()
            .filter(|(_, m)| m.status != MutationStatus::Pending)
            .map(|(id, _)| *id)
            .collect();
        if settled.len() <= SETTLED_KEPT {
            return;
        }
        settled.sort_unstable_by_key(|id| id.0);
        let excess = settled.len() - SETTLED_KEPT;
        for id in &settled[..excess] {
            self.mutations.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{insert_object, seeded};

    /// Tick far enough ahead that everything queued resolves
    fn settle(client: &mut QueryClient, api: &mut DataAccess, now: &mut f64) {
        for _ in 0..4 {
            *now += 1.0;
            client.tick(*now, api);
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(QueryKey::Designers.path(), "/api/designers");
        assert_eq!(QueryKey::Objects.path(), "/api/objects");
    }

    #[test]
    fn test_first_access_loads() {
        let mut api = seeded();
        let mut client = QueryClient::new(1.0, 4.0);
        assert!(client.designers().is_loading());
        client.tick(0.2, &mut api);
        assert!(client.designers().is_loading());
        client.tick(0.5, &mut api);
        let state = client.designers();
        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.data().len(), 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_mutation_invalidates_both_caches() {
        let mut api = seeded();
        let mut client = QueryClient::new(1.0, 4.0);
        let mut now = 0.0;
        client.designers();
        client.objects();
        settle(&mut client, &mut api, &mut now);

        let id = client.mutate(Mutation::CreateObject(insert_object("Crate", "d2")));
        assert!(client.is_mutating(MutationKind::CreateObject));
        settle(&mut client, &mut api, &mut now);

        assert_eq!(client.mutation_status(id), Some(&MutationStatus::Success));
        assert!(!client.is_mutating(MutationKind::CreateObject));
        assert_eq!(client.objects().data().len(), 4);
        let bob = client.designers().data().iter().find(|d| d.id == "d2").cloned().unwrap();
        assert_eq!(bob.attached_objects_count, 2);
        assert!(client.toasts.iter().any(|t| t.description == "Object created"));
    }

    #[test]
    fn test_refetch_keeps_old_data_visible() {
        let mut api = seeded();
        let mut client = QueryClient::new(1.0, 4.0);
        let mut now = 0.0;
        client.objects();
        settle(&mut client, &mut api, &mut now);

        client.mutate(Mutation::DeleteObject("o1".into()));
        now += 0.31;
        client.tick(now, &mut api);
        let state = client.objects();
        assert!(state.is_fetching());
        assert!(!state.is_loading());
        assert_eq!(state.data().len(), 3);
    }

    #[test]
    fn test_failed_mutation_toasts_error() {
        let mut api = seeded();
        let mut client = QueryClient::new(0.0, 4.0);
        let id = client.mutate(Mutation::DeleteDesigner("ghost".into()));
        client.tick(0.0, &mut api);

        assert!(matches!(client.mutation_status(id), Some(MutationStatus::Error(_))));
        let toast = client.toasts.iter().last().unwrap();
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.description, "Designer not found: ghost");
    }

    #[test]
    fn test_move_is_silent() {
        let mut api = seeded();
        let mut client = QueryClient::new(0.0, 4.0);
        let id = client.mutate(Mutation::MoveObject {
            id: "o1".into(),
            position: [1.0, 0.5, 1.0],
        });
        client.tick(0.0, &mut api);
        assert_eq!(client.mutation_status(id), Some(&MutationStatus::Success));
        assert!(client.toasts.is_empty());
    }

    #[test]
    fn test_settled_mutations_are_bounded() {
        let mut api = seeded();
        let mut client = QueryClient::new(0.0, 4.0);
        let ids: Vec<MutationId> = (0..SETTLED_KEPT + 20)
            .map(|i| {
                let id = client.mutate(Mutation::MoveObject {
                    id: "o1".into(),
                    position: [i as f32, 0.5, 0.0],
                });
                client.tick(0.0, &mut api);
                id
            })
            .collect();

        assert_eq!(client.mutations.len(), SETTLED_KEPT);
        assert_eq!(client.mutation_status(ids[0]), None);
        assert_eq!(client.mutation_status(*ids.last().unwrap()), Some(&MutationStatus::Success));

        // In-flight entries are never dropped
        let pending = client.mutate(Mutation::DeleteObject("o2".into()));
        assert_eq!(client.mutation_status(pending), Some(&MutationStatus::Pending));
        assert!(client.is_mutating(MutationKind::DeleteObject));
    }

    #[test]
    fn test_external_subscriber_sees_invalidations() {
        let mut api = seeded();
        let mut client = QueryClient::new(0.0, 4.0);
        let observer = client.bus_mut().subscribe();
        client.mutate(Mutation::DeleteObject("o3".into()));
        client.tick(0.0, &mut api);
        let events = client.bus_mut().drain(observer);
        assert_eq!(events, vec![QueryKey::Designers, QueryKey::Objects]);
    }

    #[test]
    fn test_fetch_error_surfaces() {
        use crate::storage::{KvSnapshotStore, MemoryStore, STORAGE_KEY};
        let store = KvSnapshotStore::new(MemoryStore::with_entry(STORAGE_KEY, "garbage"));
        let mut api = DataAccess::new(Box::new(store));
        let mut client = QueryClient::new(0.0, 4.0);
        client.designers();
        client.tick(0.0, &mut api);

        let state = client.designers();
        assert!(state.error().is_some());
        assert!(!state.is_fetching());
        assert_eq!(client.toasts.iter().count(), 1);
    }
}
