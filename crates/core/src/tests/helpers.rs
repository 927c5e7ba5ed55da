// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::hierarchy::{HierarchyController, HierarchySnapshot};
use crate::source::{FetchError, LocationSource};
use alms_domain::LocationNode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type ScriptResult = Result<Vec<LocationNode>, FetchError>;

/// One scripted response: either immediately ready, or gated behind a
/// oneshot channel so the test controls resolution order.
enum Scripted {
    Ready(ScriptResult),
    Gated(oneshot::Receiver<ScriptResult>),
}

/// An in-memory `LocationSource` driven by per-request scripts.
///
/// Requests are keyed by level and scoping ids (`"districts:5"`,
/// `"zones:10:5"`, ...). Each key holds a FIFO of responses; a request
/// with no script resolves to an empty list.
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
        }
    }

    /// Queues an immediately-ready response for a request key.
    pub fn respond(&self, key: &str, result: ScriptResult) {
        self.scripts
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(Scripted::Ready(result));
    }

    /// Queues a gated response; the returned sender releases it.
    pub fn gate(&self, key: &str) -> oneshot::Sender<ScriptResult> {
        let (tx, rx) = oneshot::channel();
        self.scripts
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(Scripted::Gated(rx));
        tx
    }

    async fn take(&self, key: String) -> ScriptResult {
        let entry: Option<Scripted> = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        match entry {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
            None => Ok(Vec::new()),
        }
    }
}

impl LocationSource for ScriptedSource {
    async fn states(&self) -> ScriptResult {
        self.take(String::from("states")).await
    }

    async fn districts(&self, state_id: &str) -> ScriptResult {
        self.take(format!("districts:{state_id}")).await
    }

    async fn zones(&self, district_id: &str, state_id: &str) -> ScriptResult {
        self.take(format!("zones:{district_id}:{state_id}")).await
    }

    async fn divisions(&self, zone_id: &str, district_id: &str) -> ScriptResult {
        self.take(format!("divisions:{zone_id}:{district_id}")).await
    }

    async fn stations(&self, division_id: &str, zone_id: &str) -> ScriptResult {
        self.take(format!("stations:{division_id}:{zone_id}")).await
    }
}

/// Builds location nodes from `(id, name)` pairs.
pub fn nodes(specs: &[(i64, &str)]) -> Vec<LocationNode> {
    specs
        .iter()
        .map(|(id, name)| LocationNode::new(*id, name))
        .collect()
}

/// Polls the controller until the snapshot satisfies the predicate,
/// yielding to let spawned fetches progress. Panics after 1000 yields.
pub async fn wait_for<S, F>(controller: &HierarchyController<S>, description: &str, predicate: F)
where
    S: LocationSource,
    F: Fn(&HierarchySnapshot) -> bool,
{
    for _ in 0..1000 {
        if predicate(&controller.snapshot().await) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("timed out waiting for: {description}");
}
