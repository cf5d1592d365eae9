//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arbor_analysis::analysis::ImageData;
use arbor_analysis::remote::{
    HealthReport, InferenceService, RemoteError, RemoteHints, RemotePayload,
};
use async_trait::async_trait;
use serde_json::{json, Value};

/// How a scripted endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer successfully (health: status "ok"; analyze: echo payload).
    Succeed,
    /// Return this error.
    Fail(RemoteError),
    /// Never answer.
    Hang,
    /// Batch only: answer with this many results regardless of input.
    Count(usize),
    /// Analyze and batch only: answer with this payload for every image.
    Payload(RemotePayload),
}

/// Scripted [`InferenceService`] that records how it was called.
pub struct FakeInferenceService {
    health: Mutex<Reply>,
    analyze: Mutex<Reply>,
    batch: Mutex<Reply>,
    health_calls: AtomicUsize,
    analyze_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    cancelled: Arc<AtomicUsize>,
    submitted: Mutex<Vec<Vec<String>>>,
    tree_types: Mutex<Vec<Option<String>>>,
}

impl FakeInferenceService {
    /// A service that is up and answers every call.
    pub fn up() -> Arc<Self> {
        Arc::new(Self::with(Reply::Succeed, Reply::Succeed, Reply::Succeed))
    }

    /// A service whose health probe fails.
    pub fn down() -> Arc<Self> {
        Arc::new(Self::with(
            Reply::Fail(RemoteError::Transport("connection refused".into())),
            Reply::Succeed,
            Reply::Succeed,
        ))
    }

    pub fn with(health: Reply, analyze: Reply, batch: Reply) -> Self {
        Self {
            health: Mutex::new(health),
            analyze: Mutex::new(analyze),
            batch: Mutex::new(batch),
            health_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
            cancelled: Arc::new(AtomicUsize::new(0)),
            submitted: Mutex::new(Vec::new()),
            tree_types: Mutex::new(Vec::new()),
        }
    }

    pub fn set_health(&self, reply: Reply) {
        *self.health.lock().unwrap() = reply;
    }

    pub fn set_analyze(&self, reply: Reply) {
        *self.analyze.lock().unwrap() = reply;
    }

    pub fn set_batch(&self, reply: Reply) {
        *self.batch.lock().unwrap() = reply;
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Number of remote calls dropped before they answered.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// File names of every submission, one entry per remote call.
    pub fn submitted(&self) -> Vec<Vec<String>> {
        self.submitted.lock().unwrap().clone()
    }

    /// Tree-type hint of every submission.
    pub fn tree_types(&self) -> Vec<Option<String>> {
        self.tree_types.lock().unwrap().clone()
    }

    fn record(&self, names: Vec<String>, hints: RemoteHints<'_>) {
        self.submitted.lock().unwrap().push(names);
        self.tree_types
            .lock()
            .unwrap()
            .push(hints.tree_type.map(str::to_string));
    }

    async fn hang<T>(&self) -> T {
        let _guard = CancelGuard(self.cancelled.clone());
        std::future::pending::<T>().await
    }
}

/// Counts a cancellation when dropped.
struct CancelGuard(Arc<AtomicUsize>);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Payload the fake returns for an image.
pub fn remote_payload(file_name: &str) -> RemotePayload {
    let Value::Object(map) = json!({
        "success": true,
        "filename": file_name,
        "diseaseDetection": { "detected": false, "diseases": [], "overallHealthScore": 92 },
        "analysisMethod": "scripted"
    }) else {
        unreachable!()
    };
    map
}

#[async_trait]
impl InferenceService for FakeInferenceService {
    async fn health(&self) -> Result<HealthReport, RemoteError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.health.lock().unwrap().clone();
        match reply {
            Reply::Succeed | Reply::Count(_) | Reply::Payload(_) => Ok(HealthReport {
                status: "ok".into(),
            }),
            Reply::Fail(e) => Err(e),
            Reply::Hang => self.hang().await,
        }
    }

    async fn analyze(
        &self,
        image: ImageData,
        hints: RemoteHints<'_>,
    ) -> Result<RemotePayload, RemoteError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.record(vec![image.file_name.clone()], hints);
        let reply = self.analyze.lock().unwrap().clone();
        match reply {
            Reply::Succeed | Reply::Count(_) => {
                let mut payload = remote_payload(&image.file_name);
                if let Some(location) = hints.location {
                    payload.insert("gps".into(), json!([location.lat, location.lon]));
                }
                Ok(payload)
            }
            Reply::Payload(payload) => Ok(payload),
            Reply::Fail(e) => Err(e),
            Reply::Hang => self.hang().await,
        }
    }

    async fn batch_analyze(
        &self,
        images: Vec<ImageData>,
        hints: RemoteHints<'_>,
    ) -> Result<Vec<RemotePayload>, RemoteError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        let names: Vec<String> = images.iter().map(|i| i.file_name.clone()).collect();
        self.record(names.clone(), hints);
        let reply = self.batch.lock().unwrap().clone();
        match reply {
            Reply::Succeed => Ok(names.iter().map(|n| remote_payload(n)).collect()),
            Reply::Count(n) => Ok((0..n)
                .map(|i| remote_payload(&format!("extra_{i}")))
                .collect()),
            Reply::Payload(payload) => Ok(names.iter().map(|_| payload.clone()).collect()),
            Reply::Fail(e) => Err(e),
            Reply::Hang => self.hang().await,
        }
    }
}

/// Write a small fake JPEG into `dir`.
pub fn write_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\xff\xd8\xff\xe0\x00\x10JFIF\x00").unwrap();
    path
}
