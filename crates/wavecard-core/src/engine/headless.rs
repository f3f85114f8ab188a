//! Headless engine for scripted lifecycle testing
//!
//! [`HeadlessEngine`] implements the full [`WaveformEngine`] capability set
//! without any rendering surface: it records every operation issued against
//! it and lets the caller emit events as if decode and playback were
//! happening. This makes the controller's state machine testable
//! deterministically, with the rendering capability an explicit constructor
//! flag instead of an ambient environment probe.
//!
//! Clones share the same recording, so a test can keep a handle to the
//! operation log while an adapter owns the engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{
    EngineConfig, EngineEvent, EngineHandle, EngineNotice, EventSink, InstanceId, WaveformEngine,
};

/// Transport command recorded by the headless engine
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessCommand {
    PlayPause,
    SkipForward(f64),
    SkipBackward(f64),
    Restart,
}

/// One recorded engine operation
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessOp {
    Create(InstanceId),
    Subscribe(InstanceId),
    Load(InstanceId, String),
    Command(InstanceId, HeadlessCommand),
    Destroy(InstanceId),
}

impl HeadlessOp {
    /// Instance the operation was issued against
    pub fn instance(&self) -> InstanceId {
        match self {
            HeadlessOp::Create(id)
            | HeadlessOp::Subscribe(id)
            | HeadlessOp::Load(id, _)
            | HeadlessOp::Command(id, _)
            | HeadlessOp::Destroy(id) => *id,
        }
    }
}

#[derive(Default)]
struct Inner {
    rendering_capable: bool,
    /// Deliver into the most recently subscribed sink regardless of the
    /// emitting instance, imitating an engine that does not key deliveries
    /// by instance. Exercises the adapter's identity filter.
    sloppy: bool,
    next_instance: u64,
    sinks: HashMap<u64, EventSink>,
    latest_sink: Option<EventSink>,
    ops: Vec<HeadlessOp>,
}

/// Recording engine with no rendering surface
pub struct HeadlessEngine {
    inner: Rc<RefCell<Inner>>,
}

impl HeadlessEngine {
    /// Create an engine; `rendering_capable = false` declines every `create`
    pub fn new(rendering_capable: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                rendering_capable,
                ..Inner::default()
            })),
        }
    }

    /// Rendering-capable engine that delivers into the newest sink even for
    /// destroyed instances
    pub fn sloppy() -> Self {
        let engine = Self::new(true);
        engine.inner.borrow_mut().sloppy = true;
        engine
    }

    /// Emit an event as if `instance` produced it
    ///
    /// Deliveries for unsubscribed (destroyed) instances go nowhere, except
    /// in sloppy mode where the newest sink receives them.
    pub fn emit(&self, instance: InstanceId, event: EngineEvent) {
        let inner = self.inner.borrow();
        let sink = if inner.sloppy {
            inner.latest_sink.clone()
        } else {
            inner.sinks.get(&instance.raw()).cloned()
        };
        if let Some(sink) = sink {
            let _ = sink.send(EngineNotice::new(instance, event));
        }
    }

    /// Every operation issued against the engine, in order
    pub fn ops(&self) -> Vec<HeadlessOp> {
        self.inner.borrow().ops.clone()
    }

    /// Only the transport commands, in order
    pub fn commands(&self) -> Vec<HeadlessCommand> {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                HeadlessOp::Command(_, command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: HeadlessOp) {
        self.inner.borrow_mut().ops.push(op);
    }
}

impl Clone for HeadlessEngine {
    /// Clones share the recording and sink table
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl WaveformEngine for HeadlessEngine {
    fn create(&mut self, container_id: &str, _config: &EngineConfig) -> Option<EngineHandle> {
        let mut inner = self.inner.borrow_mut();
        if !inner.rendering_capable {
            return None;
        }
        inner.next_instance += 1;
        let instance = InstanceId::new(inner.next_instance);
        inner.ops.push(HeadlessOp::Create(instance));
        Some(EngineHandle {
            instance,
            container_id: container_id.to_string(),
        })
    }

    fn load(&mut self, handle: &EngineHandle, url: &str) {
        self.record(HeadlessOp::Load(handle.instance, url.to_string()));
    }

    fn subscribe(&mut self, handle: &EngineHandle, sink: EventSink) {
        let mut inner = self.inner.borrow_mut();
        inner.sinks.insert(handle.instance.raw(), sink.clone());
        inner.latest_sink = Some(sink);
        inner.ops.push(HeadlessOp::Subscribe(handle.instance));
    }

    fn play_pause(&mut self, handle: &EngineHandle) {
        self.record(HeadlessOp::Command(
            handle.instance,
            HeadlessCommand::PlayPause,
        ));
    }

    fn skip_forward(&mut self, handle: &EngineHandle, seconds: f64) {
        self.record(HeadlessOp::Command(
            handle.instance,
            HeadlessCommand::SkipForward(seconds),
        ));
    }

    fn skip_backward(&mut self, handle: &EngineHandle, seconds: f64) {
        self.record(HeadlessOp::Command(
            handle.instance,
            HeadlessCommand::SkipBackward(seconds),
        ));
    }

    fn restart(&mut self, handle: &EngineHandle) {
        self.record(HeadlessOp::Command(handle.instance, HeadlessCommand::Restart));
    }

    fn destroy(&mut self, handle: EngineHandle) {
        let mut inner = self.inner.borrow_mut();
        // Unsubscribe first: pending deliveries die with the sink
        inner.sinks.remove(&handle.instance.raw());
        inner.ops.push(HeadlessOp::Destroy(handle.instance));
    }
}
