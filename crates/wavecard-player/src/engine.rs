//! Scripted waveform engine
//!
//! A stand-in for a real decoding/rendering engine so the demo runs without
//! audio hardware or network access. Each instance gets a dedicated worker
//! thread that simulates decode (a fixed delay followed by `Ready`) and
//! playback (progress ticks while playing, `Finish` at the end), delivering
//! everything through the sink the adapter subscribed.
//!
//! `destroy` sends the shutdown command and then joins the worker, so once
//! it returns the instance is silent — the contract real engines must honor.

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use wavecard_core::{
    EngineConfig, EngineEvent, EngineHandle, EngineNotice, EventSink, InstanceId, WaveformEngine,
};

/// Simulation parameters for the scripted engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated decode time before `Ready` is reported
    pub decode_delay_ms: u64,
    /// Duration reported by `Ready`
    pub duration_seconds: f64,
    /// Interval between progress reports while playing
    pub progress_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            decode_delay_ms: 600,
            duration_seconds: 187.0,
            progress_interval_ms: 100,
        }
    }
}

enum WorkerCommand {
    Subscribe(EventSink),
    Load,
    PlayPause,
    SkipForward(f64),
    SkipBackward(f64),
    Restart,
    Destroy,
}

struct Worker {
    commands: Sender<WorkerCommand>,
    handle: JoinHandle<()>,
}

/// Engine simulating decode and playback on worker threads
pub struct ScriptedEngine {
    simulation: SimulationConfig,
    next_instance: u64,
    workers: HashMap<u64, Worker>,
}

impl ScriptedEngine {
    pub fn new(simulation: SimulationConfig) -> Self {
        Self {
            simulation,
            next_instance: 0,
            workers: HashMap::new(),
        }
    }

    fn send(&self, instance: InstanceId, command: WorkerCommand) {
        if let Some(worker) = self.workers.get(&instance.raw()) {
            let _ = worker.commands.send(command);
        }
    }

    fn shutdown(&mut self, instance: InstanceId) {
        if let Some(worker) = self.workers.remove(&instance.raw()) {
            let _ = worker.commands.send(WorkerCommand::Destroy);
            // Joining bounds the call at one worker tick and guarantees
            // nothing is delivered after destroy returns
            let _ = worker.handle.join();
        }
    }
}

impl WaveformEngine for ScriptedEngine {
    fn create(&mut self, container_id: &str, _config: &EngineConfig) -> Option<EngineHandle> {
        self.next_instance += 1;
        let instance = InstanceId::new(self.next_instance);
        let simulation = self.simulation;

        let (tx, rx) = mpsc::channel::<WorkerCommand>();
        let handle = thread::Builder::new()
            .name(format!("scripted-engine-{}", instance.raw()))
            .spawn(move || worker_thread(rx, instance, simulation))
            .expect("Failed to spawn scripted engine worker");

        self.workers.insert(
            instance.raw(),
            Worker {
                commands: tx,
                handle,
            },
        );
        log::info!(
            "scripted engine instance {} created for #{container_id}",
            instance.raw()
        );
        Some(EngineHandle {
            instance,
            container_id: container_id.to_string(),
        })
    }

    fn load(&mut self, handle: &EngineHandle, url: &str) {
        log::debug!("scripted engine loading {url}");
        self.send(handle.instance, WorkerCommand::Load);
    }

    fn subscribe(&mut self, handle: &EngineHandle, sink: EventSink) {
        self.send(handle.instance, WorkerCommand::Subscribe(sink));
    }

    fn play_pause(&mut self, handle: &EngineHandle) {
        self.send(handle.instance, WorkerCommand::PlayPause);
    }

    fn skip_forward(&mut self, handle: &EngineHandle, seconds: f64) {
        self.send(handle.instance, WorkerCommand::SkipForward(seconds));
    }

    fn skip_backward(&mut self, handle: &EngineHandle, seconds: f64) {
        self.send(handle.instance, WorkerCommand::SkipBackward(seconds));
    }

    fn restart(&mut self, handle: &EngineHandle) {
        self.send(handle.instance, WorkerCommand::Restart);
    }

    fn destroy(&mut self, handle: EngineHandle) {
        log::info!("scripted engine instance {} destroyed", handle.instance.raw());
        self.shutdown(handle.instance);
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        let instances: Vec<u64> = self.workers.keys().copied().collect();
        for raw in instances {
            self.shutdown(InstanceId::new(raw));
        }
    }
}

/// Per-instance playback simulation
fn worker_thread(
    rx: mpsc::Receiver<WorkerCommand>,
    instance: InstanceId,
    simulation: SimulationConfig,
) {
    let mut sink: Option<EventSink> = None;
    let mut decode_deadline: Option<Instant> = None;
    let mut ready = false;
    let mut playing = false;
    let mut position = 0.0_f64;
    let mut last_advance = Instant::now();
    let duration = simulation.duration_seconds;
    let tick = Duration::from_millis(simulation.progress_interval_ms.max(1));

    let emit = |sink: &Option<EventSink>, event: EngineEvent| {
        if let Some(sink) = sink {
            let _ = sink.send(EngineNotice::new(instance, event));
        }
    };

    loop {
        match rx.recv_timeout(tick) {
            Ok(WorkerCommand::Subscribe(new_sink)) => sink = Some(new_sink),
            Ok(WorkerCommand::Load) => {
                decode_deadline =
                    Some(Instant::now() + Duration::from_millis(simulation.decode_delay_ms));
            }
            Ok(WorkerCommand::PlayPause) => {
                if ready {
                    playing = !playing;
                    last_advance = Instant::now();
                    emit(&sink, if playing { EngineEvent::Play } else { EngineEvent::Pause });
                }
            }
            Ok(WorkerCommand::SkipForward(seconds)) => {
                if ready {
                    position = (position + seconds).min(duration);
                    emit(&sink, EngineEvent::Progress { position });
                }
            }
            Ok(WorkerCommand::SkipBackward(seconds)) => {
                if ready {
                    position = (position - seconds).max(0.0);
                    emit(&sink, EngineEvent::Progress { position });
                }
            }
            Ok(WorkerCommand::Restart) => {
                if ready {
                    position = 0.0;
                    playing = true;
                    last_advance = Instant::now();
                    emit(&sink, EngineEvent::Play);
                    emit(&sink, EngineEvent::Progress { position });
                }
            }
            Ok(WorkerCommand::Destroy) => {
                // Unsubscribe before anything else: no delivery may follow
                sink = None;
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(deadline) = decode_deadline {
            if !ready && Instant::now() >= deadline {
                ready = true;
                decode_deadline = None;
                emit(&sink, EngineEvent::Ready { duration });
            }
        }

        if ready && playing {
            let now = Instant::now();
            position += now.duration_since(last_advance).as_secs_f64();
            last_advance = now;
            if position >= duration {
                // Park at the end; the controller answers with a restart
                position = duration;
                playing = false;
                emit(&sink, EngineEvent::Finish);
            } else {
                emit(&sink, EngineEvent::Progress { position });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;

    fn fast_simulation() -> SimulationConfig {
        SimulationConfig {
            decode_delay_ms: 10,
            duration_seconds: 1.0,
            progress_interval_ms: 5,
        }
    }

    fn wait_for(rx: &mpsc::Receiver<EngineNotice>, want: fn(&EngineEvent) -> bool) -> EngineNotice {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match rx.try_recv() {
                Ok(notice) if want(&notice.event) => return notice,
                Ok(_) => {}
                Err(TryRecvError::Empty) => {
                    assert!(Instant::now() < deadline, "timed out waiting for event");
                    thread::sleep(Duration::from_millis(2));
                }
                Err(TryRecvError::Disconnected) => panic!("worker hung up"),
            }
        }
    }

    #[test]
    fn test_decode_reports_ready() {
        let mut engine = ScriptedEngine::new(fast_simulation());
        let handle = engine
            .create("waveform-test", &EngineConfig::default())
            .unwrap();
        let (tx, rx) = mpsc::channel();
        engine.subscribe(&handle, tx);
        engine.load(&handle, "demo://track");

        let notice = wait_for(&rx, |event| matches!(event, EngineEvent::Ready { .. }));
        assert_eq!(notice.instance, handle.instance);
        engine.destroy(handle);
    }

    #[test]
    fn test_destroy_silences_instance() {
        let mut engine = ScriptedEngine::new(fast_simulation());
        let handle = engine
            .create("waveform-test", &EngineConfig::default())
            .unwrap();
        let (tx, rx) = mpsc::channel();
        engine.subscribe(&handle, tx);
        engine.load(&handle, "demo://track");
        wait_for(&rx, |event| matches!(event, EngineEvent::Ready { .. }));

        engine.play_pause(&handle);
        wait_for(&rx, |event| matches!(event, EngineEvent::Play));

        engine.destroy(handle);
        // Drain whatever was queued before destroy completed; nothing may
        // arrive afterwards
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_finish_emitted_at_end() {
        let mut engine = ScriptedEngine::new(fast_simulation());
        let handle = engine
            .create("waveform-test", &EngineConfig::default())
            .unwrap();
        let (tx, rx) = mpsc::channel();
        engine.subscribe(&handle, tx);
        engine.load(&handle, "demo://track");
        wait_for(&rx, |event| matches!(event, EngineEvent::Ready { .. }));

        engine.play_pause(&handle);
        wait_for(&rx, |event| matches!(event, EngineEvent::Finish));
        engine.destroy(handle);
    }
}
