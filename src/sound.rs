use rodio::OutputStream;
use rodio::source::{SineWave, Source};
use std::{
    error::Error,
    fmt,
    sync::mpsc,
    thread,
    time::Duration,
};

const BEEP_FREQ_HZ: f32 = 880.0;
const BEEP_DURATION: Duration = Duration::from_millis(150);
const BEEP_VOLUME: f32 = 0.8;

/// Errors that can occur when using the beep player.
#[derive(Debug)]
pub enum SoundError {
    /// The worker thread has shut down and cannot accept new requests.
    WorkerGone,
    /// Failed to spawn the audio worker thread.
    SpawnFailed(String),
}

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundError::WorkerGone => write!(f, "Audio worker has shut down"),
            SoundError::SpawnFailed(msg) => write!(f, "Failed to spawn audio worker: {msg}"),
        }
    }
}

impl Error for SoundError {}

enum Message {
    Play,
    Shutdown,
}

/// Plays the radar beep on a dedicated worker thread so audio backend
/// latency never stalls the render loop.
///
/// The output stream is opened lazily when the worker starts. If no audio
/// device is available, every play request becomes a silent no-op; there is
/// no retry and no error surfaces to the UI.
pub struct BeepPlayer {
    sender: Option<mpsc::Sender<Message>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl BeepPlayer {
    pub fn spawn() -> Result<Self, SoundError> {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("beep-worker".to_string())
            .spawn(move || worker_loop(receiver))
            .map_err(|e| SoundError::SpawnFailed(e.to_string()))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Request one beep, fire-and-forget. Never waits on the audio backend;
    /// overlapping requests follow the mixer's native one-shot semantics.
    pub fn play(&self) -> Result<(), SoundError> {
        self.sender
            .as_ref()
            .ok_or(SoundError::WorkerGone)?
            .send(Message::Play)
            .map_err(|_| SoundError::WorkerGone)
    }
}

fn worker_loop(receiver: mpsc::Receiver<Message>) {
    // Lazy init on the worker, never on the UI thread. The stream half of
    // the pair must stay alive for the handle to produce sound.
    let output = OutputStream::try_default().ok();

    loop {
        match receiver.recv() {
            Ok(Message::Play) => {
                if let Some((_stream, handle)) = &output {
                    let beep = SineWave::new(BEEP_FREQ_HZ)
                        .take_duration(BEEP_DURATION)
                        .amplify(BEEP_VOLUME);
                    // A failed submit means "stay silent", same as no device.
                    let _ = handle.play_raw(beep);
                }
            }
            Ok(Message::Shutdown) | Err(_) => break,
        }
    }
}

impl Drop for BeepPlayer {
    fn drop(&mut self) {
        // Signal shutdown, then close the channel so the worker cannot miss
        // it, then wait for any in-flight init/playback submit to finish.
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(Message::Shutdown);
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_requests_are_accepted() {
        let player = BeepPlayer::spawn().unwrap();
        player.play().unwrap();
        player.play().unwrap();
    }

    // Works with or without an audio device: a missing device makes plays
    // silent no-ops, and drop must still join the worker.
    #[test]
    fn drop_joins_the_worker() {
        let player = BeepPlayer::spawn().unwrap();
        for _ in 0..5 {
            player.play().unwrap();
        }
        drop(player);
    }
}
