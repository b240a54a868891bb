//! Audio playback thread
//!
//! Owns the output stream and two sinks: the looping background music and a
//! one-shot soundtrack for the video screen. Everything runs on a dedicated
//! thread driven by a command channel; playback failures are logged and
//! reported as events, never surfaced as errors to the caller.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::mpsc::UnboundedSender;

use crate::models::MediaKind;

/// Commands accepted by the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Start the music, or resume it from its current position.
    PlayMusic { volume: f32 },
    PauseMusic,
    /// Adjust music volume without touching the playing flag.
    SetVolume(f32),
    /// Play the video soundtrack from the beginning.
    PlayVideo,
    PauseVideo,
    ResumeVideo,
    StopVideo,
    Shutdown,
}

/// Playback lifecycle reports, fed back into the app's action stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started {
        kind: MediaKind,
        duration: Option<Duration>,
    },
    Finished {
        kind: MediaKind,
    },
    Failed {
        kind: MediaKind,
        reason: String,
    },
}

/// Sink state that must live on the audio thread.
struct AudioState {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    music_sink: Option<Sink>,
    video_sink: Option<Sink>,
}

/// Handle to the audio thread. All methods are fire-and-forget; a handle
/// built with [`Player::disabled`] silently drops every command.
pub struct Player {
    command_tx: Option<mpsc::Sender<PlayerCommand>>,
    _audio_thread: Option<thread::JoinHandle<()>>,
}

impl Player {
    /// Spawn the audio thread for the given tracks. Output-device failures
    /// are reported per command rather than here, so startup never blocks
    /// on audio hardware.
    pub fn new(music_path: PathBuf, video_path: PathBuf, events: UnboundedSender<PlayerEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();

        let audio_thread = thread::Builder::new()
            .name("keepsake-audio".to_string())
            .spawn(move || audio_thread_main(music_path, video_path, command_rx, events));

        let audio_thread = match audio_thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("could not spawn audio thread: {}", e);
                None
            }
        };

        Self {
            command_tx: Some(command_tx),
            _audio_thread: audio_thread,
        }
    }

    /// A handle with no thread behind it. Used by tests and as a last
    /// resort when the thread could not be spawned.
    pub fn disabled() -> Self {
        Self {
            command_tx: None,
            _audio_thread: None,
        }
    }

    pub fn play_music(&self, volume: f32) {
        self.send(PlayerCommand::PlayMusic { volume });
    }

    pub fn pause_music(&self) {
        self.send(PlayerCommand::PauseMusic);
    }

    pub fn set_volume(&self, volume: f32) {
        self.send(PlayerCommand::SetVolume(volume));
    }

    pub fn play_video(&self) {
        self.send(PlayerCommand::PlayVideo);
    }

    pub fn pause_video(&self) {
        self.send(PlayerCommand::PauseVideo);
    }

    pub fn resume_video(&self) {
        self.send(PlayerCommand::ResumeVideo);
    }

    pub fn stop_video(&self) {
        self.send(PlayerCommand::StopVideo);
    }

    fn send(&self, command: PlayerCommand) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(command);
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(PlayerCommand::Shutdown);
        }
    }
}

fn audio_thread_main(
    music_path: PathBuf,
    video_path: PathBuf,
    command_rx: mpsc::Receiver<PlayerCommand>,
    events: UnboundedSender<PlayerEvent>,
) {
    tracing::debug!("audio thread starting");

    // OutputStream::try_default() can hang or fail on headless systems;
    // without it every later command degrades to a logged warning.
    let mut state = match OutputStream::try_default() {
        Ok((stream, handle)) => Some(AudioState {
            _stream: stream,
            stream_handle: handle,
            music_sink: None,
            video_sink: None,
        }),
        Err(e) => {
            tracing::warn!("could not initialize audio output: {}", e);
            let _ = events.send(PlayerEvent::Failed {
                kind: MediaKind::Music,
                reason: format!("no audio output: {e}"),
            });
            None
        }
    };

    loop {
        match command_rx.recv_timeout(Duration::from_millis(200)) {
            Ok(PlayerCommand::PlayMusic { volume }) => match state {
                Some(ref mut s) => play_or_resume_music(s, &music_path, volume, &events),
                None => {
                    let _ = events.send(PlayerEvent::Failed {
                        kind: MediaKind::Music,
                        reason: "no audio output".to_string(),
                    });
                }
            },
            Ok(PlayerCommand::PauseMusic) => {
                if let Some(ref s) = state
                    && let Some(ref sink) = s.music_sink
                {
                    sink.pause();
                }
            }
            Ok(PlayerCommand::SetVolume(volume)) => {
                if let Some(ref s) = state
                    && let Some(ref sink) = s.music_sink
                {
                    sink.set_volume(volume);
                }
            }
            Ok(PlayerCommand::PlayVideo) => match state {
                Some(ref mut s) => start_video_soundtrack(s, &video_path, &events),
                None => {
                    let _ = events.send(PlayerEvent::Failed {
                        kind: MediaKind::Video,
                        reason: "no audio output".to_string(),
                    });
                }
            },
            Ok(PlayerCommand::PauseVideo) => {
                if let Some(ref s) = state
                    && let Some(ref sink) = s.video_sink
                {
                    sink.pause();
                }
            }
            Ok(PlayerCommand::ResumeVideo) => {
                if let Some(ref s) = state
                    && let Some(ref sink) = s.video_sink
                {
                    sink.play();
                }
            }
            Ok(PlayerCommand::StopVideo) => {
                if let Some(ref mut s) = state
                    && let Some(sink) = s.video_sink.take()
                {
                    sink.stop();
                }
            }
            Ok(PlayerCommand::Shutdown) => {
                if let Some(ref mut s) = state {
                    if let Some(sink) = s.music_sink.take() {
                        sink.stop();
                    }
                    if let Some(sink) = s.video_sink.take() {
                        sink.stop();
                    }
                }
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                // The looping music sink never drains; only the video
                // soundtrack can actually finish.
                if let Some(ref mut s) = state
                    && s.video_sink.as_ref().is_some_and(|sink| sink.empty())
                {
                    s.video_sink = None;
                    let _ = events.send(PlayerEvent::Finished {
                        kind: MediaKind::Video,
                    });
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::debug!("audio thread exited");
}

/// Resume the persistent music sink, creating it on first use. The sink
/// keeps its position across pauses, so resuming continues where the music
/// left off.
fn play_or_resume_music(
    state: &mut AudioState,
    path: &Path,
    volume: f32,
    events: &UnboundedSender<PlayerEvent>,
) {
    if let Some(ref sink) = state.music_sink {
        sink.set_volume(volume);
        sink.play();
        return;
    }

    let source = match open_source(path) {
        Ok(source) => source,
        Err(reason) => {
            tracing::warn!("could not start music {}: {}", path.display(), reason);
            let _ = events.send(PlayerEvent::Failed {
                kind: MediaKind::Music,
                reason,
            });
            return;
        }
    };

    let duration = source.total_duration();
    match Sink::try_new(&state.stream_handle) {
        Ok(sink) => {
            sink.set_volume(volume);
            sink.append(source.repeat_infinite());
            let _ = events.send(PlayerEvent::Started {
                kind: MediaKind::Music,
                duration,
            });
            state.music_sink = Some(sink);
        }
        Err(e) => {
            tracing::warn!("could not create music sink: {}", e);
            let _ = events.send(PlayerEvent::Failed {
                kind: MediaKind::Music,
                reason: e.to_string(),
            });
        }
    }
}

/// Decode the audio track of the video file into a fresh sink. Containers
/// with no decodable audio degrade to a silent video screen.
fn start_video_soundtrack(
    state: &mut AudioState,
    path: &Path,
    events: &UnboundedSender<PlayerEvent>,
) {
    if let Some(sink) = state.video_sink.take() {
        sink.stop();
    }

    let source = match open_source(path) {
        Ok(source) => source,
        Err(reason) => {
            tracing::warn!("could not start video soundtrack {}: {}", path.display(), reason);
            let _ = events.send(PlayerEvent::Failed {
                kind: MediaKind::Video,
                reason,
            });
            return;
        }
    };

    let duration = source.total_duration();
    match Sink::try_new(&state.stream_handle) {
        Ok(sink) => {
            sink.append(source);
            let _ = events.send(PlayerEvent::Started {
                kind: MediaKind::Video,
                duration,
            });
            state.video_sink = Some(sink);
        }
        Err(e) => {
            tracing::warn!("could not create video sink: {}", e);
            let _ = events.send(PlayerEvent::Failed {
                kind: MediaKind::Video,
                reason: e.to_string(),
            });
        }
    }
}

fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    Decoder::new(BufReader::new(file)).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_player_swallows_commands() {
        let player = Player::disabled();
        player.play_music(0.5);
        player.pause_music();
        player.set_volume(0.9);
        player.play_video();
        player.pause_video();
        player.resume_video();
        player.stop_video();
        // Drop sends Shutdown into the void without panicking.
        drop(player);
    }

    #[test]
    fn test_open_source_missing_file() {
        let result = open_source(Path::new("/nonexistent/song.mp3"));
        assert!(result.is_err());
    }
}
