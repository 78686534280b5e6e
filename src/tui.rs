use crate::radar::{self, RadarScope};
use crate::sound::BeepPlayer;
use crate::timing::Cadence;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{Terminal, crossterm};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

const FRAME_PERIOD: Duration = Duration::from_millis(16);
const BEEP_PERIOD: Duration = Duration::from_millis(1200);
const TARGET_COUNT: usize = 7;

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyCode),
}

#[derive(Clone, Debug)]
pub enum UpdateCommand {
    None,
    Quit,
}

pub struct App {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,
    scope: RadarScope,
    beeper: BeepPlayer,
}

impl App {
    pub fn new() -> AppResult<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
        let (msg_tx, msg_rx) = mpsc::channel();

        let scope = RadarScope::new(radar::generate_targets(TARGET_COUNT));
        let beeper = BeepPlayer::spawn()?;

        Ok(Self {
            terminal,
            msg_tx,
            msg_rx,
            scope,
            beeper,
        })
    }

    fn enter(&self) -> AppResult<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen)?;
        Ok(())
    }

    pub fn exit(&mut self) -> AppResult<()> {
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.terminal.flush()?;
            crossterm::execute!(std::io::stdout(), LeaveAlternateScreen)?;
            crossterm::terminal::disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    pub fn run(&mut self) -> AppResult<()> {
        self.enter()?;

        // Two independent free-running timers; neither waits on the other.
        let mut frame_cadence = Cadence::new(FRAME_PERIOD);
        let mut beep_cadence = Cadence::new(BEEP_PERIOD);

        // Input thread blocks safely on stdin and forwards key events.
        let input_tx = self.msg_tx.clone();
        thread::spawn(move || {
            loop {
                if let Ok(Event::Key(key)) = crossterm::event::read() {
                    if key.kind == KeyEventKind::Press {
                        if input_tx.send(Message::KeyPress(key.code)).is_err() {
                            break; // main thread exited
                        }
                    }
                }
            }
        });

        loop {
            while let Ok(msg) = self.msg_rx.try_recv() {
                if let UpdateCommand::Quit = self.update(&msg) {
                    self.exit()?;
                    return Ok(());
                }
            }

            let now = Instant::now();

            if beep_cadence.poll(now) {
                // Backend trouble stays silent; the display keeps running.
                let _ = self.beeper.play();
            }

            if frame_cadence.poll(now) {
                self.scope.sweep_angle = radar::current_sweep_angle();
                self.view()?;
            }

            // Sleep until the earliest pending tick, yield to CPU.
            let next_event = std::cmp::min(
                frame_cadence.next_deadline(),
                beep_cadence.next_deadline(),
            );
            thread::sleep(next_event.saturating_duration_since(Instant::now()));
        }
    }

    fn update(&mut self, message: &Message) -> UpdateCommand {
        match message {
            Message::KeyPress(key) => match key {
                KeyCode::Esc | KeyCode::Char('q') => UpdateCommand::Quit,
                _ => UpdateCommand::None,
            },
        }
    }

    fn view(&mut self) -> AppResult<()> {
        // Full-frame scope; resize is handled by drawing against the
        // current area every frame.
        self.terminal.draw(|f| {
            f.render_widget(&self.scope, f.area());
        })?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
