//! Application state: the active effect screen and its session.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use fxlab::{
    graph::{BitCrusherNode, ClipperNode, EffectControls, EffectUnit, ToneFilterNode},
    session::{CpalBackend, OutputBackend, Session, SessionError, SessionState},
    source::{demo_loop, SampleBuffer},
};

use crate::ui;

/// Ramp applied to slider moves, matching the feel of the classic
/// preview screens.
pub const SLIDER_RAMP_SECS: f32 = 0.02;

const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectScreen {
    BitCrusher,
    Clipper,
    ToneFilter,
}

impl EffectScreen {
    pub fn title(self) -> &'static str {
        match self {
            EffectScreen::BitCrusher => "Bit Crusher",
            EffectScreen::Clipper => "Clipper",
            EffectScreen::ToneFilter => "Tone Filter",
        }
    }

    fn factory(self) -> fn(f32) -> (Box<dyn EffectUnit>, EffectControls) {
        match self {
            EffectScreen::BitCrusher => BitCrusherNode::boxed,
            EffectScreen::Clipper => ClipperNode::boxed,
            EffectScreen::ToneFilter => ToneFilterNode::boxed,
        }
    }
}

pub struct App {
    pub screen: EffectScreen,
    pub session: Session,
    /// Selected control row: parameter indices first, balance last.
    pub selected: usize,
    pub status: Option<String>,
    asset: Option<PathBuf>,
    spectrum: ui::spectrum::SpectrumAnalyzer,
}

impl App {
    pub fn new(asset: Option<PathBuf>) -> EyreResult<Self> {
        let screen = EffectScreen::BitCrusher;
        let session = build_session(screen, asset.as_deref())
            .wrap_err("failed to build the initial preview session")?;
        let spectrum = ui::spectrum::SpectrumAnalyzer::new(
            fxlab::session::DEFAULT_SCOPE_CAPACITY,
            session.sample_rate(),
            48,
        );

        Ok(Self {
            screen,
            session,
            selected: 0,
            status: None,
            asset,
            spectrum,
        })
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        self.start_session();

        loop {
            let dry = self.session.scopes().dry.snapshot();
            let wet = self.session.scopes().wet.snapshot();
            let mix = self.session.scopes().mix.snapshot();
            self.spectrum.maybe_update(&mix);

            terminal.draw(|frame| ui::render(frame, self, &dry, &wet, &mix))?;

            if event::poll(FRAME_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('1') => self.switch_screen(EffectScreen::BitCrusher)?,
                        KeyCode::Char('2') => self.switch_screen(EffectScreen::Clipper)?,
                        KeyCode::Char('3') => self.switch_screen(EffectScreen::ToneFilter)?,
                        KeyCode::Char(' ') => self.toggle_playback(),
                        KeyCode::Up => self.select_previous(),
                        KeyCode::Down => self.select_next(),
                        KeyCode::Left => self.nudge_selected(-1.0),
                        KeyCode::Right => self.nudge_selected(1.0),
                        _ => {}
                    }
                }
            }
        }

        self.session.stop();
        Ok(())
    }

    /// Number of control rows: every effect parameter plus balance.
    pub fn control_rows(&self) -> usize {
        self.session.controls().params().len() + 1
    }

    pub fn spectrum_data(&self) -> &[(f64, f64)] {
        self.spectrum.data()
    }

    fn select_previous(&mut self) {
        if self.selected == 0 {
            self.selected = self.control_rows() - 1;
        } else {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.control_rows();
    }

    /// Move the selected control by `direction` hundredths of its range.
    fn nudge_selected(&mut self, direction: f32) {
        let params = self.session.controls().params();
        if self.selected < params.len() {
            let handle = &params[self.selected];
            let spec = *handle.spec();
            let step = (spec.max - spec.min) / 100.0;
            let target = handle.target() + step * direction;
            // The session clamps; out-of-range nudges are normal input.
            let _ = self
                .session
                .set_parameter(spec.name, target, SLIDER_RAMP_SECS);
        } else {
            self.session
                .set_balance(self.session.balance() + 0.01 * direction);
        }
    }

    fn toggle_playback(&mut self) {
        match self.session.state() {
            SessionState::Running => {
                self.session.stop();
                self.status = None;
            }
            SessionState::Stopped => self.start_session(),
        }
    }

    fn start_session(&mut self) {
        match self.session.start() {
            Ok(()) => self.status = None,
            // Already running can't happen from the Stopped arm; device
            // failures stay visible so the user can retry with space.
            Err(err @ SessionError::DeviceStart(_)) => {
                self.status = Some(format!("{err} - press space to retry"))
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn switch_screen(&mut self, screen: EffectScreen) -> EyreResult<()> {
        if screen == self.screen {
            return Ok(());
        }

        let was_running = self.session.state() == SessionState::Running;
        self.session.stop();

        self.session = build_session(screen, self.asset.as_deref())
            .wrap_err_with(|| format!("failed to open the {} screen", screen.title()))?;
        self.screen = screen;
        self.selected = 0;

        if was_running {
            self.start_session();
        }
        Ok(())
    }
}

fn build_session(
    screen: EffectScreen,
    asset: Option<&std::path::Path>,
) -> Result<Session, SessionError> {
    let backend = CpalBackend::open_default()?;
    let sample_rate = backend.sample_rate() as u32;

    let buffer = match asset {
        Some(path) => SampleBuffer::load(path)?,
        None => demo_loop(sample_rate),
    };

    Session::with_backend(buffer, screen.factory(), Box::new(backend))
}
