use std::collections::VecDeque;
use std::io;
use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::EventStream;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use futures::Stream;
use futures::StreamExt;
use tokio::time;
use tokio::time::Interval;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;

use crate::camera::Camera;
use crate::client::GridClient;
use crate::config::RenderConfig;
use crate::events;
use crate::events::Action;
use crate::icons;
use crate::icons::ICON_SIZE;
use crate::icons::Icon;
use crate::render::DrawOutcome;

const HELP: &str = "q quit  c clear  r random  g glider  s step  space refresh  +/- size  [/] speed  b buttons";

/// The terminal viewer.
///
/// Actions are handled one at a time, so two grid requests are never in flight at once. Input is
/// still read while a request is pending: quitting abandons it, other keys wait their turn.
pub struct App {
    client: GridClient,
    config: RenderConfig,
    camera: Camera,
    buttons: Vec<String>,
    show_buttons: bool,
    refresh: Option<Duration>,
    last: Option<DrawOutcome>,
}

impl App {
    pub fn new(client: GridClient, config: RenderConfig, refresh: Option<Duration>) -> Self {
        let (w, h) = config.canvas_size();

        Self {
            client,
            config,
            camera: Camera::new(w as usize, h as usize),
            buttons: button_bar(&mut rand::thread_rng()),
            show_buttons: true,
            refresh,
            last: None,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Take over the terminal until the user quits. The terminal is restored even if the loop
    /// fails.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        queue!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        stdout.flush()?;

        let res = self.event_loop(&mut stdout, EventStream::new()).await;

        queue!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
        stdout.flush()?;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;

        res
    }

    async fn event_loop<W, St>(&mut self, out: &mut W, mut stream: St) -> anyhow::Result<()>
    where
        W: Write,
        St: Stream<Item = io::Result<CrossTermEvent>> + Unpin,
    {
        let mut ticker = self.refresh.map(|period| {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        // the first fetch goes through the queue so it can be interrupted like any other
        let mut pending = VecDeque::from([Action::Button(Icon::Refresh)]);
        self.present(out)?;

        loop {
            let action = match pending.pop_front() {
                Some(action) => Some(action),
                None => tokio::select! {
                    event = stream.next() => match event {
                        Some(event) => events::convert_event(event?),
                        None => Some(Action::Exit),
                    },
                    _ = tick(ticker.as_mut()) => Some(Action::Button(Icon::Refresh)),
                },
            };

            let Some(action) = action else { continue };

            if !self.apply_watching(action, &mut stream, &mut pending).await? {
                info!("exiting");
                return Ok(());
            }

            self.present(out)?;
        }
    }

    /// Apply `action` while still reading input.
    ///
    /// An exit request, or the end of `stream`, abandons the request in flight and returns
    /// `false`. Anything else the user asks for meanwhile is queued on `pending`. Ticks are not
    /// queued, a refresh is already underway.
    async fn apply_watching<St>(
        &mut self,
        action: Action,
        stream: &mut St,
        pending: &mut VecDeque<Action>,
    ) -> io::Result<bool>
    where
        St: Stream<Item = io::Result<CrossTermEvent>> + Unpin,
    {
        let applied = self.apply(action);
        tokio::pin!(applied);

        loop {
            tokio::select! {
                biased;

                running = &mut applied => return Ok(running),
                event = stream.next() => match event {
                    None => return Ok(false),
                    Some(event) => match events::convert_event(event?) {
                        Some(Action::Exit) => {
                            debug!(?action, "exit requested, abandoning request");
                            return Ok(false);
                        }
                        Some(queued) => pending.push_back(queued),
                        None => {}
                    },
                },
            }
        }
    }

    /// Perform `action`. Returns `false` once the app should exit.
    pub async fn apply(&mut self, action: Action) -> bool {
        debug!(?action, "applying action");

        match action {
            Action::Exit => return false,
            Action::Redraw => {}
            Action::ToggleButtons => self.show_buttons = !self.show_buttons,
            Action::Button(icon) => match icon.endpoint() {
                Some(endpoint) => self.control(endpoint).await,
                None => self.refresh_grid().await,
            },
            Action::Step => self.control(events::STEP_ENDPOINT).await,
            Action::GrowCells => {
                self.config.grow_cells();
                self.refresh_grid().await;
            }
            Action::ShrinkCells => {
                self.config.shrink_cells();
                self.refresh_grid().await;
            }
            Action::SlowDown => {
                self.config.slow_down();
                self.refresh_grid().await;
            }
            Action::SpeedUp => {
                self.config.speed_up();
                self.refresh_grid().await;
            }
        }

        true
    }

    async fn refresh_grid(&mut self) {
        self.last = self
            .client
            .refresh_grid(&mut self.camera, &self.config)
            .await;
    }

    async fn control(&mut self, endpoint: &str) {
        self.last = self
            .client
            .fetch_and_refresh(endpoint, &mut self.camera, &self.config)
            .await;
    }

    pub fn status_line(&self) -> String {
        let last = match self.last {
            Some(DrawOutcome::Drawn { filled }) => format!("{filled} alive"),
            Some(DrawOutcome::ShapeMismatch) => "no grid".to_string(),
            None => "server unreachable".to_string(),
        };

        format!(
            "{} | size {} | frametime {}ms | {last}",
            self.client.base(),
            self.config.cell_size(),
            self.config.frametime_ms(),
        )
    }

    fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        for line in self.camera.render().lines() {
            queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        if self.show_buttons {
            for line in &self.buttons {
                queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
            }
        }

        queue!(
            out,
            style::Print(self.status_line()),
            cursor::MoveToNextLine(1),
            style::Print(HELP),
        )?;

        out.flush()
    }
}

async fn tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Render the four buttons side by side, one string per terminal row
pub fn button_bar<R: rand::Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let side = ICON_SIZE as usize;
    let mut cameras: [Camera; 4] = std::array::from_fn(|_| Camera::new(side, side));

    icons::draw_buttons(&mut cameras, rng);

    let frames: Vec<Vec<String>> = cameras
        .iter_mut()
        .map(|cam| cam.render().lines().map(str::to_string).collect())
        .collect();

    let rows = frames.first().map_or(0, Vec::len);

    (0..rows)
        .map(|row| {
            frames
                .iter()
                .map(|frame| frame[row].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
