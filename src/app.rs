//! App: terminal init, fixed-tick main loop, teardown.

use crate::GameConfig;
use crate::game::{GameOver, GameState};
use crate::input::{Command, InputSource, KeyboardInput};
use crate::piece::{ActivePiece, PieceKind};
use crate::playfield::Grid;
use crate::render::{Renderer, Scene};
use crate::theme::Theme;
use anyhow::Result;
use ratatui::DefaultTerminal;
use std::time::Duration;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player quit; nothing is reported.
    Quit,
    /// The stack overflowed the field.
    GameOver { score: u32 },
}

/// Renderer that collects a `Scene` and draws it with ratatui on `present`.
pub struct TerminalRenderer<'a> {
    terminal: &'a mut DefaultTerminal,
    theme: Theme,
    scene: Scene,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal, theme: Theme) -> Self {
        Self {
            terminal,
            theme,
            scene: Scene::default(),
        }
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn draw_grid(&mut self, grid: &Grid) {
        self.scene.draw_grid(grid);
    }

    fn draw_active_piece(&mut self, piece: &ActivePiece) {
        self.scene.draw_active_piece(piece);
    }

    fn draw_next_piece(&mut self, kind: PieceKind) {
        self.scene.draw_next_piece(kind);
    }

    fn draw_score(&mut self, score: u32) {
        self.scene.draw_score(score);
    }

    fn draw_lines_cleared(&mut self, lines: u32) {
        self.scene.draw_lines_cleared(lines);
    }

    fn present(&mut self) -> Result<()> {
        let Self {
            terminal,
            theme,
            scene,
        } = self;
        terminal.draw(|f| crate::ui::draw(f, scene, theme))?;
        scene.present()
    }
}

/// The game loop. Owns the state exclusively; one input, one gravity step
/// and one redraw per tick.
pub struct App<R, I> {
    state: GameState,
    renderer: R,
    input: I,
    tick: Duration,
}

impl<R: Renderer, I: InputSource> App<R, I> {
    pub fn new(state: GameState, renderer: R, input: I, tick: Duration) -> Self {
        Self {
            state,
            renderer,
            input,
            tick,
        }
    }

    /// Run ticks until the player quits or the stack overflows.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.tick()? {
                return Ok(outcome);
            }
            if !self.tick.is_zero() {
                std::thread::sleep(self.tick);
            }
        }
    }

    /// One iteration: at most one command, then gravity, then redraw.
    /// Returns the outcome once the game has ended.
    pub fn tick(&mut self) -> Result<Option<Outcome>> {
        let command = self.input.poll_command()?;
        if command == Some(Command::Quit) {
            return Ok(Some(Outcome::Quit));
        }
        if let Err(GameOver { score }) = self.step(command) {
            return Ok(Some(Outcome::GameOver { score }));
        }
        self.state.render(&mut self.renderer);
        self.renderer.present()?;
        Ok(None)
    }

    fn step(&mut self, command: Option<Command>) -> Result<(), GameOver> {
        if let Some(command) = command {
            self.state.apply(command)?;
        }
        self.state.gravity()
    }
}

/// Set up the terminal, play one game, and restore the terminal whatever happened.
pub fn run(config: &GameConfig, theme: Theme) -> Result<Outcome> {
    use crossterm::{
        cursor::Hide,
        execute,
        terminal::{EnterAlternateScreen, disable_raw_mode, enable_raw_mode},
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
        // Raw mode is already on; undo it before bailing out.
        let _ = disable_raw_mode();
        return Err(err.into());
    }

    let result = ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            let state = GameState::new(config.seed);
            let renderer = TerminalRenderer::new(&mut terminal, theme);
            let mut app = App::new(state, renderer, KeyboardInput, config.tick);
            app.run()
        });

    settle(result, restore_terminal())
}

/// Show the cursor, leave the alternate screen and drop raw mode. Every step
/// is attempted; the first failure is returned.
fn restore_terminal() -> std::io::Result<()> {
    use crossterm::{
        cursor::Show,
        execute,
        terminal::{LeaveAlternateScreen, disable_raw_mode},
    };

    let screen = execute!(std::io::stdout(), Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw)
}

/// Combine the game's result with the teardown's. A finished game keeps its
/// outcome even if teardown failed, so the final score is still reported.
/// A game error wins over a teardown error, which is attached as context.
fn settle<T>(result: Result<T>, restored: std::io::Result<()>) -> Result<T> {
    match (result, restored) {
        (Ok(outcome), _) => Ok(outcome),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(teardown)) => {
            Err(err.context(format!("terminal restore also failed: {teardown}")))
        }
    }
}
