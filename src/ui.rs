//! Layout and drawing: board, next preview, score.

use crate::piece::PieceKind;
use crate::playfield::{Cell, HEIGHT, WIDTH};
use crate::render::Scene;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Each grid cell is two terminal columns wide so blocks look square.
const CELL_WIDTH: u16 = 2;
const BLOCK: &str = "██";
const SIDEBAR_WIDTH: u16 = 16;
/// Preview box interior: 4x2 cells is enough for every kind at rotation 0.
const PREVIEW_COLS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

/// Board size in terminal cells, border included.
pub const fn board_size() -> (u16, u16) {
    (WIDTH as u16 * CELL_WIDTH + 2, HEIGHT as u16 + 2)
}

/// Draw the whole game screen centred in the frame.
pub fn draw(frame: &mut Frame, scene: &Scene, theme: &Theme) {
    let area = frame.area();
    let (bw, bh) = board_size();
    let total_w = bw + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let buf = frame.buffer_mut();
    draw_board(buf, scene, theme, inner[0]);
    draw_sidebar(buf, scene, theme, inner[1]);
}

fn panel(theme: &Theme, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border).bg(theme.bg))
        .title(Span::styled(title, Style::default().fg(theme.title)))
}

fn draw_board(buf: &mut Buffer, scene: &Scene, theme: &Theme, area: Rect) {
    let block = panel(theme, " termtris ");
    let inner = block.inner(area);
    block.render(area, buf);

    let grid = scene.composed();
    let empty = Style::default().bg(theme.bg);
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let style = match cell {
                Cell::Filled if is_active_block(scene, x, y) => {
                    Style::default().fg(theme.active).bg(theme.bg)
                }
                Cell::Filled => Style::default().fg(theme.block).bg(theme.bg),
                Cell::Empty => empty,
            };
            let symbol = if *cell == Cell::Filled { BLOCK } else { "  " };
            put(buf, inner, x as u16 * CELL_WIDTH, y as u16, symbol, style);
        }
    }
}

fn is_active_block(scene: &Scene, x: usize, y: usize) -> bool {
    scene.piece.is_some_and(|p| {
        p.blocks()
            .iter()
            .any(|&(bx, by)| bx == x as i32 && by == y as i32)
    })
}

fn draw_sidebar(buf: &mut Buffer, scene: &Scene, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PREVIEW_ROWS + 2), // Next (border + preview)
            Constraint::Length(1),                // gap
            Constraint::Length(4),                // Score + lines
            Constraint::Length(1),                // gap
            Constraint::Fill(1),                  // Keys
        ])
        .split(area);

    let next_block = panel(theme, " Next ");
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], buf);
    if let Some(kind) = scene.next {
        draw_preview(buf, kind, theme.preview, next_inner);
    }

    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.text);
    let stats_block = panel(theme, " Score ");
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], buf);
    let stats = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(scene.score.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Lines: ", title_style),
            Span::styled(scene.lines.to_string(), fg_style),
        ]),
    ];
    Paragraph::new(Text::from(stats)).render(stats_inner, buf);

    let keys = vec![
        Line::from(Span::styled("a/d ←/→  move", fg_style)),
        Line::from(Span::styled("w/↑      rotate", fg_style)),
        Line::from(Span::styled("s/↓      drop", fg_style)),
        Line::from(Span::styled("q/Esc    quit", fg_style)),
    ];
    Paragraph::new(Text::from(keys)).render(chunks[4], buf);
}

/// Next piece at rotation 0, pinned to the preview's top-left.
fn draw_preview(buf: &mut Buffer, kind: PieceKind, color: Color, area: Rect) {
    let style = Style::default().fg(color);
    for &(dx, dy) in kind.cells() {
        let (dx, dy) = (dx as u16, dy as u16);
        if dx < PREVIEW_COLS && dy < PREVIEW_ROWS {
            put(buf, area, dx * CELL_WIDTH, dy, BLOCK, style);
        }
    }
}

/// Write `symbol` at an offset inside `area`, clipped to it.
fn put(buf: &mut Buffer, area: Rect, dx: u16, dy: u16, symbol: &str, style: Style) {
    if dx + CELL_WIDTH <= area.width && dy < area.height {
        buf.set_string(area.x + dx, area.y + dy, symbol, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ActivePiece;
    use crate::render::Renderer;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(scene: &Scene) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        let theme = Theme::default();
        terminal.draw(|f| draw(f, scene, &theme)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_board_fits_default_terminal() {
        let (w, h) = board_size();
        assert!(w + SIDEBAR_WIDTH <= 80);
        assert!(h <= 24);
    }

    #[test]
    fn test_draws_score_and_blocks() {
        let mut scene = Scene::default();
        scene.draw_score(120);
        scene.draw_lines_cleared(12);
        scene.draw_next_piece(PieceKind::Line);
        scene.draw_active_piece(&ActivePiece {
            kind: PieceKind::Square,
            x: 4,
            y: 3,
            rotation: 0,
        });
        let out = text(&render(&scene));
        assert!(out.contains("Score: 120"), "{out}");
        assert!(out.contains("Lines: 12"), "{out}");
        // Line preview is 4 blocks in a row.
        assert!(out.contains(&BLOCK.repeat(4)), "{out}");
        // Square is 2 blocks wide on two rows.
        assert!(out.lines().filter(|l| l.contains("████")).count() >= 3);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(8, 4)).unwrap();
        let scene = Scene::default();
        let theme = Theme::default();
        terminal.draw(|f| draw(f, &scene, &theme)).unwrap();
    }
}
