use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::banner::LossBanner;
use super::canvas::{Pixel, RasterCanvas};
use crate::game::{GameEngine, RunState, TickClock};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<C: TickClock>(
        &self,
        frame: &mut Frame,
        engine: &GameEngine<RasterCanvas, C, LossBanner>,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Canvas
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(engine.run_state(), engine.direction().as_str(), metrics);
        frame.render_widget(stats, chunks[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let canvas_area = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        frame.render_widget(CanvasView::new(engine.surface()), canvas_area);

        if engine.notifier().is_pending() {
            let popup = centered(chunks[1], 30, 5);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_loss(), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_stats(
        &self,
        run_state: RunState,
        direction: &'static str,
        metrics: &SessionMetrics,
    ) -> Paragraph<'_> {
        let state_color = match run_state {
            RunState::Running => Color::Green,
            RunState::Stopped => Color::Red,
        };

        let text = vec![Line::from(vec![
            Span::styled(
                run_state.as_str(),
                Style::default().fg(state_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Heading: ", Style::default().fg(Color::Yellow)),
            Span::styled(direction, Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Lost: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_lost.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_loss(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "You lost",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press any key",
                Style::default().fg(Color::Gray),
            )]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" start/stop | "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Downsamples a [`RasterCanvas`] onto terminal cells.
///
/// Terminal cells are roughly twice as tall as they are wide, so the canvas
/// is fitted at a 2:1 column-to-row ratio and centred in the area.
pub struct CanvasView<'a> {
    canvas: &'a RasterCanvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a RasterCanvas) -> Self {
        Self { canvas }
    }

    fn fit(&self, area: Rect) -> Rect {
        let (width, height) = (self.canvas.width() as u64, self.canvas.height() as u64);
        let rows_for_width = area.width as u64 * height / (2 * width);

        let (cols, rows) = if rows_for_width <= area.height as u64 {
            (area.width as u64, rows_for_width)
        } else {
            (
                (area.height as u64 * 2 * width / height).min(area.width as u64),
                area.height as u64,
            )
        };
        let (cols, rows) = (cols.max(1) as u16, rows.max(1) as u16);

        Rect::new(
            area.x + area.width.saturating_sub(cols) / 2,
            area.y + area.height.saturating_sub(rows) / 2,
            cols.min(area.width),
            rows.min(area.height),
        )
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let target = self.fit(area);
        let (width, height) = (self.canvas.width() as u64, self.canvas.height() as u64);
        let (cols, rows) = (target.width as u64, target.height as u64);

        // Each span is at most the canvas side, so it narrows back to u32
        let span = |index: u64, side: u64, count: u64| {
            let start = index * side / count;
            let end = ((index + 1) * side / count).max(start + 1);
            (start as u32, end as u32)
        };

        for row in 0..rows {
            let (y0, y1) = span(row, height, rows);

            for col in 0..cols {
                let (x0, x1) = span(col, width, cols);

                let (symbol, style) = match self.canvas.sample(x0, y0, x1, y1) {
                    Pixel::Fill => ("█", Style::default().fg(Color::Green)),
                    Pixel::Stroke => ("·", Style::default().fg(Color::DarkGray)),
                    Pixel::Blank => (" ", Style::default()),
                };

                let position = (target.x + col as u16, target.y + row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

/// A `width` x `height` rect centred in `area`, clamped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GridConfig, ManualClock, PixelRect, Surface};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_canvas_fit_keeps_aspect() {
        let canvas = RasterCanvas::new(400, 400).unwrap();
        let view = CanvasView::new(&canvas);

        // Wide area: height limits, 2 columns per row
        assert_eq!(view.fit(Rect::new(0, 0, 100, 20)), Rect::new(30, 0, 40, 20));

        // Tall area: width limits
        assert_eq!(view.fit(Rect::new(0, 0, 20, 30)), Rect::new(0, 10, 20, 10));
    }

    #[test]
    fn test_canvas_view_draws_fill_and_stroke() {
        let mut canvas = RasterCanvas::new(10, 10).unwrap();
        canvas.stroke_rect(PixelRect::new(0, 0, 10, 10));
        canvas.fill_rect(PixelRect::new(4, 4, 1, 1));

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&canvas).render(area, &mut buf);

        // Each pixel spans two columns and one row
        assert_eq!(buf[(8, 4)].symbol(), "█");
        assert_eq!(buf[(9, 4)].symbol(), "█");
        assert_eq!(buf[(0, 0)].symbol(), "·");
        assert_eq!(buf[(6, 6)].symbol(), " ");
    }

    #[test]
    fn test_canvas_view_tall_canvas_reaches_last_row() {
        let mut canvas = RasterCanvas::new(1, 16_777_216).unwrap();
        canvas.fill_rect(PixelRect::new(0, 16_777_215, 1, 1));

        // Fitted to a single column of 1000 rows at x = 4
        let area = Rect::new(0, 0, 10, 1000);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(4, 999)].symbol(), "█");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }

    #[test]
    fn test_canvas_view_ignores_empty_area() {
        let canvas = RasterCanvas::new(10, 10).unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        CanvasView::new(&canvas).render(Rect::new(0, 0, 0, 0), &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered(area, 30, 5), Rect::new(5, 7, 30, 5));
        assert_eq!(centered(Rect::new(0, 0, 10, 3), 30, 5), Rect::new(0, 0, 10, 3));
    }

    #[test]
    fn test_render_shows_loss_banner() {
        let config = GridConfig::default();
        let canvas = RasterCanvas::for_config(&config).unwrap();
        let mut engine =
            GameEngine::new(config, canvas, ManualClock::new(), LossBanner::new()).unwrap();
        engine.start_game();
        engine.handle_input(crate::game::Key::ArrowUp);
        engine.advance_clock(std::time::Duration::from_secs(3));
        assert!(engine.notifier().is_pending());

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = SessionMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, &engine, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("You lost"));
        assert!(text.contains("STOPPED"));
    }
}
