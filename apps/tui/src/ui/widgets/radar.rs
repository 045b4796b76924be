use crate::analytics::{format_grouped, DashboardView, RadarAxis};
use crate::domain::ALL_STATES_LABEL;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const PROFILE_COLOR: Color = Color::Rgb(136, 132, 216);

const GRID_LEVELS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];
const LABEL_RADIUS: f64 = 1.18;

/// Unit-circle position of axis `index` of `count`, starting at the top and
/// going clockwise.
pub fn axis_direction(index: usize, count: usize) -> (f64, f64) {
    let count = count.max(1) as f64;
    let angle = std::f64::consts::FRAC_PI_2 - (index as f64) * std::f64::consts::TAU / count;
    (angle.cos(), angle.sin())
}

/// Polygon vertices for a profile, each score scaled against its full mark
/// and clamped to the chart.
pub fn radar_vertices(axes: &[RadarAxis]) -> Vec<(f64, f64)> {
    axes.iter()
        .enumerate()
        .map(|(index, axis)| {
            let ratio = if axis.full_mark > 0.0 {
                (axis.score / axis.full_mark).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (dx, dy) = axis_direction(index, axes.len());
            (dx * ratio, dy * ratio)
        })
        .collect()
}

pub fn render_practice_radar(view: &DashboardView, f: &mut Frame<'_>, area: Rect) {
    let title = if view.radar.is_empty() && view.regions.len() != 1 {
        "Select a State to View Practices".to_string()
    } else {
        format!("{} Farming Practices", view.selection)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 4 {
        return;
    }

    if view.radar.is_empty() {
        let message = if view.regions.is_empty() && view.selection != ALL_STATES_LABEL {
            format!("No practice data for {}", view.selection)
        } else {
            "Please select a state to view detailed farming practices".to_string()
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    render_radar_canvas(&view.radar, f, split[0]);
    render_score_legend(&view.radar, f, split[1]);
}

fn render_radar_canvas(axes: &[RadarAxis], f: &mut Frame<'_>, area: Rect) {
    let vertices = radar_vertices(axes);
    let count = axes.len();

    // Terminal cells are roughly twice as tall as wide; widen the x range so
    // the pentagon isn't squashed.
    let aspect = if area.height == 0 {
        1.0
    } else {
        (f64::from(area.width) / (f64::from(area.height) * 2.0)).max(1.0)
    };
    let y_extent = 1.35;
    let x_extent = y_extent * aspect;

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                for level in GRID_LEVELS {
                    for index in 0..count {
                        let (x1, y1) = axis_direction(index, count);
                        let (x2, y2) = axis_direction((index + 1) % count, count);
                        ctx.draw(&CanvasLine {
                            x1: x1 * level,
                            y1: y1 * level,
                            x2: x2 * level,
                            y2: y2 * level,
                            color: Color::DarkGray,
                        });
                    }
                }

                for index in 0..count {
                    let (x, y) = axis_direction(index, count);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: Color::DarkGray,
                    });
                }

                ctx.layer();

                for (index, (x1, y1)) in vertices.iter().enumerate() {
                    let (x2, y2) = vertices[(index + 1) % vertices.len()];
                    ctx.draw(&CanvasLine {
                        x1: *x1,
                        y1: *y1,
                        x2,
                        y2,
                        color: PROFILE_COLOR,
                    });
                }
                ctx.draw(&Points {
                    coords: &vertices,
                    color: Color::White,
                });

                for (index, axis) in axes.iter().enumerate() {
                    let (x, y) = axis_direction(index, count);
                    let label_x = x * LABEL_RADIUS - (axis.subject.len() as f64) * 0.02;
                    ctx.print(
                        label_x,
                        y * LABEL_RADIUS,
                        Span::styled(axis.subject, Style::default().fg(Color::Gray)),
                    );
                }
            })
            .x_bounds([-x_extent, x_extent])
            .y_bounds([-y_extent, y_extent]),
        area,
    );
}

fn render_score_legend(axes: &[RadarAxis], f: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::with_capacity(axes.len() * 2);
    for (index, axis) in axes.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{} {}", axis.subject, format_grouped(axis.score.round())),
            Style::default().fg(PROFILE_COLOR),
        ));
    }

    let paragraph = Paragraph::new(TextLine::from(spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(score: f64) -> RadarAxis {
        RadarAxis {
            subject: "Test",
            score,
            full_mark: 100.0,
        }
    }

    #[test]
    fn first_axis_points_straight_up() {
        let (x, y) = axis_direction(0, 5);
        assert!(x.abs() < 1e-9);
        assert!((y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn axes_go_clockwise() {
        let (x, _) = axis_direction(1, 5);
        assert!(x > 0.0);
    }

    #[test]
    fn vertices_scale_with_score_and_clamp() {
        let vertices = radar_vertices(&[axis(50.0), axis(250.0), axis(-5.0)]);
        assert!((vertices[0].1 - 0.5).abs() < 1e-9);

        let (x, y) = vertices[1];
        assert!((x.hypot(y) - 1.0).abs() < 1e-9);

        let (x, y) = vertices[2];
        assert!(x.hypot(y) < 1e-9);
    }
}
