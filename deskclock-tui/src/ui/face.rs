//! Analog clock face on a braille canvas
//!
//! Geometry comes from `libdeskclock::geometry` in screen coordinates
//! (y grows downward); the canvas has y growing upward, so y is negated.

use libdeskclock::geometry::{dial_marks, numeral_positions, HandAngles, Point};
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

/// Logical radius of the dial in canvas units
const RADIUS: f64 = 100.0;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Canvas bounds that keep the dial round inside `area`
fn bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let margin = RADIUS * 1.1;
    let width = f64::from(area.width.max(1));
    let height = f64::from(area.height.max(1)) * CELL_ASPECT;

    if width >= height {
        let half = margin * width / height;
        ([-half, half], [-margin, margin])
    } else {
        let half = margin * height / width;
        ([-margin, margin], [-half, half])
    }
}

fn flip(p: Point) -> (f64, f64) {
    (p.x, -p.y)
}

pub fn render_face(frame: &mut Frame, area: Rect, hands: Option<&HandAngles>, colors: bool) {
    let (x_bounds, y_bounds) = bounds(area);
    let pick = |c: Color| if colors { c } else { Color::Reset };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RADIUS,
                color: pick(Color::Gray),
            });

            for mark in dial_marks(RADIUS) {
                let (x1, y1) = flip(mark.inner);
                let (x2, y2) = flip(mark.outer);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: pick(if mark.major { Color::White } else { Color::DarkGray }),
                });
            }

            for (numeral, position) in numeral_positions(RADIUS) {
                let (x, y) = flip(position);
                ctx.print(x, y, numeral.to_string());
            }

            if let Some(hands) = hands {
                let tips = hands.tips(RADIUS);
                for (tip, color) in [
                    (tips.hour, Color::White),
                    (tips.minute, Color::Cyan),
                    (tips.second, Color::Red),
                ] {
                    let (x2, y2) = flip(tip);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2,
                        y2,
                        color: pick(color),
                    });
                }
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_keep_dial_inside() {
        for area in [Rect::new(0, 0, 80, 20), Rect::new(0, 0, 20, 40)] {
            let (x, y) = bounds(area);
            assert!(x[1] >= RADIUS && y[1] >= RADIUS);
            assert_eq!(x[0], -x[1]);
            assert_eq!(y[0], -y[1]);
        }
    }

    #[test]
    fn test_flip_points_twelve_up() {
        let tip = libdeskclock::geometry::hand_tip(10.0, 0.0);
        let (_, y) = flip(tip);
        assert!(y > 0.0);
    }
}
