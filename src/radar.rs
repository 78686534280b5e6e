use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Circle, Context, Line, Points};
use ratatui::{
    layout::Rect,
    style::Color,
    text,
    widgets::canvas::Canvas,
};
use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

/// Logical radius of the scope; canvas bounds are +/- this value.
pub const MAX_RADIUS: f64 = 90.0;
pub const MIN_RADIUS: f64 = 10.0;
pub const MARGIN: f64 = 20.0;
/// The sweep makes `SPEED_MULTIPLIER` revolutions per minute-hand
/// revolution, so one full turn every 60 / SPEED_MULTIPLIER = 7.5 seconds.
pub const SPEED_MULTIPLIER: f64 = 8.0;

/// Outermost drawing radius for rings and spokes.
pub const OUTER_RADIUS: f64 = MAX_RADIUS - MARGIN;

/// Maximum angular separation (degrees) between sweep and target for the
/// target to render as illuminated.
pub const VISIBILITY_THRESHOLD_DEG: f64 = 7.0;

/// Distance of the N/E/S/W labels from the origin.
pub const COMPASS_OFFSET: f64 = 0.93 * MAX_RADIUS;

const RING_COUNT: u32 = 7;
const TICK_COUNT: u32 = 120;
const SWEEP_REACH: f64 = 0.78 * MAX_RADIUS;
const SWEEP_TRAIL_DEG: f64 = 16.0;

/// A fixed aircraft blip. Positions are set once at startup and never move.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub x: f64,
    pub y: f64,
}

impl Target {
    pub fn from_polar(bearing_deg: f64, range: f64) -> Self {
        let rad = bearing_deg.to_radians();
        Self {
            x: range * rad.cos(),
            y: range * rad.sin(),
        }
    }

    pub fn range(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Bearing from the origin in degrees, normalized to [0, 360).
    pub fn bearing_deg(&self) -> f64 {
        let deg = self.y.atan2(self.x).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }

    /// Per-frame binary gate: illuminated iff the sweep is within the
    /// visibility threshold of this target's bearing. Pure in
    /// (sweep, self), so re-evaluating at the same instant gives the same
    /// answer.
    pub fn is_visible(&self, sweep_angle: f64) -> bool {
        angular_distance(sweep_angle, self.bearing_deg()) < VISIBILITY_THRESHOLD_DEG
    }
}

/// Circular distance between two angles in degrees, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Sweep angle for a given number of seconds into the current minute.
/// Derived, never stored: the live value is re-sampled from the wall clock
/// on every frame. Always in [0, 360).
pub fn sweep_angle_at(seconds_in_minute: f64) -> f64 {
    (seconds_in_minute * 360.0 / 60.0 * SPEED_MULTIPLIER).rem_euclid(360.0)
}

/// Current sweep angle sampled from the system clock.
pub fn current_sweep_angle() -> f64 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    sweep_angle_at(since_epoch.as_secs_f64() % 60.0)
}

/// Sample `count` targets uniformly over the annulus
/// [MIN_RADIUS, OUTER_RADIUS]. The sqrt on the radius keeps areal density
/// uniform instead of clustering near the center.
pub fn generate_targets(count: usize) -> Vec<Target> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let bearing = rng.random_range(0.0..TAU).to_degrees();
            let r = MIN_RADIUS + rng.random::<f64>().sqrt() * (OUTER_RADIUS - MIN_RADIUS);
            Target::from_polar(bearing, r)
        })
        .collect()
}

pub struct RadarScope {
    pub targets: Vec<Target>,
    pub sweep_angle: f64,
}

impl RadarScope {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            sweep_angle: 0.0,
        }
    }
}

impl Widget for &RadarScope {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let canvas = Canvas::default()
            .background_color(Color::Black)
            .x_bounds([-MAX_RADIUS, MAX_RADIUS])
            .y_bounds([-MAX_RADIUS, MAX_RADIUS])
            .paint(|ctx| {
                self.draw_grid(ctx);
                self.draw_sweep(ctx);
                self.draw_targets(ctx);

                // Labels go last so the glyphs sit on top of the grid.
                for (label, x, y) in [
                    ("N", 0.0, COMPASS_OFFSET),
                    ("E", COMPASS_OFFSET, 0.0),
                    ("S", 0.0, -COMPASS_OFFSET),
                    ("W", -COMPASS_OFFSET, 0.0),
                ] {
                    let line = text::Line::from(label).style((Color::Green, Modifier::BOLD));
                    ctx.print(x, y, line);
                }
            });
        canvas.render(area, buf);
    }
}

impl RadarScope {
    fn draw_grid(&self, ctx: &mut Context) {
        // Perimeter tick marks: 120 bars at 3 degree spacing, every 10th
        // one longer (the 30 degree majors).
        for i in 0..TICK_COUNT {
            let rad = (f64::from(i) * 3.0).to_radians();
            let start = 0.80 * MAX_RADIUS;
            let end = if i % 10 == 0 {
                0.87 * MAX_RADIUS
            } else {
                0.84 * MAX_RADIUS
            };
            ctx.draw(&Line {
                x1: start * rad.cos(),
                y1: start * rad.sin(),
                x2: end * rad.cos(),
                y2: end * rad.sin(),
                color: Color::Green,
            });
        }

        // Radial spokes, one every 30 degrees.
        for angle in (0..360).step_by(30) {
            let rad = f64::from(angle).to_radians();
            ctx.draw(&Line {
                x1: 0.0,
                y1: 0.0,
                x2: OUTER_RADIUS * rad.cos(),
                y2: OUTER_RADIUS * rad.sin(),
                color: Color::DarkGray,
            });
        }

        // Concentric range rings at even fractions of the outer radius.
        for i in 1..=RING_COUNT {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: OUTER_RADIUS * f64::from(i) / f64::from(RING_COUNT),
                color: Color::Green,
            });
        }
    }

    /// The sweep beam: a bright leading ray with a fan trailed out behind
    /// it, green intensity decaying with angular distance from the edge.
    /// Terminal stand-in for the conical gradient of a phosphor scope.
    fn draw_sweep(&self, ctx: &mut Context) {
        let steps = 32;
        for step in 0..steps {
            let frac = f64::from(step) / f64::from(steps);
            let intensity = trail_intensity(frac);
            if intensity == 0 {
                break;
            }
            let rad = (self.sweep_angle - frac * SWEEP_TRAIL_DEG).to_radians();
            ctx.draw(&Line {
                x1: 0.0,
                y1: 0.0,
                x2: SWEEP_REACH * rad.cos(),
                y2: SWEEP_REACH * rad.sin(),
                color: Color::Rgb(0, intensity, 0),
            });
        }
    }

    /// Illuminated targets render as a soft glow: dim halo, brighter inner
    /// ring, full-intensity center. Targets outside the sweep are simply
    /// not drawn; there is no persistent fade-out.
    fn draw_targets(&self, ctx: &mut Context) {
        for target in &self.targets {
            if !target.is_visible(self.sweep_angle) {
                continue;
            }
            ctx.draw(&Circle {
                x: target.x,
                y: target.y,
                radius: 3.0,
                color: Color::Rgb(0, 110, 0),
            });
            ctx.draw(&Circle {
                x: target.x,
                y: target.y,
                radius: 1.5,
                color: Color::Rgb(0, 200, 0),
            });
            ctx.draw(&Points {
                coords: &[(target.x, target.y)],
                color: Color::Rgb(0, 255, 0),
            });
        }
    }
}

/// Green channel for a trail ray `frac` of the trail width behind the
/// leading edge. Piecewise-linear stops mirroring a phosphor falloff:
/// brightest at the edge, mostly gone by the halfway point, dark at the
/// tail.
fn trail_intensity(frac: f64) -> u8 {
    let alpha = if frac < 0.5 {
        180.0 - (180.0 - 60.0) * (frac / 0.5)
    } else {
        60.0 * (1.0 - (frac - 0.5) / 0.5)
    };
    (alpha / 180.0 * 255.0) as u8
}
