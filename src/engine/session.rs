// src/engine/session.rs
//
// The command engine. A Session owns one drawing context: canvas settings,
// turtle, drawing log, display handle. Every command validates its arguments
// first and fails without touching state; rendering commands then push a fresh
// document to the sink and wait out the pacing delay.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::engine::error::{ColorWarning, TurtleError};
use crate::engine::options::InitOptions;
use crate::models::palette::{speed_delay, MAX_SPEED, MIN_SPEED};
use crate::models::{arc_endpoint, is_palette_color, translate, Pen, Point, Stroke, Turtle};
use crate::render::Frame;
use crate::services::{DisplayHandle, DrawingLog, NoPacing, Pacer, Sink};

/// Largest sweep drawn by a single arc command within `circle`.
const MAX_ARC_CHUNK: f64 = 90.0;

type Result<T> = std::result::Result<T, TurtleError>;

#[derive(Debug)]
struct Canvas {
    handle: DisplayHandle,
    size: (u32, u32),
    background: String,
    delay: Duration,
    turtle: Turtle,
    log: DrawingLog,
}

impl Canvas {
    fn frame(&self) -> Frame<'_> {
        Frame {
            canvas: self.size,
            background: &self.background,
            strokes: self.log.strokes(),
            turtle: &self.turtle,
        }
    }
}

pub struct Session<S: Sink, P: Pacer = NoPacing> {
    sink: S,
    pacer: P,
    canvas: Option<Canvas>,
}

impl<S: Sink> Session<S, NoPacing> {
    /// A session that never waits between redraws.
    pub fn headless(sink: S) -> Self {
        Self::new(sink, NoPacing)
    }
}

impl<S: Sink, P: Pacer> Session<S, P> {
    /// Creates an uninitialized session; call [`initialize`](Self::initialize) before drawing.
    pub fn new(sink: S, pacer: P) -> Self {
        Self {
            sink,
            pacer,
            canvas: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_initialized(&self) -> bool {
        self.canvas.is_some()
    }

    /********************** Lifecycle **********************/

    pub fn initialize(&mut self, speed: u32, canvas_size: (u32, u32)) -> Result<()> {
        self.initialize_with(InitOptions::new(speed, canvas_size))
    }

    /// Resets every setting, clears the drawing log and shows the first frame.
    pub fn initialize_with(&mut self, options: InitOptions) -> Result<()> {
        options.validate()?;
        let delay = speed_delay(options.speed).ok_or_else(|| {
            TurtleError::invalid(format!("no delay for speed {}", options.speed))
        })?;

        for warning in options.color_warnings() {
            warn!("{}", warning);
        }

        let (width, height) = options.canvas;
        let origin = Point::new(f64::from(width / 2), f64::from(height / 2));
        let pen = Pen {
            down: true,
            color: options.pen_color,
            width: options.pen_width,
        };

        let mut canvas = Canvas {
            handle: DisplayHandle(0),
            size: options.canvas,
            background: options.background,
            delay,
            turtle: Turtle::new(origin, pen),
            log: self.take_log(),
        };
        let markup = canvas.frame().render();
        canvas.handle = self.sink.initialize(&markup);

        info!(
            width,
            height,
            speed = options.speed,
            handle = canvas.handle.0,
            "turtle session initialized"
        );
        self.canvas = Some(canvas);
        Ok(())
    }

    /********************** Motion **********************/

    pub fn forward(&mut self, units: f64) -> Result<()> {
        let units = real(units, "units")?;
        let canvas = self.canvas()?;
        let to = translate(canvas.turtle.position, canvas.turtle.heading(), units);
        debug!(units, x = to.x, y = to.y, "forward");
        self.move_to(to)
    }

    pub fn backward(&mut self, units: f64) -> Result<()> {
        let units = real(units, "units")?;
        self.forward(-units)
    }

    pub fn right(&mut self, degrees: f64) -> Result<()> {
        let degrees = real(degrees, "degrees")?;
        let canvas = self.canvas_mut()?;
        canvas.turtle.turn(degrees);
        debug!(degrees, heading = canvas.turtle.heading(), "turn");
        self.redraw()
    }

    pub fn left(&mut self, degrees: f64) -> Result<()> {
        let degrees = real(degrees, "degrees")?;
        self.right(-degrees)
    }

    /// Sets an absolute heading.
    pub fn face(&mut self, degrees: f64) -> Result<()> {
        let degrees = real(degrees, "degrees")?;
        let canvas = self.canvas_mut()?;
        canvas.turtle.set_heading(degrees);
        debug!(heading = canvas.turtle.heading(), "face");
        self.redraw()
    }

    /// Moves along a circular arc whose center lies 90° to the right of the heading,
    /// then turns by `degrees`.
    pub fn arc(&mut self, radius: f64, degrees: f64) -> Result<()> {
        let radius = real(radius, "arc radius")?;
        let degrees = real(degrees, "degrees")?;
        self.canvas()?;
        self.arc_step(radius, degrees)?;
        self.redraw()
    }

    /// Draws `degrees` of a circle as a run of arcs no wider than 90° each, so
    /// every arc command's sweep stays unambiguous.
    pub fn circle(&mut self, radius: f64, degrees: f64) -> Result<()> {
        let radius = real(radius, "circle radius")?;
        let degrees = real(degrees, "degrees")?;
        if degrees < 0.0 {
            return Err(TurtleError::invalid(format!(
                "degrees should be a positive number, got {}",
                degrees
            )));
        }
        self.canvas()?;

        let mut remaining = degrees;
        while remaining > 0.0 {
            self.arc_step(radius, remaining.min(MAX_ARC_CHUNK))?;
            self.redraw()?;
            remaining -= MAX_ARC_CHUNK;
        }
        Ok(())
    }

    /// `circle` with the default full sweep.
    pub fn full_circle(&mut self, radius: f64) -> Result<()> {
        self.circle(radius, 360.0)
    }

    pub fn setx(&mut self, x: f64) -> Result<()> {
        let x = coordinate(x, "x")?;
        let y = self.canvas()?.turtle.position.y;
        self.move_to(Point::new(x, y))
    }

    pub fn sety(&mut self, y: f64) -> Result<()> {
        let y = coordinate(y, "y")?;
        let x = self.canvas()?.turtle.position.x;
        self.move_to(Point::new(x, y))
    }

    pub fn goto(&mut self, x: f64, y: f64) -> Result<()> {
        let x = coordinate(x, "x")?;
        let y = coordinate(y, "y")?;
        self.canvas()?;
        self.move_to(Point::new(x, y))
    }

    /********************** Pen & fill **********************/

    pub fn penup(&mut self) -> Result<()> {
        self.canvas_mut()?.turtle.pen.down = false;
        Ok(())
    }

    pub fn pendown(&mut self) -> Result<()> {
        self.canvas_mut()?.turtle.pen.down = true;
        Ok(())
    }

    pub fn width(&mut self, width: i64) -> Result<()> {
        if width <= 0 {
            return Err(TurtleError::invalid(format!(
                "pen width should be a positive integer, got {}",
                width
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| TurtleError::invalid(format!("pen width {} is too large", width)))?;
        self.canvas_mut()?.turtle.pen.width = width;
        Ok(())
    }

    pub fn color(&mut self, color: &str) -> Result<Option<ColorWarning>> {
        let canvas = self.canvas_mut()?;
        let warning = check_palette(color);
        canvas.turtle.pen.color = color.to_string();
        self.redraw()?;
        Ok(warning)
    }

    pub fn bgcolor(&mut self, color: &str) -> Result<Option<ColorWarning>> {
        let canvas = self.canvas_mut()?;
        let warning = check_palette(color);
        canvas.background = color.to_string();
        self.redraw()?;
        Ok(warning)
    }

    /// Starts recording the outline of a filled region at the current position.
    pub fn begin_fill(&mut self) -> Result<()> {
        let canvas = self.canvas_mut()?;
        if canvas.log.begin_fill(canvas.turtle.position) {
            debug!("begin fill");
        }
        Ok(())
    }

    /// Closes the recorded outline and fills it with the current pen color.
    pub fn end_fill(&mut self) -> Result<()> {
        let canvas = self.canvas_mut()?;
        if canvas.log.end_fill(&canvas.turtle.pen.color) {
            debug!(color = %canvas.turtle.pen.color, "end fill");
            self.redraw()?;
        }
        Ok(())
    }

    /********************** Visibility & pacing **********************/

    pub fn showturtle(&mut self) -> Result<()> {
        self.canvas_mut()?.turtle.visible = true;
        self.redraw()
    }

    pub fn hideturtle(&mut self) -> Result<()> {
        self.canvas_mut()?.turtle.visible = false;
        self.redraw()
    }

    pub fn speed(&mut self, level: u32) -> Result<()> {
        let delay = speed_delay(level).ok_or_else(|| {
            TurtleError::invalid(format!(
                "speed should be an integer in [{}, {}], got {}",
                MIN_SPEED, MAX_SPEED, level
            ))
        })?;
        self.canvas_mut()?.delay = delay;
        Ok(())
    }

    /********************** Queries **********************/

    pub fn getx(&self) -> Result<f64> {
        Ok(self.canvas()?.turtle.position.x)
    }

    pub fn gety(&self) -> Result<f64> {
        Ok(self.canvas()?.turtle.position.y)
    }

    pub fn position(&self) -> Result<Point> {
        Ok(self.canvas()?.turtle.position)
    }

    pub fn heading(&self) -> Result<f64> {
        Ok(self.canvas()?.turtle.heading())
    }

    pub fn is_pen_down(&self) -> Result<bool> {
        Ok(self.canvas()?.turtle.pen.down)
    }

    pub fn is_visible(&self) -> Result<bool> {
        Ok(self.canvas()?.turtle.visible)
    }

    pub fn is_filling(&self) -> Result<bool> {
        Ok(self.canvas()?.log.is_filling())
    }

    pub fn pen_color(&self) -> Result<&str> {
        Ok(self.canvas()?.turtle.pen.color.as_str())
    }

    pub fn pen_width(&self) -> Result<u32> {
        Ok(self.canvas()?.turtle.pen.width)
    }

    pub fn background_color(&self) -> Result<&str> {
        Ok(self.canvas()?.background.as_str())
    }

    pub fn canvas_size(&self) -> Result<(u32, u32)> {
        Ok(self.canvas()?.size)
    }

    pub fn speed_delay(&self) -> Result<Duration> {
        Ok(self.canvas()?.delay)
    }

    pub fn strokes(&self) -> Result<&[Stroke]> {
        Ok(self.canvas()?.log.strokes())
    }

    /// The current document, without pushing it to the sink.
    pub fn render(&self) -> Result<String> {
        Ok(self.canvas()?.frame().render())
    }

    /********************** Internals **********************/

    fn canvas(&self) -> Result<&Canvas> {
        self.canvas.as_ref().ok_or(TurtleError::UninitializedSession)
    }

    fn canvas_mut(&mut self) -> Result<&mut Canvas> {
        self.canvas.as_mut().ok_or(TurtleError::UninitializedSession)
    }

    // reuses the previous session's log allocation
    fn take_log(&mut self) -> DrawingLog {
        match self.canvas.take() {
            Some(previous) => {
                let mut log = previous.log;
                log.clear();
                log
            }
            None => DrawingLog::new(),
        }
    }

    fn move_to(&mut self, to: Point) -> Result<()> {
        let canvas = self.canvas_mut()?;
        let from = canvas.turtle.position;
        debug!(x = to.x, y = to.y, length = from.distance(to), "move");
        canvas.log.append_line(from, to, &canvas.turtle.pen);
        canvas.turtle.position = to;
        self.redraw()
    }

    // moves and turns without redrawing
    fn arc_step(&mut self, radius: f64, degrees: f64) -> Result<()> {
        let canvas = self.canvas_mut()?;
        let from = canvas.turtle.position;
        let (_, to) = arc_endpoint(from, canvas.turtle.heading(), radius, degrees);
        canvas.log.append_arc(from, to, radius, &canvas.turtle.pen);
        canvas.turtle.position = to;
        canvas.turtle.turn(degrees);
        debug!(radius, degrees, x = to.x, y = to.y, "arc");
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or(TurtleError::UninitializedSession)?;
        let markup = canvas.frame().render();
        self.sink.update(canvas.handle, &markup);
        self.pacer.wait(canvas.delay);
        Ok(())
    }
}

fn real(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TurtleError::invalid(format!(
            "{} should be a real number, got {}",
            what, value
        )))
    }
}

fn coordinate(value: f64, axis: &str) -> Result<f64> {
    let value = real(value, axis)?;
    if value < 0.0 {
        return Err(TurtleError::invalid(format!(
            "new {} position should be nonnegative, got {}",
            axis, value
        )));
    }
    Ok(value)
}

fn check_palette(color: &str) -> Option<ColorWarning> {
    if is_palette_color(color) {
        return None;
    }
    let warning = ColorWarning::new(color);
    warn!("{}", warning);
    Some(warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemorySink;

    const EPS: f64 = 1e-6;

    fn session() -> Session<MemorySink> {
        let mut session = Session::headless(MemorySink::new());
        session.initialize(6, (600, 600)).unwrap();
        session
    }

    fn lines(session: &Session<MemorySink>) -> Vec<(Point, Point)> {
        session
            .strokes()
            .unwrap()
            .iter()
            .filter_map(|s| match s {
                Stroke::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_defaults_after_initialize() {
            let s = session();
            assert_eq!(s.position().unwrap(), Point::new(300.0, 300.0));
            assert_eq!(s.heading().unwrap(), 0.0);
            assert!(s.is_pen_down().unwrap());
            assert!(s.is_visible().unwrap());
            assert!(!s.is_filling().unwrap());
            assert_eq!(s.pen_color().unwrap(), "black");
            assert_eq!(s.pen_width().unwrap(), 3);
            assert_eq!(s.background_color().unwrap(), "whitesmoke");
            assert_eq!(s.canvas_size().unwrap(), (600, 600));
            assert_eq!(s.speed_delay().unwrap(), Duration::from_millis(180));
            assert!(s.strokes().unwrap().is_empty());
            // initial frame pushed
            assert_eq!(s.sink().update_count(), 1);
        }

        #[test]
        fn test_odd_canvas_origin_uses_integer_halves() {
            let mut s = Session::headless(MemorySink::new());
            s.initialize(6, (301, 199)).unwrap();
            assert_eq!(s.position().unwrap(), Point::new(150.0, 99.0));
        }

        #[test]
        fn test_uninitialized_session_rejects_commands() {
            let mut s = Session::headless(MemorySink::new());
            assert_eq!(s.forward(10.0), Err(TurtleError::UninitializedSession));
            assert_eq!(s.right(10.0), Err(TurtleError::UninitializedSession));
            assert_eq!(s.goto(1.0, 1.0), Err(TurtleError::UninitializedSession));
            assert_eq!(s.penup(), Err(TurtleError::UninitializedSession));
            assert_eq!(s.getx(), Err(TurtleError::UninitializedSession));
            assert_eq!(s.render(), Err(TurtleError::UninitializedSession));
            assert!(matches!(
                s.color("red"),
                Err(TurtleError::UninitializedSession)
            ));
            assert_eq!(s.sink().update_count(), 0);
        }

        #[test]
        fn test_invalid_init_leaves_session_uninitialized() {
            let mut s = Session::headless(MemorySink::new());
            assert!(matches!(
                s.initialize(0, (600, 600)),
                Err(TurtleError::InvalidArgument(_))
            ));
            assert!(matches!(
                s.initialize(6, (0, 10)),
                Err(TurtleError::InvalidArgument(_))
            ));
            assert!(!s.is_initialized());
            assert_eq!(s.sink().update_count(), 0);
        }

        #[test]
        fn test_reinitialize_clears_state() {
            let mut s = session();
            s.forward(50.0).unwrap();
            s.color("red").unwrap();
            s.begin_fill().unwrap();
            s.initialize(13, (200, 100)).unwrap();

            assert_eq!(s.position().unwrap(), Point::new(100.0, 50.0));
            assert!(s.strokes().unwrap().is_empty());
            assert!(!s.is_filling().unwrap());
            assert_eq!(s.pen_color().unwrap(), "black");
            assert_eq!(s.speed_delay().unwrap(), Duration::from_micros(100));
        }

        #[test]
        fn test_initialize_with_custom_defaults() {
            let mut s = Session::headless(MemorySink::new());
            s.initialize_with(InitOptions {
                pen_color: "blue".to_string(),
                pen_width: 5,
                background: "black".to_string(),
                ..InitOptions::default()
            })
            .unwrap();
            assert_eq!(s.pen_color().unwrap(), "blue");
            assert_eq!(s.pen_width().unwrap(), 5);
            assert_eq!(s.background_color().unwrap(), "black");
        }

        #[test]
        fn test_initialize_applies_off_palette_colors() {
            let options = InitOptions {
                pen_color: "teal".to_string(),
                ..InitOptions::default()
            };
            assert_eq!(options.color_warnings().len(), 1);

            let mut s = Session::headless(MemorySink::new());
            s.initialize_with(options).unwrap();
            assert_eq!(s.pen_color().unwrap(), "teal");
            assert!(s.render().unwrap().contains(r#"stroke="teal""#));
        }
    }

    mod motion_tests {
        use super::*;

        #[test]
        fn test_end_to_end_square_corner() {
            let mut s = session();
            s.forward(100.0).unwrap();
            s.right(90.0).unwrap();
            s.forward(100.0).unwrap();

            let pos = s.position().unwrap();
            assert!(pos.approx_eq(Point::new(400.0, 400.0), EPS));
            assert!((s.getx().unwrap() - 400.0).abs() < EPS);
            assert!((s.gety().unwrap() - 400.0).abs() < EPS);

            let drawn = lines(&s);
            assert_eq!(drawn.len(), 2);
            assert!(drawn[0].0.approx_eq(Point::new(300.0, 300.0), EPS));
            assert!(drawn[0].1.approx_eq(Point::new(400.0, 300.0), EPS));
            assert!(drawn[1].0.approx_eq(Point::new(400.0, 300.0), EPS));
            assert!(drawn[1].1.approx_eq(Point::new(400.0, 400.0), EPS));
            assert_eq!(s.strokes().unwrap().len(), 2);
        }

        #[test]
        fn test_forward_backward_inverse() {
            let mut s = session();
            s.right(33.0).unwrap();
            let start = s.position().unwrap();
            s.forward(72.5).unwrap();
            s.backward(72.5).unwrap();

            assert!(s.position().unwrap().approx_eq(start, EPS));
            assert_eq!(lines(&s).len(), 2);
        }

        #[test]
        fn test_forward_backward_pen_up_logs_nothing() {
            let mut s = session();
            s.penup().unwrap();
            s.forward(40.0).unwrap();
            s.backward(40.0).unwrap();

            assert!(s.position().unwrap().approx_eq(Point::new(300.0, 300.0), EPS));
            assert!(s.strokes().unwrap().is_empty());
        }

        #[test]
        fn test_heading_normalization() {
            for deg in [0.0, 45.0, 360.0, 725.5, -30.0, -1080.0, 359.999] {
                let mut s = session();
                s.right(deg).unwrap();
                let h = s.heading().unwrap();
                assert!((0.0..360.0).contains(&h), "heading {} out of range", h);
                assert!((h - deg.rem_euclid(360.0)).abs() < 1e-9);
            }
        }

        #[test]
        fn test_left_is_negative_right() {
            let mut s = session();
            s.left(90.0).unwrap();
            assert_eq!(s.heading().unwrap(), 270.0);
            s.forward(10.0).unwrap();
            assert!(s.position().unwrap().approx_eq(Point::new(300.0, 290.0), EPS));
        }

        #[test]
        fn test_face_is_absolute() {
            let mut s = session();
            s.right(100.0).unwrap();
            s.face(-90.0).unwrap();
            assert_eq!(s.heading().unwrap(), 270.0);
            s.face(720.0).unwrap();
            assert_eq!(s.heading().unwrap(), 0.0);
        }

        #[test]
        fn test_turns_do_not_log() {
            let mut s = session();
            s.right(45.0).unwrap();
            s.face(10.0).unwrap();
            assert!(s.strokes().unwrap().is_empty());
        }

        #[test]
        fn test_relative_motion_may_leave_canvas() {
            let mut s = session();
            s.backward(1000.0).unwrap();
            assert!(s.getx().unwrap() < 0.0);
        }

        #[test]
        fn test_goto_setx_sety() {
            let mut s = session();
            s.goto(10.0, 20.0).unwrap();
            s.setx(50.0).unwrap();
            s.sety(0.0).unwrap();

            assert_eq!(s.position().unwrap(), Point::new(50.0, 0.0));
            let drawn = lines(&s);
            assert_eq!(drawn.len(), 3);
            assert_eq!(drawn[1], (Point::new(10.0, 20.0), Point::new(50.0, 20.0)));
            assert_eq!(drawn[2], (Point::new(50.0, 20.0), Point::new(50.0, 0.0)));
        }
    }

    mod arc_tests {
        use super::*;

        #[test]
        fn test_circle_closure() {
            let mut s = session();
            s.right(30.0).unwrap();
            let start = s.position().unwrap();
            s.full_circle(50.0).unwrap();

            assert!(s.position().unwrap().approx_eq(start, EPS));
            assert!((s.heading().unwrap() - 30.0).abs() < 1e-9);
            let arcs = s.strokes().unwrap().iter().filter(|st| st.is_arc()).count();
            assert_eq!(arcs, 4);
        }

        #[test]
        fn test_partial_circle_chunks() {
            let mut s = session();
            s.circle(20.0, 100.0).unwrap();
            let strokes = s.strokes().unwrap();
            assert_eq!(strokes.len(), 2);
            assert_eq!(s.heading().unwrap(), 100.0);
        }

        #[test]
        fn test_zero_degree_circle_draws_nothing() {
            let mut s = session();
            let before = s.sink().update_count();
            s.circle(20.0, 0.0).unwrap();
            assert!(s.strokes().unwrap().is_empty());
            assert_eq!(s.sink().update_count(), before);
        }

        #[test]
        fn test_circle_rejects_negative_degrees() {
            let mut s = session();
            assert!(matches!(
                s.circle(20.0, -90.0),
                Err(TurtleError::InvalidArgument(_))
            ));
            assert!(matches!(
                s.circle(20.0, f64::INFINITY),
                Err(TurtleError::InvalidArgument(_))
            ));
        }

        #[test]
        fn test_arc_moves_and_turns_once() {
            let mut s = session();
            let before = s.sink().update_count();
            s.arc(50.0, 90.0).unwrap();

            assert!(s.position().unwrap().approx_eq(Point::new(350.0, 350.0), EPS));
            assert_eq!(s.heading().unwrap(), 90.0);
            assert_eq!(s.sink().update_count(), before + 1);
            match &s.strokes().unwrap()[0] {
                Stroke::Arc { from, to, radius, .. } => {
                    assert_eq!(*from, Point::new(300.0, 300.0));
                    assert!(to.approx_eq(Point::new(350.0, 350.0), EPS));
                    assert_eq!(*radius, 50.0);
                }
                other => panic!("Wrong variant: {:?}", other),
            }
        }

        #[test]
        fn test_arc_pen_up_moves_without_logging() {
            let mut s = session();
            s.penup().unwrap();
            s.arc(50.0, 90.0).unwrap();
            assert!(s.strokes().unwrap().is_empty());
            assert!(s.position().unwrap().approx_eq(Point::new(350.0, 350.0), EPS));
        }
    }

    mod fill_tests {
        use super::*;

        #[test]
        fn test_fill_capture_independent_of_pen() {
            let mut s = session();
            s.penup().unwrap();
            s.begin_fill().unwrap();
            s.forward(10.0).unwrap();
            s.end_fill().unwrap();

            let strokes = s.strokes().unwrap();
            assert_eq!(strokes.len(), 1);
            assert!(strokes[0].is_fill());
            assert_eq!(strokes.iter().filter(|st| st.is_line()).count(), 0);
        }

        #[test]
        fn test_fill_uses_pen_color_at_end() {
            let mut s = session();
            s.begin_fill().unwrap();
            s.forward(10.0).unwrap();
            s.right(90.0).unwrap();
            s.circle(5.0, 180.0).unwrap();
            s.color("red").unwrap();
            s.end_fill().unwrap();

            match s.strokes().unwrap().last().unwrap() {
                Stroke::Fill { path, color } => {
                    assert_eq!(color, "red");
                    assert_eq!(path.origin, Point::new(300.0, 300.0));
                    assert_eq!(path.segments.len(), 3);
                }
                other => panic!("Wrong variant: {:?}", other),
            }
            assert!(!s.is_filling().unwrap());
        }

        #[test]
        fn test_end_fill_without_begin_does_not_render() {
            let mut s = session();
            let before = s.sink().update_count();
            s.end_fill().unwrap();
            assert_eq!(s.sink().update_count(), before);
            assert!(s.strokes().unwrap().is_empty());
        }

        #[test]
        fn test_nested_begin_fill_keeps_origin() {
            let mut s = session();
            s.begin_fill().unwrap();
            s.forward(10.0).unwrap();
            s.begin_fill().unwrap();
            s.forward(10.0).unwrap();
            s.end_fill().unwrap();

            match s.strokes().unwrap().last().unwrap() {
                Stroke::Fill { path, .. } => {
                    assert_eq!(path.origin, Point::new(300.0, 300.0));
                    assert_eq!(path.segments.len(), 2);
                }
                other => panic!("Wrong variant: {:?}", other),
            }
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_boundary_rejection() {
            let mut s = session();
            assert!(matches!(s.goto(-1.0, 5.0), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.speed(14), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.speed(0), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.width(0), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.width(-3), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.setx(-0.5), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.sety(-2.0), Err(TurtleError::InvalidArgument(_))));
        }

        #[test]
        fn test_non_real_numbers_rejected() {
            let mut s = session();
            assert!(matches!(s.forward(f64::NAN), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.right(f64::INFINITY), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.arc(f64::NAN, 90.0), Err(TurtleError::InvalidArgument(_))));
            assert!(matches!(s.goto(1.0, f64::NAN), Err(TurtleError::InvalidArgument(_))));
        }

        #[test]
        fn test_failed_commands_do_not_mutate_or_render() {
            let mut s = session();
            s.forward(10.0).unwrap();
            let before_doc = s.render().unwrap();
            let before_updates = s.sink().update_count();

            let _ = s.goto(-1.0, 5.0);
            let _ = s.goto(5.0, -1.0);
            let _ = s.forward(f64::NAN);
            let _ = s.width(0);
            let _ = s.speed(99);

            assert_eq!(s.render().unwrap(), before_doc);
            assert_eq!(s.sink().update_count(), before_updates);
            assert_eq!(s.speed_delay().unwrap(), Duration::from_millis(180));
        }

        #[test]
        fn test_speed_and_width_setters() {
            let mut s = session();
            let before = s.sink().update_count();
            s.speed(1).unwrap();
            s.width(8).unwrap();

            assert_eq!(s.speed_delay().unwrap(), Duration::from_millis(1500));
            assert_eq!(s.pen_width().unwrap(), 8);
            // neither triggers a redraw
            assert_eq!(s.sink().update_count(), before);
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_palette_color_no_warning() {
            let mut s = session();
            assert_eq!(s.color("blue").unwrap(), None);
            assert_eq!(s.bgcolor("yellow").unwrap(), None);
            assert_eq!(s.background_color().unwrap(), "yellow");
        }

        #[test]
        fn test_unknown_color_warns_and_applies() {
            let mut s = session();
            let warning = s.color("chartreuse").unwrap();
            assert_eq!(warning.map(|w| w.color), Some("chartreuse".to_string()));
            assert_eq!(s.pen_color().unwrap(), "chartreuse");

            let warning = s.bgcolor("teal").unwrap();
            assert!(warning.is_some());
            assert_eq!(s.background_color().unwrap(), "teal");
        }

        #[test]
        fn test_strokes_use_color_and_width_when_drawn() {
            let mut s = session();
            s.color("green").unwrap();
            s.width(6).unwrap();
            s.forward(10.0).unwrap();
            match &s.strokes().unwrap()[0] {
                Stroke::Line { color, width, .. } => {
                    assert_eq!(color, "green");
                    assert_eq!(*width, 6);
                }
                other => panic!("Wrong variant: {:?}", other),
            }
        }
    }

    mod pacing_tests {
        use super::*;
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Clone, Default)]
        struct RecordingPacer {
            waits: Rc<RefCell<Vec<Duration>>>,
        }

        impl Pacer for RecordingPacer {
            fn wait(&self, delay: Duration) {
                self.waits.borrow_mut().push(delay);
            }
        }

        fn paced_session() -> (Session<MemorySink, RecordingPacer>, Rc<RefCell<Vec<Duration>>>) {
            let pacer = RecordingPacer::default();
            let waits = pacer.waits.clone();
            let mut s = Session::new(MemorySink::new(), pacer);
            s.initialize(6, (600, 600)).unwrap();
            (s, waits)
        }

        #[test]
        fn test_settings_do_not_wait() {
            let (mut s, waits) = paced_session();
            s.penup().unwrap();
            s.pendown().unwrap();
            s.width(5).unwrap();
            s.speed(2).unwrap();
            s.begin_fill().unwrap();
            s.end_fill().unwrap();
            assert!(waits.borrow().is_empty());
        }

        #[test]
        fn test_every_redraw_waits_the_current_delay() {
            let (mut s, waits) = paced_session();
            s.full_circle(50.0).unwrap();
            s.speed(1).unwrap();
            s.forward(10.0).unwrap();
            s.color("red").unwrap();

            let quick = Duration::from_millis(180);
            let slow = Duration::from_millis(1500);
            assert_eq!(*waits.borrow(), vec![quick, quick, quick, quick, slow, slow]);
            // the initial document is pushed without a wait
            assert_eq!(s.sink().update_count(), waits.borrow().len() + 1);
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_idempotent_and_matches_sink() {
            let mut s = session();
            s.forward(30.0).unwrap();
            s.circle(10.0, 360.0).unwrap();

            let first = s.render().unwrap();
            let second = s.render().unwrap();
            assert_eq!(first, second);
            assert_eq!(s.sink().last(), Some(first.as_str()));
        }

        #[test]
        fn test_visibility_commands_render() {
            let mut s = session();
            let before = s.sink().update_count();
            s.hideturtle().unwrap();
            assert!(!s.is_visible().unwrap());
            assert!(s.sink().last().unwrap().contains(r#"visibility="hidden""#));
            s.showturtle().unwrap();
            assert!(s.sink().last().unwrap().contains(r#"visibility="visible""#));
            assert_eq!(s.sink().update_count(), before + 2);
        }

        #[test]
        fn test_pen_toggles_do_not_render() {
            let mut s = session();
            let before = s.sink().update_count();
            s.penup().unwrap();
            s.pendown().unwrap();
            s.begin_fill().unwrap();
            assert_eq!(s.sink().update_count(), before);
        }

        #[test]
        fn test_updates_target_initial_handle() {
            let mut s = session();
            s.forward(1.0).unwrap();
            let docs = s.sink().documents();
            assert!(docs.iter().all(|(h, _)| *h == docs[0].0));
        }
    }
}
