// src/scenes/demo_scenes.rs
//
// Built-in drawings the viewer can play back

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

use crate::engine::{Session, TurtleError};
use crate::models::NamedColor;
use crate::services::{Pacer, Sink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoScene {
    Square,
    Flower,
    Spiral,
    Star,
    RandomWalk,
}

impl DemoScene {
    pub const ALL: [DemoScene; 5] = [
        DemoScene::Square,
        DemoScene::Flower,
        DemoScene::Spiral,
        DemoScene::Star,
        DemoScene::RandomWalk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DemoScene::Square => "square",
            DemoScene::Flower => "flower",
            DemoScene::Spiral => "spiral",
            DemoScene::Star => "star",
            DemoScene::RandomWalk => "random_walk",
        }
    }

    /// Draws the scene on an initialized session.
    pub fn draw<S: Sink, P: Pacer>(
        &self,
        session: &mut Session<S, P>,
        seed: u64,
    ) -> Result<(), TurtleError> {
        tracing::info!(scene = self.name(), "drawing demo scene");
        match self {
            DemoScene::Square => square(session),
            DemoScene::Flower => flower(session),
            DemoScene::Spiral => spiral(session),
            DemoScene::Star => star(session),
            DemoScene::RandomWalk => random_walk(session, seed),
        }
    }
}

impl fmt::Display for DemoScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoScene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|scene| scene.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                format!("unknown scene '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

fn square<S: Sink, P: Pacer>(t: &mut Session<S, P>) -> Result<(), TurtleError> {
    t.width(4)?;
    for _ in 0..4 {
        t.forward(150.0)?;
        t.right(90.0)?;
    }
    Ok(())
}

// six overlapping circles, each in its own palette color
fn flower<S: Sink, P: Pacer>(t: &mut Session<S, P>) -> Result<(), TurtleError> {
    let petals = [
        NamedColor::Red,
        NamedColor::Orange,
        NamedColor::Yellow,
        NamedColor::Green,
        NamedColor::Blue,
        NamedColor::Purple,
    ];
    t.width(2)?;
    for color in petals {
        t.color(color.as_str())?;
        t.full_circle(80.0)?;
        t.right(60.0)?;
    }
    t.color(NamedColor::Black.as_str())?;
    t.hideturtle()
}

fn spiral<S: Sink, P: Pacer>(t: &mut Session<S, P>) -> Result<(), TurtleError> {
    t.speed(12)?;
    t.color(NamedColor::Blue.as_str())?;
    for step in 1..=60 {
        t.forward(f64::from(step) * 4.0)?;
        t.right(91.0)?;
    }
    Ok(())
}

fn star<S: Sink, P: Pacer>(t: &mut Session<S, P>) -> Result<(), TurtleError> {
    t.penup()?;
    t.goto(200.0, 260.0)?;
    t.face(0.0)?;
    t.pendown()?;
    t.color(NamedColor::Orange.as_str())?;
    t.begin_fill()?;
    for _ in 0..5 {
        t.forward(200.0)?;
        t.right(144.0)?;
    }
    t.end_fill()?;
    t.hideturtle()
}

fn random_walk<S: Sink, P: Pacer>(t: &mut Session<S, P>, seed: u64) -> Result<(), TurtleError> {
    let mut rng = StdRng::seed_from_u64(seed);
    t.speed(11)?;
    for _ in 0..200 {
        let color = NamedColor::ALL[rng.gen_range(0..NamedColor::ALL.len())];
        t.color(color.as_str())?;
        t.face(f64::from(rng.gen_range(0..4u32)) * 90.0)?;
        t.forward(15.0)?;
    }
    Ok(())
}
