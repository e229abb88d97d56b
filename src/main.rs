// src/main.rs
use nannou::prelude::*;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing_subscriber::EnvFilter;

use turtlevis::{
    config::Config,
    draw::{draw_document, fit_transform},
    engine::Session,
    markup::{parse_document, Document},
    scenes::DemoScene,
    services::{ChannelSink, NoPacing, Pacer, PacingHandle, SinkMessage, SleepPacer},
};

struct Model {
    // Session output
    receiver: Receiver<SinkMessage>,
    document: Option<Document>,
    frames_received: usize,

    // Playback
    pacing: Option<PacingHandle>,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("{}, falling back to defaults", err);
        Config::default()
    });

    init_tracing(&config);

    app.new_window()
        .title("turtlevis")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("Failed to build window");

    let (sender, receiver) = mpsc::channel();

    let pacing = if config.pacing.enabled {
        let pacer = SleepPacer::new();
        let handle = pacer.handle();
        spawn_scene(sender, pacer, config);
        Some(handle)
    } else {
        spawn_scene(sender, NoPacing, config);
        None
    };

    Model {
        receiver,
        document: None,
        frames_received: 0,
        pacing,
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// Runs the configured scene on its own thread so pacing never blocks the window
fn spawn_scene<P: Pacer + Send + 'static>(sender: Sender<SinkMessage>, pacer: P, config: Config) {
    thread::spawn(move || {
        let scene = match config.demo.scene.parse::<DemoScene>() {
            Ok(scene) => scene,
            Err(err) => {
                tracing::error!("{}", err);
                return;
            }
        };

        let mut session = Session::new(ChannelSink::new(sender), pacer);
        let result = session
            .initialize_with(config.init_options())
            .and_then(|_| scene.draw(&mut session, config.demo.seed));

        match result {
            Ok(()) => tracing::info!(scene = %scene, "scene finished"),
            Err(err) => tracing::error!(scene = %scene, "scene stopped: {}", err),
        }
    });
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    // only the newest frame matters; each one is a complete drawing
    let mut latest = None;
    while let Ok(message) = model.receiver.try_recv() {
        model.frames_received += 1;
        latest = Some(message);
    }

    let markup = match latest {
        Some(SinkMessage::Initialize(_, markup)) | Some(SinkMessage::Update(_, markup)) => markup,
        None => return,
    };

    match parse_document(&markup) {
        Ok(document) => model.document = Some(document),
        Err(err) => tracing::warn!("dropping unreadable frame: {}", err),
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // skip the remaining delays
        Key::Space => {
            if let Some(pacing) = &model.pacing {
                pacing.cancel();
                tracing::info!("pacing cancelled after {} frames", model.frames_received);
            }
        }
        Key::R => {
            if let Some(pacing) = &model.pacing {
                pacing.resume();
                tracing::info!("pacing resumed");
            }
        }
        _ => {}
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(rgb(0.1, 0.1, 0.1));

    if let Some(document) = &model.document {
        let transform = fit_transform(document, app.window_rect());
        draw_document(&draw, document, &transform);
    }

    draw.to_frame(app, &frame).unwrap();
}
