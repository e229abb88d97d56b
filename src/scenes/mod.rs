pub mod demo_scenes;

pub use demo_scenes::DemoScene;
