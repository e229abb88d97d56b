use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // Get the output directory from cargo
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };

    // Copy config.toml next to the built binary so Config::load finds it
    let config_path = Path::new("config.toml");
    if !config_path.exists() {
        return;
    }

    let dest_dir = Path::new(&out_dir).ancestors().nth(3);
    if let Some(dest_dir) = dest_dir {
        let _ = fs::copy(config_path, dest_dir.join("config.toml"));
    }
}
