//! Abstract Factory Usage
//!
//! Renders the same application with each widget family. The platform comes
//! from the first argument (`windows` or `mac`), defaulting to the host OS.

use solo::factory::{Application, GuiFactory, MacFactory, WindowsFactory};

fn run<F: GuiFactory>(factory: &F) {
    let app = Application::new(factory);
    for line in app.render_ui() {
        println!("  {line}");
    }
}

fn main() {
    let platform = std::env::args()
        .nth(1)
        .unwrap_or_else(|| if cfg!(target_os = "macos") { "mac" } else { "windows" }.to_owned());

    println!("Abstract Factory ({platform})");
    println!("================");
    match platform.as_str() {
        "mac" => run(&MacFactory),
        _ => run(&WindowsFactory),
    }
}
