mod app;
mod network;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the collaboration network JSON document.
    #[arg(long, default_value = "author_network.json")]
    data: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "author-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::AuthorAtlasApp::new(cc, args.data.clone())))),
    )
}
