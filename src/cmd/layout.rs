use crate::reports;
use std::time::Instant;
use clap::Args;
use parkmap::api::HttpParkingApi;
use parkmap::config::AppConfig;
use parkmap::error::ParkResult;
use parkmap::geometry::{ContainerSize, ImageSize};
use parkmap::model::load_spots_from_file;
use parkmap::render::layout_to_svg;
use parkmap::session::ParkingSession;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[arg(long)]
    pub width: f32,
    #[arg(long)]
    pub height: f32,

    /// Natural width of the background image
    #[arg(long)]
    pub image_width: Option<f32>,
    #[arg(long)]
    pub image_height: Option<f32>,

    /// Read spots from a JSON file instead of the backend
    #[arg(long)]
    pub spots_file: Option<PathBuf>,

    /// Write the rendered map as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

pub async fn run(args: LayoutArgs, config: &AppConfig) -> ParkResult<()> {
    let mut session = ParkingSession::new(config.clone());

    match &args.spots_file {
        Some(path) => {
            println!("📂 Loading spots: {}", path.display());
            let ticket = session.begin_fetch();
            session.apply_fetch(ticket, load_spots_from_file(path));
        }
        None => {
            let api = HttpParkingApi::new(&config.api)?;
            session.reload_spots(&api).await;
        }
    }
    reports::print_notifications(session.toasts(), Instant::now());

    match (args.image_width, args.image_height) {
        (None, None) => session.image_failed(),
        (w, h) => session.image_loaded(ImageSize::new(w.unwrap_or(0.0), h.unwrap_or(0.0))),
    }
    session.observe_resize(ContainerSize::new(args.width, args.height));

    let Some(layout) = session.layout() else {
        println!(
            "⏸️  Container {}x{} has no usable size, layout deferred.",
            args.width, args.height
        );
        return Ok(());
    };

    reports::print_layout_table(&layout);

    if let Some(path) = &args.svg {
        fs::write(path, layout_to_svg(&layout))?;
        println!("🖼️  Wrote {}", path.display());
    }
    Ok(())
}
