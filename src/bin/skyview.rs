//! Sky view renderer
//!
//! Renders a single frame of the sky view for a given orientation and
//! prints the status line, the constellation under the crosshairs and the
//! size of the draw list.
//!
//! Usage:
//!   cargo run --bin skyview -- --ra 5.5 --dec -5 --stars data/hygfull.csv.gz \
//!       --boundaries data/constbnd.dat.txt

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use skyview::persist::{JsonFileStore, MemoryStore, StateStore};
use skyview::{Quaternion, RaDec, SkyView, ViewConfig, Viewport};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Renders one frame of the celestial sphere viewer",
    long_about = None
)]
struct Args {
    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Zoom level
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Orientation as "x,y,z,w"
    #[arg(short, long, conflicts_with_all = ["ra", "dec"])]
    quaternion: Option<Quaternion>,

    /// Right ascension to center on, in hours
    #[arg(long, requires = "dec", allow_negative_numbers = true)]
    ra: Option<f64>,

    /// Declination to center on, in degrees
    #[arg(long, requires = "ra", allow_negative_numbers = true)]
    dec: Option<f64>,

    /// HYG star catalog (.csv or .csv.gz)
    #[arg(long)]
    stars: Option<PathBuf>,

    /// Constellation boundary table
    #[arg(long)]
    boundaries: Option<PathBuf>,

    /// Constellation stick figures (JSON)
    #[arg(long)]
    lines: Option<PathBuf>,

    /// Constellation and Greek letter abbreviations (JSON)
    #[arg(long)]
    abbreviations: Option<PathBuf>,

    /// View configuration (JSON); defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File the view state is restored from and saved to
    #[arg(long)]
    state: Option<PathBuf>,

    /// Color scheme name
    #[arg(long)]
    scheme: Option<String>,

    /// Print the draw list as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewConfig::from_json_file(path)?,
        None => ViewConfig::default(),
    };
    let store: Box<dyn StateStore> = match &args.state {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };

    let viewport = Viewport::new(args.width, args.height, args.dpr);
    let mut sky = SkyView::new(config, viewport, store);

    if let Some(path) = &args.stars {
        sky.load_star_catalog(path);
    }
    if let Some(path) = &args.boundaries {
        sky.load_boundaries(path);
    }
    if let Some(path) = &args.lines {
        sky.load_constellation_lines(path);
    }
    if let Some(path) = &args.abbreviations {
        sky.load_abbreviations(path);
    }

    if let Some(q) = args.quaternion {
        sky.set_quaternion(q);
    }
    if let (Some(ra), Some(dec)) = (args.ra, args.dec) {
        sky.point_at(&RaDec::new(ra, dec));
    }
    if let Some(zoom) = args.zoom {
        sky.set_zoom(zoom);
    }
    if let Some(name) = &args.scheme {
        sky.select_color_scheme(name)?;
    }

    let frame = sky.render();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    println!("{}", sky.status_line());
    for line in sky.extra_lines() {
        println!("{}", line);
    }
    println!("Constellation: {}", sky.current_constellation());
    println!("Orientation:   {}", sky.view().quaternion());
    println!("Zoom:          {}", sky.view().zoom());
    println!("Stars in view: {}", sky.filtered_stars().count());
    println!("Draw commands: {}", frame.commands.len());

    Ok(())
}
