use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chartdash::{catalog, export, ChartKind, DatasetStore, RenderOptions, VisualizationSession};

#[derive(Parser, Debug)]
#[command(name = "chartdash")]
#[command(about = "Render a chart from a tabular data file and save it as PNG", long_about = None)]
struct Args {
    /// Path to the dataset (.csv or .json records)
    input: PathBuf,

    /// Chart kind: bar, line, pie, or scatter
    #[arg(short, long, default_value = "bar")]
    kind: String,

    /// Column for the x axis (defaults to the first column)
    #[arg(short, long)]
    x: Option<String>,

    /// Column for the y axis (defaults to the second column)
    #[arg(short, long)]
    y: Option<String>,

    /// Destination for the exported PNG
    #[arg(short, long, default_value = "chart.png")]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let kind: ChartKind = args.kind.parse()?;

    let mut store = DatasetStore::new();
    let (default_x, default_y) = {
        let dataset = store
            .load(&args.input)
            .with_context(|| format!("failed to load {}", args.input.display()))?;
        catalog::default_selection(dataset).context("dataset has no columns")?
    };

    let x_field = args.x.unwrap_or(default_x);
    let y_field = args.y.unwrap_or(default_y);

    let mut session = VisualizationSession::with_options(RenderOptions {
        width: args.width,
        height: args.height,
    });

    let title = session
        .generate(&store, kind, &x_field, &y_field)
        .context("failed to generate chart")?
        .title()
        .to_string();

    export::export(session.current(), &args.output)
        .with_context(|| format!("failed to save chart to {}", args.output.display()))?;

    println!("{} saved to {}", title, args.output.display());
    Ok(())
}
