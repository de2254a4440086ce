use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use phaseset::{
    Scene,
    sign::Sign,
    tessellate::{Bounds, TessellateSettings, ThreadPool},
};

/// Assigns phases to level-set sign regions and tessellates them
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Level-set expression in `x` and `y` (may be repeated)
    #[clap(short, long = "geometry")]
    geometries: Vec<String>,

    /// File with one level-set expression per line
    ///
    /// Blank lines and lines starting with `#` are skipped.  Geometries from
    /// the file are defined before any given with `--geometry`.
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// Phase table, as a whitespace or comma-delimited list of 2^N entries
    #[clap(short, long)]
    phases: Option<String>,

    /// Spatial dimension
    #[clap(long, default_value_t = 2)]
    dim: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the phase table
    Report,

    /// Prints per-geometry visibility for a selection
    Visibility {
        #[clap(flatten)]
        select: SelectSettings,
    },

    /// Tessellates the visible regions
    Tessellate {
        #[clap(flatten)]
        select: SelectSettings,

        #[clap(flatten)]
        settings: GridSettings,
    },
}

#[derive(Parser)]
struct SelectSettings {
    /// Show the regions assigned to this phase
    #[clap(long, conflicts_with = "only")]
    phase: Option<usize>,

    /// Show both sides of a single geometry
    #[clap(long)]
    only: Option<usize>,

    /// Restrict visible geometries to one side (`positive` or `negative`)
    #[clap(long)]
    force: Option<Sign>,
}

#[derive(Parser)]
struct GridSettings {
    /// Name of a `.stl` file to write
    #[clap(short, long)]
    out: Option<PathBuf>,

    /// Print strips as text to stdout
    #[clap(long)]
    text: bool,

    /// Samples along each axis
    #[clap(short, long, default_value_t = 100)]
    resolution: usize,

    /// Domain bounds along x
    #[clap(
        long,
        num_args = 2,
        allow_negative_numbers = true,
        default_values_t = [-1.0, 1.0]
    )]
    x: Vec<f32>,

    /// Domain bounds along z
    #[clap(
        long,
        num_args = 2,
        allow_negative_numbers = true,
        default_values_t = [-1.0, 1.0]
    )]
    z: Vec<f32>,

    /// Number of threads to use
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,

    /// Number of times to tessellate (for benchmarking)
    #[clap(short = 'N', default_value_t = 1)]
    n: usize,
}

////////////////////////////////////////////////////////////////////////////////

fn load(args: &Args) -> Result<Scene> {
    let mut scene = Scene::with_dimension(args.dim)?;
    let mut exprs = vec![];
    if let Some(path) = &args.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {path:?}"))?;
        exprs.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_owned),
        );
    }
    exprs.extend(args.geometries.iter().cloned());

    for e in &exprs {
        let field = phaseset::rhai::compile(e)
            .with_context(|| format!("failed to compile `{e}`"))?;
        let g = scene.define_geometry(field)?;
        info!("geometry {g}: {e}");
    }
    if let Some(p) = &args.phases {
        scene.edit_phase_table(p)?;
    }
    Ok(scene)
}

fn select(scene: &mut Scene, select: &SelectSettings) -> Result<()> {
    if let Some(p) = select.phase {
        scene.select_phase(p);
    } else if let Some(g) = select.only {
        scene.select_geometry(g)?;
    }
    if let Some(sign) = select.force {
        scene.force_sign(sign);
    }
    Ok(())
}

fn run_tessellate(scene: &Scene, settings: &GridSettings) -> Result<()> {
    let pool: Option<rayon::ThreadPool>;
    let threads = match settings.threads {
        Some(n) if n.get() == 1 => None,
        Some(n) => {
            pool = Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n.get())
                    .build()?,
            );
            pool.as_ref().map(ThreadPool::Custom)
        }
        None => Some(ThreadPool::Global),
    };
    let cfg = TessellateSettings {
        resolution: settings.resolution,
        bounds: Bounds::new(
            [settings.x[0], settings.x[1]],
            [settings.z[0], settings.z[1]],
        ),
        threads,
    };

    let start = Instant::now();
    let mut strips = vec![];
    for _ in 0..settings.n {
        strips = scene.tessellate(&cfg)?;
    }
    info!(
        "Tessellated {}x at {:?} ms/frame",
        settings.n,
        start.elapsed().as_micros() as f64 / 1000.0 / (settings.n as f64)
    );
    let tris: usize = strips.iter().map(|s| s.strip.triangle_count()).sum();
    info!("{} strips, {} triangles", strips.len(), tris);

    if settings.text {
        let mut out = std::io::stdout().lock();
        for s in &strips {
            s.write_text(&mut out)?;
        }
        out.flush()?;
    }
    if let Some(path) = &settings.out {
        let start = Instant::now();
        let mut handle = std::fs::File::create(path)?;
        phaseset::tessellate::write_stl(
            strips.iter().map(|s| &s.strip),
            &mut handle,
        )?;
        info!("Wrote STL to {path:?} in {:?}", start.elapsed());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let now = Instant::now();
    let args = Args::parse();
    let mut scene = load(&args)?;
    info!(
        "Loaded {} geometries in {:?}",
        scene.num_geometries(),
        now.elapsed()
    );

    match &args.cmd {
        Command::Report => print!("{}", scene.phase_report()),
        Command::Visibility { select: s } => {
            select(&mut scene, s)?;
            for (g, v) in scene.visibility().iter().enumerate() {
                println!("{g}: {v}");
            }
        }
        Command::Tessellate {
            select: s,
            settings,
        } => {
            select(&mut scene, s)?;
            run_tessellate(&scene, settings)?;
        }
    }
    Ok(())
}
