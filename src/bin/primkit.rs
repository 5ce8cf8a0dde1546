use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use primkit::{
    BackendKind, ExtractedObject, FixedExtractor, KitbashDocument, PlannerConfig, PresetSynthesizer,
    PreviewSettings, ScenePlan,
};

#[derive(Parser, Debug)]
#[command(name = "primkit", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print stage timings only.
    #[arg(long, global = true)]
    timings: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a scene plan (kitbash documents are flattened first).
    Normalize(InOutArgs),
    /// Flatten a kitbash parts document into a normalized scene plan.
    Flatten(FlattenArgs),
    /// Print mesh, bounds and camera details for a plan.
    Inspect(InspectArgs),
    /// Render a flat-shaded preview PNG.
    Preview(PreviewArgs),
    /// Print a hardened response schema for an external collaborator.
    Schema(SchemaArgs),
    /// Plan objects offline with the preset part synthesizer.
    Sketch(SketchArgs),
}

#[derive(Parser, Debug)]
struct InOutArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output plan JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FlattenArgs {
    /// Input kitbash JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output plan JSON.
    #[arg(long)]
    out: PathBuf,

    /// Description stored in the plan.
    #[arg(long)]
    description: Option<String>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Divide the plan resolution by this factor.
    #[arg(long, default_value_t = 1)]
    downscale: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    Kitbash,
    Extraction,
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Which schema to print.
    #[arg(long, value_enum)]
    kind: SchemaKind,

    /// Parts allowed per object (kitbash only); defaults to the planner budget.
    #[arg(long)]
    max_parts: Option<u32>,
}

#[derive(Parser, Debug)]
struct SketchArgs {
    /// Object name.
    #[arg(long, required_unless_present = "objects")]
    name: Option<String>,

    /// Object category, e.g. "tugboat".
    #[arg(long, default_value = "")]
    category: String,

    /// JSON array of `{name, category, color}` objects, planned together.
    #[arg(long, conflicts_with = "name")]
    objects: Option<PathBuf>,

    /// Prompt recorded in the combined plan description.
    #[arg(long, default_value = "offline sketch")]
    prompt: String,

    /// Override the reality factor (0..=100).
    #[arg(long)]
    reality: Option<u32>,

    /// Hard cap on parts per object.
    #[arg(long)]
    max_parts_cap: Option<u32>,

    /// Planner config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output plan JSON; defaults to `sketches/<name>.json`.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let t0 = Instant::now();
    let timings = cli.timings;
    match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Flatten(args) => cmd_flatten(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Preview(args) => cmd_preview(args, timings),
        Command::Schema(args) => cmd_schema(args),
        Command::Sketch(args) => cmd_sketch(args, timings),
    }?;
    if timings {
        eprintln!("total: {:.3}s", t0.elapsed().as_secs_f64());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .without_time()
        .compact()
        .init();
}

fn load_normalized(path: &Path) -> anyhow::Result<ScenePlan> {
    let plan = ScenePlan::from_path(path)
        .with_context(|| format!("load plan '{}'", path.display()))?;
    Ok(primkit::normalize(plan))
}

fn write_plan(plan: &ScenePlan, out: &Path) -> anyhow::Result<()> {
    plan.write_path(out)
        .with_context(|| format!("write plan '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_normalize(args: InOutArgs) -> anyhow::Result<()> {
    let plan = load_normalized(&args.in_path)?;
    write_plan(&plan, &args.out)
}

fn cmd_flatten(args: FlattenArgs) -> anyhow::Result<()> {
    let text = primkit::read_text(&args.in_path)?;
    let doc: KitbashDocument = primkit::from_str_lenient(&text)
        .with_context(|| format!("parse kitbash document '{}'", args.in_path.display()))?;
    let plan = primkit::normalize(primkit::flatten_into_plan(&doc, args.description));
    write_plan(&plan, &args.out)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let plan = load_normalized(&args.in_path)?;
    let scene = primkit::compile_scene(&plan)?;

    for o in &scene.objects {
        let b = o.world_bounds;
        println!(
            "{:<24} {:<8} verts={:<5} tris={:<5} min={:?} max={:?}",
            o.name,
            o.kind.as_str(),
            o.mesh.vertex_count(),
            o.mesh.triangle_count(),
            b.min.to_array(),
            b.max.to_array(),
        );
    }
    let cam = &scene.camera;
    println!(
        "camera eye={:?} target={:?} distance={:.4} yfov={}",
        cam.eye.to_array(),
        cam.target.to_array(),
        cam.distance,
        cam.yfov_deg
    );
    println!(
        "frames={} triangles={} fingerprint={}",
        plan.render.frame_count(),
        scene.triangle_count(),
        primkit::fingerprint_scene(&scene)
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs, timings: bool) -> anyhow::Result<()> {
    let plan = load_normalized(&args.in_path)?;

    let t0 = Instant::now();
    let scene = primkit::compile_scene(&plan)?;
    let compile = t0.elapsed();

    let t1 = Instant::now();
    let mut backend = primkit::create_backend(
        BackendKind::CpuPreview,
        PreviewSettings {
            downscale: args.downscale,
        },
    )?;
    let frame = backend.render(&scene)?;
    let render = t1.elapsed();

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if timings {
        report_timings(&[("compile", compile), ("render", render)]);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_schema(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.kind {
        SchemaKind::Kitbash => {
            let max_parts = args
                .max_parts
                .unwrap_or_else(|| PlannerConfig::default().max_parts());
            primkit::kitbash_schema(max_parts)
        }
        SchemaKind::Extraction => primkit::extraction_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn cmd_sketch(args: SketchArgs, timings: bool) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => PlannerConfig::from_path(path)
            .with_context(|| format!("load planner config '{}'", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(rf) = args.reality {
        cfg.reality_factor = rf;
    }
    if args.max_parts_cap.is_some() {
        cfg.max_parts_cap = args.max_parts_cap;
    }
    cfg.timings_only |= timings;

    let objects = match (&args.objects, &args.name) {
        (Some(path), _) => {
            let text = primkit::read_text(path)?;
            primkit::from_str_lenient::<Vec<ExtractedObject>>(&text)
                .with_context(|| format!("parse objects '{}'", path.display()))?
        }
        (None, Some(name)) => vec![ExtractedObject::new(name.clone(), args.category.clone())],
        (None, None) => anyhow::bail!("either --name or --objects is required"),
    };

    let out = args.out.clone().unwrap_or_else(|| {
        let stem = objects
            .first()
            .map(|o| primkit::sketch_file_stem(&o.name))
            .unwrap_or_else(|| "object".to_string());
        PathBuf::from("sketches").join(format!("{stem}.json"))
    });

    let planned = primkit::plan_prompt(
        &args.prompt,
        &FixedExtractor(objects),
        &PresetSynthesizer,
        &cfg,
    )?;

    if !cfg.timings_only {
        for (obj, sketch) in planned.objects.iter().zip(&planned.sketches) {
            println!("{} (reality={})", obj.name, cfg.reality_factor());
            for (i, c) in sketch.components.iter().enumerate() {
                println!("  {}. {}: {}", i + 1, c.name, c.primitive);
            }
        }
    } else {
        report_timings(&[
            ("extract", planned.timings.extract),
            ("sketch", planned.timings.sketch),
        ]);
    }

    write_plan(&planned.combined, &out)
}

fn report_timings(stages: &[(&str, Duration)]) {
    let parts: Vec<String> = stages
        .iter()
        .map(|(name, d)| format!("{name}: {:.3}s", d.as_secs_f64()))
        .collect();
    eprintln!("timings: {}", parts.join(", "));
}
