//! Command-line interface for generating, annotating and propagating floorplans

use crate::algorithm::evolution::{GeneratorConfig, LayoutGenerator, MutationRateSource};
use crate::analysis::annotate::{AnnotatedPlan, FeaturePlacer};
use crate::analysis::placement::PlacerConfig;
use crate::io::configuration::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GENERATIONS, DEFAULT_MAX_CANDIDATES,
    DEFAULT_PLAN_COUNT, DEFAULT_POPULATION_SIZE, DEFAULT_SEED, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
    PLAN_PREFIX,
};
use crate::io::error::{FloorplanError, Result, invalid_parameter};
use crate::io::image::{is_png, load_rgb, save_rgb};
use crate::io::labels::LabelWriter;
use crate::io::palette::Palette;
use crate::io::progress::ProgressManager;
use crate::io::render::Renderer;
use crate::io::session::Session;
use crate::io::store::{JsonFileStore, Store, read_json, write_json};
use crate::io::visualization::EvolutionCapture;
use crate::spatial::layout::{Layout, RoomProgram};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "floorgen")]
#[command(
    author,
    version,
    about = "Generate residential floorplans and annotate them with stairs and porch"
)]
/// Command-line arguments for the floorplan tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Random seed for reproducible runs
    #[arg(short, long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress bars and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TrueType font for labels (defaults to a common system font)
    #[arg(long, global = true, value_name = "TTF")]
    pub font: Option<PathBuf>,

    /// Directory holding the persisted mutation rate bandit
    #[arg(long, global = true, default_value = ".floorgen")]
    pub state_dir: PathBuf,
}

/// Batch operations
#[derive(Subcommand)]
pub enum Command {
    /// Generate plans, render them and place stairs and porch
    Generate(GenerateArgs),
    /// Place stairs and porch on existing floorplan images
    Annotate(AnnotateArgs),
    /// Copy a reference plan's stairs onto layout variants
    Propagate(PropagateArgs),
    /// Reward the current mutation rate
    Feedback(FeedbackArgs),
}

/// Arguments of `generate`
#[derive(Args)]
// Room toggles and output switches are independent user choices
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Output directory for images and layouts
    #[arg(short, long, default_value = "plans")]
    pub output: PathBuf,

    /// Number of plans to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_PLAN_COUNT)]
    pub count: usize,

    /// Number of bedrooms
    #[arg(long, default_value_t = 2)]
    pub bedrooms: usize,

    /// Number of washrooms
    #[arg(long, default_value_t = 1)]
    pub washrooms: usize,

    /// Leave out the kitchen
    #[arg(long)]
    pub no_kitchen: bool,

    /// Leave out the garage
    #[arg(long)]
    pub no_garage: bool,

    /// Attach each washroom to its own bedroom
    #[arg(short, long)]
    pub attached_washroom: bool,

    /// Canvas width in grid units
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: i32,

    /// Canvas height in grid units
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: i32,

    /// Layouts per generation
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    pub population: usize,

    /// Generations to evolve
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Fixed mutation rate instead of the learned one
    #[arg(short, long)]
    pub mutation_rate: Option<f64>,

    /// Export an animated GIF of the evolution of each plan
    #[arg(short, long)]
    pub visualize: bool,
}

impl GenerateArgs {
    /// Requested room program
    pub const fn program(&self) -> RoomProgram {
        RoomProgram {
            bedrooms: self.bedrooms,
            washrooms: self.washrooms,
            kitchen: !self.no_kitchen,
            garage: !self.no_garage,
        }
    }

    /// Generator configuration for these arguments
    pub fn generator_config(&self, mutation: MutationRateSource) -> GeneratorConfig {
        GeneratorConfig {
            rooms: self.program().labels(),
            canvas_width: self.width,
            canvas_height: self.height,
            population_size: self.population,
            generations: self.generations,
            attached_washroom: self.attached_washroom,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            mutation,
        }
    }
}

/// Arguments of `annotate`
#[derive(Args)]
pub struct AnnotateArgs {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

/// Arguments of `propagate`
#[derive(Args)]
pub struct PropagateArgs {
    /// Annotated reference plan (PNG, with an optional sibling JSON layout)
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Directory of variant plans
    #[arg(value_name = "VARIANTS")]
    pub variants: PathBuf,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

/// Arguments of `feedback`
#[derive(Args)]
pub struct FeedbackArgs {
    /// Reward for the plans last generated
    #[arg(short, long, default_value_t = 1.0)]
    pub reward: f64,

    /// Rate to reward instead of the current greedy rate
    #[arg(long)]
    pub rate: Option<f64>,
}

/// Path of the annotated copy of `input`
pub fn output_path(input: &Path) -> PathBuf {
    sibling(input, &format!("{OUTPUT_SUFFIX}.png"))
}

/// Path of the layout JSON stored next to `image`
pub fn layout_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

/// Path of the evolution GIF for a plan stem
pub fn visualization_path(directory: &Path, stem: &str) -> PathBuf {
    directory.join(format!("{stem}_evolution.gif"))
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{stem}{suffix}");
    input
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// PNG files in `target` (a file or directory), annotated outputs excluded
///
/// # Errors
///
/// Returns an error if the target is neither a PNG file nor a readable directory
pub fn collect_pngs(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_png(target) {
            return Ok(vec![target.to_path_buf()]);
        }
        return Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a PNG image",
        ));
    }
    if !target.is_dir() {
        return Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a PNG file or directory",
        ));
    }

    let entries = std::fs::read_dir(target).map_err(|e| FloorplanError::FileSystem {
        path: target.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| FloorplanError::FileSystem {
                path: target.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        let annotated = path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX));
        if is_png(&path) && !annotated {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Runs one CLI command over its batch of plans or files
pub struct BatchProcessor {
    cli: Cli,
    runtime: Runtime,
}

// Mutable state shared by every job of a batch
struct Runtime {
    progress_manager: Option<ProgressManager>,
    rng: StdRng,
}

// Everything needed to produce one generated plan
struct PlanJob<'a> {
    generator: &'a LayoutGenerator,
    args: &'a GenerateArgs,
    renderer: &'a Renderer,
    placer: &'a FeaturePlacer,
}

impl BatchProcessor {
    /// Create a processor seeded from the CLI arguments
    pub fn new(cli: Cli) -> Self {
        let runtime = Runtime {
            progress_manager: (!cli.quiet).then(ProgressManager::new),
            rng: StdRng::seed_from_u64(cli.seed),
        };
        Self { cli, runtime }
    }

    /// Run the selected command
    ///
    /// Failures of single plans or files are logged and the batch continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot start: invalid arguments, an
    /// unreadable target, an unusable font or unreadable learning state
    pub fn process(&mut self) -> Result<()> {
        let font = self.cli.font.as_deref();
        let state_dir = self.cli.state_dir.as_path();
        match &self.cli.command {
            Command::Generate(args) => {
                let session = Session::open(JsonFileStore::new(state_dir))?;
                let mutation = args
                    .mutation_rate
                    .map_or_else(|| session.mutation_source(), MutationRateSource::Fixed);
                let generator = LayoutGenerator::new(args.generator_config(mutation))?;
                let renderer = Renderer::new(Palette::default(), LabelWriter::discover(font)?);
                let placer = placer(LabelWriter::discover(font)?);
                self.runtime.generate(&PlanJob {
                    generator: &generator,
                    args,
                    renderer: &renderer,
                    placer: &placer,
                });
                Ok(())
            }
            Command::Annotate(args) => {
                let placer = placer(LabelWriter::discover(font)?);
                self.runtime.annotate(args, &placer)
            }
            Command::Propagate(args) => {
                let placer = placer(LabelWriter::discover(font)?);
                self.runtime.propagate(args, &placer)
            }
            Command::Feedback(args) => feedback(state_dir, args),
        }
    }
}

impl Runtime {
    fn generate(&mut self, job: &PlanJob<'_>) {
        let count = job.args.count;
        let mut store = JsonFileStore::new(&job.args.output);

        self.start_batch(count);
        let mut failures = 0;
        for index in 0..count {
            let stem = format!("{PLAN_PREFIX}{}", index + 1);
            if let Err(e) = self.generate_plan(job, &stem, index, &mut store) {
                log::error!("{stem}: {e}");
                failures += 1;
            }
            self.complete_job(index);
        }
        self.finish_batch();

        log::info!(
            "Generated {} of {count} plans in {}",
            count - failures,
            job.args.output.display()
        );
    }

    // Writes <stem>.png, its annotated copy and the layout JSON
    fn generate_plan(
        &mut self,
        job: &PlanJob<'_>,
        stem: &str,
        index: usize,
        store: &mut JsonFileStore,
    ) -> Result<()> {
        let config = job.generator.config();
        if let Some(pm) = self.progress_manager.as_mut() {
            pm.start_job(index, stem, config.generations);
        }

        let mut capture = job.args.visualize.then(|| {
            EvolutionCapture::new(config.canvas_width, config.canvas_height, config.generations)
        });
        let progress = &mut self.progress_manager;
        let layout = job.generator.evolve(&mut self.rng, |generation, best| {
            if let Some(pm) = progress.as_mut() {
                pm.update_step(index, generation + 1);
            }
            if let Some(capture) = capture.as_mut() {
                capture.record(generation, best);
            }
        })?;

        let image = job
            .renderer
            .render(&layout, config.canvas_width, config.canvas_height);
        let image_path = job.args.output.join(format!("{stem}.png"));
        save_rgb(&image, &image_path)?;

        let plan = job.placer.annotate(&image, &layout, &mut self.rng);
        save_rgb(&plan.image, &output_path(&image_path))?;
        store.save(stem, &plan.layout)?;

        if let Some(capture) = capture {
            capture.export_gif(
                job.renderer,
                &visualization_path(&job.args.output, stem),
                GIF_FRAME_DELAY_MS,
            )?;
        }
        Ok(())
    }

    fn annotate(&mut self, args: &AnnotateArgs, placer: &FeaturePlacer) -> Result<()> {
        let files: Vec<PathBuf> = collect_pngs(&args.target)?
            .into_iter()
            .filter(|path| args.no_skip || !output_exists(path))
            .collect();

        self.start_batch(files.len());
        for (index, path) in files.iter().enumerate() {
            self.start_job(index, path);
            if let Err(e) = self.annotate_file(path, placer) {
                log::error!("{}: {e}", path.display());
            }
            self.complete_job(index);
        }
        self.finish_batch();
        Ok(())
    }

    fn annotate_file(&mut self, path: &Path, placer: &FeaturePlacer) -> Result<()> {
        let image = load_rgb(path)?;
        let layout = load_layout(path)?;
        let plan = placer.annotate(&image, &layout, &mut self.rng);
        if !plan.annotation.floor_found {
            log::info!("Skipping {}: no floorplan boundary", path.display());
            return Ok(());
        }
        write_plan(path, &plan)
    }

    fn propagate(&mut self, args: &PropagateArgs, placer: &FeaturePlacer) -> Result<()> {
        let reference_image = load_rgb(&args.reference)?;
        let reference_layout = load_layout(&args.reference)?;
        let reference = placer
            .reference_features(&reference_image, &reference_layout)
            .ok_or_else(|| {
                invalid_parameter(
                    "reference",
                    &args.reference.display(),
                    &"has no stairs in its layout or image",
                )
            })?;

        let files: Vec<PathBuf> = collect_pngs(&args.variants)?
            .into_iter()
            .filter(|path| path != &args.reference)
            .filter(|path| args.no_skip || !output_exists(path))
            .collect();

        self.start_batch(files.len());
        for (index, path) in files.iter().enumerate() {
            self.start_job(index, path);
            let result = load_rgb(path).and_then(|image| {
                let layout = load_layout(path)?;
                let plan = placer.enhance_variant(&image, &layout, &reference, &mut self.rng);
                write_plan(path, &plan)
            });
            if let Err(e) = result {
                log::error!("{}: {e}", path.display());
            }
            self.complete_job(index);
        }
        self.finish_batch();

        log::info!(
            "Propagated stairs at ({}, {}) to {} variants",
            reference.stairs.x,
            reference.stairs.y,
            files.len()
        );
        Ok(())
    }

    fn start_batch(&mut self, jobs: usize) {
        if let Some(pm) = self.progress_manager.as_mut() {
            pm.initialize(jobs);
        }
    }

    fn start_job(&mut self, index: usize, path: &Path) {
        if let Some(pm) = self.progress_manager.as_mut() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            pm.start_job(index, &name, 1);
        }
    }

    fn complete_job(&mut self, index: usize) {
        if let Some(pm) = self.progress_manager.as_mut() {
            pm.complete_job(index);
        }
    }

    fn finish_batch(&self) {
        if let Some(pm) = self.progress_manager.as_ref() {
            pm.finish();
        }
    }
}

fn feedback(state_dir: &Path, args: &FeedbackArgs) -> Result<()> {
    let mut session = Session::open(JsonFileStore::new(state_dir))?;
    match args.rate {
        Some(rate) => session.record_feedback_for(rate, args.reward)?,
        None => {
            session.record_feedback(args.reward)?;
        }
    }
    log::info!(
        "Mutation rate for the next run: {}",
        session.bandit().best_rate()
    );
    Ok(())
}

fn output_exists(input: &Path) -> bool {
    let exists = output_path(input).exists();
    if exists {
        log::info!("Skipping: {} (output exists)", input.display());
    }
    exists
}

fn placer(labels: LabelWriter) -> FeaturePlacer {
    FeaturePlacer::new(Palette::default(), PlacerConfig::default(), labels)
}

// A missing layout file means an image-only plan
fn load_layout(image_path: &Path) -> Result<Layout> {
    let path = layout_path(image_path);
    if path.is_file() {
        read_json(&path)
    } else {
        Ok(Layout::new())
    }
}

fn write_plan(input: &Path, plan: &AnnotatedPlan) -> Result<()> {
    let image_path = output_path(input);
    save_rgb(&plan.image, &image_path)?;
    write_json(&layout_path(&image_path), &plan.layout)
}
