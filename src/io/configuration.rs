//! Algorithm constants and runtime configuration defaults

// Canvas and room program
/// Default canvas width in grid units
pub const DEFAULT_CANVAS_WIDTH: i32 = 20;
/// Default canvas height in grid units
pub const DEFAULT_CANVAS_HEIGHT: i32 = 20;

// Genetic algorithm
/// Number of valid layouts kept per generation
pub const DEFAULT_POPULATION_SIZE: usize = 10;
/// Number of generations evolved per run
pub const DEFAULT_GENERATIONS: usize = 50;
/// Mutation rate used when no bandit is consulted
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
/// Random positions tried per room before a candidate layout is discarded
pub const PLACEMENT_ATTEMPTS: usize = 50;
/// Clearance required around rooms that are neither bedrooms nor washrooms
pub const MIN_ROOM_GAP: i32 = 3;
/// Participants drawn per tournament selection
pub const TOURNAMENT_SIZE: usize = 3;
/// Offspring redraws before the fitter parent is carried over unchanged
pub const CHILD_ATTEMPTS: usize = 20;

// Prevents initialisation from spinning forever on infeasible room programs
/// Candidate layouts tried per run before reporting an infeasible configuration
pub const DEFAULT_MAX_CANDIDATES: usize = 5_000;

// Bandit
/// Candidate mutation rates (bandit arms)
pub const BANDIT_ACTIONS: [f64; 4] = [0.05, 0.10, 0.15, 0.20];
/// Bandit learning rate
pub const BANDIT_ALPHA: f64 = 0.1;
/// Bandit exploration probability
pub const BANDIT_EPSILON: f64 = 0.2;

// Raster analysis, calibrated against the renderer's visual contract
/// Grayscale level at or below which a pixel counts as boundary ink
pub const BOUNDARY_THRESHOLD: u8 = 50;
/// Minimum contour area for the outer floorplan boundary
pub const FLOOR_MIN_CONTOUR_AREA: f64 = 2000.0;
/// Minimum contour area for the open (living) area
pub const OPEN_AREA_MIN_CONTOUR_AREA: f64 = 10.0;
/// Channel level at or above which a pixel is undecorated floor
pub const NEAR_WHITE_LEVEL: u8 = 240;
/// Per-channel tolerance for room fill colours
pub const ROOM_COLOR_TOLERANCE: u8 = 8;
/// Per-channel tolerance for the stairs marker colour
pub const STAIRS_COLOR_TOLERANCE: u8 = 10;
/// Minimum pixel area of a detected stairs marker
pub const STAIRS_MIN_AREA: usize = 10;

// Feature placement
/// Stairs marker width in pixels
pub const STAIRS_WIDTH: i32 = 15;
/// Stairs marker height in pixels
pub const STAIRS_HEIGHT: i32 = 15;
/// Radial probe distances in pixels
pub const RADIAL_DISTANCES: [i32; 7] = [5, 10, 15, 20, 25, 30, 35];
/// Angular step between radial probes in degrees
pub const RADIAL_ANGLE_STEP_DEG: usize = 30;
/// Boundary points closer than this belong to the same wall run
pub const SEGMENT_JOIN_DISTANCE: f64 = 2.0;
/// Distance from a free wall midpoint to the stairs anchor
pub const WALL_OFFSET: f64 = 5.0;
/// Porch label anchors must be further than this from the image edges
pub const PORCH_EDGE_MARGIN: u32 = 10;
/// Diagonal offset from the porch anchor to the label
pub const PORCH_LABEL_OFFSET: i32 = 5;
/// Horizontal shift applied to centred labels
pub const LABEL_SHIFT: i32 = 20;
/// Label text height in pixels
pub const LABEL_FONT_SIZE: f32 = 11.0;

// Rendering
/// Pixels per canvas grid unit
pub const RENDER_CELL_PX: u32 = 20;
/// Blank border around the floorplan in pixels
pub const RENDER_MARGIN_PX: u32 = 20;
/// Outer boundary line thickness in pixels
pub const RENDER_BOUNDARY_PX: u32 = 5;
/// Dark outline drawn inside every room fill, in pixels
pub const RENDER_OUTLINE_PX: u32 = 1;
/// Distance at which an open-area boundary point sees a room fill across its outline
pub const FREE_WALL_REACH: i32 = RENDER_OUTLINE_PX as i32 + 1;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of plans per `generate` run
pub const DEFAULT_PLAN_COUNT: usize = 3;

// Output settings
/// Suffix added to annotated output filenames
pub const OUTPUT_SUFFIX: &str = "_annotated";
/// File stem for generated plans
pub const PLAN_PREFIX: &str = "plan";
/// Store key holding the bandit Q-table
pub const BANDIT_STORE_KEY: &str = "bandit";
/// Jobs shown with their own progress bar before batch mode kicks in
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Minimum frame delay honoured by common GIF viewers
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Font files tried when no `--font` is given
pub const FONT_SEARCH_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
