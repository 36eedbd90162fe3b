//! Genetic search over room layouts
//!
//! Fitness is total room area. Each generation is rebuilt from tournament
//! winners by uniform per-room crossover followed by small random mutation.
//! Offspring that break a layout invariant are redrawn, and after
//! [`CHILD_ATTEMPTS`] failures the fitter parent is carried over unchanged, so
//! every generation consists of valid layouts only.

use crate::algorithm::bandit::MutationRateBandit;
use crate::algorithm::population::{GENERAL_SIZES, initialize_population};
use crate::io::configuration::{
    CHILD_ATTEMPTS, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GENERATIONS,
    DEFAULT_MAX_CANDIDATES, DEFAULT_MUTATION_RATE, DEFAULT_POPULATION_SIZE, TOURNAMENT_SIZE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::layout::{Layout, RoomKind, find_violation};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Where the generator takes its mutation rate from
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRateSource {
    /// A constant rate
    Fixed(f64),
    /// The greedy rate of a bandit
    Bandit(MutationRateBandit),
}

impl MutationRateSource {
    /// Rate used for this run
    pub fn rate(&self) -> f64 {
        match self {
            Self::Fixed(rate) => *rate,
            Self::Bandit(bandit) => bandit.best_rate(),
        }
    }
}

/// Parameters of one layout generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Room labels to place
    pub rooms: Vec<String>,
    /// Canvas width in grid units
    pub canvas_width: i32,
    /// Canvas height in grid units
    pub canvas_height: i32,
    /// Layouts per generation
    pub population_size: usize,
    /// Generations to evolve
    pub generations: usize,
    /// Whether washrooms must be attached to bedrooms
    pub attached_washroom: bool,
    /// Candidate layouts tried before initialisation gives up
    pub max_candidates: usize,
    /// Mutation rate provider
    pub mutation: MutationRateSource,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rooms: ["Garage", "Kitchen", "Bedroom", "Washroom"]
                .map(String::from)
                .to_vec(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            attached_washroom: false,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            mutation: MutationRateSource::Fixed(DEFAULT_MUTATION_RATE),
        }
    }
}

impl GeneratorConfig {
    /// Default configuration for the given room labels
    pub fn with_rooms(rooms: Vec<String>) -> Self {
        Self {
            rooms,
            ..Self::default()
        }
    }

    /// Check the configuration can be searched at all
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No rooms are requested or a label is the reserved stairs key
    /// - The canvas is smaller than the largest room size
    /// - The population size or candidate cap is zero
    /// - The fixed mutation rate lies outside `[0, 1]`
    /// - Attached washrooms outnumber bedrooms
    pub fn validate(&self) -> Result<()> {
        if self.rooms.is_empty() {
            return Err(invalid_parameter(
                "rooms",
                &"[]",
                &"at least one room is required",
            ));
        }
        if let Some(label) = self
            .rooms
            .iter()
            .find(|label| label.as_str() == crate::spatial::layout::STAIRS_KEY)
        {
            return Err(invalid_parameter(
                "rooms",
                label,
                &"the stairs key is reserved",
            ));
        }
        let largest = *GENERAL_SIZES.end();
        if self.canvas_width < largest || self.canvas_height < largest {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.canvas_width, self.canvas_height),
                &format!("both sides must be at least {largest}"),
            ));
        }
        if self.population_size == 0 {
            return Err(invalid_parameter(
                "population_size",
                &self.population_size,
                &"must be positive",
            ));
        }
        if self.max_candidates == 0 {
            return Err(invalid_parameter(
                "max_candidates",
                &self.max_candidates,
                &"must be positive",
            ));
        }
        let rate = self.mutation.rate();
        if !(0.0..=1.0).contains(&rate) {
            return Err(invalid_parameter(
                "mutation_rate",
                &rate,
                &"must lie in [0, 1]",
            ));
        }
        if self.attached_washroom {
            let count = |kind: RoomKind| {
                self.rooms
                    .iter()
                    .filter(|label| RoomKind::of(label) == kind)
                    .count()
            };
            let (washrooms, bedrooms) = (count(RoomKind::Washroom), count(RoomKind::Bedroom));
            if washrooms > bedrooms {
                return Err(invalid_parameter(
                    "attached_washroom",
                    &format!("{washrooms} washrooms, {bedrooms} bedrooms"),
                    &"each attached washroom needs its own bedroom",
                ));
            }
        }
        Ok(())
    }
}

/// Fitness of a layout: total room area
pub fn fitness(layout: &Layout) -> i64 {
    layout.total_area()
}

/// Fittest of `size` layouts drawn without replacement
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Layout],
    size: usize,
    rng: &mut R,
) -> Option<&'a Layout> {
    population
        .choose_multiple(rng, size)
        .max_by_key(|layout| fitness(layout))
}

/// Uniform crossover: each room comes from either parent with equal odds
///
/// Rooms missing from `second` are always taken from `first`.
pub fn crossover<R: Rng>(first: &Layout, second: &Layout, rng: &mut R) -> Layout {
    let mut child = Layout::new();
    for (label, rect) in first.rooms() {
        let take_first = rng.random::<f64>() < 0.5;
        let gene = if take_first {
            rect
        } else {
            second.get(label).unwrap_or(rect)
        };
        child.insert(label, *gene);
    }
    child
}

/// Perturb rooms by one unit with probability `rate`, then clamp to the canvas
///
/// Each selected room moves and resizes by -1, 0 or +1 per field. Negative
/// offsets are clamped to zero and extents are trimmed to end at the canvas
/// edge; no minimum size is re-imposed.
pub fn mutate<R: Rng>(
    layout: &Layout,
    rate: f64,
    canvas_width: i32,
    canvas_height: i32,
    rng: &mut R,
) -> Layout {
    let mut mutated = layout.clone();
    for (_, rect) in mutated.rooms_mut() {
        if rng.random::<f64>() >= rate {
            continue;
        }
        rect.x += rng.random_range(-1..=1);
        rect.y += rng.random_range(-1..=1);
        rect.width += rng.random_range(-1..=1);
        rect.height += rng.random_range(-1..=1);

        rect.x = rect.x.clamp(0, canvas_width);
        rect.y = rect.y.clamp(0, canvas_height);
        if rect.right() > canvas_width {
            rect.width = canvas_width - rect.x;
        }
        if rect.bottom() > canvas_height {
            rect.height = canvas_height - rect.y;
        }
    }
    mutated
}

/// Genetic layout search for one configuration
pub struct LayoutGenerator {
    config: GeneratorConfig,
}

impl LayoutGenerator {
    /// Create a generator after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Evolve a population and return its fittest layout
    ///
    /// # Errors
    ///
    /// Returns an error if initialisation exhausts its candidate cap
    pub fn genetic_algorithm<R: Rng>(&self, rng: &mut R) -> Result<Layout> {
        self.evolve(rng, |_, _| {})
    }

    /// Evolve a population, reporting the fittest layout after each generation
    ///
    /// # Errors
    ///
    /// Returns an error if initialisation exhausts its candidate cap
    pub fn evolve<R: Rng>(
        &self,
        rng: &mut R,
        mut on_generation: impl FnMut(usize, &Layout),
    ) -> Result<Layout> {
        let mut population = initialize_population(&self.config, rng)?;
        let rate = self.config.mutation.rate();

        for generation in 0..self.config.generations {
            let mut next = Vec::with_capacity(self.config.population_size);
            while next.len() < self.config.population_size {
                next.push(self.breed(&population, rate, rng));
            }
            population = next;

            if let Some(best) = fittest(&population) {
                on_generation(generation, best);
            }
        }

        let best = fittest(&population).cloned().unwrap_or_default();
        log::info!(
            "Evolved {} rooms over {} generations at mutation rate {rate}: fitness {}",
            best.len(),
            self.config.generations,
            fitness(&best)
        );
        Ok(best)
    }

    fn breed<R: Rng>(&self, population: &[Layout], rate: f64, rng: &mut R) -> Layout {
        let mut fallback = None;

        for _ in 0..CHILD_ATTEMPTS {
            let first = tournament_selection(population, TOURNAMENT_SIZE, rng);
            let second = tournament_selection(population, TOURNAMENT_SIZE, rng);
            let (Some(first), Some(second)) = (first, second) else {
                break;
            };

            let child = mutate(
                &crossover(first, second, rng),
                rate,
                self.config.canvas_width,
                self.config.canvas_height,
                rng,
            );
            if self.is_valid(&child) {
                return child;
            }

            fallback = Some(if fitness(first) >= fitness(second) {
                first
            } else {
                second
            });
        }

        fallback.cloned().unwrap_or_default()
    }

    fn is_valid(&self, layout: &Layout) -> bool {
        find_violation(
            layout,
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.attached_washroom,
        )
        .is_none()
    }
}

/// Generate a layout for `config`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or infeasible
pub fn generate<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Layout> {
    LayoutGenerator::new(config.clone())?.genetic_algorithm(rng)
}

fn fittest(population: &[Layout]) -> Option<&Layout> {
    population.iter().max_by_key(|layout| fitness(layout))
}
