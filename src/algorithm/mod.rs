/// Epsilon-greedy bandit choosing the mutation rate
pub mod bandit;
/// Genetic operators and the generation loop
pub mod evolution;
/// Constrained random construction of initial layouts
pub mod population;
