mod bandit;
mod population;
