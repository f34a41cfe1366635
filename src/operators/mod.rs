pub use crossover::{
    Crossover, CrossoverChildren, SimulatedBinaryCrossover, SimulatedBinaryCrossoverArgs,
};
pub use mutation::{BoundedPolynomialMutation, Mutation};
pub use selection::{NichingTournamentSelector, Selector};

mod crossover;
mod mutation;
mod selection;
