pub mod menus;
pub mod rng;
pub mod runner;
pub mod state;
pub mod system;
pub mod turn;

#[cfg(test)]
mod tests;
