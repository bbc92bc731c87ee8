//! The prediction algorithms. Each one is a pure function of the fixture.

mod attack_defense;
mod elo;
mod ensemble;
mod form;
mod poisson;
pub mod random_forest;
pub mod seasonal;

pub use attack_defense::predict_attack_defense;
pub use elo::predict_elo;
pub use ensemble::{ENSEMBLE_MEMBERS, predict_ensemble};
pub use form::predict_default;
pub use poisson::predict_poisson;
pub use random_forest::predict_random_forest;
pub use seasonal::predict_seasonal;
