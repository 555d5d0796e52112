pub mod envelope;
pub mod normalize;
pub mod profile_analyzer;
pub mod spectrum;
pub mod spline;
pub mod utils;

pub use envelope::lower_envelope;
pub use normalize::normalize;
pub use profile_analyzer::{curve_profile, curve_profile_with, ProfileAnalyzer};
pub use spectrum::{Spectrum, SpectrumAnalyzer};
pub use spline::QuadraticSpline;
