mod joint;
pub use joint::JointPrior;

mod uniform;
pub use uniform::UniformPrior;
