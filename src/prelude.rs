pub use crate::divergence::DivergenceTrait;
pub use crate::fit::{MinimizerTrait, SpaceTransformTrait, TemplateFamily};
pub use crate::templates::{ModifierTrait, TemplateTrait};
