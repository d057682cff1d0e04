use crate::templates::modifier::ModifierTrait;
use crate::templates::template::*;

macro_const! {
    const DOC: &str = r#"
Template composed with a list of geometric modifiers

Modifiers are stored in the order they are applied to the image. A query point is moved back
through the inverse of every modifier, last one first, before the underlying template is
evaluated.
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ModifiedTemplate {
    base: Box<Template>,
    modifiers: Vec<Modifier>,
}

impl ModifiedTemplate {
    /// Wrap `base` with `modifiers`
    ///
    /// If `base` is modified already, its underlying template is wrapped with its own modifiers
    /// followed by the new ones.
    pub fn new<I>(base: Template, modifiers: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        match base {
            Template::Modified(inner) => {
                let mut all = inner.modifiers;
                all.extend(modifiers);
                Self {
                    base: inner.base,
                    modifiers: all,
                }
            }
            base => Self {
                base: Box::new(base),
                modifiers: modifiers.into_iter().collect(),
            },
        }
    }

    pub fn base(&self) -> &Template {
        &self.base
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for ModifiedTemplate {
    fn default() -> Self {
        Self::new(
            super::gauss_disk::GaussDisk::default().into(),
            [Stretch::new(2.0).into(), Shift::new(0.5, -0.5).into()],
        )
    }
}

impl TemplateTrait for ModifiedTemplate {
    #[inline]
    fn intensity_point(&self, x: f64, y: f64) -> f64 {
        let (x, y) = self
            .modifiers
            .iter()
            .rev()
            .fold((x, y), |(x, y), modifier| modifier.apply_inverse(x, y));
        self.base.intensity_point(x, y)
    }

    fn radial_extent(&self) -> f64 {
        self.modifiers
            .iter()
            .fold(self.base.radial_extent(), |extent, modifier| {
                modifier.transform_extent(extent)
            })
    }
}
