use crate::templates::position_angle;
use crate::templates::template::*;

use std::f64::consts::{PI, TAU};

/// Phase of the outer arm end, the arm has unit radius there
const ANCHOR_PHASE: f64 = 10.0 * PI;

/// Unit curvature is clamped into `[KAPPA_MIN, 1 - KAPPA_MIN]` on evaluation
pub const KAPPA_MIN: f64 = 1e-6;

macro_const! {
    const DOC: &str = r#"
One-armed logarithmic spiral of finite angular extent

The arm centre line is $r(\theta) = a \exp(k \theta)$ with $k = \sqrt{1 - \kappa^2} / \kappa$,
where $\kappa \in (0, 1)$ is the unit curvature. The scale $a$ is chosen so that the arm has unit
radius at the phase $\theta_0 = 10\pi$ where it ends. For a point at radius $r$ and position angle
$\alpha$ the nearest arm crossing along the radius is found from the fractional winding number
$$
n = \frac{\ln(r / a) / k - \alpha}{2\pi}
$$
by comparing the two neighbouring integer windings. The intensity is
$$
I = \exp\left(-\frac{d^2}{2\sigma^2} - \frac{\delta\theta^2}{2(\delta\phi/2)^2}\right),
$$
where $d$ is the radial distance to the arm, $\delta\theta$ is the phase distance from the arm
end and $\delta\phi$ is the angular extent of the arm.

- Shape parameters: **3**
- Radial extent: $\exp(\kappa \delta\phi)$
"#;
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(into = "LogSpiralParameters", from = "LogSpiralParameters")]
pub struct LogSpiral {
    kappa: f64,
    sigma: f64,
    delta_phi: f64,
    pitch: f64,
}

impl LogSpiral {
    /// New spiral with unit curvature `kappa`, arm thickness `sigma` and angular extent
    /// `delta_phi`
    ///
    /// `kappa` is not validated, see [KAPPA_MIN] for the evaluated range.
    pub fn new(kappa: f64, sigma: f64, delta_phi: f64) -> Self {
        let kappa_clamped = kappa.clamp(KAPPA_MIN, 1.0 - KAPPA_MIN);
        let pitch = f64::sqrt(1.0 - kappa_clamped * kappa_clamped) / kappa_clamped;
        Self {
            kappa,
            sigma,
            delta_phi,
            pitch,
        }
    }

    /// Spiral with its arm end at radius `r0`, rotated by `xi` and centred at `(x0, y0)`
    ///
    /// `sigma` is the arm thickness in the image units.
    pub fn modified(
        r0: f64,
        kappa: f64,
        sigma: f64,
        delta_phi: f64,
        xi: f64,
        x0: f64,
        y0: f64,
    ) -> Template {
        Template::from(Self::new(kappa, sigma / r0, delta_phi)).modify([
            Stretch::new(r0).into(),
            Rotate::new(xi).into(),
            Shift::new(x0, y0).into(),
        ])
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn delta_phi(&self) -> f64 {
        self.delta_phi
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    /// Arm radius at position angle `alpha` after `n` windings
    #[inline]
    fn arm_radius(&self, alpha: f64, n: f64) -> f64 {
        f64::exp(self.pitch * (alpha + n * TAU - ANCHOR_PHASE))
    }
}

impl Default for LogSpiral {
    fn default() -> Self {
        Self::new(0.3, 0.1, 3.0)
    }
}

impl TemplateTrait for LogSpiral {
    fn intensity_point(&self, x: f64, y: f64) -> f64 {
        let r = x.hypot(y);
        let alpha = position_angle(x, y);

        // ln(r / a) with a = exp(-k 10pi) kept in log space
        let ln_r_a = r.ln() + self.pitch * ANCHOR_PHASE;
        let n = (ln_r_a / self.pitch - alpha) / TAU;

        let n_ceil = n.ceil();
        let n_floor = n.floor();
        let dist_ceil = (self.arm_radius(alpha, n_ceil) - r).abs();
        let dist_floor = (self.arm_radius(alpha, n_floor) - r).abs();
        let (nn, dist) = if dist_ceil < dist_floor {
            (n_ceil, dist_ceil)
        } else {
            (n_floor, dist_floor)
        };

        let dtheta = ANCHOR_PHASE - (alpha + nn * TAU);
        let half_width = 0.5 * self.delta_phi;
        f64::exp(
            -0.5 * dist * dist / (self.sigma * self.sigma)
                - 0.5 * dtheta * dtheta / (half_width * half_width),
        )
    }

    fn radial_extent(&self) -> f64 {
        f64::exp(self.kappa * self.delta_phi)
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "LogSpiral")]
struct LogSpiralParameters {
    kappa: f64,
    sigma: f64,
    delta_phi: f64,
}

impl From<LogSpiral> for LogSpiralParameters {
    fn from(s: LogSpiral) -> Self {
        Self {
            kappa: s.kappa,
            sigma: s.sigma,
            delta_phi: s.delta_phi,
        }
    }
}

impl From<LogSpiralParameters> for LogSpiral {
    fn from(p: LogSpiralParameters) -> Self {
        Self::new(p.kappa, p.sigma, p.delta_phi)
    }
}
