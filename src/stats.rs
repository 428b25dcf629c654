use nalgebra::Vector3;
use rand::{Rng, RngCore};

/// Direction distributions for synthetic steps
#[derive(Debug, Clone, PartialEq)]
pub enum AngularDistribution {
    Isotropic,
    Monodirectional { reference_uvw: [f64; 3] },
    /// Uniform in cos(theta) around +z, limited to `cos_theta >= mu_min`
    ForwardCone { mu_min: f64 },
}

impl AngularDistribution {
    /// Normalized fixed direction; `None` for a zero vector
    pub fn new_monodirectional(u: f64, v: f64, w: f64) -> Option<Self> {
        let mag = (u * u + v * v + w * w).sqrt();
        if mag == 0.0 || !mag.is_finite() {
            return None;
        }
        Some(Self::Monodirectional {
            reference_uvw: [u / mag, v / mag, w / mag],
        })
    }

    pub fn new_isotropic() -> Self {
        Self::Isotropic
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> Vector3<f64> {
        match self {
            AngularDistribution::Isotropic => polar_to_cartesian(2.0 * rng.gen::<f64>() - 1.0, rng),
            AngularDistribution::ForwardCone { mu_min } => {
                let lower = mu_min.clamp(-1.0, 1.0);
                let mu = lower + (1.0 - lower) * rng.gen::<f64>();
                polar_to_cartesian(mu, rng)
            }
            AngularDistribution::Monodirectional { reference_uvw } => {
                Vector3::new(reference_uvw[0], reference_uvw[1], reference_uvw[2])
            }
        }
    }
}

fn polar_to_cartesian(mu: f64, rng: &mut dyn RngCore) -> Vector3<f64> {
    let phi = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();
    Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), mu)
}
