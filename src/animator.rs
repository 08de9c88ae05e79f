use iced::{Point, Size};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::{Palette, Parameters, CANVAS_ID};
use crate::field::{GridOffset, Particle, Particles, Ripple};
use crate::surface::{Surface, SurfaceHost};

/// A line between particles `i < j` closer than the link distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub i: usize,
    pub j: usize,
    /// `1 - distance / link_distance`, always in `(0, 1]`.
    pub alpha: f32,
}

/// Particles, grid and ripples of the animated background.
///
/// Everything is advanced and drawn by [`render_frame`], once per display
/// frame. Linking particles is a full pairwise scan, so a frame costs
/// O(n²) in the particle count; fine for the hundred or so particles a
/// background uses, not meant to scale beyond that.
///
/// [`render_frame`]: ParticleFieldAnimator::render_frame
#[derive(Clone, Debug)]
pub struct ParticleFieldAnimator {
    size: Size,
    particles: Particles,
    ripples: Vec<Ripple>,
    grid_offset: GridOffset,
    parameters: Parameters,
    frame: u64,
}

impl ParticleFieldAnimator {
    /// Binds to the `digital-grid` surface of `host` and scatters the
    /// particles over it. Returns `None` when the host has no such surface
    /// or the parameters do not validate.
    pub fn construct<R: Rng>(
        host: &impl SurfaceHost,
        parameters: Parameters,
        rng: &mut R,
    ) -> Option<Self> {
        let size = host.surface(CANVAS_ID)?;
        if let Err(e) = parameters.validate() {
            warn!(error = %e, "digital grid not bound");
            return None;
        }

        let particles = (0..parameters.particle_count)
            .map(|_| Particle {
                x: rng.gen::<f32>() * size.width,
                y: rng.gen::<f32>() * size.height,
                vx: (rng.gen::<f32>() - 0.5) * 2.0 * parameters.max_speed,
                vy: (rng.gen::<f32>() - 0.5) * 2.0 * parameters.max_speed,
                radius: rng.gen::<f32>() * (parameters.max_radius - parameters.min_radius)
                    + parameters.min_radius,
            })
            .collect();

        debug!(
            width = size.width,
            height = size.height,
            particles = parameters.particle_count,
            "digital grid bound"
        );

        Some(Self::with_particles(size, parameters, particles))
    }

    pub fn with_particles(size: Size, parameters: Parameters, particles: Particles) -> Self {
        Self {
            size,
            particles,
            ripples: Vec::new(),
            grid_offset: GridOffset::new(parameters.grid_step, parameters.grid_size),
            parameters,
            frame: 0,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn grid_offset(&self) -> f32 {
        self.grid_offset.value()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Adopts the new viewport size. Particles are left where they are and
    /// get wrapped on their next move.
    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            debug!(width = size.width, height = size.height, "digital grid resized");
        }
        self.size = size;
    }

    pub fn add_ripple(&mut self, x: f32, y: f32) {
        self.ripples
            .push(Ripple::new(x, y, self.parameters.ripple_max_radius));
    }

    pub fn advance_grid_offset(&mut self) {
        self.grid_offset.advance();
    }

    pub fn update_particles(&mut self) {
        let Size { width, height } = self.size;
        for particle in self.particles.iter_mut() {
            particle.advance(width, height);
        }
    }

    /// Pairs to connect this frame, ordered by `i` then `j`.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.parameters.link_distance;
        let particles = &self.particles;

        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(k, b)| {
                    let dx = a.x - b.x;
                    let dy = a.y - b.y;
                    let distance = (dx * dx + dy * dy).sqrt();
                    if distance < threshold {
                        Some(Link {
                            i,
                            j: i + 1 + k,
                            alpha: 1.0 - distance / threshold,
                        })
                    } else {
                        None
                    }
                })
        })
    }

    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.size);

        self.advance_grid_offset();
        self.draw_grid(surface);

        self.update_particles();
        self.draw_particles(surface);
        self.draw_links(surface);

        self.draw_ripples(surface);

        self.frame += 1;
        trace!(
            frame = self.frame,
            ripples = self.ripples.len(),
            "frame rendered"
        );
    }

    fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let palette = &self.parameters.palette;
        let color = Palette::color(palette.grid, palette.grid_alpha);
        let cell = self.grid_offset.cell();
        let offset = self.grid_offset.value();
        let Size { width, height } = self.size;

        // a non-positive cell or unbounded canvas would never finish the sweep
        if !(cell > 0.0) || !width.is_finite() || !height.is_finite() {
            return;
        }

        let mut x = 0.0;
        while x < width {
            surface.line(
                Point::new(x + offset, 0.0),
                Point::new(x + offset, height),
                color,
                palette.grid_width,
            );
            x += cell;
        }

        let mut y = 0.0;
        while y < height {
            surface.line(
                Point::new(0.0, y + offset),
                Point::new(width, y + offset),
                color,
                palette.grid_width,
            );
            y += cell;
        }
    }

    fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color = Palette::color(self.parameters.palette.particle, 1.0);
        for particle in self.particles.iter() {
            surface.glow(
                particle.position(),
                particle.radius,
                particle.radius * 2.0,
                color,
            );
        }
    }

    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        let palette = &self.parameters.palette;
        for link in self.links() {
            let color = Palette::color(palette.link, palette.link_alpha * link.alpha);
            surface.line(
                self.particles[link.i].position(),
                self.particles[link.j].position(),
                color,
                1.0,
            );
        }
    }

    fn draw_ripples<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let growth = self.parameters.ripple_growth;
        let palette = &self.parameters.palette;

        self.ripples.retain_mut(|ripple| {
            if ripple.grow(growth) {
                surface.ring(
                    ripple.center(),
                    ripple.radius,
                    Palette::color(palette.ripple, ripple.alpha),
                    palette.ripple_width,
                );
                true
            } else {
                false
            }
        });
    }
}
