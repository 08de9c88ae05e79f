use iced::Point;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

pub type Particles = Vec<Particle>;

impl Particle {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// One Euler step followed by toroidal wrap on both axes.
    pub fn advance(&mut self, width: f32, height: f32) {
        self.x = wrap(self.x + self.vx, width);
        self.y = wrap(self.y + self.vy, height);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
}

impl Ripple {
    pub fn new(x: f32, y: f32, max_radius: f32) -> Self {
        Ripple {
            x,
            y,
            radius: 0.0,
            max_radius,
            alpha: 1.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Grows the ripple and returns whether it is still alive.
    pub fn grow(&mut self, growth: f32) -> bool {
        self.radius += growth;
        self.alpha = 1.0 - self.radius / self.max_radius;
        self.radius < self.max_radius
    }
}

/// Scroll phase of the background grid, always in `[0, cell)`.
///
/// The phase is kept as a tick count so that the wrap happens on the exact
/// frame the offset reaches the cell size, without float drift.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOffset {
    ticks: u32,
    step: f32,
    cell: f32,
}

impl GridOffset {
    pub fn new(step: f32, cell: f32) -> Self {
        GridOffset {
            ticks: 0,
            step,
            cell,
        }
    }

    pub fn value(&self) -> f32 {
        self.ticks as f32 * self.step
    }

    pub fn cell(&self) -> f32 {
        self.cell
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
        if self.value() >= self.cell {
            self.ticks = 0;
        }
    }
}

/// Maps `v` back into `[0, max)` after a step that moved it past an edge.
///
/// Below zero wraps to the far side, at or past `max` resets to zero. A
/// degenerate `max` (zero-sized canvas) pins the coordinate at zero.
pub fn wrap(v: f32, max: f32) -> f32 {
    if v < 0.0 {
        let wrapped = v + max;
        if wrapped >= 0.0 && wrapped < max {
            wrapped
        } else {
            0.0
        }
    } else if v >= max {
        0.0
    } else {
        v
    }
}
