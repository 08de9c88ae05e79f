use iced::{Color, Point, Size};

/// Immediate-mode 2D drawing target the animation renders into.
pub trait Surface {
    fn clear(&mut self, size: Size);

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Filled disc of `radius` shaded by a radial gradient going from
    /// `color` at the center to transparent at `falloff`.
    fn glow(&mut self, center: Point, radius: f32, falloff: f32, color: Color);

    fn ring(&mut self, center: Point, radius: f32, color: Color, width: f32);
}

/// Looks up drawing surfaces by name and reports their current size.
pub trait SurfaceHost {
    fn surface(&self, id: &str) -> Option<Size>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Clear {
        size: Size,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Glow {
        center: Point,
        radius: f32,
        falloff: f32,
        color: Color,
    },
    Ring {
        center: Point,
        radius: f32,
        color: Color,
        width: f32,
    },
}

/// Recorded primitives of the last rendered frame, replayed by the canvas.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Line {
                from, to, color, ..
            } => Some((from, to, color)),
            _ => None,
        })
    }

    pub fn rings(&self) -> impl Iterator<Item = (Point, f32, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Ring {
                center,
                radius,
                color,
                ..
            } => Some((center, radius, color)),
            _ => None,
        })
    }

    pub fn glows(&self) -> impl Iterator<Item = (Point, f32, f32)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Glow {
                center,
                radius,
                falloff,
                ..
            } => Some((center, radius, falloff)),
            _ => None,
        })
    }
}

impl Surface for Scene {
    // a clear drops everything recorded before it
    fn clear(&mut self, size: Size) {
        self.primitives.clear();
        self.primitives.push(Primitive::Clear { size });
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn glow(&mut self, center: Point, radius: f32, falloff: f32, color: Color) {
        self.primitives.push(Primitive::Glow {
            center,
            radius,
            falloff,
            color,
        });
    }

    fn ring(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.primitives.push(Primitive::Ring {
            center,
            radius,
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_discards_previous_frame() {
        let mut scene = Scene::default();
        scene.line(Point::ORIGIN, Point::new(1.0, 1.0), Color::WHITE, 1.0);
        scene.ring(Point::ORIGIN, 3.0, Color::WHITE, 2.0);
        scene.clear(Size::new(10.0, 10.0));
        assert_eq!(
            scene.primitives(),
            &[Primitive::Clear {
                size: Size::new(10.0, 10.0)
            }]
        );
        assert_eq!(scene.lines().count(), 0);
    }
}
