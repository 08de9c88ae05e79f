#![cfg(test)]
use crate::animator::ParticleFieldAnimator;
use crate::config::Parameters;
use crate::field::{GridOffset, Particle};
use crate::surface::Scene;
use iced::Size;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn canvas() -> impl Strategy<Value = (f32, f32)> {
    (1.0f32..2000.0, 1.0f32..2000.0)
}

fn particles(width: f32, height: f32) -> impl Strategy<Value = Vec<Particle>> {
    proptest::collection::vec(
        (
            0.0..width,
            0.0..height,
            -10.0f32..10.0,
            -10.0f32..10.0,
            1.0f32..3.0,
        )
            .prop_map(|(x, y, vx, vy, radius)| Particle {
                x,
                y,
                vx,
                vy,
                radius,
            }),
        0..40,
    )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn particles_stay_on_canvas(
        (width, height, field) in canvas().prop_flat_map(|(w, h)| (Just(w), Just(h), particles(w, h))),
        steps in 1usize..200,
    ) {
        let count = field.len();
        let mut animator = ParticleFieldAnimator::with_particles(
            Size::new(width, height),
            Parameters::default(),
            field,
        );
        for _ in 0..steps {
            animator.update_particles();
            prop_assert_eq!(animator.particles().len(), count);
            for p in animator.particles() {
                prop_assert!(p.x >= 0.0 && p.x < width, "x = {} width = {}", p.x, width);
                prop_assert!(p.y >= 0.0 && p.y < height, "y = {} height = {}", p.y, height);
            }
        }
    }

    #[test]
    fn particles_return_on_canvas_after_shrink(
        field in particles(1000.0, 1000.0),
        (width, height) in canvas(),
    ) {
        let mut animator = ParticleFieldAnimator::with_particles(
            Size::new(1000.0, 1000.0),
            Parameters::default(),
            field,
        );
        animator.resize(Size::new(width, height));
        animator.update_particles();
        for p in animator.particles() {
            prop_assert!(p.x >= 0.0 && p.x < width);
            prop_assert!(p.y >= 0.0 && p.y < height);
        }
    }

    #[test]
    fn link_alpha_matches_distance(
        ax in 0.0f32..400.0, ay in 0.0f32..400.0,
        bx in 0.0f32..400.0, by in 0.0f32..400.0,
    ) {
        let animator = ParticleFieldAnimator::with_particles(
            Size::new(400.0, 400.0),
            Parameters::default(),
            vec![
                Particle { x: ax, y: ay, radius: 1.0, ..Default::default() },
                Particle { x: bx, y: by, radius: 1.0, ..Default::default() },
            ],
        );
        let (dx, dy) = (ax - bx, ay - by);
        let distance = (dx * dx + dy * dy).sqrt();
        let links: Vec<_> = animator.links().collect();

        if distance < 150.0 {
            prop_assert_eq!(links.len(), 1);
            prop_assert_eq!((links[0].i, links[0].j), (0, 1));
            prop_assert!((links[0].alpha - (1.0 - distance / 150.0)).abs() < 1e-5);
            prop_assert!(links[0].alpha > 0.0 && links[0].alpha <= 1.0);
        } else {
            prop_assert!(links.is_empty());
        }
    }

    #[test]
    fn links_are_sorted_pairs(field in particles(300.0, 300.0)) {
        let animator = ParticleFieldAnimator::with_particles(
            Size::new(300.0, 300.0),
            Parameters::default(),
            field,
        );
        let pairs: Vec<_> = animator.links().map(|l| (l.i, l.j)).collect();
        prop_assert!(pairs.iter().all(|(i, j)| i < j));
        prop_assert!(pairs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ripple_removed_once_max_radius_reached(
        growth in 1u32..=20,
        max_radius in 10u32..=200,
    ) {
        let parameters = Parameters {
            ripple_growth: growth as f32,
            ripple_max_radius: max_radius as f32,
            ..Parameters::default()
        };
        let mut animator = ParticleFieldAnimator::with_particles(
            Size::new(100.0, 100.0),
            parameters,
            Vec::new(),
        );
        let mut scene = Scene::default();
        animator.add_ripple(50.0, 50.0);

        let lifetime = (max_radius + growth - 1) / growth;
        for _ in 1..lifetime {
            animator.render_frame(&mut scene);
            prop_assert_eq!(animator.ripples().len(), 1);
        }
        animator.render_frame(&mut scene);
        prop_assert!(animator.ripples().is_empty());
    }

    #[test]
    fn grid_offset_stays_in_cell(
        step in 0.05f32..5.0,
        cell in 10.0f32..100.0,
        frames in 0usize..2000,
    ) {
        let mut offset = GridOffset::new(step, cell);
        for _ in 0..frames {
            offset.advance();
            prop_assert!(offset.value() >= 0.0 && offset.value() < cell);
        }
    }
}
