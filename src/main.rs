use futures::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use iced::canvas::{self, event, Cache, Canvas, Cursor, Event, Frame, Geometry, Path, Stroke};
use iced::time;
use iced::{
    keyboard, mouse, Application, Clipboard, Color, Command, Container, Element,
    HorizontalAlignment, Length, Point, Rectangle, Settings, Size, Subscription,
    VerticalAlignment,
};

use digital_grid::animator::ParticleFieldAnimator;
use digital_grid::config::{Parameters, PARAMETERS_FILE};
use digital_grid::pacing::AnimationHandle;
use digital_grid::surface::{Primitive, Scene, SurfaceHost};

const WINDOW_SIZE: (u32, u32) = (1024, 768);

/// Concentric bands used to shade a particle's radial gradient.
const GLOW_BANDS: usize = 4;

#[derive(Clone, Debug)]
enum Message {
    Tick,
    TogglePlay,
    PointerMoved(Point),
    Resized(Size),
    ParametersLoaded(Parameters),
}

#[derive(Default)]
struct DigitalGrid {
    state: State,
}

fn load_parameters() -> impl Future<Output = Message> {
    Parameters::load(PARAMETERS_FILE).map(|result| match result {
        Ok(parameters) => {
            info!(file = PARAMETERS_FILE, "parameters loaded");
            Message::ParametersLoaded(parameters)
        }
        Err(e) => {
            warn!(file = PARAMETERS_FILE, error = %e, "using default parameters");
            Message::ParametersLoaded(Parameters::default())
        }
    })
}

fn window_event(event: iced_native::Event, _status: iced_native::event::Status) -> Option<Message> {
    match event {
        iced_native::Event::Window(iced_native::window::Event::Resized { width, height }) => {
            Some(Message::Resized(Size::new(width as f32, height as f32)))
        }
        _ => None,
    }
}

impl Application for DigitalGrid {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Flags = ();

    fn new(_flags: Self::Flags) -> (Self, Command<Message>) {
        (Self::default(), Command::perform(load_parameters(), |message| message))
    }

    fn title(&self) -> String {
        String::from("Digital Grid")
    }

    fn background_color(&self) -> Color {
        self.state.parameters.palette.background_color()
    }

    fn subscription(&self) -> Subscription<Message> {
        // resizes are tracked even while the animation is stopped
        let resizes = iced_native::subscription::events_with(window_event);

        if self.state.animator.is_some() && self.state.handle.is_running() {
            Subscription::batch(vec![
                resizes,
                time::every(self.state.parameters.frame_interval()).map(|_| Message::Tick),
            ])
        } else {
            resizes
        }
    }

    fn update(&mut self, message: Self::Message, _clipboard: &mut Clipboard) -> Command<Message> {
        match message {
            Message::Tick => {
                if let Some(animator) = self.state.animator.as_mut() {
                    let start = Instant::now();
                    animator.render_frame(&mut self.state.scene);
                    self.state.last_frame_duration = start.elapsed();
                    self.state.cache.clear();
                }
            }
            Message::TogglePlay => {
                self.state.handle.toggle();
            }
            Message::PointerMoved(position) => {
                if let Some(animator) = self.state.animator.as_mut() {
                    animator.add_ripple(position.x, position.y);
                }
            }
            Message::Resized(size) => {
                self.state.fit(size);
            }
            Message::ParametersLoaded(parameters) => {
                self.state.bind(parameters);
            }
        }
        Command::none()
    }

    fn view(&mut self) -> Element<Message> {
        Container::new(
            Canvas::new(&mut self.state)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

struct State {
    animator: Option<ParticleFieldAnimator>,
    parameters: Parameters,
    handle: AnimationHandle,
    viewport: Size,
    scene: Scene,
    last_frame_duration: Duration,
    cache: Cache,
}

impl Default for State {
    fn default() -> Self {
        Self {
            animator: None,
            parameters: Parameters::default(),
            handle: AnimationHandle::new(),
            viewport: Size::new(WINDOW_SIZE.0 as f32, WINDOW_SIZE.1 as f32),
            scene: Scene::default(),
            last_frame_duration: Duration::default(),
            cache: Cache::default(),
        }
    }
}

impl State {
    fn bind(&mut self, parameters: Parameters) {
        let mut rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.parameters = parameters;
        let animator = ParticleFieldAnimator::construct(&*self, self.parameters.clone(), &mut rng);
        self.animator = animator;
        if self.animator.is_none() {
            info!("no digital-grid canvas mounted, background disabled");
        }
        self.scene = Scene::default();
        self.cache.clear();
    }

    fn fit(&mut self, size: Size) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        if let Some(animator) = self.animator.as_mut() {
            animator.resize(size);
        }
    }
}

impl SurfaceHost for State {
    // the page mounts exactly the canvas its parameters name
    fn surface(&self, id: &str) -> Option<Size> {
        match &self.parameters.canvas {
            Some(canvas) if canvas == id => Some(self.viewport),
            _ => None,
        }
    }
}

impl canvas::Program<Message> for State {
    fn update(
        &mut self,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        self.fit(bounds.size());

        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_in(&bounds) {
                Some(position) => (event::Status::Ignored, Some(Message::PointerMoved(position))),
                None => (event::Status::Ignored, None),
            },
            Event::Keyboard(keyboard::Event::KeyPressed {
                key_code: keyboard::KeyCode::Space,
                ..
            }) => (event::Status::Captured, Some(Message::TogglePlay)),
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(&self, bounds: Rectangle, _cursor: Cursor) -> Vec<Geometry> {
        let scene_geometry = self.cache.draw(bounds.size(), |frame| {
            replay(&self.scene, frame);
        });

        if !self.parameters.show_stats {
            return vec![scene_geometry];
        }

        let overlay = {
            let mut frame = Frame::new(bounds.size());

            let (frames, particles, ripples, grid_offset) = match &self.animator {
                Some(animator) => (
                    animator.frame(),
                    animator.particles().len(),
                    animator.ripples().len(),
                    animator.grid_offset(),
                ),
                None => (0, 0, 0, 0.0),
            };

            frame.fill_text(canvas::Text {
                content: format! {
                    "frame = {}\nlast_frame_duration = {:?}\ngrid_offset = {:.1}\nParticle count: {}\nRipple count: {}",
                    frames,
                    self.last_frame_duration,
                    grid_offset,
                    particles,
                    ripples,
                },
                color: Color::WHITE,
                size: 14.0,
                position: Point::new(frame.width(), frame.height()),
                horizontal_alignment: HorizontalAlignment::Right,
                vertical_alignment: VerticalAlignment::Bottom,
                ..Default::default()
            });

            frame.into_geometry()
        };

        vec![scene_geometry, overlay]
    }
}

fn replay(scene: &Scene, frame: &mut Frame) {
    for primitive in scene.primitives() {
        match *primitive {
            // the cache hands out a blank frame already
            Primitive::Clear { .. } => {}
            Primitive::Line {
                from,
                to,
                color,
                width,
            } => {
                frame.stroke(
                    &Path::line(from, to),
                    Stroke {
                        color,
                        width,
                        ..Stroke::default()
                    },
                );
            }
            Primitive::Glow {
                center,
                radius,
                falloff,
                color,
            } => {
                for band in (1..=GLOW_BANDS).rev() {
                    let r = radius * band as f32 / GLOW_BANDS as f32;
                    let a = color.a * (1.0 - r / falloff);
                    frame.fill(&Path::circle(center, r), Color { a, ..color });
                }
            }
            Primitive::Ring {
                center,
                radius,
                color,
                width,
            } => {
                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke {
                        color,
                        width,
                        ..Stroke::default()
                    },
                );
            }
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting digital grid");

    DigitalGrid::run(Settings {
        antialiasing: true,
        window: iced::window::Settings {
            size: WINDOW_SIZE,
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_state() -> State {
        let mut state = State::default();
        state.bind(Parameters {
            seed: Some(3),
            ..Parameters::default()
        });
        state
    }

    #[test]
    fn window_resize_becomes_message() {
        let event = iced_native::Event::Window(iced_native::window::Event::Resized {
            width: 640,
            height: 480,
        });
        match window_event(event, iced_native::event::Status::Ignored) {
            Some(Message::Resized(size)) => assert_eq!(size, Size::new(640.0, 480.0)),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn non_resize_events_are_ignored() {
        let event = iced_native::Event::Mouse(iced_native::mouse::Event::CursorEntered);
        assert!(window_event(event, iced_native::event::Status::Ignored).is_none());
    }

    #[test]
    fn resize_reaches_animator_without_pointer_input() {
        let mut state = bound_state();
        assert_eq!(
            state.animator.as_ref().map(|a| a.size()),
            Some(Size::new(WINDOW_SIZE.0 as f32, WINDOW_SIZE.1 as f32))
        );

        state.fit(Size::new(1600.0, 900.0));
        assert_eq!(state.viewport, Size::new(1600.0, 900.0));
        let animator = state.animator.as_mut().unwrap();
        assert_eq!(animator.size(), Size::new(1600.0, 900.0));

        let mut scene = Scene::default();
        animator.render_frame(&mut scene);
        let bottom = scene.lines().map(|(_, to, _)| to.y).fold(0.0f32, f32::max);
        assert_eq!(bottom, 900.0);
    }

    #[test]
    fn disabled_canvas_leaves_state_unbound() {
        let mut state = State::default();
        state.bind(Parameters {
            canvas: None,
            ..Parameters::default()
        });
        assert!(state.animator.is_none());
        state.fit(Size::new(10.0, 10.0));
        assert_eq!(state.viewport, Size::new(10.0, 10.0));
    }
}
