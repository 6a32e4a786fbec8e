//! `PathAnimator`: moves a point along a spline path, one tick at a time

use crate::arc_length::ArcLengthTable;
use crate::attachment::{Attachment, SharedMovable};
use crate::config::{AnimatorConfig, TraversalMode};
use crate::debug::{sample_markers, DebugMarker, MarkerSink};
use crate::events::{ListenerId, PathEvent, PathListeners};
use crate::orientation::{look_ahead, Facing};
use crate::traversal::{Boundary, PlaybackState, Traversal, TraversalState};
use glide_core::{CatmullRomPath, Color, GlideError, Result, Vec3};
use std::sync::Arc;

/// Output of the most recent applied tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFrame {
    pub parameter: f64,
    pub position: Vec3,
    /// Present when `orient_to_direction` is enabled
    pub facing: Option<Facing>,
}

/// Animates a position along a Catmull-Rom path.
///
/// The arc-length table is built once at construction. After `play()`, every
/// `update(dt)` advances the traversal, evaluates the path, and (if attached)
/// pushes the result into the bound entity.
pub struct PathAnimator {
    path: CatmullRomPath,
    table: Arc<ArcLengthTable>,
    config: AnimatorConfig,
    traversal: Traversal,
    frame: Option<PathFrame>,
    attachment: Option<Attachment>,
    listeners: PathListeners,
}

impl PathAnimator {
    /// Build an animator over `points`, constructing its own arc-length table.
    pub fn new(points: Vec<Vec3>, config: AnimatorConfig) -> Result<Self> {
        config.validate()?;
        let path = CatmullRomPath::new(points)?;
        let table = Arc::new(ArcLengthTable::build(&path, config.arc_length_segments)?);
        Ok(Self::assemble(path, table, config))
    }

    /// Build an animator that shares an existing table for the same geometry.
    ///
    /// The table must have been built from `path` at
    /// `config.arc_length_segments` resolution.
    pub fn with_table(
        path: CatmullRomPath,
        table: Arc<ArcLengthTable>,
        config: AnimatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        if !table.matches(&path, config.arc_length_segments) {
            return Err(GlideError::InvalidConfig(format!(
                "arc-length table {} was not built from this path at {} segments",
                table.source(),
                config.arc_length_segments
            )));
        }
        Ok(Self::assemble(path, table, config))
    }

    fn assemble(path: CatmullRomPath, table: Arc<ArcLengthTable>, config: AnimatorConfig) -> Self {
        Self {
            traversal: Traversal::new(&config),
            path,
            table,
            config,
            frame: None,
            attachment: None,
            listeners: PathListeners::new(),
        }
    }

    /// Bind an entity that receives position (and facing) on every tick.
    pub fn attach_to(mut self, entity: SharedMovable) -> Self {
        self.attachment = Some(Attachment::new(entity, self.config.orient_to_direction));
        self
    }

    pub fn detach(&mut self) -> Option<SharedMovable> {
        self.attachment.take().map(|a| a.target().clone())
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    // -- Playback control --

    /// Start from the beginning, whatever the current state.
    pub fn play(&mut self) {
        self.traversal.play();
        self.frame = None;
        self.listeners.emit(PathEvent::Started);
    }

    pub fn pause(&mut self) {
        if self.traversal.pause() {
            self.listeners.emit(PathEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.traversal.resume() {
            self.listeners.emit(PathEvent::Resumed);
        }
    }

    /// Return to idle at the start of the path without playing.
    pub fn reset(&mut self) {
        self.traversal.reset();
        self.frame = None;
        self.listeners.emit(PathEvent::Reset);
    }

    /// Advance by `dt` seconds and return the new position.
    ///
    /// Returns `None`, changing nothing, while idle, paused, or complete.
    pub fn update(&mut self, dt: f64) -> Option<Vec3> {
        let step = self.traversal.advance(dt, &self.table)?;

        let position = self.path.point_at(step.parameter);
        let facing = self.config.orient_to_direction.then(|| {
            look_ahead(
                &self.path,
                position,
                step.parameter,
                self.config.look_ahead_distance,
            )
        });

        if let Some(attachment) = &self.attachment {
            attachment.apply(position, facing.as_ref());
        }

        self.frame = Some(PathFrame {
            parameter: step.parameter,
            position,
            facing,
        });

        match step.boundary {
            Boundary::Inside => {}
            Boundary::Wrapped { laps } => self.listeners.emit(PathEvent::Looped { laps }),
            Boundary::Completed => self.listeners.emit(PathEvent::Completed),
        }

        Some(position)
    }

    /// Override the distance-mode speed between ticks.
    pub fn set_speed(&mut self, speed: f64) {
        self.traversal.set_speed(speed);
    }

    pub fn speed(&self) -> f64 {
        self.traversal.speed()
    }

    // -- Queries --

    /// Evaluate the path at `t` (clamped into `[0, 1]`). Always available.
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.path.point_at(t)
    }

    /// Current position: last tick's output, or the path start before any tick.
    pub fn position(&self) -> Vec3 {
        match &self.frame {
            Some(frame) => frame.position,
            None => self.path.point_at(self.traversal.playback().progress),
        }
    }

    pub fn frame(&self) -> Option<&PathFrame> {
        self.frame.as_ref()
    }

    pub fn facing(&self) -> Option<&Facing> {
        self.frame.as_ref().and_then(|f| f.facing.as_ref())
    }

    pub fn state(&self) -> TraversalState {
        self.traversal.state()
    }

    pub fn playback(&self) -> &PlaybackState {
        self.traversal.playback()
    }

    pub fn progress(&self) -> f64 {
        self.playback().progress
    }

    pub fn distance_traveled(&self) -> f64 {
        self.playback().distance_traveled
    }

    pub fn is_playing(&self) -> bool {
        self.playback().is_playing
    }

    pub fn is_complete(&self) -> bool {
        self.playback().is_complete
    }

    pub fn mode(&self) -> TraversalMode {
        self.config.mode
    }

    pub fn total_length(&self) -> f64 {
        self.table.total_length()
    }

    pub fn table(&self) -> &Arc<ArcLengthTable> {
        &self.table
    }

    pub fn path(&self) -> &CatmullRomPath {
        &self.path
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    // -- Events --

    /// Register a listener for every playback event.
    pub fn subscribe(&mut self, listener: impl FnMut(&PathEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn on_complete(&mut self, mut listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners
            .subscribe_filtered(|e| matches!(e, PathEvent::Completed), move |_| listener())
    }

    pub fn on_loop(&mut self, mut listener: impl FnMut(u32) + 'static) -> ListenerId {
        self.listeners.subscribe_filtered(
            |e| matches!(e, PathEvent::Looped { .. }),
            move |e| {
                if let PathEvent::Looped { laps } = e {
                    listener(*laps);
                }
            },
        )
    }

    pub fn on_reset(&mut self, mut listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners
            .subscribe_filtered(|e| matches!(e, PathEvent::Reset), move |_| listener())
    }

    // -- Debug --

    /// `count` markers at uniformly spaced parameters along the path.
    pub fn debug_markers(&self, count: usize, size: f32, color: Color) -> Vec<DebugMarker> {
        sample_markers(&self.path, count, size, color)
    }

    /// Push debug markers into a sink.
    pub fn visualize(&self, sink: &mut dyn MarkerSink, count: usize, size: f32, color: Color) {
        for marker in self.debug_markers(count, size, color) {
            sink.add_marker(marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::Transform;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collinear() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ]
    }

    fn course() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 1.0),
            Vec3::new(5.0, 1.0, 4.0),
            Vec3::new(2.0, 0.5, 7.0),
            Vec3::new(-1.0, 0.0, 5.0),
        ]
    }

    #[test]
    fn too_few_points_is_invalid_configuration() {
        let result = PathAnimator::new(vec![Vec3::ZERO], AnimatorConfig::default());
        assert!(matches!(
            result,
            Err(GlideError::TooFewControlPoints { got: 1 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnimatorConfig::default()
            .with_mode(TraversalMode::Time)
            .with_duration(0.0);
        assert!(PathAnimator::new(collinear(), config).is_err());
    }

    #[test]
    fn point_at_hits_endpoints_exactly() {
        let anim = PathAnimator::new(course(), AnimatorConfig::default()).unwrap();
        assert_eq!(anim.point_at(0.0), course()[0]);
        assert_eq!(anim.point_at(1.0), course()[4]);
        assert_eq!(anim.point_at(-1.0), course()[0]);
        assert_eq!(anim.point_at(2.0), course()[4]);
    }

    #[test]
    fn train_mode_moves_at_requested_distance() {
        // Straight line, speed 1, one update of 1.5s from a fresh play()
        let mut anim = PathAnimator::new(collinear(), AnimatorConfig::default()).unwrap();
        assert!((anim.total_length() - 3.0).abs() < 1e-3);

        anim.play();
        let pos = anim.update(1.5).unwrap();
        assert_eq!(anim.distance_traveled(), 1.5);
        assert!((pos.x - 1.5).abs() < 1e-3);
        assert!(pos.y.abs() < 1e-6);
        assert!(pos.z.abs() < 1e-6);
    }

    #[test]
    fn looping_train_wraps_two_full_lengths_to_start() {
        let config = AnimatorConfig::default().with_speed(3.0).with_looping(true);
        let mut anim = PathAnimator::new(collinear(), config).unwrap();
        anim.play();
        anim.update(2.0).unwrap();
        assert!(anim.distance_traveled().abs() < 1e-9);
        assert!(!anim.is_complete());
        assert!(anim.is_playing());
    }

    #[test]
    fn time_mode_completes_after_duration() {
        let config = AnimatorConfig::default()
            .with_mode(TraversalMode::Time)
            .with_duration(2.0);
        let mut anim = PathAnimator::new(collinear(), config).unwrap();
        anim.play();
        assert!(anim.update(1.0).is_some());
        let end = anim.update(1.0).unwrap();
        assert_eq!(anim.progress(), 1.0);
        assert!(anim.is_complete());
        assert_eq!(end, Vec3::new(3.0, 0.0, 0.0));

        assert!(anim.update(1.0).is_none());
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.position(), end);
    }

    #[test]
    fn constant_speed_along_a_curved_path() {
        let mut anim = PathAnimator::new(course(), AnimatorConfig::default().with_speed(2.0))
            .unwrap();
        anim.play();
        let mut prev = anim.update(0.0).unwrap();
        let dt = 0.05;
        while let Some(pos) = anim.update(dt) {
            if anim.is_complete() {
                break;
            }
            let step = prev.distance(&pos);
            // Chord is at most the arc travelled and close to it at this scale
            assert!(step <= 2.0 * dt + 1e-3, "step {}", step);
            assert!(step > 2.0 * dt * 0.9, "step {}", step);
            prev = pos;
        }
        assert!(anim.is_complete());
    }

    #[test]
    fn complete_is_terminal_until_play() {
        let mut anim = PathAnimator::new(course(), AnimatorConfig::default().with_speed(100.0))
            .unwrap();
        anim.play();
        let end = anim.update(1.0).unwrap();
        assert_eq!(end, course()[4]);
        assert_eq!(anim.state(), TraversalState::Complete);

        anim.resume();
        assert!(anim.update(1.0).is_none());

        anim.play();
        assert_eq!(anim.state(), TraversalState::Playing);
        assert_eq!(anim.distance_traveled(), 0.0);
        assert!(!anim.is_complete());
    }

    #[test]
    fn update_while_idle_or_paused_returns_none() {
        let mut anim = PathAnimator::new(course(), AnimatorConfig::default()).unwrap();
        assert!(anim.update(0.1).is_none());
        assert_eq!(anim.position(), course()[0]);

        anim.play();
        anim.update(0.5);
        let held = anim.position();
        anim.pause();
        assert!(anim.update(0.5).is_none());
        assert_eq!(anim.position(), held);
        anim.resume();
        assert!(anim.update(0.5).is_some());
    }

    #[test]
    fn reset_goes_idle_at_start() {
        let mut anim = PathAnimator::new(course(), AnimatorConfig::default()).unwrap();
        anim.play();
        anim.update(1.0);
        anim.reset();
        assert_eq!(anim.state(), TraversalState::Idle);
        assert_eq!(anim.position(), course()[0]);
        assert!(anim.frame().is_none());
        assert!(anim.update(1.0).is_none());
    }

    #[test]
    fn live_speed_override() {
        let mut anim = PathAnimator::new(course(), AnimatorConfig::default()).unwrap();
        anim.play();
        anim.update(0.5);
        anim.set_speed(3.0);
        anim.update(0.5);
        assert_eq!(anim.distance_traveled(), 0.5 + 1.5);
        assert_eq!(anim.speed(), 3.0);
        assert_eq!(anim.config().speed, 1.0);
    }

    #[test]
    fn look_ahead_parameter_is_offset_and_capped() {
        let config = AnimatorConfig::default().with_speed(0.7).with_look_ahead(0.05);
        let mut anim = PathAnimator::new(course(), config).unwrap();
        anim.play();
        while anim.update(0.1).is_some() {
            let frame = *anim.frame().unwrap();
            let facing = frame.facing.unwrap();
            assert_eq!(facing.target_parameter, (frame.parameter + 0.05).min(1.0));
            assert!(facing.target_parameter <= 1.0);
        }
    }

    #[test]
    fn orientation_disabled_yields_no_facing() {
        let config = AnimatorConfig::default().with_orientation(false);
        let mut anim = PathAnimator::new(course(), config).unwrap();
        anim.play();
        anim.update(0.2);
        assert!(anim.frame().is_some());
        assert!(anim.facing().is_none());
    }

    #[test]
    fn attached_transform_follows_the_path() {
        let transform = Rc::new(RefCell::new(Transform::default()));
        let mut anim = PathAnimator::new(collinear(), AnimatorConfig::default())
            .unwrap()
            .attach_to(transform.clone());
        assert!(anim.is_attached());

        anim.play();
        let pos = anim.update(1.0).unwrap();
        let t = *transform.borrow();
        assert_eq!(t.position, pos);
        assert!((t.forward() - Vec3::RIGHT).length() < 1e-3);

        assert!(anim.detach().is_some());
        anim.update(1.0);
        assert_eq!(transform.borrow().position, pos);
    }

    #[test]
    fn update_survives_a_borrowed_attachment() {
        let transform = Rc::new(RefCell::new(Transform::default()));
        let mut anim = PathAnimator::new(collinear(), AnimatorConfig::default())
            .unwrap()
            .attach_to(transform.clone());
        anim.play();

        let held = transform.borrow();
        let pos = anim.update(1.0).unwrap();
        drop(held);
        assert_eq!(transform.borrow().position, Vec3::ZERO);

        let next = anim.update(1.0).unwrap();
        assert!(next.x > pos.x);
        assert_eq!(transform.borrow().position, next);
    }

    #[test]
    fn events_follow_the_lifecycle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut anim = PathAnimator::new(collinear(), AnimatorConfig::default().with_speed(2.0))
            .unwrap();
        let l = log.clone();
        anim.subscribe(move |e| l.borrow_mut().push(*e));

        anim.pause(); // no-op while idle, no event
        anim.play();
        anim.update(0.5);
        anim.pause();
        anim.resume();
        anim.update(5.0);
        anim.reset();

        assert_eq!(
            *log.borrow(),
            vec![
                PathEvent::Started,
                PathEvent::Paused,
                PathEvent::Resumed,
                PathEvent::Completed,
                PathEvent::Reset,
            ]
        );
    }

    #[test]
    fn typed_registrations() {
        let laps = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(RefCell::new(0));
        let resets = Rc::new(RefCell::new(0));

        let config = AnimatorConfig::default().with_speed(3.0).with_looping(true);
        let mut anim = PathAnimator::new(collinear(), config).unwrap();
        let l = laps.clone();
        anim.on_loop(move |n| l.borrow_mut().push(n));
        let c = completions.clone();
        anim.on_complete(move || *c.borrow_mut() += 1);
        let r = resets.clone();
        let reset_id = anim.on_reset(move || *r.borrow_mut() += 1);

        anim.play();
        anim.update(0.5);
        anim.update(2.0);
        anim.reset();
        assert!(anim.unsubscribe(reset_id));
        anim.reset();

        assert_eq!(*laps.borrow(), vec![2]);
        assert_eq!(*completions.borrow(), 0);
        assert_eq!(*resets.borrow(), 1);
    }

    #[test]
    fn shared_table_is_reused() {
        let path = CatmullRomPath::new(course()).unwrap();
        let table = Arc::new(ArcLengthTable::build(&path, 200).unwrap());
        let a = PathAnimator::with_table(path.clone(), table.clone(), AnimatorConfig::default())
            .unwrap();
        let b = PathAnimator::with_table(path, table.clone(), AnimatorConfig::default()).unwrap();
        assert!(Arc::ptr_eq(a.table(), b.table()));
        assert_eq!(a.total_length(), table.total_length());
    }

    #[test]
    fn mismatched_table_is_rejected() {
        let path = CatmullRomPath::new(course()).unwrap();
        let other = CatmullRomPath::new(collinear()).unwrap();
        let foreign = Arc::new(ArcLengthTable::build(&other, 200).unwrap());
        let result = PathAnimator::with_table(path.clone(), foreign, AnimatorConfig::default());
        assert!(matches!(result, Err(GlideError::InvalidConfig(_))));

        let coarse = Arc::new(ArcLengthTable::build(&path, 20).unwrap());
        let result =
            PathAnimator::with_table(path.clone(), coarse.clone(), AnimatorConfig::default());
        assert!(matches!(result, Err(GlideError::InvalidConfig(_))));

        let config = AnimatorConfig::default().with_arc_length_segments(20);
        assert!(PathAnimator::with_table(path, coarse, config).is_ok());
    }

    #[test]
    fn visualize_fills_sink() {
        let anim = PathAnimator::new(course(), AnimatorConfig::default()).unwrap();
        let mut sink: Vec<DebugMarker> = Vec::new();
        anim.visualize(&mut sink, 8, 0.05, Color::RED);
        assert_eq!(sink.len(), 8);
        assert_eq!(sink[0].position, course()[0]);
        assert_eq!(sink[7].position, course()[4]);
    }
}
