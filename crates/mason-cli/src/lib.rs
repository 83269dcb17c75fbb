//! Mason CLI library
//!
//! Loads a scene, drives a [`LayoutController`] over it on a virtual clock
//! and reports the event trace and final positions.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod host;
mod scene;

pub use args::Args;
pub use error::CliError;
pub use host::SceneHost;
pub use scene::{Scene, SceneAction};

use std::{fmt, fs, time::Duration};

use log::{debug, info, warn};

use mason::{
    ElementHost, LayoutController, LayoutEvent, config::LayoutConfig, geometry::Size,
    identifier::ElementId,
};

/// Upper bound on simulated time after the last scheduled event.
const SETTLE_LIMIT: Duration = Duration::from_secs(600);

/// Run the Mason CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Elements the layout refuses
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Processing scene");

    let config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;
    let scene = Scene::parse(&source)?;

    let report = simulate(&scene, config, Duration::from_millis(args.step_ms))?;

    match &args.output {
        Some(path) => {
            fs::write(path, report.to_string())?;
            info!(output_file = path; "Report written");
        }
        None => print!("{report}"),
    }

    Ok(())
}

/// Play `scene` through a controller, advancing time in `step` frames until
/// the timeline is exhausted and the layout is quiescent.
///
/// # Errors
///
/// Returns [`CliError::Layout`] if the controller refuses an element.
pub fn simulate(scene: &Scene, config: LayoutConfig, step: Duration) -> Result<Report, CliError> {
    let mut host = SceneHost::new();
    let initial: Vec<_> = scene
        .elements()
        .iter()
        .map(|element| {
            let id = ElementId::new(&element.name);
            host.set_optional_size(id, element.width, element.height);
            id
        })
        .collect();

    let mut controller = LayoutController::new(host, config)?;
    let mut report = Report::default();

    controller.set_container_width(scene.container_width());
    controller.add_all(&initial)?;
    report.record(Duration::ZERO, controller.drain_events());

    let mut now = Duration::ZERO;
    let mut timeline = scene.events().iter().peekable();
    let last_event = scene
        .events()
        .last()
        .map_or(Duration::ZERO, |event| Duration::from_millis(event.at_ms));
    let deadline = last_event.saturating_add(SETTLE_LIMIT);

    loop {
        while let Some(event) = timeline.next_if(|event| Duration::from_millis(event.at_ms) <= now) {
            debug!(at_ms = event.at_ms, action:? = event.action; "Scene event");
            apply_action(&mut controller, &event.action)?;
            report.record(now, controller.drain_events());
        }

        let quiescent = controller.is_settled()
            && !controller.resize_pending()
            && !controller.has_deferred_work();
        if timeline.peek().is_none() && quiescent {
            break;
        }
        if now >= deadline {
            warn!(at_ms = now.as_millis(); "Layout did not settle, stopping simulation");
            break;
        }

        now = now.saturating_add(step);
        report.record(now, controller.tick(step));
    }

    report.finish(&controller, now);
    info!(
        events = report.trace.len(),
        height = report.content_height,
        duration_ms = now.as_millis();
        "Simulation finished"
    );
    Ok(report)
}

fn apply_action(
    controller: &mut LayoutController<SceneHost>,
    action: &SceneAction,
) -> Result<(), CliError> {
    match action {
        SceneAction::Resize { width } => controller.container_resized(*width),
        SceneAction::Add {
            name,
            width,
            height,
        } => {
            let id = ElementId::new(name);
            controller.host_mut().set_optional_size(id, *width, *height);
            controller.add(id)?;
        }
        SceneAction::Remove { name } => controller.remove(ElementId::new(name)),
        SceneAction::Measure {
            name,
            width,
            height,
        } => {
            let id = ElementId::new(name);
            controller
                .host_mut()
                .set_size(id, Size::new(*width, *height));
            controller.element_resized(id);
        }
        SceneAction::Reverse => controller.reverse_order(),
    }
    Ok(())
}

/// Outcome of a simulation.
#[derive(Debug, Default)]
pub struct Report {
    trace: Vec<(Duration, LayoutEvent)>,
    positions: Vec<(ElementId, f32, f32)>,
    content_height: f32,
    position_writes: usize,
    elapsed: Duration,
}

impl Report {
    fn record(&mut self, at: Duration, events: Vec<LayoutEvent>) {
        self.trace.extend(events.into_iter().map(|event| (at, event)));
    }

    fn finish(&mut self, controller: &LayoutController<SceneHost>, elapsed: Duration) {
        let host = controller.host();
        // Removed elements are listed too, at their last position.
        let mut listed: Vec<ElementId> = controller.elements().to_vec();
        listed.extend(host.seen().iter().filter(|id| !controller.contains(**id)));

        self.positions = listed
            .into_iter()
            .map(|id| {
                let position = host.position(id);
                (id, position.x(), position.y())
            })
            .collect();
        self.content_height = host.content_height();
        self.position_writes = host.position_writes();
        self.elapsed = elapsed;
    }

    /// Events in the order they were produced, with their simulated time.
    pub fn trace(&self) -> &[(Duration, LayoutEvent)] {
        &self.trace
    }

    /// Final position of an element.
    pub fn position_of(&self, element: ElementId) -> Option<(f32, f32)> {
        self.positions
            .iter()
            .find(|(id, _, _)| *id == element)
            .map(|&(_, x, y)| (x, y))
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn count(&self, pred: impl Fn(&LayoutEvent) -> bool) -> usize {
        self.trace.iter().filter(|(_, event)| pred(event)).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# events")?;
        for (at, event) in &self.trace {
            write!(f, "{:>6}ms  ", at.as_millis())?;
            match event {
                LayoutEvent::Repacked { height, moved } => {
                    writeln!(f, "repacked height={height} moved={moved}")?
                }
                LayoutEvent::TransitionCompleted {
                    element,
                    transition,
                } => writeln!(f, "completed {element} {transition}")?,
                LayoutEvent::Settled => writeln!(f, "settled")?,
            }
        }

        writeln!(f, "# positions")?;
        for (id, x, y) in &self.positions {
            writeln!(f, "{id} {x} {y}")?;
        }

        writeln!(f, "# summary")?;
        writeln!(f, "content_height {}", self.content_height)?;
        writeln!(f, "position_writes {}", self.position_writes)?;
        writeln!(f, "elapsed_ms {}", self.elapsed.as_millis())
    }
}
