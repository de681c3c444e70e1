use conform_core::events::*;
use std::sync::Arc;
use tracing::debug;

trait Reporter {
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Noop => (),
            Event::ResourceEvent(e) => self.on_resource_event(e),
            Event::WorkflowEvent(e) => self.on_workflow_event(e),
        }
    }

    fn on_resource_event(&mut self, _event: ResourceEvent) {}
    fn on_workflow_event(&mut self, _event: WorkflowEvent) {}
}

/// Prints one line per validated resource as results come in, and a summary at the end.
///
pub struct StatusReporter {
    should_stop: bool,
    validation_started: std::time::Instant,
    event_consumer: EventConsumer,
}

impl StatusReporter {
    pub fn new(event_channel: Arc<EventChannel>) -> StatusReporter {
        StatusReporter {
            should_stop: false,
            validation_started: std::time::Instant::now(),
            event_consumer: event_channel.consumer(),
        }
    }

    /// Report on a separate thread until a `Shutdown` event comes through.
    pub fn spawn(mut self) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || loop {
            self.event_consumer.fetch();
            match self.event_consumer.pop() {
                Some(event) => {
                    debug!("{:#?}", event);
                    self.handle_event(event)
                }
                None => std::thread::sleep(std::time::Duration::from_micros(10)),
            }
            if self.should_stop {
                break;
            }
        })
    }
}

impl Reporter for StatusReporter {
    fn on_resource_event(&mut self, event: ResourceEvent) {
        let green_bold = console::Style::new().green().bold();
        let yellow = console::Style::new().yellow();
        let red_bold = console::Style::new().red().bold();
        let red = console::Style::new().red();

        match event {
            ResourceEvent::ResourceStarted { .. } => (),
            ResourceEvent::ResourcePassed { logical_id } => {
                println!("{:>12} {}", green_bold.apply_to("PASS"), logical_id);
            }
            ResourceEvent::ResourceSkipped {
                logical_id, reason, ..
            } => {
                println!("{:>12} {} ({})", yellow.apply_to("SKIP"), logical_id, reason);
            }
            ResourceEvent::ResourceFailed { logical_id, errors } => {
                println!("{:>12} {}", red_bold.apply_to("FAIL"), logical_id);
                for error in errors {
                    println!("{:>12} {}", "", red.apply_to(error));
                }
            }
        }
    }

    fn on_workflow_event(&mut self, event: WorkflowEvent) {
        let green_bold = console::Style::new().green().bold();
        let red_bold = console::Style::new().red().bold();
        let blue = console::Style::new().blue();

        match event {
            WorkflowEvent::ValidationStarted { resource_count } => {
                self.validation_started = std::time::Instant::now();
                println!("{:>12} {} resources", blue.apply_to("Validating"), resource_count);
            }
            WorkflowEvent::ValidationCompleted {
                passed,
                failed,
                skipped,
            } => {
                let status = if failed > 0 {
                    red_bold.apply_to("Failed")
                } else {
                    green_bold.apply_to("Finished")
                };
                println!(
                    "{:>12} in {}ms ({} passed, {} failed, {} skipped)",
                    status,
                    self.validation_started.elapsed().as_millis(),
                    passed,
                    failed,
                    skipped
                );
            }
            WorkflowEvent::Shutdown => self.should_stop = true,
        }
    }
}
