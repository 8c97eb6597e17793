use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ligpocket::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const TICK_INTERVAL_MS: u64 = 80;

/// Renders engine progress events as a spinner on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    spinner: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let spinner = ProgressBar::new_spinner().with_style(Self::spinner_style());
        spinner.set_draw_target(target);
        spinner.finish_and_clear();
        Self {
            spinner: Arc::new(Mutex::new(spinner)),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let spinner_handle = self.spinner.clone();

        Box::new(move |progress: Progress| {
            let Ok(spinner) = spinner_handle.lock() else {
                warn!("Spinner lock poisoned; dropping progress event.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    spinner.reset();
                    spinner.enable_steady_tick(Duration::from_millis(TICK_INTERVAL_MS));
                    spinner.set_message(name);
                }
                Progress::PhaseFinish => {
                    spinner.disable_steady_tick();
                    let done = format!("✓ {}", spinner.message());
                    spinner.finish_with_message(done);
                }
                Progress::Message(msg) => {
                    if spinner.is_finished() {
                        spinner.set_message(msg);
                    } else {
                        spinner.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_starts_finished() {
        let handler = hidden_handler();
        assert!(handler.spinner.lock().unwrap().is_finished());
    }

    #[test]
    fn phase_events_drive_the_spinner() {
        let handler = hidden_handler();
        let callback = handler.callback();

        callback(Progress::PhaseStart {
            name: "Loading structure",
        });
        {
            let state = handler.spinner.lock().unwrap();
            assert_eq!(state.message(), "Loading structure");
            assert!(!state.is_finished());
        }

        callback(Progress::PhaseFinish);
        {
            let state = handler.spinner.lock().unwrap();
            assert!(state.is_finished());
            assert_eq!(state.message(), "✓ Loading structure");
        }
    }

    #[test]
    fn message_after_finish_replaces_the_label() {
        let handler = hidden_handler();
        let callback = handler.callback();
        let summary = "20 ligand atoms, 19 neighbor residues";
        callback(Progress::Message(summary.to_string()));
        let state = handler.spinner.lock().unwrap();
        assert_eq!(state.message(), summary);
    }

    #[test]
    fn callback_can_run_on_another_thread() {
        let handler = hidden_handler();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Writing output",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let state = handler.spinner.lock().unwrap();
        assert!(state.is_finished());
        assert_eq!(state.message(), "✓ Writing output");
    }
}
