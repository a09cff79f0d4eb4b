use crate::controllers::progressive::config::EngineConfig;
use crate::controllers::progressive::ports::ImageSink;
use crate::core::actions::interruption::{InterruptSource, Interruption};
use crate::core::actions::pass_schedule::{PassSchedule, PassVerdict};
use crate::core::actions::render_pass::{PassParams, RenderPassError, render_pass};
use crate::core::colour_table::ColourTable;
use crate::core::data::render_request::RenderRequest;
use log::{debug, trace};

/// How a run of refinement passes for one request ended.
#[derive(Debug)]
pub enum PassSetOutcome {
    /// Every scheduled pass was computed and emitted.
    Completed { emitted: u32 },
    /// A newer request arrived; nothing further was emitted.
    Restarted,
    Aborted,
    /// The pass-set could not continue, e.g. the pixel buffer failed to allocate.
    Failed(RenderPassError),
}

impl From<Interruption> for PassSetOutcome {
    fn from(interruption: Interruption) -> Self {
        match interruption {
            Interruption::Restart => Self::Restarted,
            Interruption::Abort => Self::Aborted,
        }
    }
}

/// Renders `request` at increasing iteration ceilings, emitting each pass
/// that finishes without interruption.
///
/// A pass interrupted part way is dropped whole. The interrupt source is polled
/// once more between finishing a pass and emitting it, so a request that lands
/// on the boundary also suppresses the image.
pub fn run_pass_set<I: InterruptSource>(
    request: &RenderRequest,
    config: &EngineConfig,
    colour_table: &ColourTable,
    interrupt: &I,
    sink: &dyn ImageSink,
) -> PassSetOutcome {
    let mut schedule = PassSchedule::new(config.pass_count, config.black_skip_pass);
    let mut emitted = 0;

    while let Some(pass) = schedule.next() {
        let Some(max_iterations) = config.max_iterations(pass) else {
            break;
        };

        let params = PassParams {
            pass,
            max_iterations,
            escape_limit: config.escape_limit,
        };

        let rendered = match render_pass(
            request,
            params,
            colour_table,
            config.row_scheduling,
            interrupt,
        ) {
            Ok(rendered) => rendered,
            Err(RenderPassError::Interrupted(interruption)) => return interruption.into(),
            Err(err) => return PassSetOutcome::Failed(err),
        };

        if schedule.after_pass(pass, rendered.all_black) == PassVerdict::SkipAhead {
            debug!("pass 0 resolved nothing, skipping ahead");
            continue;
        }

        if let Some(interruption) = interrupt.poll() {
            return interruption.into();
        }

        trace!("emitting pass {} ({} iterations)", pass, max_iterations);
        sink.image_ready(rendered.image);
        emitted += 1;
    }

    PassSetOutcome::Completed { emitted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::interruption::Uninterrupted;
    use crate::core::data::colour::BLACK;
    use crate::core::data::rendered_image::RenderedImage;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingSink {
        images: Mutex<Vec<RenderedImage>>,
    }

    impl RecordingSink {
        fn passes(&self) -> Vec<u32> {
            self.images.lock().unwrap().iter().map(|i| i.pass()).collect()
        }
    }

    impl ImageSink for RecordingSink {
        fn image_ready(&self, image: RenderedImage) {
            self.images.lock().unwrap().push(image);
        }
    }

    fn quick_config() -> EngineConfig {
        EngineConfig {
            pass_count: 4,
            black_skip_pass: Some(2),
            ..EngineConfig::default()
        }
    }

    fn table(config: &EngineConfig) -> ColourTable {
        ColourTable::build(config.colour_table_size).unwrap()
    }

    #[test]
    fn test_emits_every_pass_in_order() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 0.5, 8, 6).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_pass_set(&request, &config, &table(&config), &Uninterrupted, &sink);

        assert!(matches!(outcome, PassSetOutcome::Completed { emitted: 4 }));
        assert_eq!(sink.passes(), vec![0, 1, 2, 3]);

        let ceilings: Vec<u32> = sink
            .images
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.max_iterations())
            .collect();
        assert_eq!(ceilings, vec![96, 288, 1056, 4128]);
    }

    #[test]
    fn test_origin_pixel_black_in_every_pass() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 0.5, 5, 5).unwrap();
        let sink = RecordingSink::default();

        run_pass_set(&request, &config, &table(&config), &Uninterrupted, &sink);

        let images = sink.images.lock().unwrap();
        assert_eq!(images.len(), 4);
        for image in images.iter() {
            assert_eq!(image.pixel(2, 2), Some(BLACK));
        }
    }

    #[test]
    fn test_black_first_pass_skips_ahead() {
        let config = EngineConfig::default();
        let request = RenderRequest::new(0.0, 0.0, 1e-6, 4, 4).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_pass_set(&request, &config, &table(&config), &Uninterrupted, &sink);

        assert!(matches!(outcome, PassSetOutcome::Completed { emitted: 4 }));
        assert_eq!(sink.passes(), vec![4, 5, 6, 7]);
        assert_eq!(sink.images.lock().unwrap()[0].max_iterations(), 16416);
    }

    #[test]
    fn test_black_first_pass_without_skip_runs_every_pass() {
        let config = EngineConfig {
            pass_count: 3,
            black_skip_pass: None,
            ..EngineConfig::default()
        };
        let request = RenderRequest::new(0.0, 0.0, 1e-6, 2, 2).unwrap();
        let sink = RecordingSink::default();

        run_pass_set(&request, &config, &table(&config), &Uninterrupted, &sink);

        assert_eq!(sink.passes(), vec![0, 1, 2]);
    }

    #[test]
    fn test_restart_mid_pass_emits_nothing_for_that_pass() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 0.5, 8, 6).unwrap();
        let sink = RecordingSink::default();
        let polls = AtomicUsize::new(0);
        // 6 row polls + 1 boundary poll per pass; fire on row 3 of pass 1
        let source = || {
            let count = polls.fetch_add(1, Ordering::Relaxed);
            (count >= 7 + 3).then_some(Interruption::Restart)
        };

        let outcome = run_pass_set(&request, &config, &table(&config), &source, &sink);

        assert!(matches!(outcome, PassSetOutcome::Restarted));
        assert_eq!(sink.passes(), vec![0]);
    }

    #[test]
    fn test_restart_on_pass_boundary_suppresses_emission() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 0.5, 8, 6).unwrap();
        let sink = RecordingSink::default();
        let polls = AtomicUsize::new(0);
        let source = || {
            let count = polls.fetch_add(1, Ordering::Relaxed);
            (count == 6).then_some(Interruption::Restart)
        };

        let outcome = run_pass_set(&request, &config, &table(&config), &source, &sink);

        assert!(matches!(outcome, PassSetOutcome::Restarted));
        assert!(sink.passes().is_empty());
    }

    #[test]
    fn test_abort_stops_immediately() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 0.5, 8, 6).unwrap();
        let sink = RecordingSink::default();
        let source = || Some(Interruption::Abort);

        let outcome = run_pass_set(&request, &config, &table(&config), &source, &sink);

        assert!(matches!(outcome, PassSetOutcome::Aborted));
        assert!(sink.passes().is_empty());
    }

    #[test]
    fn test_allocation_failure_fails_pass_set() {
        let config = quick_config();
        let request = RenderRequest::new(0.0, 0.0, 1.0, u32::MAX, u32::MAX).unwrap();
        let sink = RecordingSink::default();

        let outcome = run_pass_set(&request, &config, &table(&config), &Uninterrupted, &sink);

        assert!(matches!(
            outcome,
            PassSetOutcome::Failed(RenderPassError::BufferAllocation { .. })
        ));
        assert!(sink.passes().is_empty());
    }
}
