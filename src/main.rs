use log::info;
use progressive_render::{
    EngineConfig, ImageSink, PpmFilePresenter, ProgressiveRenderEngine, RenderPassError,
    RenderRequest, RenderedImage,
};
use std::error::Error;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

const OUTPUT_DIR: &str = "output";
const USAGE: &str = "usage: progressive_render [centre_x centre_y scale width height]";
const WORKER_CHECK_INTERVAL: Duration = Duration::from_millis(200);

enum RenderEvent {
    PassSaved(u32),
    Failed(String),
}

/// Saves each pass to disk and tells the main thread how far rendering got.
struct DemoSink {
    presenter: PpmFilePresenter,
    events: Sender<RenderEvent>,
}

impl ImageSink for DemoSink {
    fn image_ready(&self, image: RenderedImage) {
        let pass = image.pass();
        self.presenter.image_ready(image);
        let _ = self.events.send(RenderEvent::PassSaved(pass));
    }

    fn pass_set_failed(&self, error: &RenderPassError) {
        let _ = self.events.send(RenderEvent::Failed(error.to_string()));
    }
}

fn parse_request(args: &[String]) -> Result<RenderRequest, Box<dyn Error>> {
    match args {
        [] => Ok(RenderRequest::new(-0.637011, -0.0395159, 0.00403897, 800, 600)?),
        [centre_x, centre_y, scale, width, height] => Ok(RenderRequest::new(
            centre_x.parse()?,
            centre_y.parse()?,
            scale.parse()?,
            width.parse()?,
            height.parse()?,
        )?),
        _ => Err(USAGE.into()),
    }
}

/// Blocks until `final_pass` has been saved, the pass-set fails, or the
/// worker dies.
fn wait_for_final_pass(
    engine: &ProgressiveRenderEngine,
    events: &Receiver<RenderEvent>,
    final_pass: u32,
) -> Result<(), Box<dyn Error>> {
    loop {
        match events.recv_timeout(WORKER_CHECK_INTERVAL) {
            Ok(RenderEvent::PassSaved(pass)) if pass == final_pass => return Ok(()),
            Ok(RenderEvent::PassSaved(_)) => {}
            Ok(RenderEvent::Failed(reason)) => return Err(format!("render failed: {}", reason).into()),
            Err(RecvTimeoutError::Timeout) if engine.is_running() => {}
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return Err("render worker stopped before the final pass".into());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;
    let config = EngineConfig::default();
    let final_pass = config.pass_count - 1;

    let (events_tx, events_rx) = mpsc::channel();
    let sink = DemoSink {
        presenter: PpmFilePresenter::new(OUTPUT_DIR),
        events: events_tx,
    };

    let engine = ProgressiveRenderEngine::with_config(config, Arc::new(sink))?;

    info!(
        "rendering {}x{} around ({}, {}) at scale {}",
        request.width(),
        request.height(),
        request.centre().real,
        request.centre().imag,
        request.scale()
    );
    engine.submit(request)?;

    let result = wait_for_final_pass(&engine, &events_rx, final_pass);
    engine.shutdown();
    result
}
