use crate::core::actions::render_pass::RenderPassError;
use crate::core::data::rendered_image::RenderedImage;
use log::debug;
use std::sync::mpsc::Sender;

/// Receives every image the engine finishes.
///
/// Called on the render worker thread with no engine lock held; the image is
/// handed over by value. Implementations may call back into the engine.
pub trait ImageSink: Send + Sync {
    fn image_ready(&self, image: RenderedImage);

    /// Called when a pass-set ends on an error other than an interruption.
    /// The worker stays alive and waits for the next request.
    fn pass_set_failed(&self, _error: &RenderPassError) {}
}

impl<F> ImageSink for F
where
    F: Fn(RenderedImage) + Send + Sync,
{
    fn image_ready(&self, image: RenderedImage) {
        self(image)
    }
}

/// Forwards images into a channel so a consumer thread can receive them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<RenderedImage>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(sender: Sender<RenderedImage>) -> Self {
        Self { sender }
    }
}

impl ImageSink for ChannelSink {
    fn image_ready(&self, image: RenderedImage) {
        if self.sender.send(image).is_err() {
            debug!("image receiver dropped, discarding pass");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::render_request::RenderRequest;
    use std::sync::Mutex;
    use std::sync::mpsc;

    fn image(pass: u32) -> RenderedImage {
        let request = RenderRequest::new(0.0, 0.0, 1.0, 1, 1).unwrap();
        RenderedImage::from_pixels(request, pass, 96, vec![0]).unwrap()
    }

    #[test]
    fn closure_sink_receives_images() {
        let seen = Mutex::new(Vec::new());
        let sink = |image: RenderedImage| seen.lock().unwrap().push(image.pass());

        sink.image_ready(image(0));
        sink.image_ready(image(1));

        assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn channel_sink_forwards_images() {
        let (sender, receiver) = mpsc::channel();
        let sink = ChannelSink::new(sender);

        sink.image_ready(image(2));

        assert_eq!(receiver.recv().unwrap().pass(), 2);
    }

    #[test]
    fn closure_sink_ignores_failures() {
        let seen = Mutex::new(Vec::new());
        let sink = |image: RenderedImage| seen.lock().unwrap().push(image.pass());

        sink.pass_set_failed(&RenderPassError::BufferAllocation {
            width: 1,
            height: 1,
        });

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);

        ChannelSink::new(sender).image_ready(image(0));
    }
}
