use crate::controllers::progressive::ports::ImageSink;
use crate::core::data::rendered_image::RenderedImage;
use log::{error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes `image` as a binary PPM (P6).
pub fn write_ppm(image: &RenderedImage, mut out: impl Write) -> io::Result<()> {
    // P6 means binary RGB, then width, height and max_colour
    writeln!(out, "P6")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;
    out.write_all(&image.to_rgb_bytes())?;
    out.flush()
}

/// Saves each emitted pass as `pass_<n>.ppm` under one directory.
#[derive(Debug, Clone)]
pub struct PpmFilePresenter {
    output_dir: PathBuf,
}

impl PpmFilePresenter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn path_for(&self, image: &RenderedImage) -> PathBuf {
        self.output_dir.join(format!("pass_{}.ppm", image.pass()))
    }

    pub fn present(&self, image: &RenderedImage) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.path_for(image);
        let file = std::fs::File::create(&path)?;
        write_ppm(image, io::BufWriter::new(file))?;

        Ok(path)
    }
}

impl ImageSink for PpmFilePresenter {
    fn image_ready(&self, image: RenderedImage) {
        match self.present(&image) {
            Ok(path) => info!(
                "saved pass {} ({} iterations) to {}",
                image.pass(),
                image.max_iterations(),
                path.display()
            ),
            Err(err) => error!("failed to save pass {}: {}", image.pass(), err),
        }
    }
}
