use std::sync::Arc;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use parking_lot::Mutex;

use crate::error::{CanvasError, CanvasResult};
use crate::surface::Surface;

/// Name every export is delivered under
pub const EXPORT_FILE_NAME: &str = "drawing.jpg";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// How long a download's object URL outlives the click that started it.
/// Revoking immediately cancels the download in some browsers.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const REVOKE_DELAY_MS: i32 = 1_000;

/// Encodes the surface as a baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(surface: &Surface, quality: u8) -> CanvasResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(surface.as_rgba().clone()).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder.encode_image(&rgb).map_err(CanvasError::Encode)?;
    Ok(bytes)
}

/// Decodes any format the `image` crate was built with
pub fn decode_image(bytes: &[u8]) -> CanvasResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(CanvasError::Decode)
}

/// Hands the exported bytes to the user: a file in `export_dir` on native,
/// a browser download on the web.
#[cfg(not(target_arch = "wasm32"))]
pub fn deliver_export(bytes: &[u8], export_dir: &std::path::Path) -> CanvasResult<()> {
    std::fs::create_dir_all(export_dir)?;
    let path = export_dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, bytes)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn deliver_export(bytes: &[u8], _export_dir: &std::path::Path) -> CanvasResult<()> {
    use wasm_bindgen::JsCast;

    let js_err = |what: &str| CanvasError::Io(std::io::Error::other(what.to_owned()));

    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
        .map_err(|_| js_err("failed to create blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| js_err("failed to create object url"))?;

    let anchor = document
        .create_element("a")
        .map_err(|_| js_err("failed to create anchor"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| js_err("element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();

    let revoke = wasm_bindgen::closure::Closure::once_into_js(move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("Failed to revoke {}: {:?}", url, err);
        }
    });
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref(),
        REVOKE_DELAY_MS,
    ) {
        log::warn!("Failed to schedule object url revoke: {:?}", err);
    }
    Ok(())
}

/// A file picked by the user, read fully into memory
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
enum ImportSlot {
    #[default]
    Idle,
    Waiting,
    Ready(ImportedFile),
}

/// Hand-off point between the asynchronous file picker and the UI thread.
///
/// At most one pick is in flight. The UI drains a finished pick with
/// [`PendingImport::take`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct PendingImport {
    slot: Arc<Mutex<ImportSlot>>,
}

impl PendingImport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a pick as in flight. Returns false if one already is.
    pub fn begin(&self) -> bool {
        let mut slot = self.slot.lock();
        match *slot {
            ImportSlot::Idle => {
                *slot = ImportSlot::Waiting;
                true
            }
            ImportSlot::Waiting | ImportSlot::Ready(_) => false,
        }
    }

    /// Completes the in-flight pick. `None` means the picker was dismissed.
    pub fn finish(&self, file: Option<ImportedFile>) {
        let mut slot = self.slot.lock();
        *slot = match file {
            Some(file) => ImportSlot::Ready(file),
            None => ImportSlot::Idle,
        };
    }

    pub fn is_waiting(&self) -> bool {
        matches!(*self.slot.lock(), ImportSlot::Waiting)
    }

    /// Takes a finished pick, leaving the slot idle
    pub fn take(&self) -> Option<ImportedFile> {
        let mut slot = self.slot.lock();
        match std::mem::take(&mut *slot) {
            ImportSlot::Ready(file) => Some(file),
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Opens the file picker without blocking the UI thread
    pub fn request(&self, ctx: &egui::Context) {
        if !self.begin() {
            log::debug!("Import already in progress");
            return;
        }

        let pending = self.clone();
        let ctx = ctx.clone();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            pending.finish(futures::executor::block_on(pick_image()));
            ctx.request_repaint();
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            pending.finish(pick_image().await);
            ctx.request_repaint();
        });
    }
}

async fn pick_image() -> Option<ImportedFile> {
    let handle = rfd::AsyncFileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await?;
    Some(ImportedFile {
        name: handle.file_name(),
        bytes: handle.read().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_round_trip_keeps_dimensions() {
        let surface = Surface::new(64, 48).unwrap();
        let bytes = encode_jpeg(&surface, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(CanvasError::Decode(_))
        ));
    }

    #[test]
    fn test_deliver_export_writes_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        deliver_export(&[1, 2, 3], &target).unwrap();
        assert_eq!(std::fs::read(target.join(EXPORT_FILE_NAME)).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_pending_import_single_flight() {
        let pending = PendingImport::new();
        assert!(pending.begin());
        assert!(!pending.begin());
        assert!(pending.is_waiting());
        assert!(pending.take().is_none());

        pending.finish(Some(ImportedFile {
            name: "a.png".to_owned(),
            bytes: vec![7],
        }));
        assert!(!pending.begin());

        let file = pending.take().unwrap();
        assert_eq!(file.name, "a.png");
        assert!(pending.take().is_none());
        assert!(pending.begin());
    }

    #[test]
    fn test_dismissed_picker_is_noop() {
        let pending = PendingImport::new();
        assert!(pending.begin());
        pending.finish(None);
        assert!(pending.take().is_none());
        assert!(!pending.is_waiting());
    }
}
