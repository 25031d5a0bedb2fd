//! Mock implementations of core port traits.
//!
//! Every mock records how it was used behind a shared lock so tests can
//! assert on calls after handing the mock to the pipeline by reference.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use passport_qa_core::domain::{FacialLandmarks, ImageInfo, PhotoReport};
use passport_qa_core::ports::{
    ImageSource, LandmarkDetector, NoFaceDetected, ProgressEvent, ProgressSink, ReportOutput,
    UnreadableImage,
};

/// Lock-protected state that survives a poisoned mutex.
#[derive(Debug, Default)]
struct Recorded<T>(Arc<Mutex<T>>);

impl<T> Recorded<T> {
    fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Recorded<usize> {
    fn bump(&self) {
        *self.lock() += 1;
    }

    fn get(&self) -> usize {
        *self.lock()
    }
}

/// Image source yielding pre-built photos and load failures in order.
#[derive(Default)]
pub struct MockImageSource {
    items: Vec<Result<ImageInfo, UnreadableImage>>,
    iterations: Recorded<usize>,
}

impl MockImageSource {
    /// Source yielding `images`.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            items: images.into_iter().map(Ok).collect(),
            iterations: Recorded::default(),
        }
    }

    /// Source yielding nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an item at `path` that fails to load with `reason`.
    #[must_use]
    pub fn with_error(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.items.push(Err(UnreadableImage::new(path, reason)));
        self
    }

    /// How many times `images()` was called.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.iterations.get()
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        self.iterations.bump();
        Box::new(
            self.items
                .iter()
                .map(|item| item.clone().map_err(anyhow::Error::from)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Landmark detector returning a fixed answer.
pub struct MockLandmarkDetector {
    landmarks: Option<FacialLandmarks>,
    calls: Recorded<usize>,
}

impl MockLandmarkDetector {
    /// Detector that always finds `landmarks`.
    #[must_use]
    pub fn found(landmarks: FacialLandmarks) -> Self {
        Self {
            landmarks: Some(landmarks),
            calls: Recorded::default(),
        }
    }

    /// Detector that never finds a face.
    #[must_use]
    pub fn no_face() -> Self {
        Self {
            landmarks: None,
            calls: Recorded::default(),
        }
    }

    /// Number of `detect` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl LandmarkDetector for MockLandmarkDetector {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn detect(&self, _image: &ImageInfo) -> Result<FacialLandmarks, NoFaceDetected> {
        self.calls.bump();
        self.landmarks
            .ok_or_else(|| NoFaceDetected::new("mock detector configured without a face"))
    }
}

/// Report output that keeps every report in memory.
#[derive(Default)]
pub struct MockReportOutput {
    reports: Recorded<Vec<PhotoReport>>,
    flushes: Recorded<usize>,
}

impl MockReportOutput {
    /// Empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports written so far, in order.
    #[must_use]
    pub fn reports(&self) -> Vec<PhotoReport> {
        self.reports.lock().clone()
    }

    /// Number of `flush()` calls.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, report: &PhotoReport) -> anyhow::Result<()> {
        self.reports.lock().push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.flushes.bump();
        Ok(())
    }
}

/// Progress sink that records events.
#[derive(Default)]
pub struct MockProgressSink {
    events: Recorded<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Sink with no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().clone()
    }

    fn count(&self, pred: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }

    /// Number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Started { .. }))
    }

    /// Number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Completed { .. }))
    }

    /// Number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Skipped { .. }))
    }

    /// `(processed, non_compliant, skipped)` from the `Finished` event.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events.lock().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                non_compliant,
                skipped,
            } => Some((*processed, *non_compliant, *skipped)),
            _ => None,
        })
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events.lock().push(event);
    }
}
