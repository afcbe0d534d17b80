//! Parallel batch resizing.
//!
//! Each image runs decode -> resize -> encode in its own blocking task on a
//! tokio [`JoinSet`], bounded by a [`Semaphore`]. Completion order is
//! arbitrary, so every task carries its input index and the report is
//! reassembled by index rather than by arrival.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nearest_resample::{resize, Bitmap, ResizeRequest, ResizeResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::codec::{decode, encode_png};
use crate::error::ProcessError;

/// An undecoded input image
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Key the outcome is reported under (usually the filename stem)
    pub name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

/// A resized image together with its PNG encoding
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub result: ResizeResult,
    pub png: Vec<u8>,
}

impl ProcessedImage {
    pub fn width(&self) -> u32 {
        self.result.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.result.bitmap.height()
    }
}

/// Outcome for one input, keyed by its name
#[derive(Debug)]
pub struct BatchOutcome {
    pub key: String,
    pub result: Result<ProcessedImage, ProcessError>,
}

/// All outcomes of a batch, in input order.
///
/// Each key appears at most once; repeated keys are listed in
/// [`skipped`](Self::skipped) instead.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<BatchOutcome>,
    skipped: Vec<String>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[BatchOutcome] {
        &self.outcomes
    }

    /// Keys dropped because an earlier input already used them
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn into_outcomes(self) -> Vec<BatchOutcome> {
        self.outcomes
    }

    /// Look up the outcome for `key`
    pub fn get(&self, key: &str) -> Option<&BatchOutcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &ProcessedImage)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|img| (o.key.as_str(), img)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ProcessError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.key.as_str(), e)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Stops a running batch from starting further images.
///
/// Images already being processed run to completion. The flag is cleared
/// when the batch finishes, so it only affects the current (or next) batch.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Runs one resize request over many images concurrently
pub struct BatchResizer {
    max_concurrency: usize,
    cancel: CancelHandle,
}

impl BatchResizer {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            cancel: CancelHandle::default(),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Handle for cancelling batches run by this resizer
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Decode, resize and encode raw image files
    pub async fn resize_encoded(
        &self,
        inputs: Vec<EncodedImage>,
        request: ResizeRequest,
    ) -> BatchReport {
        let inputs = inputs
            .into_iter()
            .map(|image| (image.name, image.bytes))
            .collect();
        self.run(inputs, move |bytes: Vec<u8>| {
            let bitmap = decode(&bytes)?;
            process(&bitmap, &request)
        })
        .await
    }

    /// Resize and encode already-decoded bitmaps
    pub async fn resize_decoded(
        &self,
        inputs: Vec<(String, Arc<Bitmap>)>,
        request: ResizeRequest,
    ) -> BatchReport {
        self.run(inputs, move |bitmap: Arc<Bitmap>| process(&bitmap, &request))
            .await
    }

    async fn run<T, F>(&self, inputs: Vec<(String, T)>, work: F) -> BatchReport
    where
        T: Send + 'static,
        F: Fn(T) -> Result<ProcessedImage, ProcessError> + Send + Sync + 'static,
    {
        let total = inputs.len();
        tracing::info!(
            images = total,
            max_concurrency = self.max_concurrency,
            "Starting batch resize"
        );

        let work = Arc::new(work);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut keys: Vec<String> = Vec::with_capacity(total);
        let mut seen = HashSet::with_capacity(total);
        let mut skipped = Vec::new();
        let mut tasks = JoinSet::new();

        for (key, input) in inputs {
            if !seen.insert(key.clone()) {
                tracing::warn!(key = %key, "Skipped duplicate image");
                skipped.push(key);
                continue;
            }
            let index = keys.len();
            keys.push(key);
            let work = work.clone();
            let semaphore = semaphore.clone();
            let cancel = self.cancel.clone();

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) if cancel.is_cancelled() => Err(ProcessError::Cancelled),
                    Ok(_permit) => {
                        match tokio::task::spawn_blocking(move || (*work)(input)).await {
                            Ok(result) => result,
                            Err(e) => Err(ProcessError::Task(e.to_string())),
                        }
                    }
                    Err(e) => Err(ProcessError::Task(e.to_string())),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<ProcessedImage, ProcessError>>> =
            (0..keys.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::error!(%e, "Batch task aborted"),
            }
        }

        let outcomes: Vec<BatchOutcome> = keys
            .into_iter()
            .zip(slots)
            .map(|(key, slot)| {
                let result = slot
                    .unwrap_or_else(|| Err(ProcessError::Task("task did not report".to_string())));
                match &result {
                    Ok(image) => tracing::debug!(
                        key = %key,
                        width = image.width(),
                        height = image.height(),
                        png_bytes = image.png.len(),
                        "Image resized"
                    ),
                    Err(e) => tracing::warn!(key = %key, error = %e, "Image failed"),
                }
                BatchOutcome { key, result }
            })
            .collect();

        if self.cancel.reset() {
            tracing::info!("Batch was cancelled");
        }

        let report = BatchReport { outcomes, skipped };
        tracing::info!(
            succeeded = report.successes().count(),
            failed = report.failures().count(),
            skipped = report.skipped().len(),
            "Batch resize finished"
        );
        report
    }
}

/// Resize one bitmap and encode the result as PNG
pub fn process(bitmap: &Bitmap, request: &ResizeRequest) -> Result<ProcessedImage, ProcessError> {
    let result = resize(bitmap, request)?;
    let png = encode_png(&result.bitmap)?;
    Ok(ProcessedImage { result, png })
}
