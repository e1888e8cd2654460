//! # Vision Client
//!
//! The VisionClient runs a [`VisionPipeline`] on a background thread at the pipeline's own rate and
//! makes the latest estimate available to the control cycle without blocking. The data works in a
//! most-recent-value model: the control cycle always reads the last estimate the pipeline
//! published, which may be older than the current cycle.
//!
//! Filter tuning is passed the other way over a channel and applied by the background thread
//! before it processes the next frame.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    sync::{
        Arc, Mutex, TryLockError,
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver, Sender},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use log::{debug, info, trace, warn};

use comms_if::eqpt::vision::{FilterTuning, TargetEstimate, VisionPipeline, VisionProvider};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct VisionClient {
    bg_jh: Option<JoinHandle<()>>,
    bg_run: Arc<AtomicBool>,
    latest: Arc<Mutex<TargetEstimate>>,
    tuning_sender: Sender<FilterTuning>,

    /// The last estimate read, returned if the slot is busy.
    last_read: TargetEstimate,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum VisionClientError {
    #[error("The pipeline period must be a positive number of seconds, found {0}")]
    InvalidPeriod(f64),

    #[error("Could not start the vision thread: {0}")]
    ThreadStartError(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VisionClient {
    /// Start running the pipeline in the background.
    ///
    /// # Inputs
    /// - `pipeline`: the pipeline to run, moved into the background thread.
    /// - `period_s`: target time between two pipeline passes.
    pub fn start<P>(pipeline: P, period_s: f64) -> Result<Self, VisionClientError> 
    where
        P: VisionPipeline + Send + 'static
    {
        if !(period_s.is_finite() && period_s > 0.0) {
            return Err(VisionClientError::InvalidPeriod(period_s));
        }

        // Create the data shared objects
        let bg_run = Arc::new(AtomicBool::new(true));
        let latest = Arc::new(Mutex::new(TargetEstimate::not_found()));
        let (tuning_sender, tuning_receiver) = channel();

        // Create clones of these to pass to the bg thread
        let bg_run_clone = bg_run.clone();
        let latest_clone = latest.clone();
        let period = Duration::from_secs_f64(period_s);

        // Start BG thread
        let bg_jh = thread::Builder::new()
            .name("vision_client".into())
            .spawn(move || {
                bg_thread(pipeline, period, bg_run_clone, latest_clone, tuning_receiver)
            })
            .map_err(VisionClientError::ThreadStartError)?;

        info!("VisionClient started with a {} s period", period_s);

        Ok(Self {
            bg_jh: Some(bg_jh),
            bg_run,
            latest,
            tuning_sender,
            last_read: TargetEstimate::not_found(),
        })
    }

    /// Returns true while the background thread is running.
    pub fn is_running(&self) -> bool {
        self.bg_run.load(Ordering::Relaxed)
    }

    /// Stop the background thread and wait for it to finish.
    pub fn stop(&mut self) {
        self.bg_run.store(false, Ordering::Relaxed);

        if let Some(jh) = self.bg_jh.take() {
            if jh.join().is_err() {
                warn!("Vision thread panicked");
            }
            else {
                info!("VisionClient stopped");
            }
        }
    }
}

impl VisionProvider for VisionClient {
    fn poll_target(&mut self) -> TargetEstimate {
        match self.latest.try_lock() {
            Ok(t) => self.last_read = *t,
            // A poisoned slot still holds the last published estimate
            Err(TryLockError::Poisoned(p)) => self.last_read = *p.into_inner(),
            Err(TryLockError::WouldBlock) => trace!("Vision slot busy, using previous estimate"),
        }

        self.last_read
    }

    fn apply_filter_tuning(&mut self, tuning: FilterTuning) {
        if self.tuning_sender.send(tuning).is_err() {
            warn!("Vision thread is not running, filter tuning dropped");
        }
    }
}

impl Drop for VisionClient {
    fn drop(&mut self) {
        self.stop()
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Background thread, runs the pipeline and publishes each estimate.
fn bg_thread<P: VisionPipeline>(
    mut pipeline: P,
    period: Duration,
    run: Arc<AtomicBool>,
    latest: Arc<Mutex<TargetEstimate>>,
    tuning_receiver: Receiver<FilterTuning>
) {
    // While instructed to run
    while run.load(Ordering::Relaxed) {
        let pass_start = Instant::now();

        // Only the newest tuning matters
        if let Some(tuning) = tuning_receiver.try_iter().last() {
            debug!("Applying filter tuning {:?}", tuning);
            pipeline.apply_filter_tuning(&tuning);
        }

        let estimate = pipeline.process();

        // Publish the estimate
        match latest.lock() {
            Ok(mut l) => *l = estimate,
            Err(p) => *p.into_inner() = estimate,
        }

        if let Some(d) = period.checked_sub(pass_start.elapsed()) {
            thread::sleep(d);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Pipeline which reports a fixed target and counts the tunings it receives.
    struct FixedPipeline {
        estimate: TargetEstimate,
        tunings: Arc<AtomicUsize>,
    }

    impl VisionPipeline for FixedPipeline {
        fn process(&mut self) -> TargetEstimate {
            self.estimate
        }

        fn apply_filter_tuning(&mut self, _tuning: &FilterTuning) {
            self.tunings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn wait_for<F: Fn() -> bool>(cond: F) -> bool {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(2) {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn test_publishes_latest_estimate() {
        let estimate = TargetEstimate {
            angular_error_deg: 3.0,
            horizontal_range_m: 4.0,
            found: true,
        };
        let mut client = VisionClient::start(
            FixedPipeline { estimate, tunings: Arc::new(AtomicUsize::new(0)) }, 
            0.005
        ).unwrap();

        assert!(wait_for(|| *client.latest.lock().unwrap() == estimate));
        assert_eq!(client.poll_target(), estimate);

        client.stop();
        assert!(!client.is_running());

        // Still returns the last estimate after stopping
        assert_eq!(client.poll_target(), estimate);
    }

    #[test]
    fn test_filter_tuning_reaches_pipeline() {
        let tunings = Arc::new(AtomicUsize::new(0));
        let mut client = VisionClient::start(
            FixedPipeline { 
                estimate: TargetEstimate::not_found(), 
                tunings: tunings.clone() 
            }, 
            0.005
        ).unwrap();

        client.apply_filter_tuning(FilterTuning::Shape {
            min_area: 10.0,
            min_shape_score: 0.0,
            max_shape_score: 2.0,
        });

        assert!(wait_for(|| tunings.load(Ordering::SeqCst) == 1));
    }

    #[test]
    fn test_invalid_period() {
        let pipeline = FixedPipeline { 
            estimate: TargetEstimate::not_found(), 
            tunings: Arc::new(AtomicUsize::new(0)) 
        };
        assert!(matches!(
            VisionClient::start(pipeline, 0.0),
            Err(VisionClientError::InvalidPeriod(_))
        ));
    }
}
