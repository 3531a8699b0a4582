use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::parallel::indexer::ParallelIndexer;
use crate::writer::mutation::{Delta, Job, JobPayload, WorkerOutput};

/// The background execution context of one `SearchIndex`
///
/// Jobs are processed strictly in submission order on a dedicated thread.
/// The worker never sees the index itself; it only turns jobs into deltas
/// that the owner applies on its own thread.
pub(crate) struct BackgroundWorker {
    jobs: Option<Sender<Job>>,
    outputs: Receiver<WorkerOutput>,
    thread: Option<JoinHandle<()>>,
}

impl BackgroundWorker {
    pub fn spawn(
        name: &str,
        analyzer: Arc<Analyzer>,
        indexer: ParallelIndexer,
        generation: Arc<AtomicU64>,
    ) -> Result<Self> {
        let (job_sender, job_receiver) = unbounded();
        let (output_sender, output_receiver) = unbounded();

        let thread = thread::Builder::new()
            .name(format!("localdex-{}", name))
            .spawn(move || {
                Self::run(job_receiver, output_sender, analyzer, indexer, generation);
            })
            .map_err(|e| Error::new(ErrorKind::WorkerUnavailable, format!("failed to spawn worker: {}", e)))?;

        Ok(BackgroundWorker {
            jobs: Some(job_sender),
            outputs: output_receiver,
            thread: Some(thread),
        })
    }

    pub fn submit(&self, job: Job) -> Result<()> {
        match &self.jobs {
            Some(jobs) => Ok(jobs.send(job)?),
            None => Err(Error::new(ErrorKind::WorkerUnavailable, "worker is shutting down")),
        }
    }

    /// Next finished job, if one is ready
    pub fn try_next(&self) -> Result<Option<WorkerOutput>> {
        match self.outputs.try_recv() {
            Ok(output) => Ok(Some(output)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::new(
                ErrorKind::WorkerUnavailable,
                "background worker exited unexpectedly",
            )),
        }
    }

    /// Block until the next job finishes
    pub fn next_blocking(&self) -> Result<WorkerOutput> {
        Ok(self.outputs.recv()?)
    }

    fn run(
        jobs: Receiver<Job>,
        outputs: Sender<WorkerOutput>,
        analyzer: Arc<Analyzer>,
        indexer: ParallelIndexer,
        generation: Arc<AtomicU64>,
    ) {
        while let Ok(job) = jobs.recv() {
            // A clear issued after submission makes the result worthless
            let delta = if job.generation != generation.load(Ordering::Acquire) {
                tracing::debug!(
                    target: "localdex::worker",
                    sequence = job.sequence,
                    generation = job.generation,
                    "skipping stale job"
                );
                None
            } else {
                Some(match job.payload {
                    JobPayload::AddOrUpdate(items) => Delta::AddOrUpdate(indexer.analyze_batch(items, &analyzer)),
                    JobPayload::Delete(ids) => Delta::Delete(ids),
                })
            };

            let output = WorkerOutput {
                sequence: job.sequence,
                generation: job.generation,
                delta,
            };
            if outputs.send(output).is_err() {
                break;
            }
        }

        tracing::debug!(target: "localdex::worker", "worker stopped");
    }
}

impl Drop for BackgroundWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop once the queue drains
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!(target: "localdex::worker", "worker thread panicked");
            }
        }
    }
}
