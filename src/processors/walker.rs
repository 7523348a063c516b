// webpify/src/processors/walker.rs
use super::codec::Codec;
use super::converter::ConversionTask;
use crate::core::{ConvertConfig, ConverterError, FileMatcher, Result, WorkTracker};
use indicatif::ProgressBar;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Walks every configured root concurrently and converts matching files.
///
/// Walks and conversions share one rayon pool. Each of them holds a
/// [`crate::core::WorkGuard`] for its whole lifetime, and [`Coordinator::run`]
/// returns once the tracker drains.
pub struct Coordinator {
    directories: Vec<PathBuf>,
    matcher: FileMatcher,
    codec: Arc<dyn Codec>,
    clean: bool,
    pool: rayon::ThreadPool,
    tracker: WorkTracker,
    progress: ProgressBar,
}

impl Coordinator {
    pub fn new(config: &ConvertConfig, codec: Arc<dyn Codec>) -> Result<Self> {
        config.validate()?;

        let matcher = FileMatcher::new(&config.extensions, codec.suffix())?;

        // num_threads(0) lets rayon pick one worker per logical CPU.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("webpify-worker-{}", i))
            .panic_handler(|payload| {
                log::error!("Worker task panicked: {}", panic_message(payload.as_ref()));
            })
            .build()
            .map_err(|e| ConverterError::ThreadPool(e.to_string()))?;

        Ok(Self {
            directories: config.roots(),
            matcher,
            codec,
            clean: config.clean,
            pool,
            tracker: WorkTracker::new(),
            progress: ProgressBar::hidden(),
        })
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn tracker(&self) -> &WorkTracker {
        &self.tracker
    }

    pub fn matcher(&self) -> &FileMatcher {
        &self.matcher
    }

    /// Blocks until every root has been walked and every spawned
    /// conversion has finished. Per-file failures only show up in the log.
    pub fn run(&self) {
        let context = Arc::new(WalkContext {
            matcher: self.matcher.clone(),
            codec: Arc::clone(&self.codec),
            clean: self.clean,
            tracker: self.tracker.clone(),
            progress: self.progress.clone(),
        });

        for root in &self.directories {
            let guard = self.tracker.register();
            let context = Arc::clone(&context);
            let root = root.clone();
            self.pool.spawn(move || {
                let _guard = guard;
                context.walk(&root);
            });
        }

        self.tracker.wait();

        self.progress.finish_with_message(format!(
            "Finished {} conversions",
            self.progress.position()
        ));
    }
}

struct WalkContext {
    matcher: FileMatcher,
    codec: Arc<dyn Codec>,
    clean: bool,
    tracker: WorkTracker,
    progress: ProgressBar,
}

impl WalkContext {
    fn walk(self: &Arc<Self>, root: &Path) {
        log::debug!("Walking {}", root.display());

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(destination) = self.matcher.destination_of(entry.path()) else {
                continue;
            };

            self.dispatch(ConversionTask::new(entry.into_path(), destination, self.clean));
        }

        log::debug!("Finished walking {}", root.display());
    }

    fn dispatch(self: &Arc<Self>, task: ConversionTask) {
        let guard = self.tracker.register();
        let context = Arc::clone(self);

        // Called from a pool worker, so this lands on the same pool.
        rayon::spawn(move || {
            let _guard = guard;
            task.run(context.codec.as_ref());
            context.progress.inc(1);
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
