/// Events emitted while a proposal run moves through its stages.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    /// `items` is the size of the table the phase produced.
    PhaseFinish { items: usize },

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `phase` between a start and a finish event; the finish event carries the
    /// size of the produced table. Nothing is reported as finished when `phase` fails.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        phase: impl FnOnce() -> Result<T, E>,
        items: impl Fn(&T) -> usize,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        let output = phase()?;
        self.report(Progress::PhaseFinish {
            items: items(&output),
        });
        Ok(output)
    }
}
