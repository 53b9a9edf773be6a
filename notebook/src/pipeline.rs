use crate::context::Context;
use crate::error::Error;
use crate::eval::evaluate;
use crate::expr::Expr;
use crate::reorder::{Reorderer, Sequenced};
use crate::settings::Settings;
use crate::translate::Translator;
use log::{debug, error};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{Builder, JoinHandle};

// Evaluation recurses once per expression level
const WORKER_STACK: usize = 16 * 1024 * 1024;

/// What one input evaluates to.
pub type Answer = Result<f64, Error>;

type Job = Sequenced<Expr>;

/// `Out[n]= ...` line for a released answer.
pub fn render(out: &Sequenced<Answer>) -> String {
    match &out.payload {
        Ok(value) => format!("Out[{}]= {}", out.seq, value),
        Err(e) => format!("Out[{}]= {}", out.seq, e),
    }
}

/// Numbers inputs, translates them on the calling thread and evaluates them
/// on a pool of workers. Answers reach `on_release` in input order.
pub struct Notebook {
    translator: Translator,
    next_seq: usize,
    jobs: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    ctx: Arc<Context>,
    answers: Arc<Reorderer<Answer>>,
}

fn worker(id: usize, jobs: Arc<Mutex<Receiver<Job>>>, ctx: Arc<Context>,
          answers: Arc<Reorderer<Answer>>) {
    loop {
        // hold the lock only while waiting, not while evaluating
        let job = jobs.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(Sequenced { seq, payload }) = job else {
            debug!("Worker {} done", id);
            return;
        };
        debug!("Worker {} evaluating In[{}]: {}", id, seq, payload);
        let answer = evaluate(&payload, &ctx).map_err(Error::from);
        answers.submit(Sequenced { seq, payload: answer });
    }
}

impl Notebook {
    pub fn new<F>(settings: &Settings, on_release: F) -> Result<Self, Error>
            where F: FnMut(Sequenced<Answer>) + Send + 'static {
        Self::with_context(settings, Context::new(), on_release)
    }

    pub fn with_context<F>(settings: &Settings, ctx: Context, on_release: F) -> Result<Self, Error>
            where F: FnMut(Sequenced<Answer>) + Send + 'static {
        let translator = Translator::new()?;
        let answers = Arc::new(Reorderer::new(settings.first_seq, on_release));
        let ctx = Arc::new(ctx);
        let (tx, rx) = mpsc::channel();
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..settings.jobs.max(1))
            .map(|id| {
                let (rx, ctx, answers) = (rx.clone(), ctx.clone(), answers.clone());
                Builder::new()
                    .name(format!("notebook-worker-{}", id))
                    .stack_size(WORKER_STACK)
                    .spawn(move || worker(id, rx, ctx, answers))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Notebook {
            translator,
            next_seq: settings.first_seq,
            jobs: Some(tx),
            workers,
            ctx,
            answers,
        })
    }

    /// Number the next input will get.
    pub fn next_seq(&self) -> usize {
        self.next_seq
    }

    /// Answers finished but waiting on an earlier input.
    pub fn pending(&self) -> usize {
        self.answers.pending()
    }

    /// Number `input` and queue it. Inputs that don't translate are answered
    /// right away so their number isn't left as a gap. Fails without numbering
    /// the input once `usize::MAX` is reached, no number can follow that one.
    pub fn submit(&mut self, input: &str) -> Result<usize, Error> {
        let seq = self.next_seq;
        self.next_seq = seq.checked_add(1).ok_or(Error::SeqExhausted(seq))?;
        let job = match self.translator.translate(input) {
            Ok(expr) => Sequenced { seq, payload: expr },
            Err(e) => {
                debug!("In[{}] failed translation: {}", seq, e);
                self.answers.submit(Sequenced { seq, payload: Err(e) });
                return Ok(seq);
            }
        };
        let sent = match &self.jobs {
            Some(jobs) => jobs.send(job).map_err(|mpsc::SendError(job)| job),
            None => Err(job),
        };
        // workers are gone, evaluate here rather than lose the answer
        if let Err(Sequenced { seq, payload }) = sent {
            error!("No workers left, evaluating In[{}] inline", seq);
            let answer = evaluate(&payload, &self.ctx).map_err(Error::from);
            self.answers.submit(Sequenced { seq, payload: answer });
        }
        Ok(seq)
    }

    /// Wait for every queued input to be answered and stop the workers.
    pub fn finish(mut self) {
        drop(self.jobs.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("Notebook worker panicked, some answers may be missing");
            }
        }
        if self.answers.pending() > 0 {
            error!("{} answers stuck waiting for In[{}]", self.answers.pending(), self.answers.expected());
        }
    }
}
