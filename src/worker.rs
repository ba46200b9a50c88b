// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The single logical worker: requests in, responses out.
//!
//! Searches are handled one at a time, each to completion. There is no
//! preemption; overlapping searches are resolved by the session gate at
//! delivery time. A search that was superseded or cancelled while it was
//! queued or running finishes its work and then says nothing. On a worker
//! thread, index builds run beside the search queue and never hold it up.
//!
//! Two ways to drive it:
//!
//! - [`Worker::handle`] on the caller's thread, for embedders that already
//!   have their own event loop (the browser binding, the `serve` command).
//! - [`channel`] / [`spawn`] for a dedicated thread fed through
//!   `std::sync::mpsc`. [`WorkerHandle::post`] stamps searches into the gate
//!   at submission, so "A then B" means B wins even if A has not started.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::config::Flags;
use crate::engine::SearchEngine;
use crate::protocol::{parse_request, Request, Response};
use crate::session::Ticket;
use crate::types::Document;

/// Dispatches requests against one engine.
#[derive(Clone)]
pub struct Worker {
    engine: Arc<SearchEngine>,
}

impl Worker {
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Handle one request synchronously, sending every response to `out`.
    pub fn handle(&self, request: Request, out: &Sender<Response>) {
        match request {
            Request::Search {
                id,
                query,
                limit,
                use_fast,
            } => {
                let ticket = self.engine.session().accept(id);
                let job = Job::Search {
                    ticket,
                    query,
                    limit: limit.map(|l| l.get()),
                    use_fast,
                };
                self.run(job, out);
            }
            Request::Cancel { id } => {
                let cleared = self.engine.session().cancel(&id);
                debug!(id = %id, cleared, "cancel");
            }
            other => {
                if let Some(job) = Job::from_request(other) {
                    self.run(job, out);
                }
            }
        }
    }

    /// Parse and handle one JSON message. Unsupported messages are dropped.
    pub fn handle_json(&self, json: &str, out: &Sender<Response>) {
        match parse_request(json) {
            Ok(request) => self.handle(request, out),
            Err(err) => debug!(error = %err, "dropping unsupported message"),
        }
    }

    /// `setFlags`: replace the runtime flags.
    pub fn set_flags(&self, flags: Flags) {
        self.engine.set_flags(flags);
    }

    fn run(&self, job: Job, out: &Sender<Response>) {
        match job {
            Job::Build {
                id,
                documents,
                timeout,
            } => {
                let outcome = self.engine.build_index(documents, timeout, |progress| {
                    let _ = out.send(Response::progress(&id, progress));
                });
                let response = match outcome {
                    Ok(size) => Response::IndexReady { id, size },
                    Err(err) => Response::error(&id, &err),
                };
                let _ = out.send(response);
            }
            Job::Search {
                ticket,
                query,
                limit,
                use_fast,
            } => {
                let outcome = self.engine.search(&query, limit, use_fast);

                if !self.engine.session().complete(&ticket) {
                    debug!(id = ticket.id(), epoch = ticket.epoch(), "discarding stale search result");
                    return;
                }

                let response = match outcome {
                    Ok(outcome) => Response::SearchResult {
                        id: ticket.id().to_string(),
                        results: outcome.results,
                        used: outcome.used,
                    },
                    Err(err) => Response::error(ticket.id(), &err),
                };
                let _ = out.send(response);
            }
            Job::GetFlags { id } => {
                let _ = out.send(Response::Flags {
                    id,
                    enable_fast_search: self.engine.flags().enable_fast_search,
                    index_ready: self.engine.index_ready(),
                });
            }
        }
    }
}

/// Unit of work queued for the worker thread.
enum Job {
    Build {
        id: String,
        documents: Vec<Document>,
        timeout: Option<u64>,
    },
    Search {
        ticket: Ticket,
        query: String,
        limit: Option<usize>,
        use_fast: Option<bool>,
    },
    GetFlags {
        id: String,
    },
}

impl Job {
    /// Non-search requests. `cancel` never becomes a job: it acts on the gate
    /// immediately.
    fn from_request(request: Request) -> Option<Self> {
        match request {
            Request::BuildIndex {
                id,
                documents,
                timeout,
            } => Some(Job::Build {
                id,
                documents,
                timeout,
            }),
            Request::GetFlags { id } => Some(Job::GetFlags { id }),
            Request::Cancel { .. } | Request::Search { .. } => None,
        }
    }
}

/// Submission side of a worker thread.
#[derive(Clone)]
pub struct WorkerHandle {
    worker: Worker,
    jobs: Sender<Job>,
}

impl WorkerHandle {
    /// Queue a request. Searches enter the session gate now; cancels apply now.
    ///
    /// Returns false once the worker loop has exited.
    pub fn post(&self, request: Request) -> bool {
        let job = match request {
            Request::Cancel { id } => {
                let cleared = self.worker.engine.session().cancel(&id);
                debug!(id = %id, cleared, "cancel");
                return true;
            }
            Request::Search {
                id,
                query,
                limit,
                use_fast,
            } => Job::Search {
                ticket: self.worker.engine.session().accept(id),
                query,
                limit: limit.map(|l| l.get()),
                use_fast,
            },
            other => match Job::from_request(other) {
                Some(job) => job,
                None => return true,
            },
        };
        self.jobs.send(job).is_ok()
    }

    /// Parse and queue one JSON message. Unsupported messages are dropped.
    pub fn post_json(&self, json: &str) -> bool {
        match parse_request(json) {
            Ok(request) => self.post(request),
            Err(err) => {
                debug!(error = %err, "dropping unsupported message");
                true
            }
        }
    }

    pub fn set_flags(&self, flags: Flags) {
        self.worker.set_flags(flags);
    }

    pub fn engine(&self) -> &SearchEngine {
        self.worker.engine()
    }
}

/// Processing side of a worker thread.
pub struct WorkerLoop {
    worker: Worker,
    jobs: Receiver<Job>,
    out: Sender<Response>,
}

impl WorkerLoop {
    /// Process jobs until every [`WorkerHandle`] is dropped.
    ///
    /// Index builds run in order on a companion `shingle-build` thread, so
    /// searches and flag queries queued behind a build are answered while it
    /// runs, against whatever snapshot is current. Returns once the last
    /// build has finished.
    pub fn run(self) {
        let (builds_tx, builds_rx) = mpsc::channel::<Job>();
        let builder = {
            let worker = self.worker.clone();
            let out = self.out.clone();
            std::thread::Builder::new()
                .name("shingle-build".into())
                .spawn(move || {
                    for job in builds_rx {
                        worker.run(job, &out);
                    }
                })
        };
        let builder = match builder {
            Ok(thread) => Some(thread),
            Err(err) => {
                warn!(error = %err, "no build thread; builds will block searches");
                None
            }
        };

        for job in self.jobs.iter() {
            match job {
                Job::Build { .. } if builder.is_some() => {
                    if let Err(mpsc::SendError(job)) = builds_tx.send(job) {
                        self.worker.run(job, &self.out);
                    }
                }
                job => self.worker.run(job, &self.out),
            }
        }

        drop(builds_tx);
        if let Some(thread) = builder {
            if thread.join().is_err() {
                warn!("build thread panicked");
            }
        }
        debug!("worker loop finished");
    }
}

/// Wire up a worker without starting a thread.
///
/// Call [`WorkerLoop::run`] wherever the work should happen.
pub fn channel(engine: Arc<SearchEngine>) -> (WorkerHandle, WorkerLoop, Receiver<Response>) {
    let (jobs_tx, jobs_rx) = mpsc::channel();
    let (out_tx, out_rx) = mpsc::channel();
    let worker = Worker::new(engine);

    let handle = WorkerHandle {
        worker: worker.clone(),
        jobs: jobs_tx,
    };
    let worker_loop = WorkerLoop {
        worker,
        jobs: jobs_rx,
        out: out_tx,
    };
    (handle, worker_loop, out_rx)
}

/// Start a worker on its own thread.
pub fn spawn(
    engine: Arc<SearchEngine>,
) -> std::io::Result<(WorkerHandle, Receiver<Response>, JoinHandle<()>)> {
    let (handle, worker_loop, responses) = channel(engine);
    let thread = std::thread::Builder::new()
        .name("shingle-worker".into())
        .spawn(move || worker_loop.run())?;
    Ok((handle, responses, thread))
}
