//! Submission handler: attach once, then capture, validate, post and report.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::client::PredictionTransport;
use crate::config::Config;
use crate::error::{AttachError, SubmitError, ValidationError};
use crate::form::Form;
use crate::printer::Reporter;
use crate::response::{self, Response, INVALID_RESPONSE_MESSAGE};

/// What a single submission ended with. Mirrors the reporter call made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Prediction(String),
    Rejected(ValidationError),
    InvalidResponse,
    Failed(SubmitError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Prediction(_))
    }
}

pub struct FormHandler<T, R> {
    form: Form,
    transport: T,
    reporter: R,
    allow_concurrent: bool,
    in_flight: AtomicBool,
}

impl<T: PredictionTransport, R: Reporter> FormHandler<T, R> {
    /// Binds the handler to `form`, which must carry the configured form id.
    pub fn attach(form: Form, cfg: &Config, transport: T, reporter: R) -> Result<Self, AttachError> {
        let expected = cfg.form_id();
        if form.id() != expected {
            return Err(AttachError::FormNotFound { id: expected });
        }
        let allow_concurrent = cfg.allow_concurrent_submissions()?;
        debug!(form = %expected, allow_concurrent, "handler attached");
        Ok(Self { form, transport, reporter, allow_concurrent, in_flight: AtomicBool::new(false) })
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self) -> Outcome {
        let Some(_guard) = self.begin() else {
            warn!("submission rejected: a request is already in flight");
            return self.fail(SubmitError::InFlight);
        };

        let fields = self.form.capture();
        if let Err(err) = fields.validate() {
            debug!(field = %err.field, "empty field, nothing sent");
            self.reporter.on_validation_error(&err);
            return Outcome::Rejected(err);
        }

        let body = match fields.to_payload().to_json() {
            Ok(body) => body,
            Err(e) => return self.fail(e.into()),
        };

        info!(fields = fields.len(), "submitting prediction form");
        match self.transport.post_json(body).await {
            Ok(value) => match response::interpret(&value) {
                Response::Prediction(text) => {
                    info!(output = %text, "prediction received");
                    self.reporter.on_success(&text);
                    Outcome::Prediction(text)
                }
                Response::InvalidResponse => {
                    warn!(body = %value, "response has no usable output");
                    self.reporter.on_failure(INVALID_RESPONSE_MESSAGE, None);
                    Outcome::InvalidResponse
                }
            },
            Err(err) => self.fail(err),
        }
    }

    fn begin(&self) -> Option<InFlightGuard<'_>> {
        if self.allow_concurrent {
            return Some(InFlightGuard(None));
        }
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Some(&self.in_flight)))
    }

    fn fail(&self, err: SubmitError) -> Outcome {
        let detail = err.detail();
        if !matches!(err, SubmitError::InFlight) {
            warn!(error = ?err, "prediction failed");
        }
        self.reporter.on_failure(&err.to_string(), detail.as_deref());
        Outcome::Failed(err)
    }
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(Option<&'a AtomicBool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(flag) = self.0 {
            flag.store(false, Ordering::Release);
        }
    }
}
