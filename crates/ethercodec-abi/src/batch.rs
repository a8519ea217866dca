//! Rayon-powered batch log decoding.

use ethercodec_core::{AbiError, BatchDecodeError, ParsedLog, RawLog};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::event::EventDecoder;

/// How the batch decoder handles individual decode failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Silently skip logs that fail to decode.
    #[default]
    Skip,
    /// Collect decode errors alongside successes and return both at the end.
    Collect,
    /// Abort the entire batch on the first (lowest-index) error.
    Throw,
}

/// Successful decodes in input order, plus any collected errors.
#[derive(Debug, Default)]
pub struct BatchDecodeResult {
    pub events: Vec<ParsedLog>,
    /// Populated only when `ErrorMode::Collect` is used.
    pub errors: Vec<(usize, AbiError)>,
}

impl EventDecoder {
    /// Decode `logs` in parallel.
    pub fn decode_logs(&self, logs: &[RawLog], mode: ErrorMode) -> Result<BatchDecodeResult, BatchDecodeError> {
        let results: Vec<(usize, Result<ParsedLog, AbiError>)> = logs
            .par_iter()
            .enumerate()
            .map(|(idx, log)| (idx, self.parse_log(log)))
            .collect();

        let mut out = BatchDecodeResult {
            events: Vec::with_capacity(logs.len()),
            errors: Vec::new(),
        };
        for (idx, result) in results {
            match result {
                Ok(parsed) => out.events.push(parsed),
                Err(err) => match mode {
                    ErrorMode::Skip => {}
                    ErrorMode::Collect => out.errors.push((idx, err)),
                    ErrorMode::Throw => {
                        warn!(index = idx, error = %err, "batch decode aborted");
                        return Err(BatchDecodeError::ItemFailed {
                            index: idx,
                            source: err,
                        });
                    }
                },
            }
        }

        debug!(
            total = logs.len(),
            decoded = out.events.len(),
            errors = out.errors.len(),
            "batch decode complete"
        );
        Ok(out)
    }
}

/// Decode `logs` against `abi` in parallel.
pub fn decode_logs(
    logs: &[RawLog],
    abi: &crate::json::Abi,
    mode: ErrorMode,
) -> Result<BatchDecodeResult, BatchDecodeError> {
    EventDecoder::new(abi.clone()).decode_logs(logs, mode)
}
