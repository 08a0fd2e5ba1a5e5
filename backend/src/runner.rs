//! Line-oriented JSON front end
//!
//! Each input line is one `EstimateRequest`; each output line is either an
//! `EstimateResponse` or an `ErrorResponse`. Bad lines never stop the loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use fitlog_shared::types::EstimateRequest;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::services::EstimateService;
use crate::state::AppState;

/// Answer one request line
pub fn handle_line(state: &AppState, line: &str) -> Result<String> {
    let outcome = serde_json::from_str::<EstimateRequest>(line)
        .map_err(|err| ServiceError::BadRequest(format!("Invalid request: {err}")))
        .and_then(|request| EstimateService::handle(state, request))
        .and_then(|response| {
            serde_json::to_string(&response).map_err(|err| ServiceError::Internal(err.into()))
        });

    match outcome {
        Ok(body) => Ok(body),
        Err(err) => {
            debug!(code = err.code(), "Request failed: {}", err);
            serde_json::to_string(&err.to_response()).context("failed to serialize error response")
        }
    }
}

/// Process requests until the reader is exhausted
pub fn run<R: BufRead, W: Write>(state: &AppState, reader: R, mut writer: W) -> Result<usize> {
    let mut handled = 0;

    for line in reader.lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line)?;
        writeln!(writer, "{response}").context("failed to write response")?;
        writer.flush()?;
        handled += 1;
    }

    info!(handled, "Input closed");
    Ok(handled)
}
