use crate::analysis::Analyzer;
use crate::error::AnalysisError;
use log::debug;
use std::io;

/// Reduce the pipeline's output for one literal chunk to a single token.
///
/// Fails if the pipeline yields no tokens (the chunk was filtered away,
/// e.g. by a stopword filter) or more than one token (the chunk cannot be
/// replaced in-place by its analysis). Underlying I/O faults from the
/// pipeline are re-signaled as [`AnalysisError::Io`] carrying the chunk
/// text. The session's end-of-stream finalization runs before the session
/// is dropped on every branch; dropping the session releases it.
pub fn analyze_chunk(
    analyzer: &dyn Analyzer,
    field: &str,
    chunk: &str,
) -> Result<String, AnalysisError> {
    let fault = |source: io::Error| AnalysisError::Io {
        field: field.to_string(),
        chunk: chunk.to_string(),
        source,
    };

    let mut session = analyzer.open_session(field, chunk).map_err(&fault)?;

    let first = match session.next() {
        Ok(Some(token)) => token,
        Ok(None) => {
            session.end().map_err(&fault)?;
            return Err(AnalysisError::Empty {
                field: field.to_string(),
                chunk: chunk.to_string(),
            });
        }
        Err(source) => {
            // Best effort: the original fault is what gets reported.
            let _ = session.end();
            return Err(fault(source));
        }
    };

    // Drain the stream so a multi-token failure can name every token.
    let mut extra = Vec::new();
    loop {
        match session.next() {
            Ok(Some(token)) => extra.push(token.text),
            Ok(None) => break,
            Err(source) => {
                let _ = session.end();
                return Err(fault(source));
            }
        }
    }
    session.end().map_err(&fault)?;

    if extra.is_empty() {
        debug!("analyzed chunk \"{chunk}\" in field \"{field}\" as \"{}\"", first.text);
        Ok(first.text)
    } else {
        let mut tokens = vec![first.text];
        tokens.append(&mut extra);
        Err(AnalysisError::MultiToken {
            field: field.to_string(),
            chunk: chunk.to_string(),
            tokens,
        })
    }
}
