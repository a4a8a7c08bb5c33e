//! Helpers shared by the CLI and benches: request files and batch encoding

use crate::encoder::{Payload, PayloadEncoder};
use crate::error::{PayloadError, ToolsError};
use crate::models::{Amount, PaymentRequest};
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse one `phone,name,amount` request line
///
/// Blank lines and `#` comments yield `Ok(None)`. The name is everything
/// between the first and last comma, so it may itself contain commas; the
/// amount therefore cannot use thousands separators.
pub fn parse_request_line(line: &str) -> Result<Option<PaymentRequest>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (phone, rest) = trimmed
        .split_once(',')
        .ok_or_else(|| "expected phone,name,amount".to_string())?;
    let (name, amount) = rest
        .rsplit_once(',')
        .ok_or_else(|| "expected phone,name,amount".to_string())?;
    let amount: Amount = amount.trim().parse().map_err(|e: PayloadError| e.to_string())?;

    Ok(Some(PaymentRequest::new(phone.trim(), name.trim(), amount)))
}

/// Load every request from a file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<PaymentRequest>, ToolsError> {
    let content = fs::read_to_string(path)?;
    let mut requests = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        match parse_request_line(line) {
            Ok(Some(request)) => requests.push(request),
            Ok(None) => {}
            Err(reason) => {
                return Err(ToolsError::InvalidLine {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }
    Ok(requests)
}

/// Encode requests in parallel, keeping input order
pub fn encode_batch(
    encoder: &PayloadEncoder,
    requests: &[PaymentRequest],
) -> Vec<Result<Payload, PayloadError>> {
    let results: Vec<_> = requests.par_iter().map(|r| encoder.encode(r)).collect();
    let stats = BatchStats::from_results(&results);
    info!(ok = stats.ok, failed = stats.failed, "batch encoded");
    results
}

/// Outcome counts of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    /// Requests encoded
    pub ok: usize,
    /// Requests rejected
    pub failed: usize,
}

impl BatchStats {
    /// Count outcomes
    pub fn from_results<T, E>(results: &[Result<T, E>]) -> Self {
        let ok = results.iter().filter(|r| r.is_ok()).count();
        Self {
            ok,
            failed: results.len() - ok,
        }
    }
}

/// Synthetic request count for benches from `QRPH_BENCH_REQUESTS`
///
/// Defaults to 1000 when unset, `0` or unparsable.
pub fn bench_requests_from_env() -> usize {
    match env::var("QRPH_BENCH_REQUESTS") {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&v| v > 0)
            .unwrap_or(1000),
        Err(_) => 1000,
    }
}

/// Deterministic synthetic requests for benches
pub fn synthetic_requests(count: usize) -> Vec<PaymentRequest> {
    (0..count)
        .map(|i| {
            PaymentRequest::new(
                format!("0917{:07}", i % 10_000_000),
                format!("Payee {i}"),
                Amount::from_centavos((i as u64 * 1_337) % 10_000_000),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn write_temp_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("qrph_requests_{nanos}_{sequence}.csv"));
        fs::write(&path, contents).expect("failed to write temp request file");
        path
    }

    #[test]
    fn parse_request_line_keeps_commas_in_name() {
        let request = parse_request_line("09171234567, Doe, Jane ,1250.5")
            .unwrap()
            .unwrap();
        assert_eq!(request.phone, "09171234567");
        assert_eq!(request.merchant_name, "Doe, Jane");
        assert_eq!(request.amount.to_string(), "1250.50");
    }

    #[test]
    fn parse_request_line_skips_comments() {
        assert_eq!(parse_request_line("# phone,name,amount"), Ok(None));
        assert_eq!(parse_request_line("   "), Ok(None));
    }

    #[test]
    fn parse_request_line_rejects_bad_amount() {
        assert!(parse_request_line("0917,Jane,abc").is_err());
        assert!(parse_request_line("0917").is_err());
    }

    #[test]
    fn load_requests_reports_line_number() {
        let path = write_temp_file("# header\n09171234567,Jane Doe,500\n09171234567,Bad\n");
        match load_requests(&path) {
            Err(ToolsError::InvalidLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_requests_reads_all_lines() {
        let path = write_temp_file("09171234567,Jane Doe,500\n\n09181234567,John Roe,0\n");
        let requests = load_requests(&path).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].merchant_name, "John Roe");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn encode_batch_preserves_order_and_errors() {
        let mut requests = synthetic_requests(50);
        requests[7].merchant_name.clear();
        let results = encode_batch(&PayloadEncoder::default(), &requests);
        assert_eq!(results.len(), 50);
        assert_eq!(results[7], Err(PayloadError::EmptyField("merchant_name")));
        for (request, result) in requests.iter().zip(&results).skip(8) {
            let payload = result.as_ref().unwrap();
            assert!(payload.as_str().contains(&request.merchant_name));
        }
        assert_eq!(
            BatchStats::from_results(&results),
            BatchStats { ok: 49, failed: 1 }
        );
    }
}
