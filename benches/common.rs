use rust_qrph::PaymentRequest;
use rust_qrph::tools::{bench_requests_from_env, synthetic_requests};

pub fn collect_requests() -> Vec<PaymentRequest> {
    synthetic_requests(bench_requests_from_env())
}
