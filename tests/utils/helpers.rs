/// Shared test helpers
use std::time::Duration;
use tokio::time::timeout;

/// Wall-clock budget for one test case.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Run blocking test code on the blocking pool and fail the test if it
/// exceeds [`TEST_TIMEOUT`]. Panics inside `work` are re-raised as-is.
pub async fn within_budget<T, F>(case: &str, work: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match timeout(TEST_TIMEOUT, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => value,
        Ok(Err(join_err)) if join_err.is_panic() => {
            std::panic::resume_unwind(join_err.into_panic())
        }
        Ok(Err(join_err)) => panic!("{} was cancelled: {}", case, join_err),
        Err(_) => panic!("{} timed out after {:?}", case, TEST_TIMEOUT),
    }
}
